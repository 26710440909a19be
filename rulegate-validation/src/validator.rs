// Validator: runs a rule set against an input mapping

use crate::errors::{ConfigResult, ConfigurationError, ValidationError};
use crate::parser::RuleToken;
use crate::registry::RuleRegistry;
use crate::rules::{RuleSet, RuleSpec};
use crate::value::{AttributeValue, Attributes};
use once_cell::unsync::OnceCell;
use rulegate_log::{debug, trace, warn};
use serde_json::Value;
use std::sync::Arc;

/// The only rule evaluated against an absent or null attribute.
pub const REQUIRED_RULE: &str = "required";

static NULL: AttributeValue = AttributeValue::Null;

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Passed,
    /// The first failure; nothing after it was evaluated
    Failed(ValidationError),
}

impl ValidationOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, ValidationOutcome::Passed)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationOutcome::Passed => None,
            ValidationOutcome::Failed(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationOutcome::Passed => Ok(()),
            ValidationOutcome::Failed(error) => Err(error),
        }
    }
}

/// Validates one input mapping against one rule set.
///
/// The pass runs on the first call to [`passes`](Validator::passes),
/// [`fails`](Validator::fails) or [`outcome`](Validator::outcome); later
/// calls return the stored outcome.
///
/// # Examples
///
/// ```
/// use rulegate_validation::Validator;
///
/// let validator = Validator::new(
///     [("foo", "aPz")],
///     [("foo", "required|string|max:2")],
/// )
/// .unwrap();
///
/// assert!(validator.fails().unwrap());
/// assert_eq!(
///     validator.message(),
///     "The foo may not be greater than 2 characters."
/// );
/// ```
#[derive(Debug)]
pub struct Validator {
    registry: Arc<RuleRegistry>,
    attributes: Attributes,
    rules: RuleSet,
    outcome: OnceCell<ValidationOutcome>,
}

impl Validator {
    /// Create a validator using the global registry.
    ///
    /// Fails if any rule specification is malformed.
    pub fn new<D, K, V, R, N, S>(data: D, rules: R) -> ConfigResult<Self>
    where
        D: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
        R: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<RuleSpec>,
    {
        Ok(Self::from_parts(
            RuleRegistry::global(),
            data.into_iter().collect(),
            RuleSet::new(rules)?,
        ))
    }

    /// Create a validator from JSON documents: an object of values and an
    /// object of rule specifications.
    pub fn from_json(data: &Value, rules: &Value) -> ConfigResult<Self> {
        Ok(Self::from_parts(
            RuleRegistry::global(),
            Attributes::from_json(data)?,
            RuleSet::from_json(rules)?,
        ))
    }

    /// Create a validator from already built parts.
    pub fn from_parts(registry: Arc<RuleRegistry>, attributes: Attributes, rules: RuleSet) -> Self {
        Self {
            registry,
            attributes,
            rules,
            outcome: OnceCell::new(),
        }
    }

    /// Use a different registry. Discards any stored outcome.
    pub fn with_registry(mut self, registry: Arc<RuleRegistry>) -> Self {
        self.registry = registry;
        self.outcome = OnceCell::new();
        self
    }

    /// Whether every rule passed.
    pub fn passes(&self) -> ConfigResult<bool> {
        self.outcome().map(ValidationOutcome::passed)
    }

    /// Whether some rule failed.
    pub fn fails(&self) -> ConfigResult<bool> {
        self.passes().map(|passed| !passed)
    }

    /// Run the pass if it has not run yet and return its outcome.
    ///
    /// A configuration error is not stored and is returned again on the
    /// next call.
    pub fn outcome(&self) -> ConfigResult<&ValidationOutcome> {
        self.outcome.get_or_try_init(|| self.run())
    }

    /// The failure message, or `""` before a failing pass.
    pub fn message(&self) -> &str {
        self.error().map_or("", |error| error.message.as_str())
    }

    /// The failure, if a pass has run and failed.
    pub fn error(&self) -> Option<&ValidationError> {
        self.outcome.get().and_then(ValidationOutcome::error)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    fn run(&self) -> ConfigResult<ValidationOutcome> {
        for (attribute, tokens) in self.rules.iter() {
            let value = self.attributes.get(attribute);

            for token in tokens {
                match self.evaluate(attribute, value, token) {
                    Ok(None) => {}
                    Ok(Some(error)) => {
                        debug!("Validation failed on '{}' rule '{}'", attribute, token);
                        return Ok(ValidationOutcome::Failed(error));
                    }
                    Err(e) => {
                        warn!("Rule '{}' on '{}' is misconfigured: {}", token, attribute, e);
                        return Err(e);
                    }
                }
            }
        }

        Ok(ValidationOutcome::Passed)
    }

    /// `Ok(None)` when the rule passed or does not apply.
    fn evaluate(
        &self,
        attribute: &str,
        value: Option<&AttributeValue>,
        token: &RuleToken,
    ) -> ConfigResult<Option<ValidationError>> {
        let entry = self
            .registry
            .get(token.name())
            .ok_or_else(|| ConfigurationError::UnknownRule(token.name().to_string()))?;

        let value = match value {
            Some(value) if !value.is_null() => value,
            _ if token.name() != REQUIRED_RULE => {
                trace!("Skipping '{}' on absent '{}'", token, attribute);
                return Ok(None);
            }
            _ => &NULL,
        };

        trace!("Evaluating '{}' on '{}'", token, attribute);
        if entry.rule().check(attribute, value, token.params())? {
            return Ok(None);
        }

        let message = entry.message().render(
            value.semantic_type(),
            attribute,
            token.name(),
            token.params(),
        );

        let error = ValidationError::new(attribute, token.name(), message);
        Ok(Some(match value.display_value() {
            Some(shown) => error.with_value(shown),
            None => error,
        }))
    }
}
