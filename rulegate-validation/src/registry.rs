// Rule registry

use crate::message::MessageTemplate;
use crate::traits::Rule;
use crate::validators;
use once_cell::sync::Lazy;
use rulegate_log::warn;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

static GLOBAL: Lazy<Arc<RuleRegistry>> = Lazy::new(|| Arc::new(RuleRegistry::builtin()));

/// A registered rule: predicate plus message template.
#[derive(Clone)]
pub struct RuleEntry {
    rule: Arc<dyn Rule>,
    message: MessageTemplate,
}

impl RuleEntry {
    pub fn new(rule: impl Rule + 'static, message: impl Into<MessageTemplate>) -> Self {
        Self {
            rule: Arc::new(rule),
            message: message.into(),
        }
    }

    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }

    pub fn message(&self) -> &MessageTemplate {
        &self.message
    }
}

impl fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEntry")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Immutable table of rules.
///
/// Maps rule names to their predicate and failure message. The built-in
/// table is shared process-wide through [`RuleRegistry::global`].
/// Independent registries with extra rules or different messages come from
/// [`RuleRegistry::builder`].
#[derive(Clone, Debug)]
pub struct RuleRegistry {
    rules: HashMap<String, RuleEntry>,
}

impl RuleRegistry {
    /// The fourteen built-in rules with their default messages.
    pub fn builtin() -> Self {
        let size_rule = |numeric: &'static str, text: &'static str| {
            MessageTemplate::by_type(numeric, text)
        };

        RuleRegistryBuilder::new()
            .rule(
                "alpha",
                validators::alpha,
                "The :attribute may only contain letters.",
            )
            .rule(
                "alpha_num",
                validators::alpha_num,
                "The :attribute may only contain letters and numbers.",
            )
            .rule(
                "between",
                validators::between,
                size_rule(
                    "The :attribute must be between :min and :max.",
                    "The :attribute must be between :min and :max characters.",
                ),
            )
            .rule(
                "bool",
                validators::boolean,
                "The :attribute field must be true or false.",
            )
            .rule(
                "email",
                validators::email,
                "The :attribute must be a valid email address.",
            )
            .rule("float", validators::float, "The :attribute must be a float.")
            .rule(
                "in",
                validators::one_of,
                "The :attribute field must be one of (:values).",
            )
            .rule(
                "max",
                validators::max,
                size_rule(
                    "The :attribute may not be greater than :max.",
                    "The :attribute may not be greater than :max characters.",
                ),
            )
            .rule(
                "min",
                validators::min,
                size_rule(
                    "The :attribute must be at least :min.",
                    "The :attribute must be at least :min characters.",
                ),
            )
            .rule(
                "num",
                validators::num,
                "The :attribute may only contain numbers.",
            )
            .rule(
                "regex",
                validators::pattern,
                "The :attribute format is invalid.",
            )
            .rule(
                "required",
                validators::required,
                "The :attribute field is required.",
            )
            .rule(
                "size",
                validators::size,
                size_rule(
                    "The :attribute must be :size.",
                    "The :attribute must be :size characters.",
                ),
            )
            .rule(
                "string",
                validators::string,
                "The :attribute must be a string.",
            )
            .build()
    }

    /// Shared built-in registry, constructed on first use.
    pub fn global() -> Arc<RuleRegistry> {
        Arc::clone(&*GLOBAL)
    }

    /// Builder seeded with the built-in rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulegate_validation::{AttributeValue, ConfigResult, RuleRegistry};
    ///
    /// let registry = RuleRegistry::builder()
    ///     .rule(
    ///         "even",
    ///         |_: &str, value: &AttributeValue, _: &[String]| -> ConfigResult<bool> {
    ///             Ok(matches!(value, AttributeValue::Integer(i) if i % 2 == 0))
    ///         },
    ///         "The :attribute must be even.",
    ///     )
    ///     .message("required", "Please fill in :attribute.")
    ///     .build();
    ///
    /// assert!(registry.contains("even"));
    /// assert!(!RuleRegistry::global().contains("even"));
    /// ```
    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder::from(&**GLOBAL)
    }

    pub fn get(&self, name: &str) -> Option<&RuleEntry> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for [`RuleRegistry`].
#[derive(Clone, Debug, Default)]
pub struct RuleRegistryBuilder {
    rules: HashMap<String, RuleEntry>,
}

impl RuleRegistryBuilder {
    /// An empty builder with no rules at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule, replacing any rule with the same name.
    pub fn rule(
        mut self,
        name: impl Into<String>,
        rule: impl Rule + 'static,
        message: impl Into<MessageTemplate>,
    ) -> Self {
        self.rules.insert(name.into(), RuleEntry::new(rule, message));
        self
    }

    /// Replace the message of an already registered rule.
    pub fn message(mut self, name: &str, message: impl Into<MessageTemplate>) -> Self {
        match self.rules.get_mut(name) {
            Some(entry) => entry.message = message.into(),
            None => warn!("Ignoring message override for unregistered rule '{}'", name),
        }
        self
    }

    pub fn build(self) -> RuleRegistry {
        RuleRegistry { rules: self.rules }
    }
}

impl From<&RuleRegistry> for RuleRegistryBuilder {
    fn from(registry: &RuleRegistry) -> Self {
        Self {
            rules: registry.rules.clone(),
        }
    }
}
