// Validation and configuration errors

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for operations that can only fail because the rules
/// themselves are broken.
pub type ConfigResult<T> = std::result::Result<T, ConfigurationError>;

/// A mistake in the rule configuration, never in the data.
///
/// These abort the current validation pass and must not be shown to the
/// end user as a failed field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Rule specification with no tokens or with an empty token
    #[error("invalid rule for attribute {attribute}")]
    InvalidRule { attribute: String },

    /// Rule specification that is neither a string nor a list of strings
    #[error("invalid rule type for attribute {attribute}, string or list of strings expected")]
    InvalidRuleType { attribute: String },

    /// Rule name not present in the registry
    #[error("rule {0} not supported")]
    UnknownRule(String),

    /// Rule given fewer parameters than it needs
    #[error("rule {rule} requires at least {required} parameters, {given} given")]
    MissingParameters {
        rule: String,
        required: usize,
        given: usize,
    },

    /// Numeric parameter that does not parse
    #[error("invalid parameter {param:?} for rule {rule}, a number is required")]
    InvalidNumber { rule: String, param: String },

    /// `regex` parameter that does not compile
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Attribute document that is not an object
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Rule file could not be read
    #[error("failed to load rules: {0}")]
    Load(String),

    /// Rule file could not be parsed
    #[error("failed to parse rules: {0}")]
    Parse(String),
}

/// The first rule a value failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Attribute that failed validation
    pub attribute: String,

    /// Rendered, human-readable message
    pub message: String,

    /// Name of the rule that failed
    pub rule: String,

    /// Offending value, if it has a display form
    pub value: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(
        attribute: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            message: message.into(),
            rule: rule.into(),
            value: None,
        }
    }

    /// Set the offending value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "attribute": self.attribute,
            "rule": self.rule,
            "message": self.message,
            "value": self.value,
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}
