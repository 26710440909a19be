// Rulegate - declarative rule-string validation for Rust
//
// This library validates named input values against rule specifications
// such as "required|string|max:5" and reports the first failure with a
// readable message.

// Re-export the validator
pub use rulegate_validation::*;

// Re-export the logging crate under its own name
pub use rulegate_log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AttributeValue,
        Attributes,
        ConfigResult,
        ConfigurationError,
        Rule,
        RuleLoader,
        RuleRegistry,
        RuleSet,
        ValidationError,
        ValidationOutcome,
        Validator,
    };
}
