//! Rule-string driven validation for Rulegate
//!
//! Validates a mapping of named values against declarative rule
//! specifications such as `"required|string|max:5"`, stopping at the first
//! violation and rendering a human-readable message for it.
//!
//! Two kinds of problems are kept apart:
//!
//! - a [`ValidationError`] means the *data* is invalid and is reported
//!   through the validator's outcome;
//! - a [`ConfigurationError`] means the *rules* are broken (unknown rule,
//!   missing or non-numeric parameter, empty specification) and is returned
//!   as `Err`.
//!
//! # Examples
//!
//! ## Basic Validation
//!
//! ```
//! use rulegate_validation::Validator;
//!
//! let validator = Validator::new(
//!     [("name", "Ada"), ("email", "ada@example.com")],
//!     [("name", "required|alpha|max:20"), ("email", "required|email")],
//! )
//! .unwrap();
//!
//! assert!(validator.passes().unwrap());
//! ```
//!
//! ## Mixed Values From JSON
//!
//! ```
//! use rulegate_validation::Validator;
//! use serde_json::json;
//!
//! let validator = Validator::from_json(
//!     &json!({"age": 7, "role": "guest"}),
//!     &json!({"age": "required|between:18,99", "role": ["in:admin,user"]}),
//! )
//! .unwrap();
//!
//! assert!(validator.fails().unwrap());
//! assert_eq!(validator.message(), "The age must be between 18 and 99.");
//! ```
//!
//! ## Broken Rules
//!
//! ```
//! use rulegate_validation::{ConfigurationError, Validator};
//!
//! let validator = Validator::new([("age", 7)], [("age", "max")]).unwrap();
//! assert!(matches!(
//!     validator.passes(),
//!     Err(ConfigurationError::MissingParameters { .. })
//! ));
//! ```

mod errors;
mod loader;
mod message;
mod parser;
mod registry;
mod rules;
mod traits;
mod validator;
mod value;

pub mod validators;

pub use errors::*;
pub use loader::*;
pub use message::*;
pub use parser::*;
pub use registry::*;
pub use rules::*;
pub use traits::*;
pub use validator::*;
pub use value::*;
