// Built-in rule predicates

use crate::errors::{ConfigResult, ConfigurationError};
use crate::value::AttributeValue;
use once_cell::sync::Lazy;
use regex::Regex;

// Common regex patterns
static ALPHA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("alpha pattern compiles"));

static ALPHA_NUM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("alpha_num pattern compiles"));

static NUM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("num pattern compiles"));

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]+([_\-.][a-zA-Z0-9]+)*@[a-zA-Z0-9]+([-.][a-zA-Z0-9]+)*\.[a-zA-Z0-9]+([-.][a-zA-Z0-9]+)*$",
    )
    .expect("email pattern compiles")
});

fn require_params(rule: &str, required: usize, params: &[String]) -> ConfigResult<()> {
    if params.len() < required {
        return Err(ConfigurationError::MissingParameters {
            rule: rule.to_string(),
            required,
            given: params.len(),
        });
    }
    Ok(())
}

fn number_param(rule: &str, param: &str) -> ConfigResult<f64> {
    param
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigurationError::InvalidNumber {
            rule: rule.to_string(),
            param: param.to_string(),
        })
}

fn text_matches(value: &AttributeValue, pattern: &Regex) -> bool {
    value.as_text().is_some_and(|s| pattern.is_match(s))
}

// Presence and type rules

/// `required`: present, not null, and not blank text.
pub fn required(_attribute: &str, value: &AttributeValue, _params: &[String]) -> ConfigResult<bool> {
    Ok(match value {
        AttributeValue::Null => false,
        AttributeValue::Text(s) => !s.trim().is_empty(),
        AttributeValue::Bool(_)
        | AttributeValue::Integer(_)
        | AttributeValue::Float(_)
        | AttributeValue::Unsupported(_) => true,
    })
}

/// `string`
pub fn string(_attribute: &str, value: &AttributeValue, _params: &[String]) -> ConfigResult<bool> {
    Ok(matches!(value, AttributeValue::Text(_)))
}

/// `bool`
pub fn boolean(_attribute: &str, value: &AttributeValue, _params: &[String]) -> ConfigResult<bool> {
    Ok(matches!(value, AttributeValue::Bool(_)))
}

/// `float`: integers do not count.
pub fn float(_attribute: &str, value: &AttributeValue, _params: &[String]) -> ConfigResult<bool> {
    Ok(matches!(value, AttributeValue::Float(_)))
}

// Text pattern rules

/// `alpha`
pub fn alpha(_attribute: &str, value: &AttributeValue, _params: &[String]) -> ConfigResult<bool> {
    Ok(text_matches(value, &ALPHA_REGEX))
}

/// `alpha_num`
pub fn alpha_num(
    _attribute: &str,
    value: &AttributeValue,
    _params: &[String],
) -> ConfigResult<bool> {
    Ok(text_matches(value, &ALPHA_NUM_REGEX))
}

/// `num`: digits supplied as text; numbers do not count.
pub fn num(_attribute: &str, value: &AttributeValue, _params: &[String]) -> ConfigResult<bool> {
    Ok(text_matches(value, &NUM_REGEX))
}

/// `email`
pub fn email(_attribute: &str, value: &AttributeValue, _params: &[String]) -> ConfigResult<bool> {
    Ok(text_matches(value, &EMAIL_REGEX))
}

/// `regex:<pattern>`: unanchored search, so anchor the pattern to match
/// the whole value.
pub fn pattern(_attribute: &str, value: &AttributeValue, params: &[String]) -> ConfigResult<bool> {
    require_params("regex", 1, params)?;

    let regex = Regex::new(&params[0]).map_err(|e| ConfigurationError::InvalidPattern {
        pattern: params[0].clone(),
        reason: e.to_string(),
    })?;

    Ok(text_matches(value, &regex))
}

// Membership and size rules

/// `in:a,b,...`
pub fn one_of(_attribute: &str, value: &AttributeValue, params: &[String]) -> ConfigResult<bool> {
    require_params("in", 1, params)?;

    Ok(value
        .as_param_string()
        .is_some_and(|s| params.iter().any(|p| *p == s)))
}

/// `min:n`
pub fn min(_attribute: &str, value: &AttributeValue, params: &[String]) -> ConfigResult<bool> {
    require_params("min", 1, params)?;
    let bound = number_param("min", &params[0])?;

    Ok(value.size().is_some_and(|size| size >= bound))
}

/// `max:n`
pub fn max(_attribute: &str, value: &AttributeValue, params: &[String]) -> ConfigResult<bool> {
    require_params("max", 1, params)?;
    let bound = number_param("max", &params[0])?;

    Ok(value.size().is_some_and(|size| size <= bound))
}

/// `size:n`
pub fn size(_attribute: &str, value: &AttributeValue, params: &[String]) -> ConfigResult<bool> {
    require_params("size", 1, params)?;
    let expected = number_param("size", &params[0])?;

    Ok(value.size().is_some_and(|size| size == expected))
}

/// `between:lo,hi`, inclusive.
pub fn between(_attribute: &str, value: &AttributeValue, params: &[String]) -> ConfigResult<bool> {
    require_params("between", 2, params)?;
    let lower = number_param("between", &params[0])?;
    let upper = number_param("between", &params[1])?;

    Ok(value.size().is_some_and(|size| size >= lower && size <= upper))
}

#[cfg(test)]
mod tests {
    use super::*;

    type Predicate = fn(&str, &AttributeValue, &[String]) -> ConfigResult<bool>;

    fn check(predicate: Predicate, value: impl Into<AttributeValue>, params: &[&str]) -> bool {
        let params: Vec<String> = params.iter().map(|s| s.to_string()).collect();
        predicate("foo", &value.into(), &params).unwrap()
    }

    fn check_err(predicate: Predicate, value: impl Into<AttributeValue>, params: &[&str]) -> ConfigurationError {
        let params: Vec<String> = params.iter().map(|s| s.to_string()).collect();
        predicate("foo", &value.into(), &params).unwrap_err()
    }

    #[test]
    fn test_required() {
        assert!(check(required, false, &[]));
        assert!(check(required, 1, &[]));
        assert!(check(required, 1.0, &[]));
        assert!(check(required, "bar", &[]));
        assert!(!check(required, AttributeValue::Null, &[]));
        assert!(!check(required, "", &[]));
        assert!(!check(required, " \t\n", &[]));
    }

    #[test]
    fn test_string() {
        assert!(check(string, "aPz", &[]));
        assert!(check(string, "", &[]));
        assert!(!check(string, true, &[]));
        assert!(!check(string, 1, &[]));
        assert!(!check(string, 1.0, &[]));
    }

    #[test]
    fn test_boolean() {
        assert!(check(boolean, false, &[]));
        assert!(check(boolean, true, &[]));
        assert!(!check(boolean, 1, &[]));
        assert!(!check(boolean, 1.0, &[]));
        assert!(!check(boolean, "a", &[]));
    }

    #[test]
    fn test_float_rejects_integers() {
        assert!(check(float, 0.0, &[]));
        assert!(check(float, -1.0, &[]));
        assert!(!check(float, 1, &[]));
        assert!(!check(float, true, &[]));
        assert!(!check(float, "a", &[]));
    }

    #[test]
    fn test_alpha() {
        assert!(check(alpha, "apz", &[]));
        assert!(check(alpha, "aPz", &[]));
        assert!(!check(alpha, "az09", &[]));
        assert!(!check(alpha, "09", &[]));
        assert!(!check(alpha, "", &[]));
        assert!(!check(alpha, false, &[]));
        assert!(!check(alpha, 1, &[]));
        assert!(!check(alpha, 1.0, &[]));
    }

    #[test]
    fn test_alpha_num() {
        assert!(check(alpha_num, "aPz09", &[]));
        assert!(check(alpha_num, "09", &[]));
        assert!(!check(alpha_num, "az09.", &[]));
        assert!(!check(alpha_num, "@$", &[]));
        assert!(!check(alpha_num, 1, &[]));
    }

    #[test]
    fn test_num_requires_text() {
        assert!(check(num, "09", &[]));
        assert!(check(num, "0123456789", &[]));
        assert!(!check(num, 9, &[]));
        assert!(!check(num, 1.0, &[]));
        assert!(!check(num, "az09.", &[]));
        assert!(!check(num, false, &[]));
    }

    #[test]
    fn test_email() {
        assert!(check(email, "abc@x.com", &[]));
        assert!(check(email, "a-b_c.z@x.com.cn", &[]));
        assert!(!check(email, "abc@x", &[]));
        assert!(!check(email, "ax.com", &[]));
        assert!(!check(email, "a..b@x.com", &[]));
        assert!(!check(email, 1, &[]));
    }

    #[test]
    fn test_pattern() {
        assert!(check(pattern, "123", &["[0-9]+"]));
        assert!(check(pattern, "a1c", &["[0-9]+"]));
        assert!(!check(pattern, "abc", &["^[0-9]+$"]));
        assert!(!check(pattern, true, &["[0-9]+"]));
        assert!(!check(pattern, 1, &["[0-9]+"]));
    }

    #[test]
    fn test_pattern_errors() {
        assert!(matches!(
            check_err(pattern, "x", &[]),
            ConfigurationError::MissingParameters { required: 1, given: 0, .. }
        ));
        assert!(matches!(
            check_err(pattern, "x", &["(unclosed"]),
            ConfigurationError::InvalidPattern { .. }
        ));
    }

    #[test]
    fn test_one_of() {
        assert!(check(one_of, 1, &["1", "3"]));
        assert!(check(one_of, 3.0, &["1", "3"]));
        assert!(check(one_of, 3.1, &["1", "3.1"]));
        assert!(check(one_of, "a", &["a", "b"]));
        assert!(!check(one_of, 3, &["1", "2"]));
        assert!(!check(one_of, "a", &["1", "2"]));
        assert!(!check(one_of, true, &["true"]));
    }

    #[test]
    fn test_max() {
        assert!(check(max, 3, &["3"]));
        assert!(check(max, 3.0, &["3.0"]));
        assert!(check(max, 3.1, &["3.1"]));
        assert!(check(max, "abc", &["3"]));
        assert!(!check(max, 3, &["1"]));
        assert!(!check(max, 3.0, &["1.0"]));
        assert!(!check(max, "abc", &["1"]));
        assert!(!check(max, true, &["1"]));
    }

    #[test]
    fn test_min() {
        assert!(check(min, 3, &["3"]));
        assert!(check(min, 3.1, &["3.1"]));
        assert!(check(min, "abc", &["3"]));
        assert!(!check(min, 1, &["3"]));
        assert!(!check(min, 1.0, &["3.0"]));
        assert!(!check(min, "a", &["3"]));
    }

    #[test]
    fn test_size() {
        assert!(check(size, 3, &["3"]));
        assert!(check(size, 3.0, &["3.0"]));
        assert!(check(size, "abc", &["3"]));
        assert!(check(size, "abc", &["3.0"]));
        assert!(!check(size, 1, &["3"]));
        assert!(!check(size, "a", &["3.0"]));
    }

    #[test]
    fn test_between() {
        assert!(check(between, 1, &["1", "3"]));
        assert!(check(between, 3, &["1", "3"]));
        assert!(check(between, 3.0, &["1", "3"]));
        assert!(check(between, "a", &["1", "3"]));
        assert!(check(between, "aPz", &["1", "3"]));
        assert!(!check(between, 3, &["1", "2"]));
        assert!(!check(between, "aPz", &["1", "2"]));
        assert!(!check(between, false, &["1", "2"]));
    }

    #[test]
    fn test_size_rules_reject_broken_params() {
        assert!(matches!(
            check_err(max, 1, &[]),
            ConfigurationError::MissingParameters { .. }
        ));
        assert!(matches!(
            check_err(between, 1, &["1"]),
            ConfigurationError::MissingParameters { required: 2, given: 1, .. }
        ));
        assert_eq!(
            check_err(min, "abc", &["three"]),
            ConfigurationError::InvalidNumber {
                rule: "min".into(),
                param: "three".into()
            }
        );
        // Broken even when the value is of the wrong type
        assert!(matches!(
            check_err(size, true, &["x"]),
            ConfigurationError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn test_one_of_requires_params() {
        assert!(matches!(
            check_err(one_of, "a", &[]),
            ConfigurationError::MissingParameters { .. }
        ));
    }
}
