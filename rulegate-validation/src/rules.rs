// Rule set builder

use crate::errors::{ConfigResult, ConfigurationError};
use crate::parser::RuleToken;
use crate::value::json_kind;
use indexmap::IndexMap;
use rulegate_log::debug;
use serde_json::Value;

/// Separator between tokens in a joined specification.
pub const RULE_SEPARATOR: char = '|';

/// Rules for one attribute, as the caller supplies them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSpec {
    /// `"required|string|max:5"`
    Joined(String),
    /// `["required", "string", "max:5"]`
    Tokens(Vec<String>),
}

impl RuleSpec {
    /// Interpret a JSON value as a rule specification.
    ///
    /// Only strings and arrays of strings are accepted.
    pub fn from_json(attribute: &str, value: &Value) -> ConfigResult<Self> {
        let invalid = || ConfigurationError::InvalidRuleType {
            attribute: attribute.to_string(),
        };

        match value {
            Value::String(s) => Ok(RuleSpec::Joined(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                .collect::<ConfigResult<Vec<_>>>()
                .map(RuleSpec::Tokens),
            _ => Err(invalid()),
        }
    }

    fn into_raw_tokens(self) -> Vec<String> {
        match self {
            RuleSpec::Joined(s) => s.split(RULE_SEPARATOR).map(str::to_string).collect(),
            RuleSpec::Tokens(tokens) => tokens,
        }
    }
}

impl From<&str> for RuleSpec {
    fn from(value: &str) -> Self {
        RuleSpec::Joined(value.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(value: String) -> Self {
        RuleSpec::Joined(value)
    }
}

impl From<&String> for RuleSpec {
    fn from(value: &String) -> Self {
        RuleSpec::Joined(value.clone())
    }
}

impl From<Vec<String>> for RuleSpec {
    fn from(value: Vec<String>) -> Self {
        RuleSpec::Tokens(value)
    }
}

impl From<Vec<&str>> for RuleSpec {
    fn from(value: Vec<&str>) -> Self {
        RuleSpec::Tokens(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for RuleSpec {
    fn from(value: &[&str]) -> Self {
        RuleSpec::Tokens(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RuleSpec {
    fn from(value: [&str; N]) -> Self {
        RuleSpec::Tokens(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Normalized rules: attribute to its ordered, non-empty token list.
///
/// Attributes are kept in the order they were declared, which is also the
/// order the validator evaluates them in.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: IndexMap<String, Vec<RuleToken>>,
}

impl RuleSet {
    /// Build a rule set from `(attribute, spec)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulegate_validation::RuleSet;
    ///
    /// let rules = RuleSet::new([
    ///     ("name", "required|string|max:20"),
    ///     ("role", "in:admin,user"),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(rules.attributes().collect::<Vec<_>>(), ["name", "role"]);
    /// assert!(RuleSet::new([("name", "required||max:5")]).is_err());
    /// ```
    pub fn new<I, K, R>(rules: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: Into<RuleSpec>,
    {
        let mut set = IndexMap::new();

        for (attribute, spec) in rules {
            let attribute = attribute.into();
            let raw = spec.into().into_raw_tokens();

            if raw.is_empty() || raw.iter().any(|token| token.trim().is_empty()) {
                return Err(ConfigurationError::InvalidRule { attribute });
            }

            let tokens = raw.iter().map(|token| RuleToken::parse(token)).collect();
            set.insert(attribute, tokens);
        }

        debug!("Built rule set for {} attributes", set.len());
        Ok(Self { rules: set })
    }

    /// Build a rule set from a JSON object of specifications.
    pub fn from_json(document: &Value) -> ConfigResult<Self> {
        let Value::Object(map) = document else {
            return Err(ConfigurationError::InvalidInput(format!(
                "rules must be a JSON object, got {}",
                json_kind(document)
            )));
        };

        let specs = map
            .iter()
            .map(|(attribute, value)| {
                RuleSpec::from_json(attribute, value).map(|spec| (attribute.clone(), spec))
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Self::new(specs)
    }

    /// Tokens for one attribute.
    pub fn get(&self, attribute: &str) -> Option<&[RuleToken]> {
        self.rules.get(attribute).map(Vec::as_slice)
    }

    /// Attributes in evaluation order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleToken])> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(tokens: &[RuleToken]) -> Vec<&str> {
        tokens.iter().map(RuleToken::name).collect()
    }

    #[test]
    fn test_joined_spec() {
        let rules = RuleSet::new([("foo", "required|string|max:5")]).unwrap();
        let tokens = rules.get("foo").unwrap();

        assert_eq!(names(tokens), ["required", "string", "max"]);
        assert_eq!(tokens[2].params(), ["5"]);
    }

    #[test]
    fn test_token_list_spec() {
        let rules = RuleSet::new([("foo", vec!["required", "regex:a|b"])]).unwrap();
        let tokens = rules.get("foo").unwrap();

        // A pre-split list is not split again on `|`
        assert_eq!(names(tokens), ["required", "regex"]);
        assert_eq!(tokens[1].params(), ["a|b"]);
    }

    #[test]
    fn test_empty_spec_rejected() {
        let err = RuleSet::new([("foo", "")]).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidRule {
                attribute: "foo".into()
            }
        );

        assert!(RuleSet::new([("foo", Vec::<String>::new())]).is_err());
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(RuleSet::new([("foo", "required|")]).is_err());
        assert!(RuleSet::new([("foo", "required| |max:3")]).is_err());
        assert!(RuleSet::new([("foo", vec!["required", ""])]).is_err());
    }

    #[test]
    fn test_declaration_order_preserved() {
        let rules = RuleSet::new([("zeta", "required"), ("alpha", "string"), ("mid", "bool")])
            .unwrap();
        assert_eq!(rules.attributes().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_attribute_replaces_in_place() {
        let rules = RuleSet::new([("a", "required"), ("b", "string"), ("a", "bool")]).unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.attributes().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(names(rules.get("a").unwrap()), ["bool"]);
    }

    #[test]
    fn test_from_json() {
        let rules = RuleSet::from_json(&json!({
            "name": "required|alpha",
            "age": ["required", "between:1,120"],
        }))
        .unwrap();

        assert_eq!(rules.attributes().collect::<Vec<_>>(), ["name", "age"]);
        assert_eq!(rules.get("age").unwrap()[1].params(), ["1", "120"]);
    }

    #[test]
    fn test_from_json_rejects_other_types() {
        let err = RuleSet::from_json(&json!({"age": 3})).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidRuleType {
                attribute: "age".into()
            }
        );

        let err = RuleSet::from_json(&json!({"age": ["required", 3]})).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidRuleType { .. }));

        let err = RuleSet::from_json(&json!("required")).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidInput(_)));
    }
}
