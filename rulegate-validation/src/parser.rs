// Rule token parsing

use std::fmt;

/// The rule whose parameter is a single, unsplit pattern.
pub const REGEX_RULE: &str = "regex";

/// One parsed rule: a name plus positional parameters.
///
/// The raw form is the rule name optionally followed by `:` and its
/// parameters, e.g. `required`, `max:5`, `between:1,3` or
/// `regex:^[a-z]{2,4}$`.
///
/// Tokens compare equal when their rule names match.
#[derive(Debug, Clone, Eq)]
pub struct RuleToken {
    name: String,
    params: Vec<String>,
    raw: String,
}

impl RuleToken {
    /// Parse a raw token.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulegate_validation::RuleToken;
    ///
    /// let token = RuleToken::parse("between: 1, 3");
    /// assert_eq!(token.name(), "between");
    /// assert_eq!(token.params(), ["1", "3"]);
    ///
    /// let token = RuleToken::parse("regex:^[a-z]{1,3}$");
    /// assert_eq!(token.params(), ["^[a-z]{1,3}$"]);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let (name, params) = match raw.split_once(':') {
            None => (raw.trim(), Vec::new()),
            Some((name, rest)) => {
                let name = name.trim();
                (name, split_params(name, rest))
            }
        };

        Self {
            name: name.to_string(),
            params,
            raw: raw.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The token text as supplied.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for RuleToken {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn split_params(rule: &str, rest: &str) -> Vec<String> {
    if rule == REGEX_RULE {
        vec![rest.trim().to_string()]
    } else {
        rest.split(',').map(|p| p.trim().to_string()).collect()
    }
}
