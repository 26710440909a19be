// Rule trait

use crate::errors::ConfigResult;
use crate::value::AttributeValue;

/// A rule predicate.
///
/// `Ok(false)` means the value failed the rule, including the case where
/// the rule does not apply to the value's type. `Err` is reserved for a
/// broken rule specification (missing or malformed parameters).
///
/// Any `Fn(&str, &AttributeValue, &[String]) -> ConfigResult<bool>` is a
/// rule.
pub trait Rule: Send + Sync {
    fn check(&self, attribute: &str, value: &AttributeValue, params: &[String])
    -> ConfigResult<bool>;
}

impl<F> Rule for F
where
    F: Fn(&str, &AttributeValue, &[String]) -> ConfigResult<bool> + Send + Sync,
{
    fn check(
        &self,
        attribute: &str,
        value: &AttributeValue,
        params: &[String],
    ) -> ConfigResult<bool> {
        self(attribute, value, params)
    }
}
