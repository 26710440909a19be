// Failure message templates

use crate::value::SemanticType;
use std::borrow::Cow;

/// Message template for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTemplate {
    /// Same text whatever the value's type
    Single(Cow<'static, str>),
    /// Different text for numbers and for text
    ByType {
        numeric: Cow<'static, str>,
        text: Cow<'static, str>,
    },
}

impl MessageTemplate {
    pub fn single(template: impl Into<Cow<'static, str>>) -> Self {
        MessageTemplate::Single(template.into())
    }

    pub fn by_type(
        numeric: impl Into<Cow<'static, str>>,
        text: impl Into<Cow<'static, str>>,
    ) -> Self {
        MessageTemplate::ByType {
            numeric: numeric.into(),
            text: text.into(),
        }
    }

    /// Pick the template text for a value of the given type.
    pub fn select(&self, kind: SemanticType) -> &str {
        match (self, kind) {
            (MessageTemplate::Single(t), _) => &**t,
            (MessageTemplate::ByType { numeric, .. }, SemanticType::Numeric) => &**numeric,
            (MessageTemplate::ByType { text, .. }, SemanticType::Text) => &**text,
        }
    }

    /// Select and render in one step.
    pub fn render(
        &self,
        kind: SemanticType,
        attribute: &str,
        rule: &str,
        params: &[String],
    ) -> String {
        render(self.select(kind), attribute, rule, params)
    }
}

impl From<&'static str> for MessageTemplate {
    fn from(template: &'static str) -> Self {
        MessageTemplate::single(template)
    }
}

impl From<String> for MessageTemplate {
    fn from(template: String) -> Self {
        MessageTemplate::single(template)
    }
}

/// Named placeholders and the parameter index each one takes.
fn named_placeholders(rule: &str) -> &'static [(&'static str, usize)] {
    match rule {
        "size" => &[(":size", 0)],
        "max" => &[(":max", 0)],
        "min" => &[(":min", 0)],
        "between" => &[(":min", 0), (":max", 1)],
        _ => &[],
    }
}

/// Substitute placeholders in `template`.
///
/// - `:attribute` - the attribute name
/// - `:min`, `:max`, `:size` - named bounds, only for the size rules
///   (`min`, `max`, `size`, `between`)
/// - `:values` - all parameters joined with `,`; the built-in `in` message
///   uses it, and custom templates of any rule may too
/// - `:param0`, `:param1`, ... - positional parameters, for any rule
///
/// `:attribute` is substituted after the parameters.
pub fn render(template: &str, attribute: &str, rule: &str, params: &[String]) -> String {
    let mut message = template.to_string();

    for (placeholder, index) in named_placeholders(rule) {
        if let Some(param) = params.get(*index) {
            message = message.replace(placeholder, param);
        }
    }

    if message.contains(":values") {
        message = message.replace(":values", &params.join(","));
    }

    // Highest index first so `:param1` does not eat the prefix of `:param10`
    for (index, param) in params.iter().enumerate().rev() {
        let placeholder = format!(":param{}", index);
        if message.contains(&placeholder) {
            message = message.replace(&placeholder, param);
        }
    }

    message.replace(":attribute", attribute)
}
