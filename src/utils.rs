use crate::ast::ScalarValue;

/// Attributes whose values multipath.conf conventionally writes in double
/// quotes, whatever the value looks like.
pub const QUOTED_KEYWORDS: &[&str] = &[
    "devnode",
    "features",
    "getuid_callout",
    "hardware_handler",
    "path_selector",
    "prio_args",
    "product",
    "product_blacklist",
    "revision",
    "vendor",
];

pub fn is_quoted_keyword(key: &str) -> bool {
    QUOTED_KEYWORDS.contains(&key)
}

/// True when `text` would not come back from the tokenizer as the same
/// single word if written bare. Quote characters only matter in front; inside
/// a bare word they are ordinary characters.
pub fn needs_quotes(text: &str) -> bool {
    text.starts_with(['"', '\''])
        || text.is_empty()
        || text
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '{' | '}' | '#'))
}

/// Wrap `text` in quotes. Double quotes unless the text itself contains one.
pub fn quote(text: &str) -> String {
    if text.contains('"') && !text.contains('\'') {
        format!("'{}'", text)
    } else {
        format!("\"{}\"", text)
    }
}

/// Render a value for the right-hand side of a `key value` line.
///
/// Text holding both quote characters cannot be closed by either, so it is
/// written bare even when quoting was asked for.
pub fn format_value(value: &ScalarValue, quoted: bool) -> String {
    let rendered = value.to_string();
    let quotable = !(rendered.contains('"') && rendered.contains('\''));
    if quoted && quotable { quote(&rendered) } else { rendered }
}

/// Quoting decision for a value that carries no explicit hint.
pub fn should_quote(key: &str, value: &ScalarValue) -> bool {
    is_quoted_keyword(key) || matches!(value, ScalarValue::Text(s) if needs_quotes(s))
}
