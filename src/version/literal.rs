//! Decomposition of a quoted version literal.
//!
//! A literal such as `"shadowc 1.1"` splits into the opening quote, a prefix
//! running up to the last space (`shadowc `) and the trailing value (`1.1`).
//! Only the value is replaced; quote and prefix are carried over verbatim.

use regex::Regex;
use std::sync::LazyLock;

/// Quote, greedy prefix ending in a space, then the value up to a closing quote.
static LITERAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(["`'])(.* )?(.*)["`']"#).expect("literal pattern is a valid regex")
});

/// The three segments of a version literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralParts<'a> {
    /// Opening quote character, reused as the closing quote
    pub quote: char,
    /// Everything up to and including the last space, possibly empty
    pub prefix: &'a str,
    /// The replaceable version token
    pub value: &'a str,
}

impl<'a> LiteralParts<'a> {
    /// Split raw literal text (quotes included).
    ///
    /// Returns `None` when the text doesn't contain a quoted segment, e.g.
    /// for numeric literals.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let captures = LITERAL_PATTERN.captures(raw)?;
        let quote = captures.get(1)?.as_str().chars().next()?;
        let prefix = captures.get(2).map_or("", |m| m.as_str());
        let value = captures.get(3).map_or("", |m| m.as_str());

        Some(Self {
            quote,
            prefix,
            value,
        })
    }

    /// Render the literal with `new_value` in place of the current value.
    pub fn with_value(&self, new_value: &str) -> String {
        let mut literal = String::with_capacity(self.prefix.len() + new_value.len() + 2);
        literal.push(self.quote);
        literal.push_str(self.prefix);
        literal.push_str(new_value);
        literal.push(self.quote);
        literal
    }
}

/// Explain why `value` can't be embedded between `quote` characters, if so.
pub fn unsafe_reason(quote: char, value: &str) -> Option<&'static str> {
    if value.contains(quote) {
        return Some("contains the delimiting quote character");
    }
    if value.contains(['\n', '\r']) {
        return Some("contains a line break");
    }
    if quote != '`' && value.contains('\\') {
        return Some("contains a backslash, which would start an escape sequence");
    }
    None
}
