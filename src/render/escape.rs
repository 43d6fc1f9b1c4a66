//! MarkdownV2 Escaping
//!
//! The rendering dialect reserves a set of characters that must be
//! backslash-escaped in free-form text. Two sets exist: the basic set applied
//! to the whole assembled message, and an extra set some chat clients also
//! reject inside plain text (the formatting characters themselves).

/// Characters escaped in every rendered message
const RESERVED: &[char] = &['~', '>', '`', '#', '+', '-', '=', '{', '}', '.', '!'];

/// Additional characters escaped for free-form values under the strict dialect
const STRICT_EXTRA: &[char] = &['(', ')', '*', '_'];

/// Inserted after periods in token names so link-preview systems do not
/// mistake the name for a domain
pub const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';

/// How aggressively free-form values are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeDialect {
    /// Basic reserved set only
    #[default]
    Standard,
    /// Free-form values additionally get the formatting characters escaped
    Strict,
}

/// Backslash-escape the basic reserved set.
pub fn escape(text: &str) -> String {
    escape_chars(text, RESERVED)
}

/// Backslash-escape only the strict-dialect extra characters.
///
/// Applied to free-form fragments before assembly, never to the whole
/// message: the message's own formatting must survive.
pub fn escape_strict_extra(text: &str) -> String {
    escape_chars(text, STRICT_EXTRA)
}

/// Defuse domain-like token names: a zero-width non-joiner after each period.
pub fn defang(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        out.push(c);
        if c == '.' {
            out.push(ZERO_WIDTH_NON_JOINER);
        }
    }
    out
}

fn escape_chars(text: &str, set: &[char]) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if set.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
