//! Character reference decoding.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Runs to the next `;`, whether or not the reference in between is valid
    static ref REFERENCE: Regex = Regex::new(r"&[^;]+;").unwrap();
}

/// Decode a single `&...;` reference, returning it unchanged when it is not understood
pub fn decode_entity(raw: &str) -> String {
    let decoded = match raw.strip_prefix("&#") {
        Some(code) => decode_numeric(code.trim_end_matches(';')),
        None => decode_named(raw).map(String::from),
    };
    decoded.unwrap_or_else(|| raw.to_string())
}

/// Decode every reference in `text`
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    REFERENCE
        .replace_all(text, |caps: &Captures| decode_entity(&caps[0]))
        .into_owned()
}

fn decode_named(raw: &str) -> Option<&'static str> {
    let decoded = match raw {
        "&amp;" => "&",
        "&lt;" => "<",
        "&gt;" => ">",
        "&apos;" => "'",
        "&quot;" => "\"",
        "&nbsp;" => "\u{a0}",
        _ => return None,
    };
    Some(decoded)
}

/// Reads the leading digits only, so `&#12ab;` is the same as `&#12;`
fn decode_numeric(code: &str) -> Option<String> {
    let (digits, radix) = match code.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (code, 10),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let value = u32::from_str_radix(&digits[..end], radix).ok()?;
    char::from_u32(value).map(String::from)
}

#[cfg(test)]
#[test]
fn test_decode_entity() {
    assert_eq!(decode_entity("&#160;"), "\u{a0}");
    assert_eq!(decode_entity("&nbsp;"), "\u{a0}");
    assert_eq!(decode_entity("&#x03B8;"), "\u{3b8}");
    assert_eq!(decode_entity("&#X3b8;"), "\u{3b8}");
    assert_eq!(decode_entity("&lt;"), "<");
    assert_eq!(decode_entity("&gt;"), ">");
    assert_eq!(decode_entity("&apos;"), "'");
    assert_eq!(decode_entity("&quot;"), "\"");
    assert_eq!(decode_entity("&amp;"), "&");
}

#[cfg(test)]
#[test]
fn test_decode_unknown_entity() {
    assert_eq!(decode_entity("&foo;"), "&foo;");
    assert_eq!(decode_entity("&#;"), "&#;");
    assert_eq!(decode_entity("&#xzz;"), "&#xzz;");
    // Surrogates are not characters
    assert_eq!(decode_entity("&#xD800;"), "&#xD800;");
    assert_eq!(decode_entity("&#65abc;"), "A");
}

#[cfg(test)]
#[test]
fn test_decode_entities() {
    assert_eq!(decode_entities("&#160;&lt;&#x03B8;"), "\u{a0}<\u{3b8}");
    assert_eq!(decode_entities("fish &amp; chips"), "fish & chips");
    assert_eq!(decode_entities("no references"), "no references");
    // Greedy up to the next semicolon
    assert_eq!(decode_entities("a & b; &lt;"), "a & b; <");
    assert_eq!(decode_entities("&amp;lt;"), "&lt;");
}
