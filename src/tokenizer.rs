use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Comments, then CDATA sections, text runs, bracketed tags and finally any stray bracket
    static ref TOKENS: Regex =
        Regex::new(r"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|[^<>]+|<[^<>]+>|[<>]").unwrap();
    static ref CDATA: Regex = Regex::new(r"(?s)^<!\[CDATA\[(.*?)\]\]>$").unwrap();
    static ref COMMENT: Regex = Regex::new(r"(?s)^<!--.*-->$").unwrap();
    static ref TAG: Regex = Regex::new(r"^<[^<>]+>$").unwrap();
}

/// A slice of the input, classified when the tree builder consumes it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// The raw contents of a `<![CDATA[...]]>` section
    CData(&'a str),
    /// Anything of the form `<...>`
    Tag(&'a str),
    Text(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(raw: &'a str) -> Self {
        if let Some(inner) = CDATA.captures(raw).and_then(|c| c.get(1)) {
            Token::CData(inner.as_str())
        } else if TAG.is_match(raw) || COMMENT.is_match(raw) {
            Token::Tag(raw)
        } else {
            Token::Text(raw)
        }
    }
}

/// Split markup into tags, CDATA sections and text runs.
///
/// Returns `None` when the input yields no tokens at all.
pub fn tokenize(xml: &str) -> Option<Vec<&str>> {
    let tokens: Vec<&str> = TOKENS.find_iter(xml).map(|m| m.as_str()).collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens)
    }
}

#[cfg(test)]
#[test]
fn test_tokenize_tags() {
    assert_eq!(tokenize("<br />"), Some(vec!["<br />"]));
    assert_eq!(
        tokenize("hello<br />world"),
        Some(vec!["hello", "<br />", "world"])
    );
    assert_eq!(
        tokenize(r#"<span class="outer"><span class="inner">hello<br />world</span></span>"#),
        Some(vec![
            r#"<span class="outer">"#,
            r#"<span class="inner">"#,
            "hello",
            "<br />",
            "world",
            "</span>",
            "</span>",
        ])
    );
}

#[cfg(test)]
#[test]
fn test_tokenize_stray_brackets() {
    assert_eq!(tokenize("a < b"), Some(vec!["a ", "<", " b"]));
    assert_eq!(tokenize("a > b"), Some(vec!["a ", ">", " b"]));
    assert_eq!(tokenize("<<a>"), Some(vec!["<", "<a>"]));
    assert_eq!(tokenize("<>"), Some(vec!["<", ">"]));
}

#[cfg(test)]
#[test]
fn test_tokenize_cdata_and_comments() {
    assert_eq!(
        tokenize("<a><![CDATA[<b>\n&amp;]]></a>"),
        Some(vec!["<a>", "<![CDATA[<b>\n&amp;]]>", "</a>"])
    );
    assert_eq!(
        tokenize("x<!-- a > b\n -->y"),
        Some(vec!["x", "<!-- a > b\n -->", "y"])
    );
}

#[cfg(test)]
#[test]
fn test_tokenize_empty() {
    assert_eq!(tokenize(""), None);
}

#[cfg(test)]
#[test]
fn test_classify() {
    assert_eq!(Token::classify("<![CDATA[x]]>"), Token::CData("x"));
    assert_eq!(Token::classify("<a href=\"/\">"), Token::Tag("<a href=\"/\">"));
    assert_eq!(Token::classify("<!-- > -->"), Token::Tag("<!-- > -->"));
    assert_eq!(Token::classify("<"), Token::Text("<"));
    assert_eq!(Token::classify("plain"), Token::Text("plain"));
}
