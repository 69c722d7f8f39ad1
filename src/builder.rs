use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::attributes::get_attributes;
use crate::config::ParseConfig;
use crate::dom::{Element, Node};
use crate::entities::decode_entities;
use crate::tokenizer::Token;

lazy_static! {
    static ref PLAIN_TAG: Regex = Regex::new(r"^</?([A-Za-z][A-Za-z0-9]*)([^<>]*?)/?>$").unwrap();
    /// JSX names may carry namespaces, dots and capitals
    static ref JSX_TAG: Regex = Regex::new(r"^</?([^\s<>/]+)([^<>]*?)/?>$").unwrap();
}

/// Text runs longer than this are reported when tracing at debug level
const LONG_TEXT: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("tag has no recognizable element name: {tag}")]
pub struct MalformedTagError {
    pub tag: String,
}

/// Build the (childless) element described by an opening or self-closing tag
pub fn build_element(tag: &str, config: &ParseConfig) -> Result<Element, MalformedTagError> {
    let pattern: &Regex = if config.jsx { &JSX_TAG } else { &PLAIN_TAG };
    let caps = pattern.captures(tag).ok_or_else(|| MalformedTagError {
        tag: tag.to_string(),
    })?;
    let attributes = get_attributes(&caps[2], config);
    Ok(Element::new(&caps[1], Some(attributes), vec![]))
}

#[derive(Debug, PartialEq, Eq)]
enum TagKind {
    Closing,
    /// Comments, doctypes and processing instructions
    Ignored,
    SelfClosing,
    Opening,
}

impl TagKind {
    fn of(tag: &str) -> Self {
        if tag.starts_with("</") {
            TagKind::Closing
        } else if tag.starts_with("<?") || tag.starts_with("<!") {
            TagKind::Ignored
        } else if tag.ends_with("/>") {
            TagKind::SelfClosing
        } else {
            TagKind::Opening
        }
    }
}

/// Parsing context holding the stack of open elements.
///
/// Tokens are fed in document order; an element is attached to its parent
/// once it is closed (or when [`TreeBuilder::finish`] unwinds the stack).
pub struct TreeBuilder<'c> {
    config: &'c ParseConfig,
    root: Vec<Node>,
    open: Vec<Element>,
}

impl<'c> TreeBuilder<'c> {
    pub fn new(config: &'c ParseConfig) -> Self {
        Self {
            config,
            root: vec![],
            open: vec![],
        }
    }

    /// Number of elements currently open
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root,
        }
    }

    pub fn feed(&mut self, token: &str) {
        match Token::classify(token) {
            Token::CData(text) => {
                trace!(len = text.len(), "cdata");
                self.children_mut().push(Node::Text(text.to_string()));
            }
            Token::Tag(tag) => self.tag(tag),
            Token::Text(text) => self.text(text),
        }
    }

    fn tag(&mut self, tag: &str) {
        let kind = TagKind::of(tag);
        trace!(?kind, tag, "tag");
        match kind {
            TagKind::Closing => self.close(),
            TagKind::Ignored => {}
            TagKind::SelfClosing | TagKind::Opening => match build_element(tag, self.config) {
                Ok(element) => {
                    if kind == TagKind::Opening && !self.config.is_self_closing(&element.name) {
                        self.open.push(element);
                    } else {
                        self.children_mut().push(Node::Element(element));
                    }
                }
                Err(e) => {
                    warn!(error = %e, "treating malformed tag as text");
                    self.text(tag);
                }
            },
        }
    }

    /// Closes whatever is open; the name of the closing tag is not checked
    fn close(&mut self) {
        match self.open.pop() {
            Some(element) => self.children_mut().push(Node::Element(element)),
            None => debug!("ignoring closing tag with nothing open"),
        }
    }

    fn text(&mut self, raw: &str) {
        if raw.len() > LONG_TEXT {
            debug!(len = raw.len(), "long text run");
        }
        let text = decode_entities(raw);
        let children = self.children_mut();
        // Rejoin text split by a stray bracket, but only directly after the first child
        if let [Node::Text(existing)] = children.as_mut_slice() {
            existing.push_str(&text);
        } else {
            children.push(Node::Text(text));
        }
    }

    /// Close everything still open and return the top-level nodes
    pub fn finish(mut self) -> Vec<Node> {
        while !self.open.is_empty() {
            self.close();
        }
        self.root
    }
}

/// Feed every token into `builder`
pub fn build_hierarchy<'t>(tokens: impl IntoIterator<Item = &'t str>, builder: &mut TreeBuilder) {
    for token in tokens {
        builder.feed(token);
    }
}

/// Build the tree for an already tokenized document
pub fn parse_tokens(tokens: &[&str], config: &ParseConfig) -> Vec<Node> {
    let mut builder = TreeBuilder::new(config);
    build_hierarchy(tokens.iter().copied(), &mut builder);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes;

    #[test]
    fn test_build_element() {
        let config = ParseConfig::default();
        assert_eq!(
            build_element(r#"<a href="/x" title="&lt;b&gt;">"#, &config),
            Ok(Element::new(
                "a",
                Some(attributes!("href" => "/x", "title" => "<b>")),
                vec![]
            ))
        );
        assert_eq!(
            build_element("<br/>", &config),
            Ok(Element::new("br", None, vec![]))
        );
        assert_eq!(
            build_element("<h1 class=\"t\" />", &config),
            Ok(Element::new("h1", Some(attributes!("class" => "t")), vec![]))
        );
        assert_eq!(
            build_element("<5 and y>", &config),
            Err(MalformedTagError {
                tag: "<5 and y>".to_string()
            })
        );
    }

    #[test]
    fn test_build_element_names() {
        let plain = ParseConfig::default();
        let jsx = ParseConfig::jsx();
        // The colon is part of the name, not a namespace
        assert_eq!(
            build_element("<ri:attachment/>", &jsx).map(|e| e.name),
            Ok("ri:attachment".to_string())
        );
        assert_eq!(
            build_element("<ri:attachment/>", &plain).map(|e| e.name),
            Ok("ri".to_string())
        );
        assert_eq!(
            build_element("<Foo.Bar enabled />", &jsx),
            Ok(Element::new("Foo.Bar", Some(attributes!("enabled" => true)), vec![]))
        );
    }

    #[test]
    fn test_parse_tokens() {
        let config = ParseConfig::default();
        assert_eq!(
            parse_tokens(&["<br />"], &config),
            vec![Element::new("br", None, vec![]).into()]
        );
        assert_eq!(
            parse_tokens(&["hello", "<br />", "world"], &config),
            vec![
                "hello".into(),
                Element::new("br", None, vec![]).into(),
                "world".into()
            ]
        );
    }

    #[test]
    fn test_unbalanced_close() {
        let config = ParseConfig::default();
        assert_eq!(
            parse_tokens(&["</a>", "x", "</b>", "<i>", "y"], &config),
            vec![
                "x".into(),
                Element::new("i", None, vec!["y".into()]).into()
            ]
        );
    }

    #[test]
    fn test_mismatched_close() {
        let config = ParseConfig::default();
        assert_eq!(
            parse_tokens(&["<a>", "<b>", "x", "</a>", "y", "</b>", "z"], &config),
            vec![
                Element::new(
                    "a",
                    None,
                    vec![Element::new("b", None, vec!["x".into()]).into(), "y".into()]
                )
                .into(),
                "z".into()
            ]
        );
    }

    #[test]
    fn test_configured_self_closing() {
        let config = ParseConfig::default().with_self_closing(["img"]);
        assert_eq!(
            parse_tokens(&["<p>", "<img src=\"a.png\">", "text", "</p>"], &config),
            vec![Element::new(
                "p",
                None,
                vec![
                    Element::new("img", Some(attributes!("src" => "a.png")), vec![]).into(),
                    "text".into()
                ]
            )
            .into()]
        );
    }

    #[test]
    fn test_ignored_tags() {
        let config = ParseConfig::default();
        assert_eq!(
            parse_tokens(
                &["<?xml version=\"1.0\"?>", "<!DOCTYPE html>", "<!-- note -->", "<a>", "</a>"],
                &config
            ),
            vec![Element::new("a", None, vec![]).into()]
        );
    }

    #[test]
    fn test_text_coalescing() {
        let config = ParseConfig::default();
        // Only a single existing text child is extended
        assert_eq!(
            parse_tokens(&["a ", "<", " b ", ">", " c"], &config),
            vec!["a < b > c".into()]
        );
        assert_eq!(
            parse_tokens(&["<br/>", "a ", "<", " b"], &config),
            vec![
                Element::new("br", None, vec![]).into(),
                "a ".into(),
                "<".into(),
                " b".into()
            ]
        );
    }

    #[test]
    fn test_malformed_tag_becomes_text() {
        let config = ParseConfig::default();
        assert_eq!(
            parse_tokens(&["x", "<5 and y>", "3"], &config),
            vec!["x<5 and y>3".into()]
        );
    }
}
