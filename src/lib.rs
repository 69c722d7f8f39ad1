//! A lenient parser for XML-like and JSX-like markup.
//!
//! Markup is cut into tokens with a handful of regular expressions and then
//! folded into a tree of [`Node`]s. Malformed input is never rejected: stray
//! brackets become text, unbalanced closing tags are ignored and brace
//! expressions that are not JSON literals keep their raw text.

/// Attribute lists, plain and JSX
mod attributes;
/// Element and tree construction from tokens
mod builder;
mod config;
/// Parsed tree
mod dom;
mod entities;
/// JSX brace expressions
pub mod expression;
mod tokenizer;
mod whitespace;

#[cfg(test)]
mod tests;

pub use attributes::get_attributes;
pub use builder::{build_element, build_hierarchy, parse_tokens, MalformedTagError, TreeBuilder};
pub use config::ParseConfig;
pub use dom::*;
pub use entities::{decode_entities, decode_entity};
pub use tokenizer::{tokenize, Token};
pub use whitespace::strip_whitespace;

use tracing::{debug_span, trace};

/// Parse plain markup with the default configuration
pub fn parse(xml: &str, ignore_whitespace: bool) -> Vec<Node> {
    parse_with_config(xml, ignore_whitespace, &ParseConfig::default())
}

/// Parse JSX-flavoured markup
pub fn parse_jsx(xml: &str, ignore_whitespace: bool) -> Vec<Node> {
    parse_with_config(xml, ignore_whitespace, &ParseConfig::jsx())
}

pub fn parse_with_config(xml: &str, ignore_whitespace: bool, config: &ParseConfig) -> Vec<Node> {
    let span = debug_span!("parse", len = xml.len(), jsx = config.jsx);
    let _enter = span.enter();
    let tokens = tokenize(xml).unwrap_or_default();
    trace!(count = tokens.len(), "tokenized");
    let nodes = parse_tokens(&tokens, config);
    if ignore_whitespace {
        nodes.into_iter().filter_map(strip_whitespace).collect()
    } else {
        nodes
    }
}
