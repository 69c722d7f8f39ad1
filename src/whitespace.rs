use crate::dom::{Element, Node};

/// The whitespace set of ECMAScript `\s`: Unicode space separators, line
/// terminators and the byte order mark, but not U+0085
fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{b}' | '\u{c}' | '\r' | ' ' | '\u{a0}' | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}' | '\u{2029}' | '\u{202f}' | '\u{205f}' | '\u{3000}' | '\u{feff}'
    )
}

fn is_blank(text: &str) -> bool {
    text.chars().all(is_space)
}

/// Drop whitespace-only text nodes from a tree.
///
/// Returns `None` when `node` itself is whitespace-only text. Elements are
/// always kept, even if every child was removed.
pub fn strip_whitespace(node: Node) -> Option<Node> {
    match node {
        Node::Text(text) if is_blank(&text) => None,
        Node::Text(text) => Some(Node::Text(text)),
        Node::Element(Element {
            name,
            attributes,
            children,
        }) => Some(Node::Element(Element {
            name,
            attributes,
            children: children.into_iter().filter_map(strip_whitespace).collect(),
        })),
    }
}

#[cfg(test)]
#[test]
fn test_strip_whitespace() {
    assert_eq!(strip_whitespace(" \n\t".into()), None);
    assert_eq!(strip_whitespace("".into()), None);
    assert_eq!(strip_whitespace(" x ".into()), Some(" x ".into()));

    let tree: Node = Element::new(
        "a",
        None,
        vec![
            "  ".into(),
            Element::new("b", None, vec!["\n".into()]).into(),
            " keep ".into(),
        ],
    )
    .into();
    let stripped: Node = Element::new(
        "a",
        None,
        vec![Element::new("b", None, vec![]).into(), " keep ".into()],
    )
    .into();
    let once = strip_whitespace(tree);
    assert_eq!(once, Some(stripped));
    assert_eq!(once.clone().and_then(strip_whitespace), once);
}

#[cfg(test)]
#[test]
fn test_blank_character_set() {
    assert_eq!(strip_whitespace("\u{feff}\u{a0}\u{3000}".into()), None);
    assert_eq!(strip_whitespace("\u{85}".into()), Some("\u{85}".into()));
}
