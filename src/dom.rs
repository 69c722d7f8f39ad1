use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;

/// A node of the parsed tree
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Attributes(pub HashMap<String, AttributeValue>);

/// The value of a single attribute.
///
/// Plain markup only ever produces [`AttributeValue::String`]. JSX markup adds
/// presence-only attributes ([`AttributeValue::Bool`]) and brace expressions
/// that could be read as a JSON literal ([`AttributeValue::Json`]).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    String(String),
    Bool(bool),
    Json(serde_json::Value),
}

impl Attributes {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, AttributeValue)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (String, AttributeValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<serde_json::Value> for AttributeValue {
    fn from(v: serde_json::Value) -> Self {
        AttributeValue::Json(v)
    }
}

/// Build an [`Attributes`] map from `name => value` pairs
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::Attributes::empty()
    };
    ($($k:expr => $v:expr),+ $(,)?) => {
        $crate::Attributes(::std::collections::HashMap::from([
            $(($k.to_string(), $crate::AttributeValue::from($v))),+
        ]))
    };
}

impl Element {
    pub fn new(name: impl Display, attributes: Option<Attributes>, children: Vec<Node>) -> Self {
        Self {
            name: name.to_string(),
            attributes: attributes.unwrap_or_default(),
            children,
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Collect the child elements called `name`, descending into grandchildren
    /// when `recursive` is set
    pub fn get_elements_by_name(&self, name: &str, recursive: bool) -> Vec<&Element> {
        let mut found = Vec::new();
        for child in self.children.iter().filter_map(Node::as_element) {
            if child.name == name {
                found.push(child);
            }
            if recursive {
                found.extend(child.get_elements_by_name(name, true));
            }
        }
        found
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }

    /// Concatenated text of this node and all of its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(e) => e.children.iter().map(Node::text_content).collect(),
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

#[cfg(test)]
#[test]
fn test_get_elements_by_name() {
    let tree = Element::new(
        "ul",
        None,
        vec![
            Element::new("li", None, vec!["one".into()]).into(),
            Element::new(
                "li",
                None,
                vec![Element::new("ul", None, vec![Element::new("li", None, vec![]).into()]).into()],
            )
            .into(),
        ],
    );
    assert_eq!(tree.get_elements_by_name("li", false).len(), 2);
    assert_eq!(tree.get_elements_by_name("li", true).len(), 3);
    assert_eq!(Node::from(tree).text_content(), "one");
}

#[cfg(test)]
#[test]
fn test_serialize_shape() {
    let node: Node = Element::new(
        "a",
        Some(attributes!("href" => "/", "hidden" => true)),
        vec!["x".into()],
    )
    .into();
    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        serde_json::json!({
            "name": "a",
            "attributes": {"href": "/", "hidden": true},
            "children": ["x"],
        })
    );
}
