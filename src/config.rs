use serde::Deserialize;
use std::collections::HashMap;

/// Elements of HTML that never have contents
const HTML_VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Options steering tag name and attribute grammars
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseConfig {
    /// Accept JSX-style tag names and attributes (`{...}` expressions, bare attributes)
    pub jsx: bool,
    /// Element names that are never pushed onto the open-element stack
    pub self_closing: HashMap<String, bool>,
}

impl ParseConfig {
    pub fn jsx() -> Self {
        Self {
            jsx: true,
            ..Default::default()
        }
    }

    /// Plain mode with the HTML void elements configured as self-closing
    pub fn html() -> Self {
        Self::default().with_self_closing(HTML_VOID_ELEMENTS)
    }

    pub fn with_jsx(mut self, jsx: bool) -> Self {
        self.jsx = jsx;
        self
    }

    pub fn with_self_closing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.self_closing
            .extend(names.into_iter().map(|name| (name.into(), true)));
        self
    }

    pub fn is_self_closing(&self, name: &str) -> bool {
        self.self_closing.get(name).copied().unwrap_or(false)
    }
}

#[cfg(test)]
#[test]
fn test_config_from_json() {
    let config: ParseConfig =
        serde_json::from_str(r#"{"jsx": true, "selfClosing": {"br": true, "p": false}}"#).unwrap();
    assert!(config.jsx);
    assert!(config.is_self_closing("br"));
    assert!(!config.is_self_closing("p"));
    assert!(!config.is_self_closing("div"));

    let config: ParseConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ParseConfig::default());
}

#[cfg(test)]
#[test]
fn test_html_preset() {
    let config = ParseConfig::html();
    assert!(!config.jsx);
    assert!(config.is_self_closing("img"));
    assert!(!config.is_self_closing("span"));
}
