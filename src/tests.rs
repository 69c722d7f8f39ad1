use super::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn br() -> Node {
    Element::new("br", None, vec![]).into()
}

#[test]
fn test_parse_self_closing() {
    assert_eq!(parse("<br />", false), vec![br()]);
    assert_eq!(
        parse("hello<br />world", false),
        vec!["hello".into(), br(), "world".into()]
    );
}

#[test]
fn test_parse_nested() {
    init_tracing();
    let i = r#"<span class="outer"><span class="inner">hello<br/>world</span></span>"#;
    let target: Node = Element::new(
        "span",
        Some(attributes!("class" => "outer")),
        vec![Element::new(
            "span",
            Some(attributes!("class" => "inner")),
            vec!["hello".into(), br(), "world".into()],
        )
        .into()],
    )
    .into();
    assert_eq!(parse(i, false), vec![target]);
}

#[test]
fn test_parse_plain_text() {
    for t in ["hello", "  spaced  out ", "line\nbreaks", "x = y; z"] {
        assert_eq!(parse(t, false), vec![t.into()]);
    }
    assert!(parse("", false).is_empty());
    assert!(parse("", true).is_empty());
}

#[test]
fn test_parse_attribute_entities() {
    assert_eq!(
        parse(r#"<name attr="a &amp; &#x03B8;">text &lt;ok&gt;</name>"#, false),
        vec![Element::new(
            "name",
            Some(attributes!("attr" => "a & \u{3b8}")),
            vec!["text <ok>".into()]
        )
        .into()]
    );
}

#[test]
fn test_self_closing_equivalence() {
    let config = ParseConfig::default().with_self_closing(["br"]);
    assert_eq!(parse_with_config("<br/>", false, &config), vec![br()]);
    assert_eq!(parse_with_config("<br></br>", false, &config), vec![br()]);
    assert_eq!(parse_with_config("<br>", false, &ParseConfig::html()), vec![br()]);
}

#[test]
fn test_ignore_whitespace() {
    assert_eq!(
        parse("<a>   </a>", true),
        vec![Element::new("a", None, vec![]).into()]
    );
    assert_eq!(
        parse("<a> x </a>", true),
        vec![Element::new("a", None, vec![" x ".into()]).into()]
    );
    assert_eq!(
        parse("\n<a>\n  <b>x</b>\n</a>\n", true),
        vec![Element::new(
            "a",
            None,
            vec![Element::new("b", None, vec!["x".into()]).into()]
        )
        .into()]
    );
}

#[test]
fn test_cdata_passthrough() {
    assert_eq!(
        parse("<a><![CDATA[<b>&amp;]]></a>", false),
        vec![Element::new("a", None, vec!["<b>&amp;".into()]).into()]
    );
}

#[test]
fn test_document() {
    let i = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE note>
<ac:structured-macro ac:name="info">
    <!-- a comment with > inside -->
    <ac:rich-text-body><p>Some paragraph</p></ac:rich-text-body>
    <ri:attachment ri:filename="a.png"/>
</ac:structured-macro>"#;
    let parsed = parse_jsx(i, true);
    assert_eq!(
        serde_json::to_value(&parsed).unwrap(),
        json!([{
            "name": "ac:structured-macro",
            "attributes": {"ac:name": "info"},
            "children": [
                {
                    "name": "ac:rich-text-body",
                    "attributes": {},
                    "children": [{"name": "p", "attributes": {}, "children": ["Some paragraph"]}],
                },
                {"name": "ri:attachment", "attributes": {"ri:filename": "a.png"}, "children": []},
            ],
        }])
    );
}

#[test]
fn test_parse_jsx() {
    init_tracing();
    let i = r#"<Card title="Hi" count={2} style={{width: 10,}} onClick={handleClick} disabled>
  <Icon name='star'/>
</Card>"#;
    let parsed = parse_jsx(i, true);
    assert_eq!(
        serde_json::to_value(&parsed).unwrap(),
        json!([{
            "name": "Card",
            "attributes": {
                "title": "Hi",
                "count": 2,
                "style": {"width": 10},
                "onClick": "handleClick",
                "disabled": true,
            },
            "children": [{"name": "Icon", "attributes": {"name": "star"}, "children": []}],
        }])
    );
    let card = parsed[0].as_element().unwrap();
    assert_eq!(
        card.get_attribute("count"),
        Some(&AttributeValue::Json(json!(2)))
    );
    assert_eq!(card.get_elements_by_name("Icon", false).len(), 1);
}

#[test]
fn test_inline_math() {
    assert_eq!(
        parse("<p>if a < b and c > d then</p>", false),
        vec![Element::new("p", None, vec!["if a < b and c > d then".into()]).into()]
    );
}

#[test]
fn test_unclosed_elements() {
    assert_eq!(
        parse("<a><b>text", false),
        vec![Element::new(
            "a",
            None,
            vec![Element::new("b", None, vec!["text".into()]).into()]
        )
        .into()]
    );
    assert_eq!(parse("</a></b>tail", false), vec!["tail".into()]);
}

#[test]
fn test_whitespace_idempotent() {
    let once = parse("<a> <b> </b> x <c/>\n</a>", true);
    let twice: Vec<Node> = once.clone().into_iter().filter_map(strip_whitespace).collect();
    assert_eq!(once, twice);
}

#[test]
fn test_tree_builder_depth() {
    let config = ParseConfig::default();
    let mut builder = TreeBuilder::new(&config);
    build_hierarchy(["<a>", "<b>", "x"], &mut builder);
    assert_eq!(builder.depth(), 2);
    build_hierarchy(["</b>"], &mut builder);
    assert_eq!(builder.depth(), 1);
    assert_eq!(
        builder.finish(),
        vec![Element::new(
            "a",
            None,
            vec![Element::new("b", None, vec!["x".into()]).into()]
        )
        .into()]
    );
}
