//! Lenient evaluation of JSX brace expressions such as `{{color: 'red', size: 2,}}`.
//!
//! The expression is rewritten into JSON (single-quoted strings become
//! double-quoted, bare object keys get quoted, trailing commas go) and then
//! read with `serde_json`. Anything that still isn't JSON afterwards is an
//! [`ExpressionError`], which callers turn into the raw text.

use nom::{
    branch::alt,
    bytes::complete::{escaped, is_not, tag, take_while},
    character::complete::{anychar, char, multispace0, one_of, satisfy},
    combinator::{all_consuming, map, peek, recognize},
    multi::fold_many0,
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};
use serde_json::Value;
use std::borrow::Cow;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpressionError {
    #[error("could not normalize expression: {0}")]
    Syntax(String),
    #[error("expression is not a JSON literal: {0}")]
    Json(#[from] serde_json::Error),
}

/// Evaluate the interior of a brace expression (without the braces)
pub fn evaluate(expression: &str) -> Result<Value, ExpressionError> {
    let normalized = normalize(expression)?;
    Ok(serde_json::from_str(&normalized)?)
}

/// Rewrite a JavaScript-ish literal into JSON text
pub fn normalize(expression: &str) -> Result<String, ExpressionError> {
    let pieces = fold_many0(piece, String::new, |mut acc, p| {
        acc.push_str(&p);
        acc
    });
    match all_consuming(pieces)(expression) {
        Ok((_, normalized)) => Ok(normalized),
        Err(e) => Err(ExpressionError::Syntax(e.to_string())),
    }
}

fn piece(input: &str) -> IResult<&str, Cow<'_, str>> {
    alt((
        map(double_quoted, Cow::Borrowed),
        map(single_quoted, Cow::Owned),
        map(template_literal, Cow::Borrowed),
        map(trailing_comma, Cow::Borrowed),
        map(object_key, Cow::Owned),
        map(identifier, Cow::Borrowed),
        map(recognize(anychar), Cow::Borrowed),
    ))(input)
}

fn quoted_body<'a>(quote: char) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input: &'a str| {
        let excluded = if quote == '"' { "\\\"" } else if quote == '\'' { "\\'" } else { "\\`" };
        let esc = escaped(is_not(excluded), '\\', anychar);
        let esc_or_empty = alt((esc, tag("")));
        delimited(char(quote), esc_or_empty, char(quote))(input)
    }
}

/// `"..."` is already JSON
fn double_quoted(input: &str) -> IResult<&str, &str> {
    recognize(quoted_body('"'))(input)
}

/// `'...'` becomes `"..."`
fn single_quoted(input: &str) -> IResult<&str, String> {
    let (rest, body) = quoted_body('\'')(input)?;
    let mut out = String::with_capacity(body.len() + 2);
    out.push('"');
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out.push('"');
    Ok((rest, out))
}

/// Template literals may interpolate, so they are left alone and never parse as JSON
fn template_literal(input: &str) -> IResult<&str, &str> {
    recognize(quoted_body('`'))(input)
}

/// A comma directly before a closing bracket or brace is dropped
fn trailing_comma(input: &str) -> IResult<&str, &str> {
    map(
        tuple((char(','), multispace0, peek(one_of("]}")))),
        |(_, space, _)| space,
    )(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    ))(input)
}

/// `key:` becomes `"key":`
fn object_key(input: &str) -> IResult<&str, String> {
    map(
        terminated(pair(identifier, take_while(char::is_whitespace)), char(':')),
        |(key, space)| format!("\"{}\"{}:", key, space),
    )(input)
}

#[cfg(test)]
use serde_json::json;

#[cfg(test)]
#[test]
fn test_normalize() {
    assert_eq!(normalize("{a: 1, 'b': 'x',}").unwrap(), r#"{"a": 1, "b": "x"}"#);
    assert_eq!(normalize("[1, 2, ]").unwrap(), "[1, 2 ]");
    assert_eq!(normalize(r#"'say "hi"'"#).unwrap(), r#""say \"hi\"""#);
    assert_eq!(normalize(r"'it\'s'").unwrap(), r#""it's""#);
    // Colons inside strings are not keys
    assert_eq!(normalize(r#"{"url": "http://x"}"#).unwrap(), r#"{"url": "http://x"}"#);
    assert_eq!(normalize("`hello`").unwrap(), "`hello`");
}

#[cfg(test)]
#[test]
fn test_evaluate() {
    assert_eq!(evaluate("5").unwrap(), json!(5));
    assert_eq!(evaluate("true").unwrap(), json!(true));
    assert_eq!(evaluate("'text'").unwrap(), json!("text"));
    assert_eq!(
        evaluate("{color: 'red', sizes: [1, 2,], nested: {ok: null}}").unwrap(),
        json!({"color": "red", "sizes": [1, 2], "nested": {"ok": null}})
    );
    assert_eq!(evaluate("{'a': ''}").unwrap(), json!({"a": ""}));
}

#[cfg(test)]
#[test]
fn test_evaluate_failure() {
    assert!(matches!(evaluate("`hello`"), Err(ExpressionError::Json(_))));
    assert!(evaluate("() => go()").is_err());
    assert!(evaluate("props.value").is_err());
    assert!(evaluate("").is_err());
}
