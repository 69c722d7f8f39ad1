use lazy_static::lazy_static;
use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{eof, map, opt, peek},
    error::{Error, ErrorKind},
    sequence::{delimited, preceded, terminated},
    IResult,
};
use regex::Regex;
use tracing::debug;

use crate::config::ParseConfig;
use crate::dom::{AttributeValue, Attributes};
use crate::entities::decode_entities;
use crate::expression;

lazy_static! {
    /// `name="value"`, the only shape plain markup understands
    static ref PLAIN_ATTRIBUTE: Regex = Regex::new(r#"(?:^|\s)([A-Za-z:_-]+)="([^"]*)""#).unwrap();
}

/// Parse the attribute list of a single tag, e.g. ` class="a" id="b"`
pub fn get_attributes(input: &str, config: &ParseConfig) -> Attributes {
    if config.jsx {
        jsx_attributes(input)
    } else {
        plain_attributes(input)
    }
}

fn plain_attributes(input: &str) -> Attributes {
    PLAIN_ATTRIBUTE
        .captures_iter(input)
        .map(|caps| {
            (
                caps[1].to_string(),
                AttributeValue::String(decode_entities(&caps[2])),
            )
        })
        .collect()
}

/// Scan for attributes, stepping over anything that does not parse as one
fn jsx_attributes(input: &str) -> Attributes {
    let mut attributes = Attributes::empty();
    let mut rest = input;
    while !rest.is_empty() {
        let at_boundary = rest.len() == input.len() || rest.starts_with(char::is_whitespace);
        if at_boundary {
            if let Ok((remaining, (name, value))) = preceded(multispace0, jsx_attribute)(rest) {
                attributes.0.insert(name.to_string(), value);
                rest = remaining;
                continue;
            }
        }
        let mut chars = rest.chars();
        chars.next();
        rest = chars.as_str();
    }
    attributes
}

fn name_parser(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !"=\"'`{}<>/".contains(c))(input)
}

fn parse_single_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), take_while(|c: char| c != '\''), char('\''))(input)
}

fn parse_double_quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_while(|c: char| c != '"'), char('"'))(input)
}

/// `{...}` up to the matching close brace, returning the interior.
///
/// Braces inside string literals do not count towards nesting.
fn parse_brace_expression(input: &str) -> IResult<&str, &str> {
    let (body, _) = char('{')(input)?;
    let mut depth = 1usize;
    let mut quote = None;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&body[i + 1..], &body[..i]));
                }
            }
            _ => {}
        }
    }
    Err(nom::Err::Error(Error::new(input, ErrorKind::TakeUntil)))
}

fn expression_value(raw: &str) -> AttributeValue {
    match expression::evaluate(raw) {
        Ok(value) => AttributeValue::Json(value),
        Err(e) => {
            debug!(expression = raw, error = %e, "keeping brace expression as raw text");
            AttributeValue::String(raw.to_string())
        }
    }
}

fn value_parser(input: &str) -> IResult<&str, AttributeValue> {
    alt((
        preceded(char('='), map(parse_brace_expression, expression_value)),
        preceded(
            char('='),
            map(alt((parse_single_quoted, parse_double_quoted)), |v| {
                AttributeValue::String(decode_entities(v))
            }),
        ),
        // `name` or a dangling `name=` at the end of the list
        map(
            terminated(opt(char('=')), peek(alt((multispace1, eof)))),
            |_| AttributeValue::Bool(true),
        ),
    ))(input)
}

fn jsx_attribute(input: &str) -> IResult<&str, (&str, AttributeValue)> {
    let (rest, name) = name_parser(input)?;
    let (rest, value) = value_parser(rest)?;
    Ok((rest, (name, value)))
}
