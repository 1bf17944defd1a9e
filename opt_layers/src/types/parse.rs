//! Compiled parsers for command-line and environment text.
//!
//! Parsers never fail: text that cannot be converted is returned unchanged
//! as a string, so the type's validator reports the problem with the
//! type's description.

use std::fmt;
use std::sync::Arc;

use super::decl::ParseFn;
use crate::value::{Dict, Value};

pub(crate) enum Parser {
    Text(ParseFn),
    Elements(Option<Arc<Parser>>),
    Entries(Option<Arc<Parser>>),
}

impl Parser {
    pub(crate) fn parse(&self, text: &str) -> Value {
        match self {
            Self::Text(parse) => parse(text),
            Self::Elements(element) => parse_elements(text, element.as_deref()),
            Self::Entries(element) => parse_entries(text, element.as_deref()),
        }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(_) => f.write_str("Text"),
            Self::Elements(element) => f.debug_tuple("Elements").field(element).finish(),
            Self::Entries(element) => f.debug_tuple("Entries").field(element).finish(),
        }
    }
}

/// Structured text is decoded as JSON rather than split on commas.
fn looks_structured(text: &str) -> bool {
    matches!(text.chars().next(), Some('[' | '{' | '"' | '\''))
}

fn parse_item(text: &str, element: Option<&Parser>) -> Value {
    element.map_or_else(|| Value::from(text), |parser| parser.parse(text))
}

fn parse_json_item(item: serde_json::Value, element: Option<&Parser>) -> Value {
    match item {
        serde_json::Value::String(text) => parse_item(&text, element),
        other => Value::from(other),
    }
}

fn parse_elements(text: &str, element: Option<&Parser>) -> Value {
    let trimmed = text.trim();
    if looks_structured(trimmed) {
        return match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(serde_json::Value::Array(items)) => Value::Array(
                items
                    .into_iter()
                    .map(|item| parse_json_item(item, element))
                    .collect(),
            ),
            _ => Value::from(text),
        };
    }
    if trimmed.is_empty() {
        return Value::Array(Vec::new());
    }
    Value::Array(
        trimmed
            .split(',')
            .map(|item| parse_item(item.trim(), element))
            .collect(),
    )
}

fn parse_entries(text: &str, element: Option<&Parser>) -> Value {
    let trimmed = text.trim();
    if looks_structured(trimmed) {
        return match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(serde_json::Value::Object(entries)) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, parse_json_item(item, element)))
                    .collect(),
            ),
            _ => Value::from(text),
        };
    }
    let mut entries = Dict::new();
    for pair in trimmed.split(',').filter(|pair| !pair.trim().is_empty()) {
        let Some((key, item)) = pair.split_once('=') else {
            return Value::from(text);
        };
        entries.insert(key.trim().to_owned(), parse_item(item.trim(), element));
    }
    Value::Object(entries)
}
