//! The builtin type tree.

use std::num::FpCategory;

use chrono::{DateTime, NaiveDate, NaiveTime};

use super::decl::TypeDecl;
use crate::value::{Temporal, Value};

/// Root of the builtin tree: primitives, temporal values, and arrays and
/// dictionaries of every validated primitive or temporal type.
pub(super) fn tree() -> TypeDecl {
    let primitives = primitive();
    let temporals = datetime();

    let mut element_types = Vec::new();
    collect_validated(&primitives, &mut element_types);
    collect_validated(&temporals, &mut element_types);

    let array = TypeDecl::leaf("array", "an array", |value| {
        matches!(value, Value::Array(_))
    })
    .children(element_types.iter().map(|(name, description)| {
        TypeDecl::array_of(
            format!("{name}[]"),
            format!("an array of {}", pluralize(description)),
            name.as_str(),
        )
    }));
    let object = TypeDecl::leaf("object", "a dictionary", |value| {
        matches!(value, Value::Object(_))
    })
    .children(element_types.iter().map(|(name, description)| {
        TypeDecl::dictionary_of(
            format!("{name}{{}}"),
            format!("a dictionary of {}", pluralize(description)),
            name.as_str(),
        )
    }));

    TypeDecl::group("any", "any").children([primitives, temporals, array, object])
}

fn primitive() -> TypeDecl {
    let number = TypeDecl::leaf("number", "a number", |value| {
        value.as_f64().is_some_and(f64::is_finite)
    })
    .parse(parse_number)
    .child(
        TypeDecl::leaf("unumber", "a nonnegative number", is_nonnegative).refines(),
    )
    .child(
        TypeDecl::leaf("int", "an integer", |value| {
            value.as_f64().is_some_and(is_integral)
        })
        .refines()
        .child(TypeDecl::leaf("uint", "a nonnegative integer", is_nonnegative).refines()),
    );

    let boolean = TypeDecl::leaf("boolean", "a boolean", |value| {
        matches!(value, Value::Bool(_))
    })
    .parse(parse_boolean);

    let string = TypeDecl::leaf("string", "a string", |value| {
        matches!(value, Value::String(_))
    })
    .parse(|text: &str| Value::from(text));

    TypeDecl::group("primitive", "a primitive").children([number, boolean, string])
}

fn datetime() -> TypeDecl {
    TypeDecl::leaf("datetime", "a datetime", |value| {
        matches!(value, Value::Temporal(_))
    })
    .parse(parse_datetime)
    .child(
        TypeDecl::leaf("date", "a date", |value| {
            matches!(value, Value::Temporal(Temporal::Date(_)))
        })
        .parse(|text| parse_date(text).unwrap_or_else(|| Value::from(text))),
    )
    .child(
        TypeDecl::leaf("time", "a time", |value| {
            matches!(value, Value::Temporal(Temporal::Time(_)))
        })
        .parse(|text| parse_time(text).unwrap_or_else(|| Value::from(text))),
    )
}

/// Name and description of every type in the subtree that owns a
/// validator, in pre-order.
fn collect_validated(decl: &TypeDecl, out: &mut Vec<(String, String)>) {
    if decl.has_validator() {
        out.push((decl.name().to_owned(), decl.description().to_owned()));
    }
    for child in &decl.children {
        collect_validated(child, out);
    }
}

/// `"a nonnegative integer"` becomes `"nonnegative integers"`.
fn pluralize(description: &str) -> String {
    let noun = description
        .strip_prefix("a ")
        .or_else(|| description.strip_prefix("an "))
        .unwrap_or(description);
    format!("{noun}s")
}

fn is_nonnegative(value: &Value) -> bool {
    value.as_f64().is_some_and(|number| number >= 0.0)
}

fn is_integral(number: f64) -> bool {
    matches!(number.fract().classify(), FpCategory::Zero)
}

fn parse_number(text: &str) -> Value {
    text.trim()
        .parse::<f64>()
        .map_or_else(|_| Value::from(text), Value::Number)
}

fn parse_boolean(text: &str) -> Value {
    if text.is_empty() || text.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else if text.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else {
        Value::from(text)
    }
}

fn parse_datetime(text: &str) -> Value {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|parsed| Value::from(Temporal::DateTime(parsed)))
        .or_else(|| parse_date(text))
        .or_else(|| parse_time(text))
        .unwrap_or_else(|| Value::from(text))
}

fn parse_date(text: &str) -> Option<Value> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .ok()
        .map(|parsed| Value::from(Temporal::Date(parsed)))
}

fn parse_time(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
        .map(|parsed| Value::from(Temporal::Time(parsed)))
}
