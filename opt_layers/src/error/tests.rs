//! Tests for error rendering and aggregation.

use std::error::Error as _;

use rstest::rstest;

use super::*;
use crate::platform::{Platform, PlatformKey};
use crate::source::{DefaultOrigin, Provenance};
use crate::value::Value;

fn validation(reason: Option<&str>) -> ResolveError {
    ResolveError::Validation {
        option: "port".into(),
        provenance: Provenance::Env {
            variable: "PORT".into(),
        },
        value: Box::new(Value::from("eighty")),
        reason: reason.map(str::to_owned),
    }
}

#[rstest]
#[case(
    validation(Some("it is not a nonnegative integer")),
    "option \"port\" fails validation because it is not a nonnegative integer. \
     Value (from environment variable \"PORT\"): \"eighty\""
)]
#[case(
    validation(None),
    "option \"port\" fails validation. Value (from environment variable \"PORT\"): \"eighty\""
)]
#[case(
    ResolveError::Coercion {
        option: "ratio".into(),
        provenance: Provenance::Default { origin: DefaultOrigin::Declared },
        value: Box::new(Value::from(0.5)),
        reason: "it is not a percentage".into(),
    },
    "option \"ratio\" cannot be coerced because it is not a percentage. Value (default value): 0.5"
)]
#[case(
    ResolveError::RequiredMissing { option: "token".into() },
    "option \"token\" is required but was not provided"
)]
#[case(
    ResolveError::ambiguous("level", AmbiguousFlags::new(vec!["level".into(), "l".into(), "quiet".into()])),
    "option \"level\": command-line flags \"--level\", \"-l\" and \"--quiet\" must not be set simultaneously"
)]
fn renders_resolve_errors(#[case] err: ResolveError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn ambiguity_keeps_the_tokenizer_error_as_source() {
    let flags = AmbiguousFlags::new(vec!["port".into(), "p".into()]);
    let err = ResolveError::ambiguous("port", flags.clone());
    assert_eq!(err.option(), "port");
    assert_eq!(
        err.source().map(ToString::to_string),
        Some(flags.to_string())
    );
    assert_eq!(flags.flags(), ["port", "p"]);
}

#[rstest]
#[case(
    DeclarationError::InvalidShort { option: "port".into(), short: "pp".into() },
    "option \"port\": short flag \"pp\" must be a single ASCII letter"
)]
#[case(
    DeclarationError::RequiredWithDefault { option: "token".into() },
    "option \"token\" is required and therefore must not declare a default"
)]
#[case(
    DeclarationError::EnvName {
        option: "port".into(),
        variable: "A=B".into(),
        platform: PlatformKey::Platform(Platform::Linux),
        reasons: vec!["first".into(), "second".into()],
    },
    "option \"port\": environment variable \"A=B\" cannot be used on linux: first; second"
)]
#[case(
    DeclarationError::FlagCollision { option: "profile".into(), other: "port".into(), flag: "p".into() },
    "option \"profile\": command-line flag \"-p\" is already used by option \"port\""
)]
fn renders_declaration_errors(#[case] err: DeclarationError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn declaration_errors_name_the_option() {
    let invalid = DeclarationError::InvalidName { name: "X".into() };
    assert_eq!(invalid.option(), "X");
    assert!(invalid.to_string().starts_with("option name \"X\" is invalid"));

    let unknown = DeclarationError::UnknownType {
        option: "ratio".into(),
        type_name: "float".into(),
    };
    assert_eq!(unknown.option(), "ratio");
}

#[test]
fn duplicate_flags_render_in_command_line_form() {
    let long = ArgvError::DuplicateFlag { flag: "port".into() };
    let short = ArgvError::DuplicateFlag { flag: "p".into() };
    assert_eq!(long.to_string(), "command-line flag \"--port\" is set more than once");
    assert_eq!(short.to_string(), "command-line flag \"-p\" is set more than once");
}

#[test]
fn two_flags_are_joined_with_and() {
    let err = AmbiguousFlags::new(vec!["port".into(), "p".into()]);
    assert_eq!(
        err.to_string(),
        "command-line flags \"--port\" and \"-p\" must not be set simultaneously"
    );
}

#[test]
fn aggregate_numbers_each_error() {
    let errors: AggregatedErrors = [
        ResolveError::RequiredMissing {
            option: "host".into(),
        },
        validation(None),
    ]
    .into_iter()
    .collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.to_string(),
        "1: option \"host\" is required but was not provided\n\
         2: option \"port\" fails validation. Value (from environment variable \"PORT\"): \"eighty\""
    );
    let options: Vec<&str> = errors.iter().map(ResolveError::option).collect();
    assert_eq!(options, ["host", "port"]);
}

#[test]
fn empty_aggregate_renders_nothing() {
    let errors = AggregatedErrors::default();
    assert!(errors.is_empty());
    assert_eq!(errors.to_string(), "");
}

#[test]
fn layer_errors_wrap_figment_failures() {
    let err = LayerError::from(figment::Error::from(String::from("bad data")));
    assert!(err.to_string().starts_with("failed to extract configuration: bad data"));
    assert_eq!(
        LayerError::NotADictionary { kind: "array" }.to_string(),
        "configuration must be a dictionary, found array"
    );
}
