//! Unit tests for declaration normalization.

use anyhow::{Result, anyhow, ensure};
use regex::Regex;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::computed::ComputedRegistry;
use crate::error::DeclarationError;
use crate::platform::{Platform, PlatformKey, PlatformSpec};
use crate::source::SourceName;
use crate::types::TypeRegistry;
use crate::value::Dict;

#[fixture]
fn types() -> TypeRegistry {
    TypeRegistry::builtin().unwrap_or_else(|err| panic!("builtin registry: {err}"))
}

fn linux(types: &TypeRegistry) -> Normalizer<'_> {
    Normalizer::new(types).for_platform(Platform::Linux)
}

#[rstest]
fn derives_flag_and_variable_from_the_name(types: TypeRegistry) -> Result<()> {
    let params = linux(&types).normalize("log-level", &OptionParams::new().argv(true).env(true))?;
    ensure!(params.name() == "log-level");
    ensure!(params.argv() == Some("log-level"));
    ensure!(params.env() == Some("LOG_LEVEL"));
    ensure!(params.short().is_none());
    ensure!(params.default_value() == &DefaultValue::Literal(Value::Null));
    ensure!(params.coerce().is_none() && params.validate().is_none());
    Ok(())
}

#[rstest]
fn omitted_sources_are_disabled(types: TypeRegistry) -> Result<()> {
    let params = linux(&types).normalize("port", &OptionParams::new())?;
    ensure!(params.argv().is_none() && params.env().is_none());
    let disabled = linux(&types).normalize("port", &OptionParams::new().argv(false).env(false))?;
    ensure!(disabled == params);
    Ok(())
}

#[rstest]
fn normalization_is_idempotent(types: TypeRegistry) -> Result<()> {
    let declaration = OptionParams::new()
        .of_type("uint[]")
        .short("p")
        .argv("ports")
        .env("APP_PORTS")
        .values_flags(["none"])
        .default_value(Value::Array(Vec::new()));
    let normalizer = linux(&types);
    let first = normalizer.normalize("ports", &declaration)?;
    let second = normalizer.normalize("ports", &declaration)?;
    ensure!(first == second, "{first:?} != {second:?}");
    Ok(())
}

#[rstest]
#[case("a")]
#[case("Port")]
#[case("1port")]
#[case("log--level")]
#[case("level-")]
#[case("-level")]
#[case("log_level")]
fn rejects_malformed_names(types: TypeRegistry, #[case] name: &str) {
    assert_eq!(
        linux(&types).normalize(name, &OptionParams::new()),
        Err(DeclarationError::InvalidName {
            name: name.to_owned()
        })
    );
}

#[rstest]
#[case("pp")]
#[case("1")]
#[case("")]
fn rejects_malformed_short_flags(types: TypeRegistry, #[case] short: &str) {
    assert_eq!(
        linux(&types).normalize("port", &OptionParams::new().short(short)),
        Err(DeclarationError::InvalidShort {
            option: "port".into(),
            short: short.to_owned()
        })
    );
}

#[rstest]
#[case("p")]
#[case("--port")]
#[case("Port")]
#[case("")]
fn rejects_malformed_long_flags(types: TypeRegistry, #[case] flag: &str) {
    assert_eq!(
        linux(&types).normalize("port", &OptionParams::new().argv(flag)),
        Err(DeclarationError::InvalidArgv {
            option: "port".into(),
            flag: flag.to_owned()
        })
    );
}

#[rstest]
fn rejects_unknown_types(types: TypeRegistry) {
    assert_eq!(
        linux(&types).normalize("ratio", &OptionParams::new().of_type("float")),
        Err(DeclarationError::UnknownType {
            option: "ratio".into(),
            type_name: "float".into()
        })
    );
}

#[rstest]
fn rejects_empty_variable_names(types: TypeRegistry) {
    let direct = linux(&types).normalize("port", &OptionParams::new().env(""));
    assert!(matches!(direct, Err(DeclarationError::InvalidEnv { .. })), "{direct:?}");

    let per_platform = PlatformSpec::new()
        .with(Platform::Win32, String::new())
        .with(Platform::Linux, "PORT".to_owned());
    let nested = linux(&types).normalize("port", &OptionParams::new().env(per_platform));
    assert!(matches!(nested, Err(DeclarationError::InvalidEnv { .. })), "{nested:?}");
}

#[rstest]
fn rejects_variable_names_unusable_on_the_platform(types: TypeRegistry) -> Result<()> {
    let err = linux(&types)
        .normalize("port", &OptionParams::new().env("MY PORT"))
        .err()
        .ok_or_else(|| anyhow!("expected an error"))?;
    let DeclarationError::EnvName {
        variable,
        platform,
        reasons,
        ..
    } = &err
    else {
        return Err(anyhow!("unexpected error {err:?}"));
    };
    ensure!(variable == "MY PORT");
    ensure!(*platform == PlatformKey::Platform(Platform::Linux));
    ensure!(!reasons.is_empty());
    ensure!(err.to_string().starts_with("option \"port\": environment variable \"MY PORT\""));
    Ok(())
}

#[rstest]
fn accepts_names_that_only_warn(types: TypeRegistry) -> Result<()> {
    let params = linux(&types).normalize("port", &OptionParams::new().env("app.port"))?;
    ensure!(params.env() == Some("app.port"));
    Ok(())
}

#[rstest]
#[case(Platform::Linux, Some("LINUX_PORT"))]
#[case(Platform::Darwin, Some("UNIX_PORT"))]
#[case(Platform::Win32, Some("PORT"))]
fn selects_per_platform_variables(
    types: TypeRegistry,
    #[case] platform: Platform,
    #[case] expected: Option<&str>,
) -> Result<()> {
    let names: PlatformSpec<String> = serde_json::from_value(json!({
        "linux": "LINUX_PORT",
        "posix": "UNIX_PORT",
        "default": "PORT",
    }))?;
    let params = Normalizer::new(&types)
        .for_platform(platform)
        .normalize("port", &OptionParams::new().env(names))?;
    ensure!(params.env() == expected, "{platform}: {:?}", params.env());
    Ok(())
}

#[rstest]
fn platforms_without_an_entry_skip_the_environment(types: TypeRegistry) -> Result<()> {
    let names = PlatformSpec::new().with(Platform::Win32, "APPDATA_PORT".to_owned());
    let params = linux(&types).normalize("port", &OptionParams::new().env(names))?;
    ensure!(params.env().is_none());
    Ok(())
}

#[rstest]
fn expands_value_flag_lists_into_identity_maps(types: TypeRegistry) -> Result<()> {
    let params = linux(&types)
        .normalize("log-level", &OptionParams::new().values_flags(["debug", "quiet"]))?;
    let flags = params.values_flags().ok_or_else(|| anyhow!("no value flags"))?;
    ensure!(flags.get("debug") == Some(&Value::from("debug")));
    ensure!(flags.get("quiet") == Some(&Value::from("quiet")));
    Ok(())
}

#[rstest]
#[case("Debug")]
#[case("log level")]
fn rejects_malformed_value_flags(types: TypeRegistry, #[case] flag: &str) {
    assert_eq!(
        linux(&types).normalize("log-level", &OptionParams::new().values_flags([flag])),
        Err(DeclarationError::InvalidValuesFlag {
            option: "log-level".into(),
            flag: flag.to_owned()
        })
    );
}

#[rstest]
fn required_options_reject_defaults(types: TypeRegistry) -> Result<()> {
    let with_default =
        linux(&types).normalize("token", &OptionParams::new().required().default_value("x"));
    ensure!(
        with_default
            == Err(DeclarationError::RequiredWithDefault {
                option: "token".into()
            })
    );

    let mut computed = ComputedRegistry::new();
    let handle = computed.register(|_| Value::from("x"));
    let with_computed = linux(&types)
        .with_computed(&computed)
        .normalize("token", &OptionParams::new().required().computed_default(handle));
    ensure!(matches!(with_computed, Err(DeclarationError::RequiredWithDefault { .. })));

    let null_default =
        linux(&types).normalize("token", &OptionParams::new().required().default_value(Value::Null))?;
    ensure!(null_default.is_required());
    Ok(())
}

#[rstest]
fn resolves_computed_defaults_through_the_registry(types: TypeRegistry) -> Result<()> {
    let mut computed = ComputedRegistry::new();
    let handle = computed.register(|_| Value::from(8000));
    let declaration = OptionParams::new().computed_default(handle).default_value(1);

    let missing = linux(&types).normalize("port", &declaration);
    ensure!(
        missing
            == Err(DeclarationError::UnknownComputed {
                option: "port".into()
            })
    );

    let params = linux(&types).with_computed(&computed).normalize("port", &declaration)?;
    let DefaultValue::Computed { handle: stored, .. } = params.default_value() else {
        return Err(anyhow!("expected a computed default"));
    };
    ensure!(*stored == handle);
    ensure!(params.default_value().evaluate(&Dict::new()) == Value::from(8000));
    Ok(())
}

#[rstest]
fn types_supply_coercion_and_validation(types: TypeRegistry) -> Result<()> {
    let params = linux(&types).normalize("port", &OptionParams::new().of_type("uint"))?;
    ensure!(params.type_name() == Some("uint"));
    let coerce = params.coerce().ok_or_else(|| anyhow!("no coercion"))?;
    ensure!(coerce.apply(&Value::from("42"), SourceName::Env) == Ok(Value::from(42)));
    let validate = params.validate().ok_or_else(|| anyhow!("no validation"))?;
    ensure!(validate.check(&Value::from(42), SourceName::Env).is_pass());
    ensure!(
        validate.check(&Value::from(-1), SourceName::Env)
            == Verdict::FailBecause("it is not a nonnegative integer".into())
    );
    Ok(())
}

#[rstest]
fn grouping_types_validate_without_coercing(types: TypeRegistry) -> Result<()> {
    let params = linux(&types).normalize("value", &OptionParams::new().of_type("primitive"))?;
    ensure!(params.coerce().is_none());
    ensure!(params.validate().is_some());
    Ok(())
}

#[rstest]
fn explicit_functions_replace_the_type(types: TypeRegistry) -> Result<()> {
    let params = linux(&types).normalize(
        "level",
        &OptionParams::new()
            .of_type("uint")
            .coerce(|value, _| Ok(value.clone()))
            .validate(Regex::new("^[a-z]+$")?),
    )?;
    ensure!(matches!(params.coerce(), Some(Coerce::Custom(_))));
    ensure!(matches!(params.validate(), Some(Predicate::Pattern(_))));
    ensure!(params.type_name() == Some("uint"));
    Ok(())
}

#[rstest]
fn lists_candidate_flags_in_lookup_order(types: TypeRegistry) -> Result<()> {
    let params = linux(&types).normalize(
        "log-level",
        &OptionParams::new()
            .argv(true)
            .short("l")
            .values_flags(["quiet", "debug"]),
    )?;
    let flags: Vec<&str> = params.candidate_flags().collect();
    ensure!(flags == ["log-level", "l", "debug", "quiet"], "{flags:?}");
    Ok(())
}

#[rstest]
fn deserializes_declarations(types: TypeRegistry) -> Result<()> {
    let declaration: OptionParams = serde_json::from_value(json!({
        "type": "string",
        "short": "l",
        "argv": true,
        "env": {"win32": "LOG_LEVEL", "posix": "APP_LOG_LEVEL"},
        "valuesFlags": {"verbose": "debug"},
        "validate": "^(debug|info)$",
        "default": "info",
    }))?;
    let params = linux(&types).normalize("log-level", &declaration)?;
    ensure!(params.env() == Some("APP_LOG_LEVEL"));
    ensure!(params.values_flags().and_then(|flags| flags.get("verbose")) == Some(&Value::from("debug")));
    ensure!(params.default_value() == &DefaultValue::Literal(Value::from("info")));
    let validate = params.validate().ok_or_else(|| anyhow!("no validation"))?;
    ensure!(validate.check(&Value::from("debug"), SourceName::Cli).is_pass());
    ensure!(!validate.check(&Value::from("trace"), SourceName::Cli).is_pass());

    let allow_list: OptionParams = serde_json::from_value(json!({"validate": [1, 2, 3]}))?;
    let level = linux(&types).normalize("level", &allow_list)?;
    ensure!(matches!(level.validate(), Some(Predicate::AllowList(values)) if values.len() == 3));
    Ok(())
}

#[rstest]
#[case(json!({"validate": "("}))]
#[case(json!({"flags": true}))]
#[case(json!({"env": {"beos": "PORT"}}))]
fn rejects_malformed_serialized_declarations(#[case] raw: serde_json::Value) {
    let parsed = serde_json::from_value::<OptionParams>(raw);
    assert!(parsed.is_err(), "{parsed:?}");
}

#[rstest]
fn option_sets_reject_duplicates_and_flag_collisions(types: TypeRegistry) -> Result<()> {
    let normalizer = linux(&types);
    let mut options = OptionSet::new();
    options.declare(&normalizer, "port", &OptionParams::new().argv(true).short("p"))?;
    options.declare(&normalizer, "host", &OptionParams::new().argv(true))?;

    let duplicate = options.declare(&normalizer, "port", &OptionParams::new());
    ensure!(
        duplicate
            == Err(DeclarationError::DuplicateOption {
                option: "port".into()
            })
    );

    let collision = options.declare(&normalizer, "profile", &OptionParams::new().short("p"));
    ensure!(
        collision
            == Err(DeclarationError::FlagCollision {
                option: "profile".into(),
                other: "port".into(),
                flag: "p".into()
            })
    );
    ensure!(
        collision.err().map(|err| err.to_string()).as_deref()
            == Some("option \"profile\": command-line flag \"-p\" is already used by option \"port\"")
    );

    ensure!(options.len() == 2);
    ensure!(options.owner("p") == Some("port"));
    ensure!(options.owner("profile").is_none());
    let names: Vec<&str> = options.iter().map(|(name, _)| name).collect();
    ensure!(names == ["host", "port"]);
    Ok(())
}
