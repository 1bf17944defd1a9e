//! Unit tests for environment sources and name validation.

use rstest::rstest;

use super::*;
use crate::platform::{Platform, PlatformKey};

const LINUX: PlatformKey = PlatformKey::Platform(Platform::Linux);
const WIN32: PlatformKey = PlatformKey::Platform(Platform::Win32);

#[rstest]
#[case("PORT", LINUX)]
#[case("APP_LOG_LEVEL", WIN32)]
#[case("_private", PlatformKey::Default)]
fn accepts_safe_names(#[case] name: &str, #[case] platform: PlatformKey) {
    assert_eq!(validate_env_name(name, platform), EnvNameCheck::Ok);
}

#[test]
fn reserved_windows_names_warn() {
    let check = validate_env_name("PATH", WIN32);
    assert!(matches!(check, EnvNameCheck::Warning(_)), "got {check:?}");
    assert!(check.reasons().iter().any(|r| r.contains("reserved in Windows")));
}

#[test]
fn reserved_windows_names_ignore_case() {
    let check = validate_env_name("AppData", WIN32);
    assert!(matches!(check, EnvNameCheck::Warning(_)), "got {check:?}");
}

#[test]
fn reserved_posix_names_are_case_sensitive() {
    assert!(matches!(
        validate_env_name("HOME", LINUX),
        EnvNameCheck::Warning(_)
    ));
    assert_eq!(validate_env_name("home", LINUX), EnvNameCheck::Ok);
}

#[test]
fn space_is_rejected_with_code_point() {
    let check = validate_env_name("my var", LINUX);
    let EnvNameCheck::Error(reasons) = check else {
        panic!("expected an error, got {check:?}");
    };
    let reason = reasons.first().map(String::as_str).unwrap_or_default();
    assert!(reason.contains("\" \""), "reason: {reason}");
    assert!(reason.contains("code: 32"), "reason: {reason}");
    assert!(reason.contains("0x20"), "reason: {reason}");
    assert!(reason.contains("index 2"), "reason: {reason}");
}

#[test]
fn equals_sign_is_rejected_on_posix() {
    assert!(validate_env_name("A=B", LINUX).is_error());
}

#[rstest]
#[case("APP.PORT")]
#[case("app-port")]
#[case("(x86)")]
fn windows_punctuation_is_allowed_but_unsafe(#[case] name: &str) {
    let check = validate_env_name(name, WIN32);
    assert!(matches!(check, EnvNameCheck::Warning(_)), "{name}: {check:?}");
}

#[test]
fn windows_rejects_characters_posix_allows() {
    assert!(validate_env_name("A:B", WIN32).is_error());
    assert!(!validate_env_name("A:B", LINUX).is_error());
}

#[test]
fn union_keys_collect_both_families() {
    let check = validate_env_name("A:B C", PlatformKey::Default);
    let EnvNameCheck::Error(reasons) = check else {
        panic!("expected an error, got {check:?}");
    };
    assert_eq!(reasons.len(), 2, "reasons: {reasons:?}");
    assert!(reasons.iter().any(|r| r.contains("POSIX")));
    assert!(reasons.iter().any(|r| r.contains("Windows")));
}

#[test]
fn posix_key_does_not_apply_windows_rules() {
    assert_eq!(validate_env_name("PATHEXT", PlatformKey::Posix), EnvNameCheck::Ok);
}

#[test]
fn empty_names_are_errors() {
    assert!(validate_env_name("", LINUX).is_error());
}

#[test]
fn map_env_is_case_sensitive() {
    let mut env = MapEnv::from_pairs([("PORT", "9000")]);
    assert_eq!(env.get("PORT").as_deref(), Some("9000"));
    assert_eq!(env.get("Port"), None);
    env.set("Port", "1");
    assert_eq!(env.get("Port").as_deref(), Some("1"));
    assert_eq!(env.remove("PORT").as_deref(), Some("9000"));
    assert_eq!(env.get("PORT"), None);
}

#[test]
fn std_env_reads_the_live_environment() -> anyhow::Result<()> {
    figment::Jail::try_with(|jail| {
        jail.set_env("OPT_LAYERS_ENV_PROBE", "present");
        if StdEnv.get("OPT_LAYERS_ENV_PROBE").as_deref() != Some("present") {
            return Err(figment::Error::from("expected variable to be visible"));
        }
        Ok(())
    })?;
    Ok(())
}
