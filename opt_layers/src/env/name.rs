//! Portability checks for environment variable names.

use uncased::UncasedStr;

use super::reserved;
use crate::platform::{Platform, PlatformKey};

const POSIX_ALLOWED: &str = "Valid characters in POSIX-compliant systems are in range from \
     \\u{9} (\"\\t\") to \\u{7e} (\"~\"), excluding \\u{20} (\" \") and \\u{3d} (\"=\")";
const WINDOWS_ALLOWED: &str =
    "Valid characters in Windows are alphanumerics and #$'()*+,-.?@[]_`{}~";
const WINDOWS_PUNCTUATION: &str = "#$'()*+,-.?@[]_`{}~";

/// Outcome of [`validate_env_name`].
///
/// Errors make the name unusable on at least one of the checked platforms.
/// Warnings flag names that work but are reserved or not portable to every
/// shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvNameCheck {
    /// The name is safe everywhere it was checked.
    Ok,
    /// The name is usable; each entry explains a portability concern.
    Warning(Vec<String>),
    /// The name is unusable; each entry explains a violation.
    Error(Vec<String>),
}

impl EnvNameCheck {
    /// Returns `true` when no findings were reported.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns `true` when the name is unusable.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Explanations attached to the result; empty for [`EnvNameCheck::Ok`].
    #[must_use]
    pub fn reasons(&self) -> &[String] {
        match self {
            Self::Ok => &[],
            Self::Warning(reasons) | Self::Error(reasons) => reasons,
        }
    }
}

/// Check whether `name` is a usable environment variable name on `platform`.
///
/// POSIX rules apply when `platform` matches `posix`, Windows rules when it
/// matches `win32`; union keys such as `default` apply both and collect every
/// finding.
///
/// ```rust
/// use opt_layers::{EnvNameCheck, Platform, PlatformKey, validate_env_name};
///
/// let linux = PlatformKey::Platform(Platform::Linux);
/// assert_eq!(validate_env_name("APP_PORT", linux), EnvNameCheck::Ok);
/// assert!(validate_env_name("my var", linux).is_error());
/// ```
#[must_use]
pub fn validate_env_name(name: &str, platform: PlatformKey) -> EnvNameCheck {
    if name.is_empty() {
        return EnvNameCheck::Error(vec!["name of environment variable is empty".to_owned()]);
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !is_safe_identifier(name) {
        warnings.push(
            "name of environment variable contains allowed but non-safe characters; a safe \
             name consists of alphanumerics and the underscore ([A-Za-z0-9_]) and does not \
             start with a digit"
                .to_owned(),
        );
    }

    if PlatformKey::Posix.matches(platform) {
        if let Some((index, bad)) = first_invalid(name, is_posix_char) {
            errors.push(bad_char_reason(bad, index, POSIX_ALLOWED));
        }
        if reserved::POSIX.contains(&name) {
            warnings.push(format!(
                "environment variable \"{name}\" is reserved in POSIX-compliant systems"
            ));
        }
    }

    if PlatformKey::Platform(Platform::Win32).matches(platform) {
        if let Some((index, bad)) = first_invalid(name, is_windows_char) {
            errors.push(bad_char_reason(bad, index, WINDOWS_ALLOWED));
        }
        let folded = UncasedStr::new(name);
        if reserved::WINDOWS
            .iter()
            .any(|candidate| UncasedStr::new(candidate) == folded)
        {
            warnings.push(format!(
                "environment variable \"{name}\" is reserved in Windows"
            ));
        }
    }

    if !errors.is_empty() {
        EnvNameCheck::Error(errors)
    } else if !warnings.is_empty() {
        EnvNameCheck::Warning(warnings)
    } else {
        EnvNameCheck::Ok
    }
}

fn is_safe_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

const fn is_posix_char(c: char) -> bool {
    matches!(c, '\t'..='~') && c != '=' && c != ' '
}

fn is_windows_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || WINDOWS_PUNCTUATION.contains(c)
}

fn first_invalid(name: &str, allowed: fn(char) -> bool) -> Option<(usize, char)> {
    name.chars().enumerate().find(|(_, c)| !allowed(*c))
}

fn bad_char_reason(bad: char, index: usize, allowed: &str) -> String {
    let code = u32::from(bad);
    let quoted = format!("{:?}", bad.to_string());
    format!("invalid character {quoted} (code: {code}, hex: 0x{code:x}) at index {index}. {allowed}")
}
