//! Raw option declarations.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Deserializer, de};

use super::predicate::{CoerceFn, ValidateSpec};
use crate::computed::ComputedHandle;
use crate::platform::PlatformSpec;
use crate::source::SourceName;
use crate::value::Value;

/// Long-flag setting of a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagSetting {
    /// `true` uses the option name as the flag; `false` disables the
    /// command-line source.
    Enabled(bool),
    /// An explicit flag name, without leading dashes.
    Named(String),
}

impl From<bool> for FlagSetting {
    fn from(enabled: bool) -> Self {
        Self::Enabled(enabled)
    }
}

impl From<&str> for FlagSetting {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for FlagSetting {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// Environment setting of a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvSetting {
    /// `true` derives the variable from the option name; `false` disables
    /// the environment source.
    Enabled(bool),
    /// An explicit variable name.
    Named(String),
    /// Variable names per platform; platforms without an entry do not read
    /// the environment.
    PerPlatform(PlatformSpec<String>),
}

impl From<bool> for EnvSetting {
    fn from(enabled: bool) -> Self {
        Self::Enabled(enabled)
    }
}

impl From<&str> for EnvSetting {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for EnvSetting {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<PlatformSpec<String>> for EnvSetting {
    fn from(names: PlatformSpec<String>) -> Self {
        Self::PerPlatform(names)
    }
}

/// Flags that each set the option to a fixed value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValuesFlags {
    /// Each flag sets the option to its own name.
    List(Vec<String>),
    /// Each flag sets the option to the mapped value.
    Map(BTreeMap<String, Value>),
}

impl ValuesFlags {
    pub(crate) fn into_map(self) -> BTreeMap<String, Value> {
        match self {
            Self::List(flags) => flags
                .into_iter()
                .map(|flag| {
                    let value = Value::from(flag.as_str());
                    (flag, value)
                })
                .collect(),
            Self::Map(flags) => flags,
        }
    }
}

impl<const N: usize> From<[&str; N]> for ValuesFlags {
    fn from(flags: [&str; N]) -> Self {
        Self::List(flags.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<String>> for ValuesFlags {
    fn from(flags: Vec<String>) -> Self {
        Self::List(flags)
    }
}

impl From<BTreeMap<String, Value>> for ValuesFlags {
    fn from(flags: BTreeMap<String, Value>) -> Self {
        Self::Map(flags)
    }
}

/// Raw declaration of one option.
///
/// Built either with the chained setters or deserialized from data, where
/// `validate` may be a pattern string or an allow-list array:
///
/// ```rust
/// use opt_layers::OptionParams;
///
/// let params: OptionParams = serde_json::from_value(serde_json::json!({
///     "type": "string",
///     "short": "l",
///     "valuesFlags": ["debug", "info"],
///     "validate": ["debug", "info", "warn"],
/// }))?;
/// # let _ = params;
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct OptionParams {
    #[serde(default)]
    pub(crate) required: bool,
    #[serde(default)]
    pub(crate) default: Option<Value>,
    #[serde(skip)]
    pub(crate) computed_default: Option<ComputedHandle>,
    #[serde(default)]
    pub(crate) short: Option<String>,
    #[serde(default, rename = "type")]
    pub(crate) type_name: Option<String>,
    #[serde(default)]
    pub(crate) argv: Option<FlagSetting>,
    #[serde(default)]
    pub(crate) env: Option<EnvSetting>,
    #[serde(default, alias = "values_flags")]
    pub(crate) values_flags: Option<ValuesFlags>,
    #[serde(skip)]
    pub(crate) coerce: Option<Arc<CoerceFn>>,
    #[serde(default, deserialize_with = "deserialize_validate")]
    pub(crate) validate: Option<ValidateSpec>,
}

impl OptionParams {
    /// An empty declaration: no type, no flags, no environment variable and
    /// a `null` default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the value to come from the command line or the environment.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the literal default.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Compute the default with a registered handler.
    #[must_use]
    pub const fn computed_default(mut self, handle: ComputedHandle) -> Self {
        self.computed_default = Some(handle);
        self
    }

    /// Accept a single-letter flag.
    #[must_use]
    pub fn short(mut self, letter: impl Into<String>) -> Self {
        self.short = Some(letter.into());
        self
    }

    /// Use the parser and validator of a registered type.
    #[must_use]
    pub fn of_type(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    /// Configure the long flag.
    #[must_use]
    pub fn argv(mut self, setting: impl Into<FlagSetting>) -> Self {
        self.argv = Some(setting.into());
        self
    }

    /// Configure the environment variable.
    #[must_use]
    pub fn env(mut self, setting: impl Into<EnvSetting>) -> Self {
        self.env = Some(setting.into());
        self
    }

    /// Accept flags that each set a fixed value.
    #[must_use]
    pub fn values_flags(mut self, flags: impl Into<ValuesFlags>) -> Self {
        self.values_flags = Some(flags.into());
        self
    }

    /// Replace the type's parser with a custom coercion.
    #[must_use]
    pub fn coerce<F>(mut self, coerce: F) -> Self
    where
        F: Fn(&Value, SourceName) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.coerce = Some(Arc::new(coerce));
        self
    }

    /// Replace the type's validator.
    #[must_use]
    pub fn validate(mut self, spec: impl Into<ValidateSpec>) -> Self {
        self.validate = Some(spec.into());
        self
    }
}

impl fmt::Debug for OptionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionParams")
            .field("required", &self.required)
            .field("default", &self.default)
            .field("computed_default", &self.computed_default)
            .field("short", &self.short)
            .field("type", &self.type_name)
            .field("argv", &self.argv)
            .field("env", &self.env)
            .field("values_flags", &self.values_flags)
            .field("coerce", &self.coerce.as_ref().map(|_| "<fn>"))
            .field("validate", &self.validate)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValidate {
    Pattern(String),
    AllowList(Vec<Value>),
}

fn deserialize_validate<'de, D>(deserializer: D) -> Result<Option<ValidateSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawValidate>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawValidate::AllowList(values)) => Ok(Some(ValidateSpec::AllowList(values))),
        Some(RawValidate::Pattern(pattern)) => Regex::new(&pattern)
            .map(|compiled| Some(ValidateSpec::Pattern(compiled)))
            .map_err(de::Error::custom),
    }
}
