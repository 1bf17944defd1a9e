//! Validation and normalization of raw declarations.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use super::params::{EnvSetting, FlagSetting, OptionParams};
use super::predicate::{Coerce, DefaultValue, Predicate};
use super::NormalizedParams;
use crate::argv::grammar;
use crate::computed::ComputedRegistry;
use crate::env::{EnvNameCheck, validate_env_name};
use crate::error::DeclarationError;
use crate::platform::PlatformKey;
use crate::types::{TypeHandle, TypeRegistry};
use crate::value::Value;

/// Turns [`OptionParams`] into [`NormalizedParams`].
///
/// Normalization is pure: the same declaration always yields equal
/// results for the same registry and platform.
///
/// ```rust
/// use opt_layers::{Normalizer, OptionParams, Platform, TypeRegistry};
///
/// let types = TypeRegistry::shared()?;
/// let normalizer = Normalizer::new(types).for_platform(Platform::Linux);
/// let params = normalizer.normalize("log-level", &OptionParams::new().argv(true).env(true))?;
/// assert_eq!(params.argv(), Some("log-level"));
/// assert_eq!(params.env(), Some("LOG_LEVEL"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Normalizer<'a> {
    types: &'a TypeRegistry,
    computed: Option<&'a ComputedRegistry>,
    platform: PlatformKey,
}

impl<'a> Normalizer<'a> {
    /// Normalize against `types` for the running platform.
    #[must_use]
    pub const fn new(types: &'a TypeRegistry) -> Self {
        Self {
            types,
            computed: None,
            platform: PlatformKey::current(),
        }
    }

    /// Resolve computed defaults through `computed`.
    #[must_use]
    pub const fn with_computed(mut self, computed: &'a ComputedRegistry) -> Self {
        self.computed = Some(computed);
        self
    }

    /// Select per-platform environment names and check variable names for
    /// `platform` instead of the running platform.
    #[must_use]
    pub fn for_platform(mut self, platform: impl Into<PlatformKey>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Platform used for environment settings.
    #[must_use]
    pub const fn platform(&self) -> PlatformKey {
        self.platform
    }

    /// Validate `params` and derive the canonical form of option `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`DeclarationError`] naming the option and the offending
    /// field when the declaration is malformed.
    pub fn normalize(
        &self,
        name: &str,
        params: &OptionParams,
    ) -> Result<NormalizedParams, DeclarationError> {
        if name.len() < 2 || !grammar::is_flag_name(name) {
            return Err(DeclarationError::InvalidName {
                name: name.to_owned(),
            });
        }

        let type_info = self.type_info(name, params)?;
        let short = short_flag(name, params)?;
        let argv = long_flag(name, params)?;
        let env = self.env_variable(name, params)?;
        let values_flags = values_flags(name, params)?;
        let default = self.default_value(name, params)?;

        let coerce = params
            .coerce
            .as_ref()
            .map(|custom| Coerce::Custom(Arc::clone(custom)))
            .or_else(|| {
                type_info
                    .as_ref()
                    .filter(|info| info.has_parser())
                    .map(|info| Coerce::Type(Arc::clone(info)))
            });
        let validate = params
            .validate
            .clone()
            .map(Predicate::from)
            .or_else(|| type_info.as_ref().map(|info| Predicate::Type(Arc::clone(info))));

        Ok(NormalizedParams {
            name: name.to_owned(),
            required: params.required,
            default,
            short,
            argv,
            env,
            values_flags,
            type_name: type_info.map(|info| info.name().to_owned()),
            coerce,
            validate,
        })
    }

    fn type_info(
        &self,
        name: &str,
        params: &OptionParams,
    ) -> Result<Option<TypeHandle>, DeclarationError> {
        params
            .type_name
            .as_deref()
            .map(|type_name| {
                self.types
                    .get(type_name)
                    .ok_or_else(|| DeclarationError::UnknownType {
                        option: name.to_owned(),
                        type_name: type_name.to_owned(),
                    })
            })
            .transpose()
    }

    fn env_variable(
        &self,
        name: &str,
        params: &OptionParams,
    ) -> Result<Option<String>, DeclarationError> {
        let variable = match &params.env {
            None | Some(EnvSetting::Enabled(false)) => return Ok(None),
            Some(EnvSetting::Enabled(true)) => name.to_ascii_uppercase().replace('-', "_"),
            Some(EnvSetting::Named(variable)) => {
                if variable.is_empty() {
                    return Err(invalid_env(name, "variable name must not be empty"));
                }
                variable.clone()
            }
            Some(EnvSetting::PerPlatform(names)) => {
                if let Some((key, _)) = names.iter().find(|(_, variable)| variable.is_empty()) {
                    return Err(invalid_env(
                        name,
                        &format!("variable name for {key} must not be empty"),
                    ));
                }
                match names.resolve_key(self.platform) {
                    Some(variable) => variable.clone(),
                    None => return Ok(None),
                }
            }
        };

        match validate_env_name(&variable, self.platform) {
            EnvNameCheck::Ok => {}
            EnvNameCheck::Warning(reasons) => {
                warn!(
                    option = name,
                    variable = %variable,
                    platform = %self.platform,
                    reasons = ?reasons,
                    "environment variable name is not portable"
                );
            }
            EnvNameCheck::Error(reasons) => {
                return Err(DeclarationError::EnvName {
                    option: name.to_owned(),
                    variable,
                    platform: self.platform,
                    reasons,
                });
            }
        }
        Ok(Some(variable))
    }

    fn default_value(
        &self,
        name: &str,
        params: &OptionParams,
    ) -> Result<DefaultValue, DeclarationError> {
        let literal = params.default.clone().unwrap_or_default();
        if params.required && (!literal.is_null() || params.computed_default.is_some()) {
            return Err(DeclarationError::RequiredWithDefault {
                option: name.to_owned(),
            });
        }
        let Some(handle) = params.computed_default else {
            return Ok(DefaultValue::Literal(literal));
        };
        self.computed
            .and_then(|registry| registry.get(handle))
            .map(|handler| DefaultValue::Computed { handle, handler })
            .ok_or_else(|| DeclarationError::UnknownComputed {
                option: name.to_owned(),
            })
    }
}

fn short_flag(name: &str, params: &OptionParams) -> Result<Option<String>, DeclarationError> {
    match params.short.as_deref() {
        None => Ok(None),
        Some(letter) if grammar::is_short_name(letter) => Ok(Some(letter.to_owned())),
        Some(letter) => Err(DeclarationError::InvalidShort {
            option: name.to_owned(),
            short: letter.to_owned(),
        }),
    }
}

fn long_flag(name: &str, params: &OptionParams) -> Result<Option<String>, DeclarationError> {
    match &params.argv {
        None | Some(FlagSetting::Enabled(false)) => Ok(None),
        Some(FlagSetting::Enabled(true)) => Ok(Some(name.to_owned())),
        Some(FlagSetting::Named(flag)) if flag.len() >= 2 && grammar::is_flag_name(flag) => {
            Ok(Some(flag.clone()))
        }
        Some(FlagSetting::Named(flag)) => Err(DeclarationError::InvalidArgv {
            option: name.to_owned(),
            flag: flag.clone(),
        }),
    }
}

fn values_flags(
    name: &str,
    params: &OptionParams,
) -> Result<Option<Arc<BTreeMap<String, Value>>>, DeclarationError> {
    let Some(flags) = params.values_flags.clone() else {
        return Ok(None);
    };
    let map = flags.into_map();
    if let Some(flag) = map.keys().find(|flag| !grammar::is_flag_name(flag)) {
        return Err(DeclarationError::InvalidValuesFlag {
            option: name.to_owned(),
            flag: flag.clone(),
        });
    }
    Ok(Some(Arc::new(map)))
}

fn invalid_env(name: &str, reason: &str) -> DeclarationError {
    DeclarationError::InvalidEnv {
        option: name.to_owned(),
        reason: reason.to_owned(),
    }
}
