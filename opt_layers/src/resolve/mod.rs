//! Resolution of option values across the command line, the environment and
//! defaults.
//!
//! Sources are consulted in the fixed priority of
//! [`SourceName::PRIORITY`]; the first source that yields a value wins. The
//! winning raw value is coerced and then validated, and every failure names
//! the option and where its value came from.

mod all;

use std::fmt;

use tracing::debug;

pub use all::Resolution;

use crate::argv::ArgvTable;
use crate::env::{EnvSource, StdEnv};
use crate::error::ResolveError;
use crate::option::{DefaultValue, NormalizedParams};
use crate::source::{DefaultOrigin, Provenance, SourceName};
use crate::value::{Dict, Value};

/// A resolved option value and its origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    value: Value,
    provenance: Provenance,
}

impl Resolved {
    /// The source that supplied the value.
    #[must_use]
    pub const fn source(&self) -> SourceName {
        self.provenance.source()
    }

    /// The coerced and validated value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Where exactly the value came from.
    #[must_use]
    pub const fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Take ownership of the value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Split into value and provenance.
    #[must_use]
    pub fn into_parts(self) -> (Value, Provenance) {
        (self.value, self.provenance)
    }
}

/// Resolves normalized options against a fixed set of sources.
///
/// The command-line table is parsed once up front; the environment is read
/// through an [`EnvSource`] on every call, so a resolver observes variables
/// changed after it was created.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    argv: &'a ArgvTable,
    env: &'a dyn EnvSource,
    config: Option<&'a Dict>,
}

impl<'a> Resolver<'a> {
    /// Resolve against `argv` and the process environment.
    #[must_use]
    pub const fn new(argv: &'a ArgvTable) -> Self {
        Self {
            argv,
            env: &StdEnv,
            config: None,
        }
    }

    /// Read environment variables from `env` instead of the process.
    #[must_use]
    pub const fn env(mut self, env: &'a dyn EnvSource) -> Self {
        self.env = env;
        self
    }

    /// Consult `config`, keyed by option name, before the declared defaults.
    #[must_use]
    pub const fn config(mut self, config: &'a Dict) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolve the value of option `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::AmbiguousFlags`] when several of the option's
    /// flags were given, [`ResolveError::RequiredMissing`] when a required
    /// option has no value, and [`ResolveError::Coercion`] or
    /// [`ResolveError::Validation`] when the winning value is rejected.
    pub fn resolve(&self, name: &str, params: &NormalizedParams) -> Result<Resolved, ResolveError> {
        let (raw, provenance) = match self.matched(name, params)? {
            Some(found) => found,
            None if params.is_required() => self.config_value(name).ok_or_else(|| {
                ResolveError::RequiredMissing {
                    option: name.to_owned(),
                }
            })?,
            None => self.fallback(name, params),
        };
        debug!(option = name, source = %provenance.source(), value = %raw, "matched option source");

        if raw.is_null() && provenance.source() == SourceName::Default {
            return Ok(Resolved {
                value: raw,
                provenance,
            });
        }

        let value = coerce(name, params, raw, &provenance)?;

        if let Some(predicate) = params.validate() {
            let verdict = predicate.check(&value, provenance.source());
            if !verdict.is_pass() {
                return Err(ResolveError::Validation {
                    option: name.to_owned(),
                    reason: verdict.reason().map(str::to_owned),
                    provenance,
                    value: Box::new(value),
                });
            }
        }

        Ok(Resolved { value, provenance })
    }

    fn matched(
        &self,
        name: &str,
        params: &NormalizedParams,
    ) -> Result<Option<(Value, Provenance)>, ResolveError> {
        let lookup = self
            .argv
            .lookup(params.candidate_flags())
            .map_err(|source| ResolveError::ambiguous(name, source))?;
        if let Some(hit) = lookup {
            let value = params
                .values_flags()
                .and_then(|flags| flags.get(hit.flag()))
                .cloned()
                .unwrap_or_else(|| hit.value().to_value());
            let provenance = Provenance::Cli {
                flag: hit.flag().to_owned(),
            };
            return Ok(Some((value, provenance)));
        }

        Ok(params.env().and_then(|variable| {
            self.env.get(variable).map(|value| {
                let provenance = Provenance::Env {
                    variable: variable.to_owned(),
                };
                (Value::String(value), provenance)
            })
        }))
    }

    fn config_value(&self, name: &str) -> Option<(Value, Provenance)> {
        self.config
            .and_then(|config| config.get(name))
            .filter(|value| !value.is_null())
            .map(|value| {
                let provenance = Provenance::Default {
                    origin: DefaultOrigin::Config,
                };
                (value.clone(), provenance)
            })
    }

    fn fallback(&self, name: &str, params: &NormalizedParams) -> (Value, Provenance) {
        if let Some(found) = self.config_value(name) {
            return found;
        }
        let origin = match params.default_value() {
            DefaultValue::Literal(_) => DefaultOrigin::Declared,
            DefaultValue::Computed { .. } => DefaultOrigin::Computed,
        };
        let empty = Dict::new();
        let value = params
            .default_value()
            .evaluate(self.config.unwrap_or(&empty));
        (value, Provenance::Default { origin })
    }
}

fn coerce(
    name: &str,
    params: &NormalizedParams,
    raw: Value,
    provenance: &Provenance,
) -> Result<Value, ResolveError> {
    let Some(coerce) = params.coerce() else {
        return Ok(raw);
    };
    coerce
        .apply(&raw, provenance.source())
        .map_err(|reason| ResolveError::Coercion {
            option: name.to_owned(),
            provenance: provenance.clone(),
            value: Box::new(raw),
            reason,
        })
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("argv", self.argv)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
