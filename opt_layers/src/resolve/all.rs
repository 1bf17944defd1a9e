//! Resolution of a whole option set.

use std::collections::BTreeMap;

use super::Resolver;
use crate::error::{AggregatedErrors, ResolveError};
use crate::option::OptionSet;
use crate::source::Provenance;
use crate::value::Dict;

/// Outcome of resolving every option of an [`OptionSet`].
///
/// Options are resolved independently: a failing option contributes an
/// error and is absent from [`Resolution::values`], the others still
/// resolve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    values: Dict,
    provenance: BTreeMap<String, Provenance>,
    errors: Vec<ResolveError>,
}

impl Resolution {
    /// Values of the options that resolved, keyed by option name.
    #[must_use]
    pub const fn values(&self) -> &Dict {
        &self.values
    }

    /// Origin of each resolved value.
    #[must_use]
    pub fn provenance(&self, option: &str) -> Option<&Provenance> {
        self.provenance.get(option)
    }

    /// Errors of the options that failed, in option name order.
    #[must_use]
    pub const fn errors(&self) -> &[ResolveError] {
        self.errors.as_slice()
    }

    /// Returns `true` when every option resolved.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The resolved values, or every collected error.
    ///
    /// # Errors
    ///
    /// Returns [`AggregatedErrors`] when at least one option failed.
    pub fn into_result(self) -> Result<Dict, AggregatedErrors> {
        if self.errors.is_empty() {
            Ok(self.values)
        } else {
            Err(AggregatedErrors::new(self.errors))
        }
    }
}

impl Resolver<'_> {
    /// Resolve every option of `options`.
    ///
    /// ```rust
    /// use opt_layers::{ArgvTable, MapEnv, Normalizer, OptionParams, OptionSet, Resolver, TypeRegistry, Value};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let normalizer = Normalizer::new(TypeRegistry::shared()?);
    /// let mut options = OptionSet::new();
    /// options.declare(&normalizer, "host", &OptionParams::new().argv(true).default_value("localhost"))?;
    /// options.declare(&normalizer, "port", &OptionParams::new().of_type("uint").env("APP_PORT").required())?;
    ///
    /// let argv = ArgvTable::parse(["--host", "example.org"])?;
    /// let env = MapEnv::from_pairs([("APP_PORT", "8080")]);
    /// let values = Resolver::new(&argv).env(&env).resolve_all(&options).into_result()?;
    /// assert_eq!(values.get("host"), Some(&Value::from("example.org")));
    /// assert_eq!(values.get("port"), Some(&Value::from(8080)));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn resolve_all(&self, options: &OptionSet) -> Resolution {
        let mut resolution = Resolution::default();
        for (name, params) in options.iter() {
            match self.resolve(name, params) {
                Ok(resolved) => {
                    let (value, provenance) = resolved.into_parts();
                    resolution.values.insert(name.to_owned(), value);
                    resolution.provenance.insert(name.to_owned(), provenance);
                }
                Err(err) => resolution.errors.push(err),
            }
        }
        resolution
    }
}
