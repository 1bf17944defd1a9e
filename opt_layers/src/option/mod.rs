//! Option declarations and their normalized form.
//!
//! A declaration ([`OptionParams`]) is validated once by a [`Normalizer`]
//! and turned into [`NormalizedParams`], the canonical form consumed by the
//! resolver. Declarations that fail normalization never reach resolution.

mod normalize;
mod params;
mod predicate;
mod set;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use normalize::Normalizer;
pub use params::{EnvSetting, FlagSetting, OptionParams, ValuesFlags};
pub use predicate::{Coerce, CoerceFn, DefaultValue, Predicate, ValidateFn, ValidateSpec, Verdict};
pub use set::OptionSet;

use crate::value::Value;

/// Canonical form of a declaration.
///
/// Every field is derived from the declaration; sources that were disabled
/// or omitted are `None` and never consulted.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedParams {
    pub(crate) name: String,
    pub(crate) required: bool,
    pub(crate) default: DefaultValue,
    pub(crate) short: Option<String>,
    pub(crate) argv: Option<String>,
    pub(crate) env: Option<String>,
    pub(crate) values_flags: Option<Arc<BTreeMap<String, Value>>>,
    pub(crate) type_name: Option<String>,
    pub(crate) coerce: Option<Coerce>,
    pub(crate) validate: Option<Predicate>,
}

impl NormalizedParams {
    /// Option name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` when the value must come from the command line or the
    /// environment.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Default source used when neither flag nor variable is set.
    #[must_use]
    pub const fn default_value(&self) -> &DefaultValue {
        &self.default
    }

    /// Single-letter flag.
    #[must_use]
    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// Long flag, without leading dashes.
    #[must_use]
    pub fn argv(&self) -> Option<&str> {
        self.argv.as_deref()
    }

    /// Environment variable for the normalizing platform.
    #[must_use]
    pub fn env(&self) -> Option<&str> {
        self.env.as_deref()
    }

    /// Flags that set a fixed value, keyed by flag name.
    #[must_use]
    pub fn values_flags(&self) -> Option<&BTreeMap<String, Value>> {
        self.values_flags.as_deref()
    }

    /// Registered type name.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Coercion applied to raw values.
    #[must_use]
    pub const fn coerce(&self) -> Option<&Coerce> {
        self.coerce.as_ref()
    }

    /// Validation applied to coerced values.
    #[must_use]
    pub const fn validate(&self) -> Option<&Predicate> {
        self.validate.as_ref()
    }

    /// Every flag that feeds this option: the long flag, the short flag,
    /// then the value flags in key order.
    pub fn candidate_flags(&self) -> impl Iterator<Item = &str> {
        self.argv
            .as_deref()
            .into_iter()
            .chain(self.short.as_deref())
            .chain(self.values_flags.iter().flat_map(|flags| flags.keys().map(String::as_str)))
    }
}

#[cfg(test)]
mod tests;
