//! Environment variable access and naming rules.
//!
//! Resolution reads variables through the [`EnvSource`] trait so embedders
//! and tests can substitute a fixed table for the live process environment.

mod name;
mod reserved;

use std::collections::BTreeMap;

pub use name::{EnvNameCheck, validate_env_name};

/// Read-only view of an environment variable table.
pub trait EnvSource {
    /// Value of the variable `name`, if set. Names are case-sensitive.
    fn get(&self, name: &str) -> Option<String>;
}

/// Environment source backed by the live process environment.
///
/// Every lookup re-reads the process table, so changes made after an option
/// was declared are observed by later resolutions. Variables whose value is
/// not valid Unicode are treated as unset.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment source backed by an in-memory table.
///
/// ```rust
/// use opt_layers::{EnvSource, MapEnv};
///
/// let env = MapEnv::from_pairs([("PORT", "9000")]);
/// assert_eq!(env.get("PORT").as_deref(), Some("9000"));
/// assert_eq!(env.get("port"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from key/value pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Remove a variable.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }
}

impl EnvSource for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests;
