//! A named collection of normalized options.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::normalize::Normalizer;
use super::params::OptionParams;
use super::NormalizedParams;
use crate::error::DeclarationError;

/// Options of one program, keyed by name.
///
/// Insertion rejects a second option with the same name and any flag
/// already claimed by another option, so a command-line flag always feeds
/// exactly one option.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionSet {
    options: BTreeMap<String, NormalizedParams>,
    flags: BTreeMap<String, String>,
}

impl OptionSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and insert a declaration.
    ///
    /// # Errors
    ///
    /// Returns the normalization error, or the insertion error described on
    /// [`OptionSet::insert`].
    pub fn declare(
        &mut self,
        normalizer: &Normalizer<'_>,
        name: &str,
        params: &OptionParams,
    ) -> Result<&NormalizedParams, DeclarationError> {
        let normalized = normalizer.normalize(name, params)?;
        self.insert(normalized)
    }

    /// Insert an already normalized option.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::DuplicateOption`] when the name is taken
    /// and [`DeclarationError::FlagCollision`] when one of its flags
    /// belongs to another option.
    pub fn insert(
        &mut self,
        params: NormalizedParams,
    ) -> Result<&NormalizedParams, DeclarationError> {
        if self.options.contains_key(params.name()) {
            return Err(DeclarationError::DuplicateOption {
                option: params.name,
            });
        }
        if let Some((flag, other)) = params
            .candidate_flags()
            .find_map(|flag| self.flags.get(flag).map(|other| (flag, other)))
        {
            return Err(DeclarationError::FlagCollision {
                option: params.name.clone(),
                other: other.clone(),
                flag: flag.to_owned(),
            });
        }

        for flag in params.candidate_flags() {
            self.flags.insert(flag.to_owned(), params.name.clone());
        }
        match self.options.entry(params.name.clone()) {
            Entry::Vacant(slot) => Ok(slot.insert(params)),
            Entry::Occupied(_) => Err(DeclarationError::DuplicateOption {
                option: params.name,
            }),
        }
    }

    /// Option called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NormalizedParams> {
        self.options.get(name)
    }

    /// Name of the option that owns `flag`.
    #[must_use]
    pub fn owner(&self, flag: &str) -> Option<&str> {
        self.flags.get(flag).map(String::as_str)
    }

    /// Options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NormalizedParams)> {
        self.options.iter().map(|(name, params)| (name.as_str(), params))
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns `true` when no options are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
