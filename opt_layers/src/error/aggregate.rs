//! Aggregation container for errors collected across several options.

use std::{error::Error, fmt};

use super::ResolveError;

/// Collection of [`ResolveError`]s produced while resolving an option set.
///
/// # Examples
///
/// ```
/// use opt_layers::{AggregatedErrors, ResolveError};
///
/// let errors = AggregatedErrors::new(vec![
///     ResolveError::RequiredMissing { option: "host".into() },
///     ResolveError::RequiredMissing { option: "port".into() },
/// ]);
/// assert_eq!(errors.len(), 2);
/// assert!(errors.to_string().starts_with("1: option \"host\""));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AggregatedErrors(Vec<ResolveError>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<ResolveError>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> std::slice::Iter<'_, ResolveError> {
        self.0.iter()
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no errors were collected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a ResolveError;
    type IntoIter = std::slice::Iter<'a, ResolveError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = ResolveError;
    type IntoIter = std::vec::IntoIter<ResolveError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<ResolveError> for AggregatedErrors {
    fn from_iter<I: IntoIterator<Item = ResolveError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
