//! Command-line tokenizer.
//!
//! The argument vector is scanned once, left to right, into an immutable
//! [`ArgvTable`] mapping flag names to values. Short clusters (`-abc`) set
//! every letter to `true`; a lone short flag (`-p 80`) or a long flag
//! (`--port 80`) consumes the following token when it is a plain value. A
//! bare `--no-name` additionally sets `name` to `false`.

pub(crate) mod grammar;

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{AmbiguousFlags, ArgvError};
use crate::value::Value;

/// Raw value attached to a flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgValue {
    /// The flag was given without a value, or inverted with `--no-`.
    Switch(bool),
    /// The token following the flag.
    Text(String),
}

impl ArgValue {
    /// Convert into a dynamic [`Value`].
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Switch(flag) => Value::Bool(*flag),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

/// A flag found by [`ArgvTable::lookup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlagHit<'a> {
    flag: &'a str,
    value: &'a ArgValue,
}

impl<'a> FlagHit<'a> {
    /// Name of the flag that was set, without leading dashes.
    #[must_use]
    pub const fn flag(&self) -> &'a str {
        self.flag
    }

    /// Value attached to the flag.
    #[must_use]
    pub const fn value(&self) -> &'a ArgValue {
        self.value
    }
}

/// Parsed command-line flags.
///
/// ```rust
/// use opt_layers::{ArgValue, ArgvTable};
///
/// let argv = ArgvTable::parse(["-vq", "--port", "80", "--no-color"])?;
/// assert_eq!(argv.get("v"), Some(&ArgValue::Switch(true)));
/// assert_eq!(argv.get("port"), Some(&ArgValue::Text("80".into())));
/// assert_eq!(argv.get("color"), Some(&ArgValue::Switch(false)));
/// # Ok::<(), opt_layers::ArgvError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgvTable {
    flags: BTreeMap<String, ArgValue>,
}

impl ArgvTable {
    /// Tokenize an argument vector that excludes the program name.
    ///
    /// # Errors
    ///
    /// Returns [`ArgvError::DuplicateFlag`] when a flag is assigned twice.
    pub fn parse<I, S>(args: I) -> Result<Self, ArgvError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut table = Self::default();
        for (index, token) in tokens.iter().enumerate() {
            let next = tokens
                .get(index + 1)
                .filter(|candidate| grammar::is_value(candidate));
            if let Some(letters) = grammar::short_cluster(token) {
                match next {
                    Some(value) if letters.len() == 1 => {
                        table.assign(letters, ArgValue::Text(value.clone()))?;
                    }
                    _ => {
                        for letter in letters.chars() {
                            table.assign(&letter.to_string(), ArgValue::Switch(true))?;
                        }
                    }
                }
            } else if let Some(name) = grammar::long_flag(token) {
                if let Some(value) = next {
                    table.assign(name, ArgValue::Text(value.clone()))?;
                } else {
                    table.assign(name, ArgValue::Switch(true))?;
                    if let Some(positive) = name.strip_prefix("no-") {
                        table.assign(positive, ArgValue::Switch(false))?;
                    }
                }
            }
        }
        Ok(table)
    }

    /// Tokenize the arguments of the running process.
    ///
    /// Arguments that are not valid Unicode are converted lossily.
    ///
    /// # Errors
    ///
    /// Returns [`ArgvError::DuplicateFlag`] when a flag is assigned twice.
    pub fn from_env() -> Result<Self, ArgvError> {
        Self::parse(
            std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    fn assign(&mut self, flag: &str, value: ArgValue) -> Result<(), ArgvError> {
        if self.flags.contains_key(flag) {
            return Err(ArgvError::DuplicateFlag {
                flag: flag.to_owned(),
            });
        }
        trace!(flag, value = ?value, "parsed command-line flag");
        self.flags.insert(flag.to_owned(), value);
        Ok(())
    }

    /// Find the single flag among `candidates` that was set.
    ///
    /// Repeated candidates are considered once.
    ///
    /// # Errors
    ///
    /// Returns [`AmbiguousFlags`] listing every present candidate, in
    /// candidate order, when more than one was set.
    pub fn lookup<'c, I>(&self, candidates: I) -> Result<Option<FlagHit<'_>>, AmbiguousFlags>
    where
        I: IntoIterator<Item = &'c str>,
    {
        let mut seen: Vec<&str> = Vec::new();
        let mut hits: Vec<FlagHit<'_>> = Vec::new();
        for candidate in candidates {
            if seen.contains(&candidate) {
                continue;
            }
            seen.push(candidate);
            if let Some((flag, value)) = self.flags.get_key_value(candidate) {
                hits.push(FlagHit { flag, value });
            }
        }
        match hits.as_slice() {
            [] => Ok(None),
            [hit] => Ok(Some(*hit)),
            _ => Err(AmbiguousFlags::new(
                hits.iter().map(|hit| hit.flag.to_owned()).collect(),
            )),
        }
    }

    /// Value of a flag, if it was set.
    #[must_use]
    pub fn get(&self, flag: &str) -> Option<&ArgValue> {
        self.flags.get(flag)
    }

    /// Returns `true` when the flag was set.
    #[must_use]
    pub fn contains(&self, flag: &str) -> bool {
        self.flags.contains_key(flag)
    }

    /// Number of flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns `true` when no flags were set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterate over flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.flags.iter().map(|(flag, value)| (flag.as_str(), value))
    }
}

/// Command-line form of a flag name: `-p` for single letters, `--port`
/// otherwise.
pub(crate) fn display_flag(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(_), None) => format!("-{name}"),
        _ => format!("--{name}"),
    }
}

#[cfg(test)]
mod tests;
