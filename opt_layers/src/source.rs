//! Names and provenance of the sources an option value can come from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::argv::display_flag;

/// A value source, in descending priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceName {
    /// Command-line flags.
    Cli,
    /// Environment variables.
    Env,
    /// Configuration layer, computed or declared default.
    Default,
}

impl SourceName {
    /// Every source, highest priority first.
    pub const PRIORITY: [Self; 3] = [Self::Cli, Self::Env, Self::Default];

    /// Lowercase identifier of the source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Env => "env",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a default value was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultOrigin {
    /// The literal default in the declaration.
    Declared,
    /// A registered computed-default handler.
    Computed,
    /// The configuration layer.
    Config,
}

/// Detailed origin of a resolved value.
///
/// Renders as the phrase used in diagnostics:
///
/// ```rust
/// use opt_layers::Provenance;
///
/// let cli = Provenance::Cli { flag: "port".into() };
/// assert_eq!(cli.to_string(), "from the command-line flag \"--port\"");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Provenance {
    /// Matched a command-line flag.
    Cli {
        /// Flag name without leading dashes.
        flag: String,
    },
    /// Matched an environment variable.
    Env {
        /// Variable name.
        variable: String,
    },
    /// Fell back to the default source.
    Default {
        /// Which default supplied the value.
        origin: DefaultOrigin,
    },
}

impl Provenance {
    /// The coarse source this provenance belongs to.
    #[must_use]
    pub const fn source(&self) -> SourceName {
        match self {
            Self::Cli { .. } => SourceName::Cli,
            Self::Env { .. } => SourceName::Env,
            Self::Default { .. } => SourceName::Default,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli { flag } => {
                write!(f, "from the command-line flag \"{}\"", display_flag(flag))
            }
            Self::Env { variable } => write!(f, "from environment variable \"{variable}\""),
            Self::Default { .. } => f.write_str("default value"),
        }
    }
}
