//! Constructors and accessors for the error enums.

use super::{AmbiguousFlags, DeclarationError, LayerError, ResolveError};

impl ResolveError {
    /// Annotate a tokenizer ambiguity with the option being resolved.
    #[must_use]
    pub fn ambiguous(option: impl Into<String>, source: AmbiguousFlags) -> Self {
        Self::AmbiguousFlags {
            option: option.into(),
            source,
        }
    }

    /// Name of the option whose resolution failed.
    #[must_use]
    pub fn option(&self) -> &str {
        match self {
            Self::AmbiguousFlags { option, .. }
            | Self::Coercion { option, .. }
            | Self::Validation { option, .. }
            | Self::RequiredMissing { option } => option,
        }
    }
}

impl DeclarationError {
    /// Name of the offending option.
    #[must_use]
    pub fn option(&self) -> &str {
        match self {
            Self::InvalidName { name: option }
            | Self::InvalidShort { option, .. }
            | Self::UnknownType { option, .. }
            | Self::InvalidArgv { option, .. }
            | Self::InvalidEnv { option, .. }
            | Self::EnvName { option, .. }
            | Self::InvalidValuesFlag { option, .. }
            | Self::RequiredWithDefault { option }
            | Self::UnknownComputed { option }
            | Self::DuplicateOption { option }
            | Self::FlagCollision { option, .. } => option,
        }
    }
}

impl LayerError {
    /// Wrap a provider failure.
    #[must_use]
    pub fn extract(source: figment::Error) -> Self {
        Self::Extract(Box::new(source))
    }
}

impl From<figment::Error> for LayerError {
    fn from(source: figment::Error) -> Self {
        Self::extract(source)
    }
}
