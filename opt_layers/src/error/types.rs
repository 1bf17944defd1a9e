//! Error enums for each stage of the option lifecycle.

use thiserror::Error;

use super::helpers::{because, joined, quoted_flags};
use crate::platform::PlatformKey;
use crate::source::Provenance;
use crate::value::Value;

/// Failure while tokenizing the command line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ArgvError {
    /// The same flag was assigned twice, either directly or through a
    /// `--no-` inversion.
    #[error("command-line flag \"{}\" is set more than once", crate::argv::display_flag(.flag))]
    DuplicateFlag {
        /// Flag name without leading dashes.
        flag: String,
    },
}

/// More than one flag accepted by a single option was set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("command-line flags {} must not be set simultaneously", quoted_flags(.flags))]
pub struct AmbiguousFlags {
    flags: Vec<String>,
}

impl AmbiguousFlags {
    /// Create the error from the flags that were present, in lookup order.
    #[must_use]
    pub const fn new(flags: Vec<String>) -> Self {
        Self { flags }
    }

    /// Flags that were present, without leading dashes.
    #[must_use]
    pub fn flags(&self) -> &[String] {
        &self.flags
    }
}

/// Lookup of a type name that the registry does not know.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown type \"{name}\"")]
pub struct UnknownType {
    name: String,
}

impl UnknownType {
    /// Create the error for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The requested type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Inconsistency found while building a type registry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TypeDefinitionError {
    /// Two declarations share a name.
    #[error("type \"{name}\" is declared more than once")]
    DuplicateName {
        /// Repeated type name.
        name: String,
    },

    /// An element check refers to a type that is not declared.
    #[error("type \"{name}\" refers to unknown type \"{target}\"")]
    UnknownReference {
        /// Declaring type.
        name: String,
        /// Missing element type.
        target: String,
    },

    /// A refinement sits at the root and has nothing to refine.
    #[error("type \"{name}\" refines its parent but has no parent")]
    MissingParent {
        /// Refining type.
        name: String,
    },

    /// A refinement's parent carries no validator chain.
    #[error("type \"{name}\" refines \"{parent}\", which has no validator")]
    ParentWithoutValidator {
        /// Refining type.
        name: String,
        /// Parent lacking a validator.
        parent: String,
    },

    /// A grouping type has no children to delegate to.
    #[error("type \"{name}\" has neither a validator nor children")]
    EmptyGroup {
        /// Empty grouping type.
        name: String,
    },

    /// Composition of validators does not terminate.
    #[error("type \"{name}\" participates in a reference cycle")]
    Cycle {
        /// A type on the cycle.
        name: String,
    },

    /// A refinement was declared without a validator of its own.
    #[error("type \"{name}\" refines its parent without a validator of its own")]
    RefinementWithoutValidator {
        /// Refining type.
        name: String,
    },
}

/// Invalid option declaration, reported when the option is defined.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DeclarationError {
    /// The option name does not follow the naming rules.
    #[error(
        "option name \"{name}\" is invalid: it must start with a lowercase letter, contain only \
         lowercase alphanumerics and single hyphens, not end with a hyphen, and be at least two \
         characters long"
    )]
    InvalidName {
        /// Rejected option name.
        name: String,
    },

    /// The short flag is not a single ASCII letter.
    #[error("option \"{option}\": short flag \"{short}\" must be a single ASCII letter")]
    InvalidShort {
        /// Declaring option.
        option: String,
        /// Rejected short flag.
        short: String,
    },

    /// The declared type is not registered.
    #[error("option \"{option}\": unknown type \"{type_name}\"")]
    UnknownType {
        /// Declaring option.
        option: String,
        /// Requested type name.
        type_name: String,
    },

    /// The long flag name is malformed.
    #[error("option \"{option}\": long flag \"{flag}\" is not a valid flag name")]
    InvalidArgv {
        /// Declaring option.
        option: String,
        /// Rejected flag name.
        flag: String,
    },

    /// The environment setting is malformed.
    #[error("option \"{option}\": invalid environment setting: {reason}")]
    InvalidEnv {
        /// Declaring option.
        option: String,
        /// What is wrong with the setting.
        reason: String,
    },

    /// The environment variable name is unusable on the target platform.
    #[error(
        "option \"{option}\": environment variable \"{variable}\" cannot be used on {platform}: {}",
        joined(.reasons)
    )]
    EnvName {
        /// Declaring option.
        option: String,
        /// Rejected variable name.
        variable: String,
        /// Platform the name was checked for.
        platform: PlatformKey,
        /// Violations reported by the name check.
        reasons: Vec<String>,
    },

    /// A `values_flags` key is not a valid flag name.
    #[error("option \"{option}\": values flag \"{flag}\" is not a valid flag name")]
    InvalidValuesFlag {
        /// Declaring option.
        option: String,
        /// Rejected flag name.
        flag: String,
    },

    /// Both `required` and a default were declared.
    #[error("option \"{option}\" is required and therefore must not declare a default")]
    RequiredWithDefault {
        /// Declaring option.
        option: String,
    },

    /// The computed default handle is not registered.
    #[error("option \"{option}\": computed default is not registered")]
    UnknownComputed {
        /// Declaring option.
        option: String,
    },

    /// Another option with the same name is already part of the set.
    #[error("option \"{option}\" is declared more than once")]
    DuplicateOption {
        /// Repeated option name.
        option: String,
    },

    /// A flag is already claimed by another option of the set.
    #[error(
        "option \"{option}\": command-line flag \"{}\" is already used by option \"{other}\"",
        crate::argv::display_flag(.flag)
    )]
    FlagCollision {
        /// Declaring option.
        option: String,
        /// Option that already owns the flag.
        other: String,
        /// Contested flag name.
        flag: String,
    },
}

/// Failure while resolving the value of one option.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// Several flags of the option were set at once.
    #[error("option \"{option}\": {source}")]
    AmbiguousFlags {
        /// Resolving option.
        option: String,
        /// Flags that collided.
        #[source]
        source: AmbiguousFlags,
    },

    /// The coercion function rejected the raw value.
    #[error("option \"{option}\" cannot be coerced because {reason}. Value ({provenance}): {value}")]
    Coercion {
        /// Resolving option.
        option: String,
        /// Where the raw value came from.
        provenance: Provenance,
        /// The raw value.
        value: Box<Value>,
        /// Explanation from the coercion function.
        reason: String,
    },

    /// The coerced value failed validation.
    #[error(
        "option \"{option}\" fails validation{}. Value ({provenance}): {value}",
        because(.reason.as_ref())
    )]
    Validation {
        /// Resolving option.
        option: String,
        /// Where the raw value came from.
        provenance: Provenance,
        /// The coerced value.
        value: Box<Value>,
        /// Explanation from the predicate, if it gave one.
        reason: Option<String>,
    },

    /// A required option was not set on the command line or in the
    /// environment.
    #[error("option \"{option}\" is required but was not provided")]
    RequiredMissing {
        /// Resolving option.
        option: String,
    },
}

/// Failure while turning a configuration provider into option values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LayerError {
    /// The provider could not be read or its data could not be extracted.
    #[error("failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    /// The provider produced data that is not a dictionary.
    #[error("configuration must be a dictionary, found {kind}")]
    NotADictionary {
        /// Kind of value that was found instead.
        kind: &'static str,
    },
}
