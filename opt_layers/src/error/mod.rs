//! Error types produced while declaring and resolving options.

mod aggregate;
mod constructors;
mod helpers;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::{
    AmbiguousFlags, ArgvError, DeclarationError, LayerError, ResolveError, TypeDefinitionError,
    UnknownType,
};

#[cfg(test)]
mod tests;
