//! Source resolution core for declarative program options.
//!
//! An option is declared once with [`OptionParams`] (type, default, accepted
//! flags, environment variable) and normalized by a [`Normalizer`] against
//! the [`TypeRegistry`]. Each time its effective value is needed, a
//! [`Resolver`] walks the fixed source priority (command line, environment,
//! default), coerces the winning raw value and validates it, reporting the
//! provenance of the value in any diagnostic.
//!
//! ```rust
//! use opt_layers::{
//!     ArgvTable, MapEnv, Normalizer, OptionParams, Resolver, SourceName, TypeRegistry, Value,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let types = TypeRegistry::builtin()?;
//! let port = Normalizer::new(&types).normalize(
//!     "port",
//!     &OptionParams::new()
//!         .of_type("uint")
//!         .argv(true)
//!         .env(true)
//!         .default_value(8080),
//! )?;
//!
//! let argv = ArgvTable::parse(["--port", "3000"])?;
//! let env = MapEnv::from_pairs([("PORT", "9000")]);
//! let resolved = Resolver::new(&argv).env(&env).resolve("port", &port)?;
//!
//! assert_eq!(resolved.source(), SourceName::Cli);
//! assert_eq!(resolved.value(), &Value::from(3000));
//! # Ok(())
//! # }
//! ```

pub mod argv;
mod computed;
pub mod env;
mod error;
mod layer;
pub mod option;
pub mod platform;
mod resolve;
mod source;
pub mod types;
mod value;

pub use argv::{ArgValue, ArgvTable, FlagHit};
pub use computed::{ComputedFn, ComputedHandle, ComputedRegistry};
pub use env::{EnvNameCheck, EnvSource, MapEnv, StdEnv, validate_env_name};
pub use error::{
    AggregatedErrors, AmbiguousFlags, ArgvError, DeclarationError, LayerError, ResolveError,
    TypeDefinitionError, UnknownType,
};
pub use layer::{config_from_provider, config_section};
pub use option::{
    Coerce, CoerceFn, DefaultValue, EnvSetting, FlagSetting, NormalizedParams, Normalizer,
    OptionParams, OptionSet, Predicate, ValidateFn, ValidateSpec, ValuesFlags, Verdict,
};
pub use platform::{Platform, PlatformKey, PlatformSpec};
pub use resolve::{Resolution, Resolved, Resolver};
pub use source::{DefaultOrigin, Provenance, SourceName};
pub use types::{TypeDecl, TypeHandle, TypeRegistry};
pub use value::{Dict, Temporal, Value};
