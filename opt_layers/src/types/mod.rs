//! Hierarchical registry of option types.
//!
//! Types form a tree rooted at a single top type. A type either owns a
//! validator or groups its children; refinements are validated against
//! their parent first. Validators and parsers are composed in one pass when
//! the registry is built, after which the registry is immutable.
//!
//! The builtin tree:
//!
//! ```text
//! any
//! ├── primitive
//! │   ├── number ── unumber, int ── uint
//! │   ├── boolean
//! │   └── string
//! ├── datetime ── date, time
//! ├── array ── number[], unumber[], int[], uint[], boolean[], string[], datetime[], date[], time[]
//! └── object ── number{}, unumber{}, … , time{}
//! ```

mod build;
mod builtin;
mod decl;
mod parse;
mod validator;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

pub use decl::TypeDecl;
use parse::Parser;
use validator::Validator;

use crate::error::{TypeDefinitionError, UnknownType};
use crate::value::Value;

/// Shared handle to a compiled type.
pub type TypeHandle = Arc<TypeInfo>;

/// A compiled type: its place in the tree, composed validator and parser.
pub struct TypeInfo {
    name: String,
    description: String,
    parent: Option<String>,
    children: Vec<String>,
    validator: Arc<Validator>,
    parser: Option<Arc<Parser>>,
}

impl TypeInfo {
    /// Unique type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description, such as `"a nonnegative integer"`.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Name of the parent type; `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Names of the direct children.
    #[must_use]
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Returns `true` when `value` satisfies the type.
    #[must_use]
    pub fn validate(&self, value: &Value) -> bool {
        self.validator.check(value)
    }

    /// Convert text into a value of this type, or `None` for types without
    /// a parser. Unconvertible text is returned unchanged as a string.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<Value> {
        self.parser.as_ref().map(|parser| parser.parse(text))
    }

    /// Returns `true` when the type can convert text.
    #[must_use]
    pub const fn has_parser(&self) -> bool {
        self.parser.is_some()
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("validator", &self.validator)
            .field("parser", &self.parser)
            .finish()
    }
}

/// Immutable table of compiled types.
///
/// ```rust
/// use opt_layers::{TypeRegistry, Value};
///
/// let types = TypeRegistry::shared()?;
/// assert_eq!(types.validate("uint", &Value::from(3)), Ok(true));
/// assert_eq!(types.validate("uint", &Value::from(-3)), Ok(false));
/// assert_eq!(types.parse("int[]", "1, -3"), Ok(Some(Value::from(vec![Value::from(1), Value::from(-3)]))));
/// assert_eq!(types.description("uint[]"), Some("an array of nonnegative integers"));
/// # Ok::<(), opt_layers::TypeDefinitionError>(())
/// ```
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    root: String,
    types: BTreeMap<String, TypeHandle>,
}

static SHARED: LazyLock<Result<TypeRegistry, TypeDefinitionError>> =
    LazyLock::new(TypeRegistry::builtin);

impl TypeRegistry {
    /// Build a registry from the declaration tree rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns a [`TypeDefinitionError`] for duplicate names, element
    /// references to undeclared types, refinements without a validating
    /// parent, grouping types without children, and reference cycles.
    pub fn build(root: TypeDecl) -> Result<Self, TypeDefinitionError> {
        let types = build::build(&root)?;
        Ok(Self {
            root: root.name,
            types,
        })
    }

    /// Build the builtin registry.
    ///
    /// # Errors
    ///
    /// Returns a [`TypeDefinitionError`] if the builtin tree is
    /// inconsistent.
    pub fn builtin() -> Result<Self, TypeDefinitionError> {
        Self::build(builtin::tree())
    }

    /// Process-wide builtin registry, built on first use.
    ///
    /// # Errors
    ///
    /// Returns the error reported by [`TypeRegistry::builtin`].
    pub fn shared() -> Result<&'static Self, TypeDefinitionError> {
        SHARED.as_ref().map_err(Clone::clone)
    }

    /// Name of the root type.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Compiled type called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TypeHandle> {
        self.types.get(name).cloned()
    }

    /// Returns `true` when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` when no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Check `value` against the type called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownType`] when `name` is not registered.
    pub fn validate(&self, name: &str, value: &Value) -> Result<bool, UnknownType> {
        self.lookup(name).map(|info| info.validate(value))
    }

    /// Convert `text` with the parser of the type called `name`; `None` when
    /// the type has no parser.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownType`] when `name` is not registered.
    pub fn parse(&self, name: &str, text: &str) -> Result<Option<Value>, UnknownType> {
        self.lookup(name).map(|info| info.parse(text))
    }

    /// Description of the type called `name`.
    #[must_use]
    pub fn description(&self, name: &str) -> Option<&str> {
        self.types.get(name).map(|info| info.description())
    }

    /// Parent of the type called `name`.
    #[must_use]
    pub fn parent(&self, name: &str) -> Option<&str> {
        self.types.get(name).and_then(|info| info.parent())
    }

    /// Children of the type called `name`.
    #[must_use]
    pub fn children(&self, name: &str) -> Option<&[String]> {
        self.types.get(name).map(|info| info.children())
    }

    fn lookup(&self, name: &str) -> Result<&TypeInfo, UnknownType> {
        self.types
            .get(name)
            .map(Arc::as_ref)
            .ok_or_else(|| UnknownType::new(name))
    }
}
