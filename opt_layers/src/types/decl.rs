//! Declarations from which a [`TypeRegistry`](super::TypeRegistry) is built.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Predicate owned by a single type.
pub(crate) type CheckFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Conversion from command-line or environment text.
pub(crate) type ParseFn = Arc<dyn Fn(&str) -> Value + Send + Sync>;

#[derive(Clone)]
pub(crate) enum OwnValidator {
    Check(CheckFn),
    EachElement(String),
    EachValue(String),
}

#[derive(Clone)]
pub(crate) enum ParserKind {
    Text(ParseFn),
    Elements(String),
    Entries(String),
}

/// Declaration of a type and its subtree.
///
/// A type either owns a validator or groups its children, in which case a
/// value satisfies it when it satisfies any child. A refinement (see
/// [`TypeDecl::refines`]) is checked against its parent's validators before
/// its own.
///
/// ```rust
/// use opt_layers::{TypeDecl, TypeRegistry, Value};
///
/// let root = TypeDecl::group("scalar", "a scalar").child(
///     TypeDecl::leaf("flag", "a flag", |value| matches!(value, Value::Bool(_)))
///         .child(TypeDecl::leaf("on", "an enabled flag", |value| value == &Value::Bool(true)).refines()),
/// );
/// let registry = TypeRegistry::build(root)?;
/// assert_eq!(registry.validate("on", &Value::Bool(true)), Ok(true));
/// assert_eq!(registry.validate("scalar", &Value::from("x")), Ok(false));
/// # Ok::<(), opt_layers::TypeDefinitionError>(())
/// ```
#[derive(Clone)]
pub struct TypeDecl {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) validator: Option<OwnValidator>,
    pub(crate) sub_validation: bool,
    pub(crate) parser: Option<ParserKind>,
    pub(crate) children: Vec<TypeDecl>,
}

impl TypeDecl {
    fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            validator: None,
            sub_validation: false,
            parser: None,
            children: Vec::new(),
        }
    }

    /// A grouping type without a validator of its own.
    #[must_use]
    pub fn group(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description)
    }

    /// A type validated by `check`.
    #[must_use]
    pub fn leaf<F>(name: impl Into<String>, description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            validator: Some(OwnValidator::Check(Arc::new(check))),
            ..Self::new(name, description)
        }
    }

    /// A refinement accepting arrays whose every element satisfies the type
    /// named `element`. Text is parsed as a JSON array or a comma-separated
    /// list of elements.
    #[must_use]
    pub fn array_of(
        name: impl Into<String>,
        description: impl Into<String>,
        element: impl Into<String>,
    ) -> Self {
        let element_type = element.into();
        Self {
            validator: Some(OwnValidator::EachElement(element_type.clone())),
            sub_validation: true,
            parser: Some(ParserKind::Elements(element_type)),
            ..Self::new(name, description)
        }
    }

    /// A refinement accepting dictionaries whose every value satisfies the
    /// type named `element`. Text is parsed as a JSON object or a
    /// comma-separated list of `key=value` pairs.
    #[must_use]
    pub fn dictionary_of(
        name: impl Into<String>,
        description: impl Into<String>,
        element: impl Into<String>,
    ) -> Self {
        let value_type = element.into();
        Self {
            validator: Some(OwnValidator::EachValue(value_type.clone())),
            sub_validation: true,
            parser: Some(ParserKind::Entries(value_type)),
            ..Self::new(name, description)
        }
    }

    /// Check values against the parent's validators before this type's own.
    #[must_use]
    pub const fn refines(mut self) -> Self {
        self.sub_validation = true;
        self
    }

    /// Parse text with `parse`. Refinements without a parser inherit their
    /// parent's.
    #[must_use]
    pub fn parse<F>(mut self, parse: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        self.parser = Some(ParserKind::Text(Arc::new(parse)));
        self
    }

    /// Append a child declaration.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child declarations.
    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        self.children.extend(children);
        self
    }

    /// Name of the declared type.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description of the declared type.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `true` when the type owns a validator.
    #[must_use]
    pub const fn has_validator(&self) -> bool {
        self.validator.is_some()
    }
}

impl fmt::Debug for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDecl")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("has_validator", &self.validator.is_some())
            .field("sub_validation", &self.sub_validation)
            .field("has_parser", &self.parser.is_some())
            .field("children", &self.children)
            .finish()
    }
}
