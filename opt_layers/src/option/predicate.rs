//! Validation predicates, coercions and defaults of a normalized option.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::computed::{ComputedFn, ComputedHandle};
use crate::source::SourceName;
use crate::types::TypeHandle;
use crate::value::{Dict, Value};

/// Signature of a custom validation function.
pub type ValidateFn = dyn Fn(&Value, SourceName) -> Verdict + Send + Sync;

/// Signature of a custom coercion function. An `Err` carries the reason
/// the value was rejected.
pub type CoerceFn = dyn Fn(&Value, SourceName) -> Result<Value, String> + Send + Sync;

/// Outcome of a validation predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The value is acceptable.
    Pass,
    /// The value is rejected without explanation.
    Fail,
    /// The value is rejected for the given reason.
    FailBecause(String),
}

impl Verdict {
    /// Returns `true` for [`Verdict::Pass`].
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Reason attached to a failure.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::FailBecause(reason) => Some(reason),
            Self::Pass | Self::Fail => None,
        }
    }
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::Fail }
    }
}

impl From<Result<(), String>> for Verdict {
    fn from(outcome: Result<(), String>) -> Self {
        outcome.map_or_else(Self::FailBecause, |()| Self::Pass)
    }
}

/// Declared form of an option's validation.
#[derive(Clone)]
pub enum ValidateSpec {
    /// A function receiving the coerced value and its source.
    Custom(Arc<ValidateFn>),
    /// A pattern matched against the text of scalar values; arrays,
    /// dictionaries and null fail.
    Pattern(Regex),
    /// The value must equal one of the listed values.
    AllowList(Vec<Value>),
}

impl ValidateSpec {
    /// Wrap a validation function.
    #[must_use]
    pub fn custom<F, V>(check: F) -> Self
    where
        F: Fn(&Value, SourceName) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        Self::Custom(Arc::new(move |value: &Value, source: SourceName| -> Verdict {
            check(value, source).into()
        }))
    }

    /// Accept only the listed values.
    #[must_use]
    pub fn allow_list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::AllowList(values.into_iter().map(Into::into).collect())
    }
}

impl From<Regex> for ValidateSpec {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<Vec<Value>> for ValidateSpec {
    fn from(values: Vec<Value>) -> Self {
        Self::AllowList(values)
    }
}

impl fmt::Debug for ValidateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.as_str()).finish(),
            Self::AllowList(values) => f.debug_tuple("AllowList").field(values).finish(),
        }
    }
}

/// Normalized validation of an option.
#[derive(Clone)]
pub enum Predicate {
    /// The composed validator of a registered type.
    Type(TypeHandle),
    /// A custom function.
    Custom(Arc<ValidateFn>),
    /// A pattern tested against string values.
    Pattern(Regex),
    /// Membership in a fixed list.
    AllowList(Arc<[Value]>),
}

impl Predicate {
    /// Check `value`, which came from `source`.
    ///
    /// ```rust
    /// use opt_layers::{Predicate, SourceName, Value, Verdict};
    /// use regex::Regex;
    ///
    /// let pattern = Predicate::Pattern(Regex::new("^[a-z]+$")?);
    /// assert_eq!(pattern.check(&Value::from("info"), SourceName::Cli), Verdict::Pass);
    /// assert_eq!(pattern.check(&Value::from(1), SourceName::Cli), Verdict::Fail);
    ///
    /// let port = Predicate::Pattern(Regex::new("^[0-9]{2,5}$")?);
    /// assert_eq!(port.check(&Value::from(8080), SourceName::Env), Verdict::Pass);
    /// # Ok::<(), regex::Error>(())
    /// ```
    #[must_use]
    pub fn check(&self, value: &Value, source: SourceName) -> Verdict {
        match self {
            Self::Type(info) => {
                if info.validate(value) {
                    Verdict::Pass
                } else {
                    Verdict::FailBecause(format!("it is not {}", info.description()))
                }
            }
            Self::Custom(check) => check(value, source),
            Self::Pattern(pattern) => scalar_text(value)
                .is_some_and(|text| pattern.is_match(&text))
                .into(),
            Self::AllowList(allowed) => allowed.contains(value).into(),
        }
    }
}

/// Text a pattern is matched against; only scalars have one.
fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text)),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        Value::Temporal(temporal) => Some(Cow::Owned(temporal.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl From<ValidateSpec> for Predicate {
    fn from(spec: ValidateSpec) -> Self {
        match spec {
            ValidateSpec::Custom(check) => Self::Custom(check),
            ValidateSpec::Pattern(pattern) => Self::Pattern(pattern),
            ValidateSpec::AllowList(values) => Self::AllowList(values.into()),
        }
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Type(left), Self::Type(right)) => left.name() == right.name(),
            (Self::Custom(left), Self::Custom(right)) => Arc::ptr_eq(left, right),
            (Self::Pattern(left), Self::Pattern(right)) => left.as_str() == right.as_str(),
            (Self::AllowList(left), Self::AllowList(right)) => left == right,
            _ => false,
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(info) => f.debug_tuple("Type").field(&info.name()).finish(),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(&pattern.as_str()).finish(),
            Self::AllowList(values) => f.debug_tuple("AllowList").field(values).finish(),
        }
    }
}

/// Normalized coercion of an option.
#[derive(Clone)]
pub enum Coerce {
    /// The parser of a registered type, applied to string values only.
    Type(TypeHandle),
    /// A custom function.
    Custom(Arc<CoerceFn>),
}

impl Coerce {
    /// Convert the raw `value` that came from `source`.
    ///
    /// # Errors
    ///
    /// Returns the reason reported by a custom coercion function.
    pub fn apply(&self, value: &Value, source: SourceName) -> Result<Value, String> {
        match self {
            Self::Type(info) => Ok(value
                .as_str()
                .and_then(|text| info.parse(text))
                .unwrap_or_else(|| value.clone())),
            Self::Custom(coerce) => coerce(value, source),
        }
    }
}

impl PartialEq for Coerce {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Type(left), Self::Type(right)) => left.name() == right.name(),
            (Self::Custom(left), Self::Custom(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl fmt::Debug for Coerce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(info) => f.debug_tuple("Type").field(&info.name()).finish(),
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
        }
    }
}

/// Default source of a normalized option.
#[derive(Clone)]
pub enum DefaultValue {
    /// A fixed value; [`Value::Null`] when none was declared.
    Literal(Value),
    /// A registered handler computing the value from the configuration.
    Computed {
        /// Registration handle.
        handle: ComputedHandle,
        /// The handler itself.
        handler: Arc<ComputedFn>,
    },
}

impl DefaultValue {
    /// Evaluate the default against the configuration dictionary.
    #[must_use]
    pub fn evaluate(&self, config: &Dict) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Computed { handler, .. } => handler(config),
        }
    }
}

impl Default for DefaultValue {
    fn default() -> Self {
        Self::Literal(Value::Null)
    }
}

impl PartialEq for DefaultValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(left), Self::Literal(right)) => left == right,
            (Self::Computed { handle: left, .. }, Self::Computed { handle: right, .. }) => {
                left == right
            }
            _ => false,
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed { handle, .. } => {
                f.debug_struct("Computed").field("handle", handle).finish()
            }
        }
    }
}
