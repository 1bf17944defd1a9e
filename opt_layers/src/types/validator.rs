//! Composed validators.

use std::fmt;
use std::sync::Arc;

use super::decl::CheckFn;
use crate::value::Value;

pub(crate) enum Rule {
    Check(CheckFn),
    Elements(Arc<Validator>),
    Entries(Arc<Validator>),
    AnyOf(Vec<Arc<Validator>>),
}

impl Rule {
    fn check(&self, value: &Value) -> bool {
        match self {
            Self::Check(check) => check(value),
            Self::Elements(element) => match value {
                Value::Array(items) => items.iter().all(|item| element.check(item)),
                _ => false,
            },
            Self::Entries(element) => match value {
                Value::Object(entries) => entries.values().all(|item| element.check(item)),
                _ => false,
            },
            Self::AnyOf(candidates) => candidates.iter().any(|candidate| candidate.check(value)),
        }
    }
}

/// Conjunction of rules: a value is valid when every rule accepts it.
pub(crate) struct Validator {
    rules: Vec<Arc<Rule>>,
}

impl Validator {
    pub(crate) fn single(rule: Rule) -> Self {
        Self {
            rules: vec![Arc::new(rule)],
        }
    }

    /// Rules of `parent` followed by `rule`.
    pub(crate) fn refine(parent: &Self, rule: Rule) -> Self {
        let mut rules = parent.rules.clone();
        rules.push(Arc::new(rule));
        Self { rules }
    }

    pub(crate) fn check(&self, value: &Value) -> bool {
        self.rules.iter().all(|rule| rule.check(value))
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rules.len())
            .finish()
    }
}
