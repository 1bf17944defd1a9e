//! Registry of computed-default handlers.
//!
//! A computed default derives an option's fallback value from the finished
//! configuration dictionary. Handlers are registered once, identified by an
//! opaque [`ComputedHandle`], and looked up by the normalizer.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::value::{Dict, Value};

/// Signature of a computed-default handler.
pub type ComputedFn = dyn Fn(&Dict) -> Value + Send + Sync;

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier of a registered handler.
///
/// Handles are unique across every registry in the process, so a handle
/// from one registry never resolves to another registry's handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComputedHandle(u64);

/// Handlers keyed by their handle.
///
/// ```rust
/// use opt_layers::{ComputedRegistry, Dict, Value};
///
/// let mut registry = ComputedRegistry::new();
/// let handle = registry.register(|config: &Dict| {
///     config.get("base-port").cloned().unwrap_or(Value::from(8000))
/// });
/// let handler = registry.get(handle).ok_or("missing")?;
/// assert_eq!(handler(&Dict::new()), Value::from(8000));
/// # Ok::<(), &str>(())
/// ```
#[derive(Clone, Default)]
pub struct ComputedRegistry {
    handlers: BTreeMap<ComputedHandle, Arc<ComputedFn>>,
}

impl ComputedRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handler` and return the handle that identifies it.
    pub fn register<F>(&mut self, handler: F) -> ComputedHandle
    where
        F: Fn(&Dict) -> Value + Send + Sync + 'static,
    {
        let handle = ComputedHandle(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed));
        self.handlers.insert(handle, Arc::new(handler));
        handle
    }

    /// Handler registered under `handle`.
    #[must_use]
    pub fn get(&self, handle: ComputedHandle) -> Option<Arc<ComputedFn>> {
        self.handlers.get(&handle).cloned()
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for ComputedRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputedRegistry")
            .field("handles", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_across_registries() {
        let mut first = ComputedRegistry::new();
        let mut second = ComputedRegistry::new();
        let a = first.register(|_| Value::Null);
        let b = second.register(|_| Value::Null);
        assert_ne!(a, b);
        assert!(first.get(b).is_none());
        assert!(second.get(b).is_some());
        assert!(second.get(a).is_none());
        assert_eq!(first.len(), 1);
        assert!(!second.is_empty());
        assert!(ComputedRegistry::new().is_empty());
    }

    #[test]
    fn handlers_receive_the_configuration() {
        let mut registry = ComputedRegistry::new();
        let handle = registry.register(|config: &Dict| {
            Value::from(config.contains_key("host"))
        });
        let mut config = Dict::new();
        config.insert("host".into(), Value::from("localhost"));
        let result = registry.get(handle).map(|handler| handler(&config));
        assert_eq!(result, Some(Value::Bool(true)));
    }
}
