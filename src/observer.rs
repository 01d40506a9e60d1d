//! Diagnostic observers for resolution traceability.
//!
//! Hooks for observing resolution events at the injector's public entry
//! points, enabling tracing and debugging of object-graph construction.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::key::ServiceKey;

/// Observer trait for resolution events.
///
/// Observer calls are made synchronously at the injector's entry
/// points. Keep implementations lightweight; for expensive work, queue
/// events and process them elsewhere.
///
/// # Examples
///
/// ```rust
/// use wrought_di::{BindingRegistry, DiObserver, ServiceKey, TypeCatalog};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// struct TracingObserver;
///
/// impl DiObserver for TracingObserver {
///     fn resolving(&self, key: &ServiceKey) {
///         println!("Resolving: {}", key.display_name());
///     }
///
///     fn resolved(&self, key: &ServiceKey, duration: Duration) {
///         println!("Resolved: {} in {:?}", key.display_name(), duration);
///     }
/// }
///
/// let mut registry = BindingRegistry::new();
/// registry.with_observer(Arc::new(TracingObserver)).unwrap();
/// let injector = registry.freeze(TypeCatalog::new()).unwrap();
/// ```
pub trait DiObserver: Send + Sync {
    /// Called when an entry-point resolution starts.
    fn resolving(&self, key: &ServiceKey);

    /// Called when an entry-point resolution completes successfully.
    fn resolved(&self, key: &ServiceKey, duration: Duration);

    /// Called when an entry-point resolution fails.
    fn failed(&self, _key: &ServiceKey, _error: &DiError) {}
}

/// Observer that prints resolution events to stdout.
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with the default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[wrought-di]".to_string(),
        }
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, key: &ServiceKey) {
        println!("{} Resolving: {}", self.prefix, key.display_name());
    }

    fn resolved(&self, key: &ServiceKey, duration: Duration) {
        println!(
            "{} Resolved: {} in {:?}",
            self.prefix,
            key.display_name(),
            duration
        );
    }

    fn failed(&self, key: &ServiceKey, error: &DiError) {
        eprintln!(
            "{} FAILED resolving {}: {}",
            self.prefix,
            key.display_name(),
            error
        );
    }
}

/// Registered observers, fanned out in registration order.
#[derive(Default)]
pub(crate) struct Observers {
    list: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn push(&mut self, observer: Arc<dyn DiObserver>) {
        self.list.push(observer);
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub(crate) fn resolving(&self, key: &ServiceKey) {
        for obs in &self.list {
            obs.resolving(key);
        }
    }

    pub(crate) fn resolved(&self, key: &ServiceKey, duration: Duration) {
        for obs in &self.list {
            obs.resolved(key, duration);
        }
    }

    pub(crate) fn failed(&self, key: &ServiceKey, error: &DiError) {
        for obs in &self.list {
            obs.failed(key, error);
        }
    }
}
