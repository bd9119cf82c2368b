//! Fan-out of loader events to observers.

use std::sync::Arc;

use scriptload_core::{LoadEvent, LoadObserver};

/// Registered observers plus the on/off switch from `use_logger`.
#[derive(Clone, Default)]
pub struct Telemetry {
    enabled: bool,
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl Telemetry {
    /// Create telemetry with no observers.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            observers: Vec::new(),
        }
    }

    /// Register an observer.
    pub fn subscribe(&mut self, observer: Arc<dyn LoadObserver>) {
        self.observers.push(observer);
    }

    /// Check if events are delivered.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Deliver an event to every observer, in registration order.
    pub fn emit(&self, event: &LoadEvent<'_>) {
        if !self.enabled {
            return;
        }
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("enabled", &self.enabled)
            .field("observers", &self.observers.len())
            .finish()
    }
}
