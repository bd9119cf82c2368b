//! Loader configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Extension appended to every resource identifier.
pub const SCRIPT_EXTENSION: &str = ".js";

/// Configuration for a loader instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Emit telemetry events to registered observers.
    #[serde(default)]
    pub use_logger: bool,
    /// Base path prepended to every identifier.
    #[serde(default = "default_path")]
    pub path: String,
    /// Clear the static container when `init` is called again.
    #[serde(default)]
    pub reset_statics_on_init: bool,
    /// Per-resource timeout in milliseconds. `None` waits forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_timeout_ms: Option<u64>,
}

fn default_path() -> String {
    "./".to_string()
}

impl LoaderConfig {
    /// Create a configuration with the given base path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Enable or disable telemetry emission.
    pub fn with_logger(mut self, enabled: bool) -> Self {
        self.use_logger = enabled;
        self
    }

    /// Set a per-resource timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.resource_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Clear statics whenever `init` runs.
    pub fn with_reset_statics_on_init(mut self, reset: bool) -> Self {
        self.reset_statics_on_init = reset;
        self
    }

    /// Per-resource timeout, if one is configured.
    pub fn resource_timeout(&self) -> Option<Duration> {
        self.resource_timeout_ms.map(Duration::from_millis)
    }

    /// Resolve an identifier to its locator: `path + identifier + ".js"`.
    pub fn locate(&self, identifier: &str) -> String {
        format!("{}{}{}", self.path, identifier, SCRIPT_EXTENSION)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            use_logger: false,
            path: default_path(),
            reset_statics_on_init: false,
            resource_timeout_ms: None,
        }
    }
}
