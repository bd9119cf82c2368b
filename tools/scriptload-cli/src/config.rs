//! Load manifest: loader configuration plus the request to run.

use std::path::Path;

use anyhow::{Context, Result};
use scriptload_core::{LoadRequest, LoaderConfig};
use serde::{Deserialize, Serialize};

/// File names searched for when no manifest is given.
pub const MANIFEST_NAMES: [&str; 3] = ["scriptload.toml", ".scriptload.toml", "scriptload.json"];

/// A load manifest file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Loader configuration.
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Resources to load.
    #[serde(default)]
    pub request: LoadRequest,
}

impl Manifest {
    /// Load a manifest from a file. `.json` files are parsed as JSON,
    /// anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON manifest: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML manifest: {}", path.display()))
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, path: Option<&str>, timeout_ms: Option<u64>) -> Self {
        if let Some(path) = path {
            self.loader.path = path.to_string();
        }
        if let Some(ms) = timeout_ms {
            self.loader.resource_timeout_ms = Some(ms);
        }
        self
    }
}

/// Generate a starter manifest.
pub fn generate_default_manifest() -> String {
    r#"# Script load manifest

[loader]
path = "./"
use_logger = true
# resource_timeout_ms = 5000

[request]
statics = []
dynamics = []
main = "index"
"#
    .to_string()
}
