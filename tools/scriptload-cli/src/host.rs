//! Filesystem-backed resource host.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{bail, Context as _, Result};
use async_trait::async_trait;
use scriptload_core::{ResourceEntry, ResourceKind};
use scriptload_executor::ResourceHost;

/// Attaches scripts by reading them from disk.
///
/// Locators resolve against `root`. A missing or empty file is a failed
/// load. The two insertion areas are kept as ordered lists of locators.
#[derive(Debug)]
pub struct FsHost {
    root: PathBuf,
    statics: Mutex<Vec<String>>,
    dynamics: Mutex<Vec<String>>,
}

impl FsHost {
    /// Create a host rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            statics: Mutex::new(Vec::new()),
            dynamics: Mutex::new(Vec::new()),
        }
    }

    /// Resolve a locator to a file path.
    pub fn resolve(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Locators currently attached to an area.
    pub fn attached(&self, kind: ResourceKind) -> Vec<String> {
        self.area(kind).to_vec()
    }

    fn area(&self, kind: ResourceKind) -> MutexGuard<'_, Vec<String>> {
        let area = match kind {
            ResourceKind::Static => &self.statics,
            ResourceKind::Dynamic => &self.dynamics,
        };
        area.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ResourceHost for FsHost {
    async fn attach(&self, kind: ResourceKind, locator: &str) -> Result<String> {
        let path = self.resolve(locator);
        let source = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Cannot read {}", path.display()))?;
        if source.trim().is_empty() {
            bail!("{} is empty", path.display());
        }

        self.area(kind).push(locator.to_string());
        Ok(format!("{} bytes", source.len()))
    }

    fn detach(&self, kind: ResourceKind, entry: &ResourceEntry) {
        let mut area = self.area(kind);
        if let Some(pos) = area.iter().position(|l| *l == entry.locator) {
            area.remove(pos);
        }
    }
}
