//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};

use crate::config::{Manifest, MANIFEST_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Create a context rooted at the current directory.
    pub fn new(output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self { output, cwd })
    }

    /// Load the manifest at `path`, or search upwards from the working
    /// directory when none is given.
    ///
    /// Returns the manifest and the directory its locators resolve against.
    pub fn load_manifest(&self, path: Option<&str>) -> Result<(Manifest, PathBuf)> {
        let path = match path {
            Some(path) => self.resolve_path(path),
            None => match find_manifest(&self.cwd) {
                Some(found) => found,
                None => bail!(
                    "No manifest found (looked for {}) in {} or its parents",
                    MANIFEST_NAMES.join(", "),
                    self.cwd.display()
                ),
            },
        };
        self.output.debug(&format!("Using manifest {}", path.display()));

        let manifest = Manifest::load(&path)?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone());
        Ok((manifest, root))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a manifest in `start` or any of its parents.
fn find_manifest(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &MANIFEST_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
