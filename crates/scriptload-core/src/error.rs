//! Error types for the loading pipeline.

use std::time::Duration;

use crate::request::ResourceKind;

/// A single resource failed to load.
#[derive(Debug, thiserror::Error)]
#[error("Failed to load {kind} resource '{identifier}' from {locator}: {source}")]
pub struct ResourceLoadError {
    /// Identifier as given in the request.
    pub identifier: String,
    /// Area the resource was issued into.
    pub kind: ResourceKind,
    /// Resolved locator.
    pub locator: String,
    /// Time from issue to failure.
    pub elapsed: Duration,
    /// Underlying cause reported by the host.
    #[source]
    pub source: anyhow::Error,
}

impl ResourceLoadError {
    /// Elapsed time in seconds.
    pub fn time_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// A group stopped at its first failed resource.
///
/// Resources after `index` were never attempted.
#[derive(Debug, thiserror::Error)]
#[error("{} group aborted at resource {} of {total}", .kind, .index + 1)]
pub struct GroupLoadError {
    /// Group that failed.
    pub kind: ResourceKind,
    /// Zero-based position of the failed resource.
    pub index: usize,
    /// Size of the group.
    pub total: usize,
    /// The failure, unmodified.
    #[source]
    pub source: ResourceLoadError,
}

impl GroupLoadError {
    /// Identifier of the resource that failed.
    pub fn identifier(&self) -> &str {
        &self.source.identifier
    }
}

/// The pipeline did not complete.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A group failed, so the main resource was never loaded.
    #[error("Pipeline aborted: {0}")]
    Aborted(#[from] GroupLoadError),

    /// Every group loaded but the main resource failed.
    #[error("Main resource failed: {0}")]
    Main(#[source] ResourceLoadError),
}

impl LoadError {
    /// The resource-level failure behind this error.
    pub fn resource_error(&self) -> &ResourceLoadError {
        match self {
            Self::Aborted(group) => &group.source,
            Self::Main(err) => err,
        }
    }

    /// Identifier of the resource that failed.
    pub fn identifier(&self) -> &str {
        &self.resource_error().identifier
    }

    /// Check if the pipeline stopped before reaching the main resource.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }
}
