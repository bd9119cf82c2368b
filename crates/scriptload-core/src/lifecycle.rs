//! Load outcomes and telemetry events.

use std::time::Duration;

use crate::error::LoadError;
use crate::request::{LoadRequest, ResourceKind};

/// Result of a successful resource load.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceOutcome {
    /// Always true for an outcome; failures are `ResourceLoadError`.
    pub success: bool,
    /// Time from issue to resolution.
    pub elapsed: Duration,
    /// Message reported by the host.
    pub message: String,
}

impl ResourceOutcome {
    /// Create a successful outcome.
    pub fn loaded(elapsed: Duration, message: impl Into<String>) -> Self {
        Self {
            success: true,
            elapsed,
            message: message.into(),
        }
    }

    /// Elapsed time in seconds.
    pub fn time_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Summary of a pipeline run that completed.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// Total time from `init` (or `load`) to finish.
    pub elapsed: Duration,
    /// Static resources loaded by this run.
    pub statics_loaded: usize,
    /// Dynamic resources loaded by this run.
    pub dynamics_loaded: usize,
    /// Outcome of the main resource, if one was requested.
    pub main: Option<ResourceOutcome>,
}

impl PipelineReport {
    /// Total resources loaded by this run, main included.
    pub fn total_loaded(&self) -> usize {
        self.statics_loaded + self.dynamics_loaded + usize::from(self.main.is_some())
    }
}

/// Telemetry emitted by the loader.
#[derive(Debug, Clone, Copy)]
pub enum LoadEvent<'a> {
    /// A pipeline run started with this request.
    Init {
        /// The full request.
        request: &'a LoadRequest,
    },
    /// A resource in a group finished loading.
    Progress {
        /// Group the resource belongs to.
        kind: ResourceKind,
        /// Identifier that just loaded.
        identifier: &'a str,
        /// Resources loaded so far in this group.
        completed: usize,
        /// Size of the group.
        total: usize,
    },
    /// The pipeline completed every requested stage.
    Finish {
        /// Total run time.
        elapsed: Duration,
    },
    /// The pipeline failed.
    Failed {
        /// The failure returned to the caller.
        error: &'a LoadError,
    },
}

impl LoadEvent<'_> {
    /// Short name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::Progress { .. } => "progress",
            Self::Finish { .. } => "finish",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Observer for loader telemetry.
///
/// Presentation adapters implement this to render progress without the
/// loader knowing about them.
pub trait LoadObserver: Send + Sync {
    /// Called for each event, in the order the loader produced them.
    fn on_event(&self, event: &LoadEvent<'_>);
}

impl<F> LoadObserver for F
where
    F: Fn(&LoadEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &LoadEvent<'_>) {
        self(event)
    }
}

/// Percentage of a group that has loaded, rounded down.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((completed.min(total) * 100) / total) as u8
}
