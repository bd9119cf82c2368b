//! Load session state and resource containers.

use std::time::{Duration, Instant};

use crate::request::ResourceKind;

/// State of a single attached resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Issued, not yet resolved.
    Pending,
    /// Attached successfully.
    Loaded,
    /// Attachment failed.
    Failed,
}

/// A resource placed into a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Identifier as given in the request.
    pub identifier: String,
    /// Resolved locator.
    pub locator: String,
    /// Current state.
    pub state: EntryState,
}

/// Ordered record of the resources issued into one insertion area.
///
/// Entries are appended when a load is issued, so loading the same
/// identifier twice records it twice.
#[derive(Debug, Clone)]
pub struct ResourceContainer {
    kind: ResourceKind,
    entries: Vec<ResourceEntry>,
}

impl ResourceContainer {
    /// Create an empty container for the given area.
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    /// The area this container tracks.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Append a pending entry and return its index.
    pub fn push(&mut self, identifier: impl Into<String>, locator: impl Into<String>) -> usize {
        self.entries.push(ResourceEntry {
            identifier: identifier.into(),
            locator: locator.into(),
            state: EntryState::Pending,
        });
        self.entries.len() - 1
    }

    /// Update the state of an entry. Unknown indices are ignored.
    pub fn mark(&mut self, index: usize, state: EntryState) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.state = state;
        }
    }

    /// Get an entry by index.
    pub fn get(&self, index: usize) -> Option<&ResourceEntry> {
        self.entries.get(index)
    }

    /// All entries in issue order.
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    /// Identifiers in issue order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.identifier.as_str()).collect()
    }

    /// Number of entries that loaded successfully.
    pub fn loaded(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.state == EntryState::Loaded)
            .count()
    }

    /// Number of entries, whatever their state.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the container holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry, returning them in issue order.
    pub fn clear(&mut self) -> Vec<ResourceEntry> {
        std::mem::take(&mut self.entries)
    }
}

/// Transient state for one loader: timing plus the two containers.
#[derive(Debug, Clone)]
pub struct LoadSession {
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    statics: ResourceContainer,
    dynamics: ResourceContainer,
}

impl LoadSession {
    /// Create an idle session with empty containers.
    pub fn new() -> Self {
        Self {
            started_at: None,
            finished_at: None,
            statics: ResourceContainer::new(ResourceKind::Static),
            dynamics: ResourceContainer::new(ResourceKind::Dynamic),
        }
    }

    /// Start timing a new run. Containers are left as they are.
    pub fn begin(&mut self) {
        self.started_at = Some(Instant::now());
        self.finished_at = None;
    }

    /// Record the end of the run and return its total duration.
    pub fn finish(&mut self) -> Duration {
        let now = Instant::now();
        let started = *self.started_at.get_or_insert(now);
        self.finished_at = Some(now);
        now.duration_since(started)
    }

    /// Time since `begin`, frozen once the session has finished.
    pub fn elapsed(&self) -> Option<Duration> {
        let started = self.started_at?;
        Some(match self.finished_at {
            Some(finished) => finished.duration_since(started),
            None => started.elapsed(),
        })
    }

    /// Check if the current run reached `finish`.
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Check if `begin` has been called.
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Static container.
    pub fn statics(&self) -> &ResourceContainer {
        &self.statics
    }

    /// Dynamic container.
    pub fn dynamics(&self) -> &ResourceContainer {
        &self.dynamics
    }

    /// Container for a kind.
    pub fn container(&self, kind: ResourceKind) -> &ResourceContainer {
        match kind {
            ResourceKind::Static => &self.statics,
            ResourceKind::Dynamic => &self.dynamics,
        }
    }

    /// Mutable container for a kind.
    pub fn container_mut(&mut self, kind: ResourceKind) -> &mut ResourceContainer {
        match kind {
            ResourceKind::Static => &mut self.statics,
            ResourceKind::Dynamic => &mut self.dynamics,
        }
    }

    /// Both containers at once, so each group can borrow its own.
    pub fn containers_mut(&mut self) -> (&mut ResourceContainer, &mut ResourceContainer) {
        (&mut self.statics, &mut self.dynamics)
    }
}

impl Default for LoadSession {
    fn default() -> Self {
        Self::new()
    }
}
