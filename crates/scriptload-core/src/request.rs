//! Load requests and resource kinds.

use serde::{Deserialize, Serialize};

/// Which insertion area a resource is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Loaded once and expected to stay resident.
    Static,
    /// Loaded per request, removable through `reset`.
    Dynamic,
}

impl ResourceKind {
    /// Get the name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A request to load resource groups, followed by an optional main resource.
///
/// Every field is optional on the wire. A missing group is empty and a
/// missing or empty `main` means there is no terminal resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Resources that stay resident across requests.
    #[serde(default)]
    pub statics: Vec<String>,
    /// Resources that can be swapped out with `reset`.
    #[serde(default)]
    pub dynamics: Vec<String>,
    /// Loaded last, only after every group succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
}

impl LoadRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the static group.
    pub fn with_statics<I, S>(mut self, statics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statics = statics.into_iter().map(Into::into).collect();
        self
    }

    /// Set the dynamic group.
    pub fn with_dynamics<I, S>(mut self, dynamics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dynamics = dynamics.into_iter().map(Into::into).collect();
        self
    }

    /// Set the main resource.
    pub fn with_main(mut self, main: impl Into<String>) -> Self {
        self.main = Some(main.into());
        self
    }

    /// The main resource, treating an empty identifier as absent.
    pub fn main(&self) -> Option<&str> {
        self.main.as_deref().filter(|m| !m.is_empty())
    }

    /// Identifiers of a group.
    pub fn group(&self, kind: ResourceKind) -> &[String] {
        match kind {
            ResourceKind::Static => &self.statics,
            ResourceKind::Dynamic => &self.dynamics,
        }
    }

    /// Total number of resources this request will attempt on success.
    pub fn total_resources(&self) -> usize {
        self.statics.len() + self.dynamics.len() + usize::from(self.main().is_some())
    }

    /// Check if the request loads nothing at all.
    pub fn is_empty(&self) -> bool {
        self.total_resources() == 0
    }
}
