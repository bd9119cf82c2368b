//! Host seam for attaching resources to a document.

use async_trait::async_trait;
use scriptload_core::{ResourceEntry, ResourceKind};

/// The environment that actually attaches scripts.
///
/// `kind` selects the insertion area. The host owns both areas; the loader
/// only tracks what it issued into each.
#[async_trait]
pub trait ResourceHost: Send + Sync {
    /// Attach the resource at `locator` and resolve once it has loaded.
    ///
    /// The returned string is the success message carried in the outcome.
    async fn attach(&self, kind: ResourceKind, locator: &str) -> anyhow::Result<String>;

    /// Remove a previously attached resource. Called by `reset`.
    fn detach(&self, _kind: ResourceKind, _entry: &ResourceEntry) {}
}

#[async_trait]
impl<H> ResourceHost for std::sync::Arc<H>
where
    H: ResourceHost + ?Sized,
{
    async fn attach(&self, kind: ResourceKind, locator: &str) -> anyhow::Result<String> {
        (**self).attach(kind, locator).await
    }

    fn detach(&self, kind: ResourceKind, entry: &ResourceEntry) {
        (**self).detach(kind, entry)
    }
}
