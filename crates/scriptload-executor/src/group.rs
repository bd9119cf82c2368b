//! Sequential, fail-fast group loading.

use scriptload_core::{GroupLoadError, LoadEvent, ResourceContainer};

use crate::resource::{load_resource, LoadContext};

/// Load `identifiers` into `container` one at a time, in order.
///
/// Each load starts only after the previous one succeeded, and a progress
/// event follows every success. The first failure is returned as a
/// `GroupLoadError` and the rest of the group is never attempted. An empty
/// group succeeds without emitting anything.
///
/// Returns the number of resources loaded.
pub async fn load_group(
    ctx: LoadContext<'_>,
    container: &mut ResourceContainer,
    identifiers: &[String],
) -> Result<usize, GroupLoadError> {
    let kind = container.kind();
    let total = identifiers.len();
    if total == 0 {
        return Ok(0);
    }

    tracing::debug!(%kind, total, "group load started");
    for (index, identifier) in identifiers.iter().enumerate() {
        if let Err(source) = load_resource(ctx, container, identifier).await {
            tracing::warn!(%kind, index, total, identifier = %identifier, "group aborted");
            return Err(GroupLoadError {
                kind,
                index,
                total,
                source,
            });
        }

        ctx.telemetry.emit(&LoadEvent::Progress {
            kind,
            identifier,
            completed: index + 1,
            total,
        });
    }
    tracing::debug!(%kind, total, "group load finished");

    Ok(total)
}
