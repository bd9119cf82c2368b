//! Single resource load primitive.

use std::time::Instant;

use scriptload_core::{
    EntryState, LoaderConfig, ResourceContainer, ResourceLoadError, ResourceOutcome,
};

use crate::host::ResourceHost;
use crate::telemetry::Telemetry;
use crate::timeout::with_timeout;

/// Shared, read-only inputs for every load in a pipeline run.
#[derive(Clone, Copy)]
pub struct LoadContext<'a> {
    /// Host that attaches resources.
    pub host: &'a dyn ResourceHost,
    /// Loader configuration.
    pub config: &'a LoaderConfig,
    /// Event fan-out.
    pub telemetry: &'a Telemetry,
}

impl<'a> LoadContext<'a> {
    /// Create a load context.
    pub fn new(
        host: &'a dyn ResourceHost,
        config: &'a LoaderConfig,
        telemetry: &'a Telemetry,
    ) -> Self {
        Self {
            host,
            config,
            telemetry,
        }
    }
}

/// Load one resource into `container`.
///
/// A pending entry is appended before the host is asked to attach, then
/// marked loaded or failed once the attach resolves. Elapsed time covers
/// issue to resolution either way.
pub async fn load_resource(
    ctx: LoadContext<'_>,
    container: &mut ResourceContainer,
    identifier: &str,
) -> Result<ResourceOutcome, ResourceLoadError> {
    let kind = container.kind();
    let locator = ctx.config.locate(identifier);
    let index = container.push(identifier, locator.as_str());

    tracing::debug!(%kind, identifier, locator = %locator, "issuing resource load");
    let start = Instant::now();
    let result = with_timeout(
        ctx.config.resource_timeout(),
        ctx.host.attach(kind, &locator),
    )
    .await;
    let elapsed = start.elapsed();

    match result {
        Ok(message) => {
            container.mark(index, EntryState::Loaded);
            tracing::debug!(
                %kind,
                identifier,
                elapsed_ms = elapsed.as_millis() as u64,
                "resource loaded"
            );
            Ok(ResourceOutcome::loaded(elapsed, message))
        }
        Err(source) => {
            container.mark(index, EntryState::Failed);
            tracing::warn!(
                %kind,
                identifier,
                elapsed_ms = elapsed.as_millis() as u64,
                error = %source,
                "resource failed to load"
            );
            Err(ResourceLoadError {
                identifier: identifier.to_string(),
                kind,
                locator,
                elapsed,
                source,
            })
        }
    }
}
