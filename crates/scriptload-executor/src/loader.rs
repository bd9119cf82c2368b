//! Load pipeline: static and dynamic groups, then the main resource.

use std::sync::Arc;

use scriptload_core::{
    LoadError, LoadEvent, LoadObserver, LoadRequest, LoadSession, LoaderConfig, PipelineReport,
    ResourceKind,
};

use crate::group::load_group;
use crate::host::ResourceHost;
use crate::resource::{load_resource, LoadContext};
use crate::telemetry::Telemetry;

/// Run one pipeline against an explicit session.
///
/// The static and dynamic groups are started together. The first group
/// failure aborts the pipeline at once, without waiting on the other group;
/// a resource that group already issued stays `Pending` in its container.
/// When both groups fail on the same poll the static failure wins. Otherwise
/// the main resource (if any) is loaded into the static area, the session is
/// finished and a `Finish` event is emitted.
pub async fn run_pipeline(
    ctx: LoadContext<'_>,
    session: &mut LoadSession,
    request: &LoadRequest,
) -> Result<PipelineReport, LoadError> {
    let (statics, dynamics) = session.containers_mut();
    let static_group = async move {
        if request.statics.is_empty() {
            return Ok(0);
        }
        load_group(ctx, statics, &request.statics).await
    };
    let dynamic_group = async move {
        if request.dynamics.is_empty() {
            return Ok(0);
        }
        load_group(ctx, dynamics, &request.dynamics).await
    };

    let (statics_loaded, dynamics_loaded) = futures::try_join!(static_group, dynamic_group)?;

    let main = match request.main() {
        Some(identifier) => Some(
            load_resource(ctx, session.container_mut(ResourceKind::Static), identifier)
                .await
                .map_err(LoadError::Main)?,
        ),
        None => None,
    };

    let elapsed = session.finish();
    tracing::info!(
        elapsed_ms = elapsed.as_millis() as u64,
        statics_loaded,
        dynamics_loaded,
        main = request.main().unwrap_or("-"),
        "load pipeline finished"
    );
    ctx.telemetry.emit(&LoadEvent::Finish { elapsed });

    Ok(PipelineReport {
        elapsed,
        statics_loaded,
        dynamics_loaded,
        main,
    })
}

/// Owns a host, its configuration and exactly one load session.
///
/// Statics persist across `init` calls unless the configuration asks for
/// them to be cleared; dynamics are cleared with `reset`.
#[derive(Debug)]
pub struct Loader<H: ResourceHost> {
    config: LoaderConfig,
    host: H,
    telemetry: Telemetry,
    session: LoadSession,
}

impl<H: ResourceHost> Loader<H> {
    /// Create a loader.
    pub fn new(config: LoaderConfig, host: H) -> Self {
        let telemetry = Telemetry::new(config.use_logger);
        Self {
            config,
            host,
            telemetry,
            session: LoadSession::new(),
        }
    }

    /// Register an observer, builder style.
    pub fn with_observer(mut self, observer: Arc<dyn LoadObserver>) -> Self {
        self.subscribe(observer);
        self
    }

    /// Register an observer. Events only flow when `use_logger` is set.
    pub fn subscribe(&mut self, observer: Arc<dyn LoadObserver>) {
        self.telemetry.subscribe(observer);
    }

    /// Start a new session and run the pipeline.
    ///
    /// The returned future resolves when the pipeline finishes or fails.
    pub async fn init(&mut self, request: &LoadRequest) -> Result<PipelineReport, LoadError> {
        if self.config.reset_statics_on_init {
            self.unload(ResourceKind::Static);
        }
        self.session.begin();
        tracing::info!(
            statics = request.statics.len(),
            dynamics = request.dynamics.len(),
            main = request.main().unwrap_or("-"),
            "load session initialised"
        );
        self.telemetry.emit(&LoadEvent::Init { request });

        self.run(request).await
    }

    /// Run the pipeline without announcing a new session.
    ///
    /// Timing restarts on every call, so `Finish` never counts an earlier
    /// run, failed or not.
    pub async fn load(&mut self, request: &LoadRequest) -> Result<PipelineReport, LoadError> {
        self.session.begin();
        self.run(request).await
    }

    async fn run(&mut self, request: &LoadRequest) -> Result<PipelineReport, LoadError> {
        let ctx = LoadContext::new(&self.host, &self.config, &self.telemetry);
        let result = run_pipeline(ctx, &mut self.session, request).await;

        if let Err(ref error) = result {
            tracing::error!(
                identifier = error.identifier(),
                aborted = error.is_aborted(),
                error = %error,
                "load pipeline failed"
            );
            self.telemetry.emit(&LoadEvent::Failed { error });
        }
        result
    }

    /// Unload every dynamic resource. Statics and main are untouched.
    ///
    /// Returns how many entries were removed.
    pub fn reset(&mut self) -> usize {
        self.unload(ResourceKind::Dynamic)
    }

    fn unload(&mut self, kind: ResourceKind) -> usize {
        let removed = self.session.container_mut(kind).clear();
        for entry in &removed {
            self.host.detach(kind, entry);
        }
        tracing::debug!(%kind, removed = removed.len(), "resources unloaded");
        removed.len()
    }

    /// Current session.
    pub fn session(&self) -> &LoadSession {
        &self.session
    }

    /// Loader configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// The host resources are attached through.
    pub fn host(&self) -> &H {
        &self.host
    }
}
