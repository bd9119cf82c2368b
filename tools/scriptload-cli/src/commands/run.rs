//! Load the scripts a manifest names from the filesystem.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use scriptload_core::{PipelineReport, ResourceKind};
use scriptload_executor::Loader;
use scriptload_observability::{LogFormat, LogLevel, LogWindow};
use serde::Serialize;

use super::RunArgs;
use crate::context::Context;
use crate::host::FsHost;
use crate::output::{format_duration, ProgressObserver};

/// Machine-readable result of a run.
#[derive(Debug, Serialize)]
struct RunSummary {
    elapsed_ms: u64,
    statics_loaded: usize,
    dynamics_loaded: usize,
    main: Option<String>,
    statics: Vec<String>,
    dynamics: Vec<String>,
}

impl RunSummary {
    fn new(report: &PipelineReport, host: &FsHost) -> Self {
        Self {
            elapsed_ms: report.elapsed.as_millis() as u64,
            statics_loaded: report.statics_loaded,
            dynamics_loaded: report.dynamics_loaded,
            main: report.main.as_ref().map(|m| m.message.clone()),
            statics: host.attached(ResourceKind::Static),
            dynamics: host.attached(ResourceKind::Dynamic),
        }
    }
}

/// Run the run command.
pub async fn run(args: RunArgs, ctx: &Context) -> Result<()> {
    let (manifest, root) = ctx.load_manifest(args.manifest.as_deref())?;
    let manifest = manifest.with_overrides(args.path.as_deref(), args.timeout_ms);
    tracing::debug!(root = %root.display(), path = %manifest.loader.path, "manifest loaded");
    let request = manifest.request;
    let mut config = manifest.loader;
    if args.log {
        config.use_logger = true;
    }

    if request.is_empty() {
        ctx.output.warn("Manifest requests no resources");
    }
    if !config.use_logger {
        ctx.output
            .debug("Telemetry disabled, progress will not be shown (use --log)");
    }

    ctx.output.header("Loading scripts");
    ctx.output.kv("root", &root.display().to_string());
    ctx.output.kv("path", &config.path);

    let format = if ctx.output.is_json() {
        LogFormat::Json
    } else {
        LogFormat::Human
    };
    let level = if ctx.output.is_verbose() {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let window = Arc::new(
        LogWindow::new("scriptload")
            .with_format(format)
            .with_min_level(level)
            .with_echo(ctx.output.is_verbose()),
    );
    let progress = Arc::new(ProgressObserver::new(ctx.output.progress(0, "starting")));

    let mut loader = Loader::new(config, FsHost::new(root))
        .with_observer(window.clone())
        .with_observer(progress.clone());
    let result = loader.init(&request).await;

    if args.show_log {
        for line in window.lines() {
            println!("{}", line);
        }
    }

    let report = match result {
        Ok(report) => report,
        Err(err) => {
            if let Some(last) = progress.last_loaded() {
                ctx.output.debug(&format!("Last resource loaded: {}", last));
            }
            return Err(err).context("Script loading failed");
        }
    };

    if ctx.output.is_json() {
        ctx.output.json(&RunSummary::new(&report, loader.host()));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Loaded {} resources in {}",
        report.total_loaded(),
        format_duration(report.elapsed)
    ));
    for locator in loader.host().attached(ResourceKind::Static) {
        ctx.output.list_item(&format!("static  {}", locator));
    }
    for locator in loader.host().attached(ResourceKind::Dynamic) {
        ctx.output.list_item(&format!("dynamic {}", locator));
    }
    if let Some(main) = &report.main {
        ctx.output.kv("main", &main.message);
    }

    Ok(())
}
