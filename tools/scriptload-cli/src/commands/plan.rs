//! Show what a manifest would load, in order, without loading it.

use anyhow::Result;
use serde::Serialize;

use super::PlanArgs;
use crate::config::Manifest;
use crate::context::Context;
use crate::host::FsHost;

/// One planned load.
#[derive(Debug, Serialize)]
struct PlannedLoad {
    stage: &'static str,
    identifier: String,
    locator: String,
    exists: bool,
}

/// Run the plan command.
pub async fn run(args: PlanArgs, ctx: &Context) -> Result<()> {
    let (manifest, root) = ctx.load_manifest(args.manifest.as_deref())?;
    let manifest = manifest.with_overrides(args.path.as_deref(), None);
    let plan = build_plan(&manifest, &FsHost::new(root));

    if ctx.output.is_json() {
        ctx.output.json(&plan);
        return Ok(());
    }

    ctx.output.header("Load plan");
    ctx.output
        .info("static and dynamic groups run side by side, main runs last");
    for load in &plan {
        let marker = if load.exists { "" } else { "  (missing)" };
        ctx.output.list_item(&format!(
            "{:<8}{} -> {}{}",
            load.stage, load.identifier, load.locator, marker
        ));
    }

    let missing = plan.iter().filter(|l| !l.exists).count();
    if missing > 0 {
        ctx.output
            .warn(&format!("{} of {} scripts are missing", missing, plan.len()));
    }

    Ok(())
}

/// Loads in issue order: statics, then dynamics, then main.
fn build_plan(manifest: &Manifest, host: &FsHost) -> Vec<PlannedLoad> {
    let config = &manifest.loader;
    let request = &manifest.request;
    let stages = [
        ("static", request.statics.as_slice()),
        ("dynamic", request.dynamics.as_slice()),
    ];
    stages
        .iter()
        .flat_map(|(stage, ids)| ids.iter().map(move |id| (*stage, id.as_str())))
        .chain(request.main().map(|main| ("main", main)))
        .map(|(stage, identifier)| {
            let locator = config.locate(identifier);
            PlannedLoad {
                stage,
                identifier: identifier.to_string(),
                exists: host.resolve(&locator).is_file(),
                locator,
            }
        })
        .collect()
}
