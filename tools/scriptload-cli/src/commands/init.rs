//! Write a starter manifest.

use anyhow::{bail, Context as _, Result};

use super::InitArgs;
use crate::config::generate_default_manifest;
use crate::context::Context;

/// Run the init command.
pub async fn run(args: InitArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.path);
    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    std::fs::write(&path, generate_default_manifest())
        .with_context(|| format!("Failed to write manifest: {}", path.display()))?;

    ctx.output.success(&format!("Created {}", path.display()));
    Ok(())
}
