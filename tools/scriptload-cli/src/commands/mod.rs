//! CLI command implementations.

pub mod init;
pub mod plan;
pub mod run;

use clap::Args;

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Where to write the manifest.
    #[arg(default_value = "scriptload.toml")]
    pub path: String,

    /// Overwrite an existing manifest.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Manifest file (default: search for scriptload.toml upwards).
    pub manifest: Option<String>,

    /// Override the base path prepended to identifiers.
    #[arg(short, long)]
    pub path: Option<String>,

    /// Fail any resource that takes longer than this many milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Emit telemetry even if the manifest disables it.
    #[arg(long)]
    pub log: bool,

    /// Print the log window after the run.
    #[arg(long)]
    pub show_log: bool,
}

/// Arguments for the plan command.
#[derive(Args)]
pub struct PlanArgs {
    /// Manifest file (default: search for scriptload.toml upwards).
    pub manifest: Option<String>,

    /// Override the base path prepended to identifiers.
    #[arg(short, long)]
    pub path: Option<String>,
}
