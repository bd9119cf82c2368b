//! Scriptload CLI - load and inspect script manifests.
//!
//! Commands:
//! - `scriptload init` - Write a starter manifest
//! - `scriptload run` - Load the manifest's scripts from disk
//! - `scriptload plan` - Show load order and resolved locators

mod commands;
mod config;
mod context;
mod host;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{InitArgs, PlanArgs, RunArgs};

/// Scriptload - sequenced script loading
#[derive(Parser)]
#[command(name = "scriptload")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter manifest
    Init(InitArgs),

    /// Load every script in a manifest
    Run(RunArgs),

    /// Show load order without loading
    Plan(PlanArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::new(output)?;

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(args, &ctx).await,
        Commands::Run(args) => commands::run::run(args, &ctx).await,
        Commands::Plan(args) => commands::plan::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
