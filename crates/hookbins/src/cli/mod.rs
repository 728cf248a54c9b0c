//! CLI command definitions.

pub mod bins;

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

/// Manage webhook bins backed by a durable store and a read-through cache.
#[derive(Debug, Parser)]
#[command(name = "hookbins")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Deadline for each repository operation (e.g. `500ms`, `5s`).
    #[arg(long, global = true, env = "HOOKBINS_TIMEOUT", default_value = "10s", value_parser = humantime::parse_duration)]
    pub timeout: Duration,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the store schema if it does not exist.
    Migrate,
    /// Bin management.
    Bins(bins::BinsCommand),
}

/// Bounds `fut` by `deadline`. Dropping the future on expiry cancels any
/// in-flight store or cache call.
pub async fn with_deadline<F: Future>(deadline: Duration, fut: F) -> anyhow::Result<F::Output> {
    tokio::time::timeout(deadline, fut)
        .await
        .with_context(|| format!("operation timed out after {}", humantime::format_duration(deadline)))
}
