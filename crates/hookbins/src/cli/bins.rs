//! Bin CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

use hookbins_core::bins::{BinPatch, NewBin};
use hookbins_core::pagination::{QueryOpts, DEFAULT_LIMIT};
use hookbins_core::storage::{ensure_affected, BinRepository, Result};

use crate::cli::OutputFormat;
use crate::output::{format_json, pretty, Affected};

/// Bin management commands.
#[derive(Debug, Parser)]
pub struct BinsCommand {
    /// Account that owns the bins.
    #[arg(long, global = true, env = "HOOKBINS_ACCOUNT")]
    pub account: Option<String>,

    #[command(subcommand)]
    pub action: BinsAction,
}

/// Available bin actions.
#[derive(Debug, Subcommand)]
pub enum BinsAction {
    /// List a page of bins.
    List {
        /// Zero-based page number. Negative values are treated as 0.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        page: i64,
        /// Page size, clamped to 1..=100.
        #[arg(long, default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
        limit: i64,
    },
    /// Get bin by ID.
    Get {
        /// Bin ID.
        id: Uuid,
    },
    /// Create a new bin.
    Create {
        /// Bin title.
        #[arg(long)]
        title: String,
    },
    /// Update a bin.
    Update {
        /// Bin ID.
        id: Uuid,
        /// New title.
        #[arg(long)]
        title: Option<String>,
    },
    /// Delete bin by ID.
    Delete {
        /// Bin ID.
        id: Uuid,
    },
    /// Delete every bin owned by the account.
    Destroy,
}

impl BinsCommand {
    /// Runs the action against `repo` and renders the result.
    ///
    /// Update and delete that affect nothing are reported as not found.
    pub async fn execute(&self, repo: &dyn BinRepository, format: OutputFormat) -> Result<String> {
        let account = self.account.as_deref().unwrap_or_default();

        let output = match &self.action {
            BinsAction::List { page, limit } => {
                let bins = repo.get_all(account, QueryOpts::new(*page, *limit)).await?;
                match format {
                    OutputFormat::Json => format_json(&bins),
                    OutputFormat::Pretty => pretty::format_bins(&bins),
                }
            }
            BinsAction::Get { id } => {
                let bin = repo.get(account, *id).await?;
                match format {
                    OutputFormat::Json => format_json(&bin),
                    OutputFormat::Pretty => pretty::format_bin(&bin),
                }
            }
            BinsAction::Create { title } => {
                let bin = repo.create(account, &NewBin::new(title.clone())).await?;
                match format {
                    OutputFormat::Json => format_json(&bin),
                    OutputFormat::Pretty => format!("Created:\n{}", pretty::format_bin(&bin)),
                }
            }
            BinsAction::Update { id, title } => {
                let patch = BinPatch {
                    title: title.clone(),
                };
                let affected = ensure_affected(repo.update(account, *id, &patch).await?, id)?;
                match format {
                    OutputFormat::Json => format_json(&Affected { affected }),
                    OutputFormat::Pretty => format!("Updated bin {id}"),
                }
            }
            BinsAction::Delete { id } => {
                let affected = ensure_affected(repo.delete(account, *id).await?, id)?;
                match format {
                    OutputFormat::Json => format_json(&Affected { affected }),
                    OutputFormat::Pretty => format!("Deleted bin {id}"),
                }
            }
            BinsAction::Destroy => {
                let affected = repo.destroy(account).await?;
                match format {
                    OutputFormat::Json => format_json(&Affected { affected }),
                    OutputFormat::Pretty => format!("Destroyed {affected} bin(s)"),
                }
            }
        };

        Ok(output)
    }
}
