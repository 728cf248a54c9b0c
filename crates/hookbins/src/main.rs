use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hookbins::cli::{with_deadline, Cli, Commands};
use hookbins::config::Config;
use hookbins::state::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    let config = Config::from_env().context("invalid configuration")?;

    match cli.command {
        Commands::Migrate => {
            with_deadline(cli.timeout, state::open_store(&config)).await??;
            tracing::info!(path = %config.sqlite_path, "Store schema is up to date");
        }
        Commands::Bins(bins_cmd) => {
            let state = with_deadline(cli.timeout, AppState::new(&config)).await??;
            let output =
                with_deadline(cli.timeout, bins_cmd.execute(state.bins.as_ref(), cli.format))
                    .await??;
            println!("{output}");
        }
    }

    Ok(())
}

/// Initialize tracing subscriber. Logs go to stderr so stdout stays parseable.
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hookbins=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
