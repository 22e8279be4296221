//! slurmsync - Synchronize directory groups with the Slurm accounting
//! database.
//!
//! Reads `slurm_*` groups from the directory, reads the current accounting
//! state through `sacctmgr`, computes the minimal idempotent action plan,
//! and applies it (or previews it with `--dry-run`). Designed to run as a
//! periodically-scheduled batch job.

use clap::Parser;
use std::path::PathBuf;

use slurmsync::config::AppConfig;
use slurmsync::error::CliResult;
use slurmsync::run::{self, RunOptions};

/// Synchronize directory groups with the Slurm accounting database.
#[derive(Parser)]
#[command(name = "slurmsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Compute and log the action plan without touching the scheduler.
    #[arg(long)]
    dry_run: bool,

    /// Exit non-zero when any individual action fails to apply.
    #[arg(long)]
    fail_on_errors: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_cli(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run_cli(cli: Cli) -> CliResult<()> {
    let path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(AppConfig::config_path()));
    let mut config = AppConfig::from_file(&path)?;
    config.apply_env_overrides();

    init_tracing(&config.logging.level);

    config.validate()?;

    let opts = RunOptions {
        dry_run: cli.dry_run,
        fail_on_errors: cli.fail_on_errors,
    };
    let summary = run::execute(&config, opts).await?;

    // The summary goes to stdout as one JSON document for audit trails;
    // everything else is tracing output on stderr.
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!(error = %e, "failed to render run summary"),
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
