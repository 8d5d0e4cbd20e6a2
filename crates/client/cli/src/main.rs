//! `vpet`: command-line host for virtual creatures.
//!
//! Every command opens the save directory, catches the creature up to the
//! wall clock, applies one action and saves it again.

mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vpet_runtime::{CreatureService, RuntimeConfig};

use commands::Command;

/// Raise and battle virtual creatures
#[derive(Parser)]
#[command(name = "vpet")]
#[command(about = "Raise and battle virtual creatures", long_about = None)]
#[command(version)]
struct Cli {
    /// Save directory (overrides VPET_SAVE_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Content directory (overrides VPET_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Also write logs to `<DIR>/vpet.log`
    #[arg(long, global = true, value_name = "DIR", env = "VPET_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_dir.as_deref())?;

    let mut config = RuntimeConfig::from_env();
    if let Some(dir) = cli.save_dir {
        config.save_dir = dir;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let service = CreatureService::open(&config)?;
    debug!(command = ?cli.command, "running");
    cli.command.execute(&service).await
}

/// Logs to stderr, and to a file when a log directory is given.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(
    log_dir: Option<&std::path::Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, "vpet.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
