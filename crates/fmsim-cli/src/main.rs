//! FMSim command shell
//!
//! Interactive front end for the in-memory multi-user file store.

use anyhow::{Context, Result};
use clap::Parser;
use fmsim_vfs::{Console, FmsConfig};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod repl;

use crate::repl::Repl;

#[derive(Parser, Debug)]
#[command(name = "fmsim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "FMSim - in-memory multi-user file store shell")]
struct Args {
    /// JSON config file with limits and seed users
    #[arg(long, env = "FMSIM_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => FmsConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => FmsConfig::default(),
    };
    info!(
        "CLI startup: config={:?}, max_files={}, seed_users={}",
        args.config,
        config.limits.max_files,
        config.seed_users.len()
    );

    let console = Console::new(&config).context("Failed to initialize console")?;
    Repl::new(console).run()
}

/// Logs go to `log_file` when given (default level `warn`), otherwise to
/// stderr (default level `error`). Stderr shares the terminal with the
/// shell, so denial and truncation warnings stay hidden there unless
/// `RUST_LOG` asks for them. `RUST_LOG` overrides either default.
fn default_log_level(log_file: Option<&Path>) -> &'static str {
    if log_file.is_some() {
        "warn"
    } else {
        "error"
    }
}

fn setup_tracing(log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::fmt;

    let default_level = default_log_level(log_file);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(file)
                        .with_ansi(false)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .init();
            info!("Tracing initialized to {:?}", path);
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .with(filter)
                .init();
        }
    }
    Ok(())
}
