//! # areg CLI entry point
//!
//! Parses command-line arguments, sets up logging, opens the session file
//! and dispatches to the subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use areg_cli::account::{run_account, AccountCommand};
use areg_cli::records::{run_records, RecordCommand};
use areg_cli::{default_state_file, Context};

/// Acquisition register client.
///
/// Keeps the register of second-hand goods sellers on the register server:
/// log in, then list, search, create, edit and delete records.
#[derive(Parser, Debug)]
#[command(name = "areg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// API base URL (overrides AREG_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (default: <config dir>/areg/session.json).
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Account(AccountCommand),

    #[command(flatten)]
    Records(RecordCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<u8> {
    let state_file = match cli.state_file {
        Some(path) => path,
        None => default_state_file()?,
    };
    let ctx = Context::open(cli.api_url.as_deref(), &state_file)?;

    match &cli.command {
        Commands::Account(command) => run_account(command, &ctx).await,
        Commands::Records(command) => run_records(command, &ctx).await,
    }
}
