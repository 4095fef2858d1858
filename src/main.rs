//! CLI entry point for partner-ingest.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};

mod cli;
mod commands;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    match dispatch(&args).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{e:#}"), "partner-ingest failed");
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn dispatch(args: &Args) -> Result<ExitCode> {
    load_env_file(args)?;
    match &args.command {
        Command::Run(run) => commands::run_ingest_command(run).await,
        Command::CheckEnv => Ok(commands::run_check_env_command()),
    }
}

/// Loads `--env-file`, or `.env` from the working directory when present.
///
/// Variables already set in the process environment win.
fn load_env_file(args: &Args) -> Result<()> {
    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("cannot load env file {}", path.display()))?;
            debug!(path = %path.display(), "loaded env file");
        }
        None => match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => debug!("no .env file"),
            Err(e) => return Err(e).context("cannot load .env"),
        },
    }
    Ok(())
}
