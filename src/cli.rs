//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Pull partner platform records and attachments into a working directory.
///
/// Credentials and target ids come from the environment (optionally loaded
/// from a `.env` file).
#[derive(Parser, Debug)]
#[command(name = "partner-ingest")]
#[command(author, version, about)]
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Load environment variables from this file before reading configuration
    #[arg(long, value_name = "PATH", global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch records, download attachments, and write api-data.json
    Run(RunArgs),
    /// Report which required environment variables are set
    CheckEnv,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Output root; removed and recreated on every run
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write attachments into the output root instead of a downloads/ subdirectory
    #[arg(long)]
    pub flat: bool,

    /// Enterprise id (overrides QUERY_ID)
    #[arg(long, value_name = "ID")]
    pub query_id: Option<String>,

    /// Requirement id (overrides REQUIREMENT_ID)
    #[arg(long, value_name = "ID")]
    pub requirement_id: Option<String>,

    /// Per-call budget for partner API requests in seconds (1-3600)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub api_timeout: Option<u64>,

    /// Per-file budget for attachment downloads in seconds (1-3600)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub download_timeout: Option<u64>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
