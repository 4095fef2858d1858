//! `run`: one full ingestion.

use std::process::ExitCode;

use anyhow::{Context, Result};
use partner_ingest::config::{ENV_QUERY_ID, ENV_REQUIREMENT_ID, IngestConfig};
use partner_ingest::ingest::{DownloadsPlacement, IngestSummary, Ingestor};
use tracing::{info, warn};

use crate::cli::RunArgs;

pub async fn run_ingest_command(args: &RunArgs) -> Result<ExitCode> {
    let config = build_config(args, |name| std::env::var(name).ok())?;
    info!(
        root = %config.output_dir.display(),
        enterprise = %config.targets.enterprise_id,
        requirement = %config.targets.requirement_id,
        "starting ingestion"
    );

    let ingestor = Ingestor::from_config(&config)?;
    let summary = ingestor
        .run(&config.targets)
        .await
        .context("ingestion aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(exit_code(&summary))
}

/// Merges CLI overrides over environment configuration.
fn build_config<F>(args: &RunArgs, env: F) -> Result<IngestConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| -> Option<String> {
        let cli_value = match name {
            ENV_QUERY_ID => args.query_id.clone(),
            ENV_REQUIREMENT_ID => args.requirement_id.clone(),
            _ => None,
        };
        cli_value.or_else(|| env(name))
    };

    let mut config = IngestConfig::from_lookup(lookup)?;
    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    if args.flat {
        config.downloads_placement = DownloadsPlacement::Root;
    }
    if let Some(secs) = args.api_timeout {
        config = config.with_api_timeout_secs(secs)?;
    }
    if let Some(secs) = args.download_timeout {
        config = config.with_download_timeout_secs(secs)?;
    }
    Ok(config)
}

fn print_summary(summary: &IngestSummary) {
    println!("output = {}", summary.root.display());
    println!(
        "queries = {} ({} failed)",
        summary.api_payload.len(),
        summary.failed_queries()
    );
    println!(
        "files = {}/{} downloaded",
        summary.file_count, summary.attempted_files
    );
    for failure in &summary.failures {
        println!("failed: {} ({})", failure.display_name, failure.error);
    }
}

/// 0 when everything succeeded, 1 when some query or file failed.
fn exit_code(summary: &IngestSummary) -> ExitCode {
    if summary.failed_queries() > 0 || !summary.failures.is_empty() {
        warn!(
            failed_queries = summary.failed_queries(),
            failed_files = summary.failures.len(),
            "ingestion completed with failures"
        );
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
