//! The end-to-end ingestion run.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use super::{IngestError, OutputLayout};
use crate::auth::{AuthSession, Authenticator, Credentials};
use crate::collect::{FileReference, collect_files};
use crate::config::IngestConfig;
use crate::download::{DownloadFailure, FileDownloader};
use crate::fetch::{NamedResult, RecordFetcher, TargetIds};
use crate::transport::PartnerTransport;

/// Outcome of a completed ingestion run.
///
/// Produced even when every query or download failed; only an auth or disk
/// failure prevents a summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    /// Output root that was written.
    pub root: PathBuf,
    /// Distinct attachments that were attempted.
    pub attempted_files: usize,
    /// Attachments successfully written.
    pub file_count: usize,
    /// Written file paths, in attempt order.
    pub downloaded: Vec<PathBuf>,
    /// Per-attachment failures.
    pub failures: Vec<DownloadFailure>,
    /// Collected attachments, in collection order.
    pub files: Vec<FileReference>,
    /// Per-query outcomes, as persisted to `api-data.json`.
    pub api_payload: Vec<NamedResult>,
}

impl IngestSummary {
    /// Returns the number of queries that failed.
    #[must_use]
    pub fn failed_queries(&self) -> usize {
        self.api_payload.iter().filter(|r| !r.success).count()
    }
}

/// Drives one ingestion run: auth, fetch, collect, download, persist.
#[derive(Debug)]
pub struct Ingestor {
    authenticator: Authenticator,
    fetcher: RecordFetcher,
    downloader: FileDownloader,
    layout: OutputLayout,
}

impl Ingestor {
    /// Wires the pipeline over one shared transport.
    #[must_use]
    pub fn new(transport: PartnerTransport, credentials: Credentials, layout: OutputLayout) -> Self {
        Self {
            authenticator: Authenticator::new(transport.clone(), credentials),
            fetcher: RecordFetcher::new(transport.clone()),
            downloader: FileDownloader::new(transport)
                .with_reserved_names(layout.reserved_names()),
            layout,
        }
    }

    /// Builds the transport and layout described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Transport`] when the API host is not a valid
    /// http(s) URL or the client cannot be built.
    pub fn from_config(config: &IngestConfig) -> Result<Self, IngestError> {
        let transport = PartnerTransport::new(&config.credentials.api_host, config.timeouts)?;
        let layout = OutputLayout::new(&config.output_dir, config.downloads_placement);
        Ok(Self::new(transport, config.credentials.clone(), layout))
    }

    /// Returns the session, logging in on first use.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Auth`] when login fails.
    pub async fn session(&self) -> Result<&AuthSession, IngestError> {
        Ok(self.authenticator.session().await?)
    }

    /// Runs the whole pipeline for `targets`.
    ///
    /// Authentication happens before anything touches the filesystem, so a
    /// rejected login leaves a previous output tree intact. The output root
    /// is then reset and repopulated from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] for auth failure, or when the output tree or
    /// `api-data.json` cannot be written. Query and download failures are
    /// reported in the summary instead.
    #[instrument(skip(self, targets), fields(root = %self.layout.root.display()))]
    pub async fn run(&self, targets: &TargetIds) -> Result<IngestSummary, IngestError> {
        let session = self.session().await?;

        let results = self.fetcher.fetch_all(session, targets).await;
        let files = collect_files(&results);

        self.layout.prepare().await?;
        let report = self
            .downloader
            .download_all(&files, &self.layout.downloads)
            .await;
        self.persist(&results).await?;

        let summary = IngestSummary {
            root: self.layout.root.clone(),
            attempted_files: report.attempted,
            file_count: report.succeeded(),
            downloaded: report.downloaded,
            failures: report.failures,
            files,
            api_payload: results,
        };
        info!(
            queries = summary.api_payload.len(),
            failed_queries = summary.failed_queries(),
            attempted = summary.attempted_files,
            downloaded = summary.file_count,
            "ingestion finished"
        );
        Ok(summary)
    }

    async fn persist(&self, results: &[NamedResult]) -> Result<(), IngestError> {
        let path = self.layout.api_data_path();
        let body = serde_json::to_vec_pretty(results)?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| IngestError::persist(&path, e))?;
        info!(path = %path.display(), "wrote api data");
        Ok(())
    }
}
