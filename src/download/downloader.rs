//! Sequential attachment downloads with per-file failure capture.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use super::filename::{avoid_reserved_name, destination_filename};
use crate::collect::FileReference;
use crate::transport::PartnerTransport;

/// One attachment that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadFailure {
    /// Display name of the attachment.
    pub display_name: String,
    /// Remote URL that was requested.
    pub url: String,
    /// Rendered error.
    pub error: String,
    /// Whether the download budget ran out.
    pub timed_out: bool,
}

/// Outcome of a download batch.
///
/// `downloaded.len() + failures.len() == attempted` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadReport {
    /// Number of attachments handed to the downloader.
    pub attempted: usize,
    /// Files written, in attempt order.
    pub downloaded: Vec<PathBuf>,
    /// Attachments that failed, in attempt order.
    pub failures: Vec<DownloadFailure>,
}

impl DownloadReport {
    /// Returns the number of files written.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.downloaded.len()
    }

    /// Returns the number of failed attachments.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Streams collected attachments to disk, one at a time.
///
/// Attachment URLs are pre-signed or public, so no auth headers are sent.
#[derive(Debug, Clone)]
pub struct FileDownloader {
    transport: PartnerTransport,
    reserved_names: Vec<&'static str>,
}

impl FileDownloader {
    /// Creates a downloader over a shared transport.
    #[must_use]
    pub fn new(transport: PartnerTransport) -> Self {
        Self {
            transport,
            reserved_names: Vec::new(),
        }
    }

    /// Names an attachment must not take in the target directory; a
    /// matching attachment is written under a `_`-prefixed name instead.
    #[must_use]
    pub fn with_reserved_names(mut self, names: &[&'static str]) -> Self {
        self.reserved_names = names.to_vec();
        self
    }

    /// Downloads every file into `dir`, sequentially and in order.
    ///
    /// A failure is logged and recorded; it never stops the batch. Two
    /// attachments with the same display name write the same path and the
    /// later one wins.
    #[instrument(skip(self, files), fields(files = files.len(), dir = %dir.display()))]
    pub async fn download_all(&self, files: &[FileReference], dir: &Path) -> DownloadReport {
        let mut report = DownloadReport {
            attempted: files.len(),
            ..DownloadReport::default()
        };

        for (index, file) in files.iter().enumerate() {
            let name = avoid_reserved_name(
                destination_filename(&file.display_name),
                &self.reserved_names,
            );
            let dest = dir.join(name);
            match self.transport.download_to_path(&file.remote_url, &dest).await {
                Ok(bytes) => {
                    info!(
                        index = index + 1,
                        total = files.len(),
                        name = %file.display_name,
                        category = %file.category,
                        bytes,
                        "attachment downloaded"
                    );
                    report.downloaded.push(dest);
                }
                Err(e) => {
                    warn!(
                        name = %file.display_name,
                        url = %file.remote_url,
                        timed_out = e.is_timeout(),
                        error = %e,
                        "attachment download failed"
                    );
                    report.failures.push(DownloadFailure {
                        display_name: file.display_name.clone(),
                        url: file.remote_url.clone(),
                        error: e.to_string(),
                        timed_out: e.is_timeout(),
                    });
                }
            }
        }

        info!(
            attempted = report.attempted,
            succeeded = report.succeeded(),
            failed = report.failed(),
            "download batch finished"
        );
        report
    }
}
