//! Error types for an ingestion run.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::auth::AuthError;
use crate::transport::TransportError;

/// Errors that abort an ingestion run.
///
/// Query and download failures are not here: they are recorded per item and
/// reported in the [`IngestSummary`](super::IngestSummary).
#[derive(Debug, Error)]
pub enum IngestError {
    /// No session could be established; nothing was written.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The HTTP client could not be built from configuration.
    #[error("[SETUP] {0}")]
    Transport(#[from] TransportError),

    /// The output tree could not be reset or created.
    #[error("[OUTPUT] cannot prepare {path}: {source}")]
    Layout {
        /// Directory being removed or created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// `api-data.json` could not be written.
    #[error("[OUTPUT] cannot write {path}: {source}")]
    Persist {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Results could not be serialized.
    #[error("[OUTPUT] cannot serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IngestError {
    /// Creates a layout error for `path`.
    pub fn layout(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Layout {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a persist error for `path`.
    pub fn persist(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Persist {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
