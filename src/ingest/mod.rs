//! Ingestion orchestration.
//!
//! An [`Ingestor`] runs the pipeline once: establish a session, fetch every
//! query, collect attachments, reset the [`OutputLayout`], download, and
//! persist the per-query outcomes to `api-data.json`.

mod error;
mod ingestor;
mod layout;

pub use error::IngestError;
pub use ingestor::{IngestSummary, Ingestor};
pub use layout::{
    API_DATA_FILE, DOWNLOADS_DIR, DownloadsPlacement, IMAGES_DIR, OutputLayout, TEXTS_DIR,
};
