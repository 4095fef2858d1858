//! Partner Ingest Library
//!
//! This library pulls form records and their file attachments from the
//! partner business platform into a local working directory, where
//! downstream document processing picks them up.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`transport`] - pooled HTTP client with API and download timeout budgets
//! - [`envelope`] - the partner's two response envelopes
//! - [`auth`] - login and the exactly-once session
//! - [`fetch`] - concurrent form queries and child-table expansion
//! - [`collect`] - attachment discovery, deduplication and classification
//! - [`download`] - sequential streaming downloads
//! - [`ingest`] - output layout and the end-to-end run
//! - [`config`] - environment configuration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod collect;
pub mod config;
pub mod download;
pub mod envelope;
pub mod fetch;
pub mod ingest;
#[cfg(test)]
pub mod test_support;
pub mod transport;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use auth::{AuthError, AuthSession, Authenticator, Credentials};
pub use collect::{FileCategory, FileReference, collect_files};
pub use config::{ConfigError, IngestConfig};
pub use download::{DownloadFailure, DownloadReport, FileDownloader};
pub use envelope::{Envelope, EnvelopeError, unwrap_envelope};
pub use fetch::{NamedResult, QUERY_DESCRIPTORS, RecordFetcher, TargetIds};
pub use ingest::{DownloadsPlacement, IngestError, IngestSummary, Ingestor, OutputLayout};
pub use transport::{PartnerTransport, TransportError, TransportTimeouts};
