//! Sequential attachment downloads.
//!
//! [`FileDownloader`] streams each collected [`FileReference`] into the
//! output layout through the shared transport. Failures are recorded in a
//! [`DownloadReport`] and never abort the batch.
//!
//! # Example
//!
//! ```no_run
//! use partner_ingest::download::FileDownloader;
//! use partner_ingest::transport::{PartnerTransport, TransportTimeouts};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = PartnerTransport::new("api.example.com", TransportTimeouts::default())?;
//! let report = FileDownloader::new(transport)
//!     .download_all(&[], Path::new("./downloads"))
//!     .await;
//! println!("{}/{} downloaded", report.succeeded(), report.attempted);
//! # Ok(())
//! # }
//! ```
//!
//! [`FileReference`]: crate::collect::FileReference

mod downloader;
mod filename;

pub use downloader::{DownloadFailure, DownloadReport, FileDownloader};
pub use filename::{FALLBACK_FILENAME, destination_filename};
