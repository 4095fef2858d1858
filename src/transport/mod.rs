//! HTTP transport for the partner platform.
//!
//! This module provides the low-level request primitive every other
//! component builds on:
//!
//! - JSON calls against the API host with transparent gzip/deflate
//!   decompression and a short timeout budget
//! - Streaming attachment downloads with a long timeout budget and partial
//!   file cleanup
//! - Classified errors distinguishing network, timeout, decompression, and
//!   JSON failures
//!
//! # Example
//!
//! ```no_run
//! use partner_ingest::transport::{ApiRequest, PartnerTransport, TransportTimeouts};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = PartnerTransport::new("api.example.com", TransportTimeouts::default())?;
//! let response = transport
//!     .send_json(&ApiRequest::get("/api/platform/forms/online").query("page", "1"))
//!     .await?;
//! println!("HTTP {}", response.status);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;

pub use client::{ApiRequest, ApiResponse, PartnerTransport, TransportTimeouts, api_base_url};
pub use error::{TimeoutClass, TransportError};
