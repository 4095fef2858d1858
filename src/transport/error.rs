//! Error types for the transport module.
//!
//! Every variant carries the URL (or path) it failed on so that a single
//! log line is enough to tell which partner call went wrong.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which timeout budget a request ran under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutClass {
    /// Login, form query, and child-table calls.
    Api,
    /// Raw attachment downloads.
    Download,
}

impl fmt::Display for TimeoutClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => f.write_str("api"),
            Self::Download => f.write_str("download"),
        }
    }
}

/// Errors raised by [`PartnerTransport`](super::PartnerTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS resolution, connection refused, TLS, or a socket reset mid-body.
    #[error("network error calling {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded its timeout budget and was cancelled.
    #[error("{class} request timed out: {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
        /// The budget that was exceeded.
        class: TimeoutClass,
    },

    /// The body declared a content encoding but could not be decompressed.
    #[error("failed to decompress response from {url}: {source}")]
    Decompress {
        /// The URL whose body failed to decode.
        url: String,
        /// The underlying reqwest decode error.
        #[source]
        source: reqwest::Error,
    },

    /// The (decompressed) body was not valid JSON.
    #[error("invalid JSON from {url}: {snippet}")]
    Json {
        /// The URL that returned the body.
        url: String,
        /// Leading characters of the body, for diagnosis.
        snippet: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A raw download returned a non-success status.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Writing the downloaded body to disk failed.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The URL could not be parsed or joined onto the API host.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The offending URL string.
        url: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
}

/// Number of body characters kept in [`TransportError::Json`].
const SNIPPET_CHARS: usize = 100;

impl TransportError {
    /// Creates a network error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error for the given budget.
    pub fn timeout(url: impl Into<String>, class: TimeoutClass) -> Self {
        Self::Timeout {
            url: url.into(),
            class,
        }
    }

    /// Creates a decompression error.
    pub fn decompress(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Decompress {
            url: url.into(),
            source,
        }
    }

    /// Creates a JSON parse error, keeping the first characters of the body.
    pub fn json(url: impl Into<String>, body: &[u8], source: serde_json::Error) -> Self {
        let snippet = String::from_utf8_lossy(body)
            .chars()
            .take(SNIPPET_CHARS)
            .collect();
        Self::Json {
            url: url.into(),
            snippet,
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Maps a reqwest error raised while sending or reading a body.
    ///
    /// Decode errors only occur once the body is being read, so the same
    /// mapping serves both phases.
    pub(crate) fn from_reqwest(url: &str, class: TimeoutClass, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::timeout(url, class)
        } else if source.is_decode() {
            Self::decompress(url, source)
        } else {
            Self::network(url, source)
        }
    }

    /// Returns true when the call was cancelled because its budget ran out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true for gzip and JSON decoding failures.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decompress { .. } | Self::Json { .. })
    }
}

// No `From<reqwest::Error>`: every variant needs the URL or path the source
// error does not carry.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display_names_budget_and_url() {
        let error = TransportError::timeout("https://api.example.com/x", TimeoutClass::Download);
        let msg = error.to_string();
        assert!(msg.contains("download"), "Expected class in: {msg}");
        assert!(msg.contains("https://api.example.com/x"), "Expected URL in: {msg}");
        assert!(error.is_timeout());
        assert!(!error.is_decode());
    }

    #[test]
    fn test_json_error_truncates_body_snippet() {
        let body = "<html>".repeat(50);
        let source = serde_json::from_str::<serde_json::Value>(&body).unwrap_err();
        let error = TransportError::json("https://api.example.com/q", body.as_bytes(), source);
        match &error {
            TransportError::Json { snippet, .. } => assert_eq!(snippet.chars().count(), 100),
            other => panic!("Expected Json error, got: {other:?}"),
        }
        assert!(error.is_decode());
        assert!(!error.is_timeout());
    }

    #[test]
    fn test_http_status_display() {
        let error = TransportError::http_status("https://oss.example.com/a.pdf", 403);
        let msg = error.to_string();
        assert!(msg.contains("403"), "Expected status in: {msg}");
        assert!(msg.contains("a.pdf"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_io_display_names_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = TransportError::io(PathBuf::from("/tmp/out/report.pdf"), io_error);
        assert!(error.to_string().contains("/tmp/out/report.pdf"));
    }

    #[test]
    fn test_invalid_url_display() {
        let error = TransportError::invalid_url("not a url");
        let msg = error.to_string();
        assert!(msg.contains("invalid URL"), "Expected 'invalid URL' in: {msg}");
        assert!(msg.contains("not a url"));
    }
}
