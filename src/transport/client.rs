//! HTTP transport for the partner API and attachment downloads.
//!
//! [`PartnerTransport`] owns one pooled reqwest client. JSON calls and raw
//! downloads share it but run under different timeout budgets, applied per
//! request so a slow attachment never stretches the budget of a form query.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{API_TIMEOUT_SECS, CONNECT_TIMEOUT_SECS, DOWNLOAD_TIMEOUT_SECS};
use super::error::{TimeoutClass, TransportError};
use crate::user_agent;

/// Timeout budgets applied by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportTimeouts {
    /// TCP/TLS connect budget, shared by both call classes.
    pub connect: Duration,
    /// Whole-request budget for JSON calls.
    pub api: Duration,
    /// Whole-request budget for attachment downloads, body included.
    pub download: Duration,
}

impl Default for TransportTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            api: Duration::from_secs(API_TIMEOUT_SECS),
            download: Duration::from_secs(DOWNLOAD_TIMEOUT_SECS),
        }
    }
}

/// One JSON call against the partner API host.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<Value>,
}

impl ApiRequest {
    /// Creates a GET request for `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, None)
    }

    /// Creates a POST request for `path` with a JSON body.
    #[must_use]
    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path, Some(body))
    }

    fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Appends one query-string parameter, preserving insertion order.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Merges `headers` into the request, replacing existing values.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// A decoded JSON response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code. Non-2xx bodies are still returned so the envelope
    /// layer can surface the vendor's own error message.
    pub status: u16,
    /// Response headers (login reads `Set-Cookie` from here).
    pub headers: HeaderMap,
    /// Parsed JSON body.
    pub body: Value,
}

/// HTTP transport for partner API calls and raw file downloads.
///
/// Create once per run and share by reference; the inner client pools
/// connections across concurrent calls.
#[derive(Debug, Clone)]
pub struct PartnerTransport {
    client: Client,
    base_url: Url,
    timeouts: TransportTimeouts,
}

impl PartnerTransport {
    /// Creates a transport for the given API host.
    ///
    /// `api_host` may be a bare host (`api.example.com`, HTTPS assumed) or a
    /// full base URL (`http://127.0.0.1:8080`).
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] for an unusable host and
    /// [`TransportError::ClientBuild`] when reqwest cannot build the client.
    #[instrument(level = "debug", skip(timeouts))]
    pub fn new(api_host: &str, timeouts: TransportTimeouts) -> Result<Self, TransportError> {
        let base_url = api_base_url(api_host)?;
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .gzip(true)
            .deflate(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|source| TransportError::ClientBuild { source })?;
        debug!(base_url = %base_url, ?timeouts, "partner transport ready");
        Ok(Self {
            client,
            base_url,
            timeouts,
        })
    }

    /// Sends a JSON request and decodes the response body.
    ///
    /// Gzip/deflate bodies are decompressed before parsing. The status code
    /// is returned, not checked.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Timeout`] when the API budget is exceeded
    /// - [`TransportError::Network`] for socket/DNS failures
    /// - [`TransportError::Decompress`] when the declared encoding is corrupt
    /// - [`TransportError::Json`] when the body is not JSON
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send_json(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.endpoint(&request.path, &request.query)?;
        let url_str = url.to_string();

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .timeout(self.timeouts.api)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&url_str, TimeoutClass::Api, e))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(&url_str, TimeoutClass::Api, e))?;

        let body = serde_json::from_slice(&bytes)
            .map_err(|e| TransportError::json(url_str.clone(), &bytes, e))?;
        debug!(status, bytes = bytes.len(), "partner response decoded");

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    /// Streams `url` into `dest` with a plain unauthenticated GET.
    ///
    /// The destination is created (or truncated). On any failure the
    /// partially written file is removed before the error is returned;
    /// [`TransportError::is_timeout`] tells the caller whether the budget
    /// ran out.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] for invalid URLs, non-2xx statuses, network
    /// failures, timeouts, and destination write failures.
    #[instrument(skip(self, dest), fields(url = %url, dest = %dest.display()))]
    pub async fn download_to_path(&self, url: &str, dest: &Path) -> Result<u64, TransportError> {
        let parsed = Url::parse(url).map_err(|_| TransportError::invalid_url(url))?;

        let response = self
            .client
            .get(parsed)
            .timeout(self.timeouts.download)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url, TimeoutClass::Download, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::http_status(url, status.as_u16()));
        }

        let mut file = File::create(dest)
            .await
            .map_err(|e| TransportError::io(dest, e))?;

        let stream_result = stream_to_file(&mut file, response, url, dest).await;
        drop(file);
        if stream_result.is_err() {
            debug!(path = %dest.display(), "removing partial file after error");
            let _ = tokio::fs::remove_file(dest).await;
        }

        let bytes_written = stream_result?;
        debug!(bytes = bytes_written, "download complete");
        Ok(bytes_written)
    }

    fn endpoint(&self, path: &str, query: &[(String, String)]) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|_| TransportError::invalid_url(format!("{}{path}", self.base_url)))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

/// Normalizes a configured API host into a base URL.
///
/// # Errors
///
/// Returns [`TransportError::InvalidUrl`] when the host does not parse or
/// uses a scheme other than http/https.
pub fn api_base_url(api_host: &str) -> Result<Url, TransportError> {
    let trimmed = api_host.trim().trim_end_matches('/');
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&candidate).map_err(|_| TransportError::invalid_url(api_host))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(TransportError::invalid_url(api_host));
    }
    Ok(url)
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, TransportError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk =
            chunk_result.map_err(|e| TransportError::from_reqwest(url, TimeoutClass::Download, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| TransportError::io(file_path, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| TransportError::io(file_path, e))?;

    Ok(bytes_written)
}
