//! Error types for partner authentication.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors that can occur while establishing an [`AuthSession`](super::AuthSession).
///
/// Any of these aborts an ingestion run: no later call can proceed without a
/// bearer token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The partner API answered but did not accept the credentials.
    #[error("[AUTH] partner login rejected: {message}")]
    Rejected {
        /// Upstream `err_msg`/`message`, or the raw body.
        message: String,
    },

    /// The envelope signalled success but carried no usable token.
    #[error("[AUTH] partner login succeeded without a token: {body}")]
    MissingToken {
        /// Serialized payload, for diagnosis.
        body: String,
    },

    /// A credential or token value cannot be sent as an HTTP header.
    #[error("[AUTH] value for header `{header}` contains characters not allowed in HTTP headers")]
    InvalidHeader {
        /// Header name.
        header: &'static str,
    },

    /// The login request itself failed.
    #[error("[AUTH] partner login request failed: {0}")]
    Transport(#[from] TransportError),
}

impl AuthError {
    /// Creates a rejected-credentials error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}
