//! Login and the once-per-run session.

use serde_json::{Value, json};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use super::session::cookie_from_set_cookie;
use super::{AuthError, AuthSession, Credentials};
use crate::envelope::unwrap_envelope;
use crate::transport::constants::LOGIN_PATH;
use crate::transport::{ApiRequest, PartnerTransport};

/// Exchanges credentials for an [`AuthSession`].
///
/// [`session`](Self::session) logs in lazily and at most once per
/// authenticator, so every component of a run can ask for the session
/// without triggering repeated logins. There is no refresh: a rejected
/// or expired session fails the run.
#[derive(Debug)]
pub struct Authenticator {
    transport: PartnerTransport,
    credentials: Credentials,
    session: OnceCell<AuthSession>,
}

impl Authenticator {
    /// Creates an authenticator; no network call happens until a session is requested.
    #[must_use]
    pub fn new(transport: PartnerTransport, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
            session: OnceCell::new(),
        }
    }

    /// Returns the run's session, logging in on first use.
    ///
    /// Concurrent callers wait on the same login. A failed login is not
    /// cached, but the run aborts on it anyway.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the login fails.
    pub async fn session(&self) -> Result<&AuthSession, AuthError> {
        self.session.get_or_try_init(|| self.login()).await
    }

    /// Returns the session if one has already been established.
    #[must_use]
    pub fn cached_session(&self) -> Option<&AuthSession> {
        self.session.get()
    }

    /// Performs a fresh login.
    ///
    /// Posts `{username, password}` and reads `token` from whichever
    /// envelope shape the platform answers with.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Rejected`] when the envelope is not a success shape
    /// - [`AuthError::MissingToken`] when the payload has no string token
    /// - [`AuthError::Transport`] when the request itself fails
    #[instrument(skip(self), fields(username = %self.credentials.username))]
    pub async fn login(&self) -> Result<AuthSession, AuthError> {
        info!("logging in to partner platform");

        let request = ApiRequest::post_json(
            LOGIN_PATH,
            json!({
                "username": self.credentials.username,
                "password": self.credentials.password,
            }),
        );
        let response = self.transport.send_json(&request).await?;
        debug!(status = response.status, "login response received");

        let payload =
            unwrap_envelope(&response.body).map_err(|e| AuthError::rejected(e.message))?;
        let token = payload
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::MissingToken {
                body: payload.to_string(),
            })?;

        let session = AuthSession::new(
            token,
            cookie_from_set_cookie(&response.headers),
            &self.credentials,
        )?;
        info!(has_cookie = session.session_cookie().is_some(), "login succeeded");
        Ok(session)
    }
}
