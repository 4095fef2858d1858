//! Login credentials and tenant headers.

use std::fmt;

/// Partner platform credentials for one run.
///
/// Built once from configuration and never mutated. `Debug` redacts the
/// password and session token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API host, either bare (`api.example.com`) or a full base URL.
    pub api_host: String,
    /// Login user name.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Tenant identifier sent as the `companyid` header.
    pub company_id: String,
    /// Platform session token sent as the session header.
    pub session_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_host", &self.api_host)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("company_id", &self.company_id)
            .field("session_token", &"[REDACTED]")
            .finish()
    }
}
