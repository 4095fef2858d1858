//! Authenticated request headers.

use std::fmt;

use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, COOKIE, HeaderMap, HeaderName, HeaderValue, SET_COOKIE,
};

use super::{AuthError, Credentials};

/// Tenant header expected by every authenticated partner call.
pub const COMPANY_ID_HEADER: &str = "companyid";

/// Platform session header expected by every authenticated partner call.
pub const SESSION_HEADER: &str = "tuotwo-session";

/// An authenticated partner session.
///
/// Read-only once created, so concurrent query and child-table calls share
/// it by reference. Lives in memory for the run only.
#[derive(Clone)]
pub struct AuthSession {
    bearer_token: String,
    session_cookie: Option<String>,
    headers: HeaderMap,
}

impl AuthSession {
    /// Builds a session and precomputes the headers stamped on every call.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidHeader`] when the token, tenant id,
    /// session token, or cookie contains bytes HTTP headers cannot carry.
    pub fn new(
        bearer_token: impl Into<String>,
        session_cookie: Option<String>,
        credentials: &Credentials,
    ) -> Result<Self, AuthError> {
        let bearer_token = bearer_token.into();
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            header_value("authorization", &format!("Bearer {bearer_token}"))?,
        );
        headers.insert(
            HeaderName::from_static(COMPANY_ID_HEADER),
            header_value(COMPANY_ID_HEADER, &credentials.company_id)?,
        );
        headers.insert(
            HeaderName::from_static(SESSION_HEADER),
            header_value(SESSION_HEADER, &credentials.session_token)?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
        if let Some(cookie) = &session_cookie {
            headers.insert(COOKIE, header_value("cookie", cookie)?);
        }

        Ok(Self {
            bearer_token,
            session_cookie,
            headers,
        })
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn bearer_token(&self) -> &str {
        &self.bearer_token
    }

    /// Returns the cookie captured from the login response, if any.
    #[must_use]
    pub fn session_cookie(&self) -> Option<&str> {
        self.session_cookie.as_deref()
    }

    /// Returns the headers to stamp on every authenticated call.
    #[must_use]
    pub fn headers(&self) -> HeaderMap {
        self.headers.clone()
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("bearer_token", &"[REDACTED]")
            .field("has_cookie", &self.session_cookie.is_some())
            .finish_non_exhaustive()
    }
}

fn header_value(header: &'static str, value: &str) -> Result<HeaderValue, AuthError> {
    HeaderValue::from_str(value).map_err(|_| AuthError::InvalidHeader { header })
}

/// Collapses `Set-Cookie` response headers into one `Cookie` request value.
///
/// Only the `name=value` pair of each cookie is kept; attributes such as
/// `Path` or `HttpOnly` are dropped.
pub(crate) fn cookie_from_set_cookie(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect();
    (!pairs.is_empty()).then(|| pairs.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            api_host: "api.example.com".to_string(),
            username: "operator".to_string(),
            password: "pw".to_string(),
            company_id: "c-42".to_string(),
            session_token: "sess-1".to_string(),
        }
    }

    #[test]
    fn test_session_headers_stamp_partner_identity() {
        let session = AuthSession::new("tok", None, &credentials()).unwrap();
        let headers = session.headers();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok");
        assert_eq!(headers.get(COMPANY_ID_HEADER).unwrap(), "c-42");
        assert_eq!(headers.get(SESSION_HEADER).unwrap(), "sess-1");
        assert_eq!(headers.get(ACCEPT_ENCODING).unwrap(), "gzip, deflate");
        assert!(headers.get(COOKIE).is_none());
    }

    #[test]
    fn test_session_cookie_is_forwarded() {
        let session =
            AuthSession::new("tok", Some("sid=abc".to_string()), &credentials()).unwrap();
        assert_eq!(session.headers().get(COOKIE).unwrap(), "sid=abc");
        assert_eq!(session.session_cookie(), Some("sid=abc"));
    }

    #[test]
    fn test_newline_in_token_is_invalid_header() {
        let result = AuthSession::new("tok\nen", None, &credentials());
        assert!(matches!(
            result,
            Err(AuthError::InvalidHeader {
                header: "authorization"
            })
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = AuthSession::new("very-secret", None, &credentials()).unwrap();
        assert!(!format!("{session:?}").contains("very-secret"));
    }

    #[test]
    fn test_cookie_from_set_cookie_keeps_name_value_pairs() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("sid=abc; Path=/; HttpOnly"));
        headers.append(SET_COOKIE, HeaderValue::from_static("lang=zh; Max-Age=3600"));
        assert_eq!(
            cookie_from_set_cookie(&headers),
            Some("sid=abc; lang=zh".to_string())
        );
    }

    #[test]
    fn test_cookie_from_set_cookie_none_when_absent() {
        assert_eq!(cookie_from_set_cookie(&HeaderMap::new()), None);
    }
}
