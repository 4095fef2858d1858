//! Shared User-Agent string for partner API and attachment traffic.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/partner-ingest";

/// Default User-Agent for every request the transport sends.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("partner-ingest/{version} (+{PROJECT_UA_URL})")
}
