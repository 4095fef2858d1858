//! Constants for the transport module (timeouts, partner endpoints).

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default budget for login, query, and child-table calls (60 seconds).
pub const API_TIMEOUT_SECS: u64 = 60;

/// Default budget for raw attachment downloads (10 minutes for large files).
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 600;

/// Login endpoint.
pub const LOGIN_PATH: &str = "/api/platform/auth/login";

/// Online form query endpoint.
pub const FORMS_ONLINE_PATH: &str = "/api/platform/forms/online";

/// Child-table expansion endpoint.
pub const FORMS_CHILDREN_PATH: &str = "/api/platform/forms/children";
