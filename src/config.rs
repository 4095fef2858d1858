//! Run configuration, read from the process environment.
//!
//! [`IngestConfig`] is built once at the entry point and passed down by
//! value. Every required variable is checked before any network call, and
//! all missing ones are reported together.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::auth::Credentials;
use crate::fetch::TargetIds;
use crate::ingest::DownloadsPlacement;
use crate::transport::TransportTimeouts;

/// Partner API host, bare or as a full URL.
pub const ENV_API_BASE_URL: &str = "TUOTU_API_BASE_URL";
/// Login user name.
pub const ENV_USERNAME: &str = "TUOTU_USERNAME";
/// Login password.
pub const ENV_PASSWORD: &str = "TUOTU_PASSWORD";
/// Tenant id sent as the `companyid` header.
pub const ENV_COMPANY_ID: &str = "TUOTU_COMPANY_ID";
/// Platform session token.
pub const ENV_SESSION: &str = "TUOTU_SESSION";
/// Enterprise id the records belong to.
pub const ENV_QUERY_ID: &str = "QUERY_ID";
/// Requirement id being processed.
pub const ENV_REQUIREMENT_ID: &str = "REQUIREMENT_ID";

/// Required variables with whether their value is a secret.
pub const REQUIRED_ENV_VARS: [(&str, bool); 7] = [
    (ENV_API_BASE_URL, false),
    (ENV_USERNAME, false),
    (ENV_PASSWORD, true),
    (ENV_COMPANY_ID, false),
    (ENV_SESSION, true),
    (ENV_QUERY_ID, false),
    (ENV_REQUIREMENT_ID, false),
];

/// Default output root, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "public/uploads";

const TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 1..=3600;

/// Errors raised while building configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required variables are unset or blank.
    #[error("missing required environment variables: {}", .names.join(", "))]
    Missing {
        /// Every missing variable, in declaration order.
        names: Vec<&'static str>,
    },

    /// A timeout is outside the accepted range.
    #[error("invalid value for `{field}`: {value}. Expected range: 1..=3600 seconds")]
    InvalidTimeout {
        /// Setting name.
        field: &'static str,
        /// Rejected value in seconds.
        value: u64,
    },
}

/// Presence of one required variable, without its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarStatus {
    /// Variable name.
    pub name: &'static str,
    /// Whether a non-blank value is set.
    pub present: bool,
    /// Whether the value must never be printed.
    pub secret: bool,
}

/// Everything one ingestion run needs.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Partner login and header material.
    pub credentials: Credentials,
    /// Enterprise and requirement being ingested.
    pub targets: TargetIds,
    /// Output root; wiped at the start of every run.
    pub output_dir: PathBuf,
    /// Where attachments land inside the output root.
    pub downloads_placement: DownloadsPlacement,
    /// Transport budgets.
    pub timeouts: TransportTimeouts,
}

impl IngestConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] listing every unset variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Values are trimmed; blank values count as missing. Output and timeout
    /// settings start at their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] listing every unset variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| -> String {
            match lookup(name).map(|value| value.trim().to_string()) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let credentials = Credentials {
            api_host: read(ENV_API_BASE_URL),
            username: read(ENV_USERNAME),
            password: read(ENV_PASSWORD),
            company_id: read(ENV_COMPANY_ID),
            session_token: read(ENV_SESSION),
        };
        let targets = TargetIds::new(read(ENV_QUERY_ID), read(ENV_REQUIREMENT_ID));

        if !missing.is_empty() {
            return Err(ConfigError::Missing { names: missing });
        }

        Ok(Self {
            credentials,
            targets,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            downloads_placement: DownloadsPlacement::Subdirectory,
            timeouts: TransportTimeouts::default(),
        })
    }

    /// Overrides the API budget.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] outside 1..=3600 seconds.
    pub fn with_api_timeout_secs(mut self, secs: u64) -> Result<Self, ConfigError> {
        self.timeouts.api = validate_timeout_secs("api_timeout", secs)?;
        Ok(self)
    }

    /// Overrides the per-attachment download budget.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] outside 1..=3600 seconds.
    pub fn with_download_timeout_secs(mut self, secs: u64) -> Result<Self, ConfigError> {
        self.timeouts.download = validate_timeout_secs("download_timeout", secs)?;
        Ok(self)
    }
}

/// Reports which required variables are set, never their values.
#[must_use]
pub fn env_status<F>(lookup: F) -> Vec<EnvVarStatus>
where
    F: Fn(&str) -> Option<String>,
{
    REQUIRED_ENV_VARS
        .iter()
        .map(|(name, secret)| EnvVarStatus {
            name,
            present: lookup(name).is_some_and(|value| !value.trim().is_empty()),
            secret: *secret,
        })
        .collect()
}

fn validate_timeout_secs(field: &'static str, value: u64) -> Result<Duration, ConfigError> {
    if !TIMEOUT_RANGE_SECS.contains(&value) {
        return Err(ConfigError::InvalidTimeout { field, value });
    }
    Ok(Duration::from_secs(value))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn full_env() -> HashMap<&'static str, String> {
        REQUIRED_ENV_VARS
            .iter()
            .map(|(name, _)| (*name, format!("value-of-{name}")))
            .collect()
    }

    fn lookup<'a>(
        env: &'a HashMap<&'static str, String>,
    ) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| env.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_reads_all_fields() {
        let env = full_env();
        let config = IngestConfig::from_lookup(lookup(&env)).unwrap();
        assert_eq!(config.credentials.api_host, "value-of-TUOTU_API_BASE_URL");
        assert_eq!(config.credentials.session_token, "value-of-TUOTU_SESSION");
        assert_eq!(config.targets.enterprise_id, "value-of-QUERY_ID");
        assert_eq!(config.targets.requirement_id, "value-of-REQUIREMENT_ID");
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.downloads_placement, DownloadsPlacement::Subdirectory);
        assert_eq!(config.timeouts, TransportTimeouts::default());
    }

    #[test]
    fn test_missing_lists_every_variable() {
        let mut env = full_env();
        env.remove(ENV_PASSWORD);
        env.insert(ENV_QUERY_ID, "   ".to_string());
        env.remove(ENV_REQUIREMENT_ID);

        let err = IngestConfig::from_lookup(lookup(&env)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing {
                names: vec![ENV_PASSWORD, ENV_QUERY_ID, ENV_REQUIREMENT_ID]
            }
        );
        assert_eq!(
            err.to_string(),
            "missing required environment variables: TUOTU_PASSWORD, QUERY_ID, REQUIREMENT_ID"
        );
    }

    #[test]
    fn test_empty_environment_reports_all_seven() {
        let err = IngestConfig::from_lookup(|_| None).unwrap_err();
        let ConfigError::Missing { names } = err else {
            panic!("expected Missing");
        };
        assert_eq!(names.len(), REQUIRED_ENV_VARS.len());
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut env = full_env();
        env.insert(ENV_USERNAME, "  operator \n".to_string());
        let config = IngestConfig::from_lookup(lookup(&env)).unwrap();
        assert_eq!(config.credentials.username, "operator");
    }

    #[test]
    fn test_timeout_overrides_validate_range() {
        let env = full_env();
        let config = IngestConfig::from_lookup(lookup(&env))
            .unwrap()
            .with_api_timeout_secs(5)
            .unwrap()
            .with_download_timeout_secs(3600)
            .unwrap();
        assert_eq!(config.timeouts.api, Duration::from_secs(5));
        assert_eq!(config.timeouts.download, Duration::from_secs(3600));

        let config = IngestConfig::from_lookup(lookup(&env)).unwrap();
        assert_eq!(
            config.clone().with_api_timeout_secs(0).unwrap_err(),
            ConfigError::InvalidTimeout {
                field: "api_timeout",
                value: 0
            }
        );
        assert!(config.with_download_timeout_secs(3601).is_err());
    }

    #[test]
    fn test_env_status_flags_secrets_without_values() {
        let mut env = full_env();
        env.remove(ENV_SESSION);
        let status = env_status(lookup(&env));

        let session = status.iter().find(|s| s.name == ENV_SESSION).unwrap();
        assert!(!session.present);
        assert!(session.secret);
        let host = status.iter().find(|s| s.name == ENV_API_BASE_URL).unwrap();
        assert!(host.present);
        assert!(!host.secret);
    }
}
