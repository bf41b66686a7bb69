//! Configuration management for the esdump CLI
//!
//! Settings come from built-in defaults, then environment variables (a `.env`
//! file is loaded first by `main`), then command-line flags.

use crate::error::{CliError, Result};
use esdump_transfer::backend::{EsClient, DEFAULT_REQUEST_TIMEOUT_SECS};
use esdump_transfer::source::lines::DEFAULT_MAX_LINE_BYTES;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default search backend URL when neither flag nor environment sets one.
pub const DEFAULT_HOST: &str = "http://localhost:9200";

pub const HOST_ENV: &str = "ESDUMP_HOST";
pub const REQUEST_TIMEOUT_ENV: &str = "ESDUMP_REQUEST_TIMEOUT_SECS";
pub const MAX_LINE_BYTES_ENV: &str = "ESDUMP_MAX_LINE_BYTES";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Search backend URL, may embed `user:password@`
    pub host: String,

    /// Timeout of a single HTTP request
    pub request_timeout: Duration,

    /// Longest accepted line when loading a dump file
    pub max_line_bytes: usize,

    /// Enable verbose output
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_line_bytes: DEFAULT_MAX_LINE_BYTES,
            verbose: false,
        }
    }
}

impl Config {
    /// Load config from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_ENV).filter(|h| !h.trim().is_empty()) {
            config.host = host;
        }

        if let Some(secs) = lookup(REQUEST_TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                CliError::config(format!("{} must be a number of seconds, got '{}'", REQUEST_TIMEOUT_ENV, secs))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(bytes) = lookup(MAX_LINE_BYTES_ENV) {
            config.max_line_bytes = bytes.trim().parse().map_err(|_| {
                CliError::config(format!("{} must be a byte count, got '{}'", MAX_LINE_BYTES_ENV, bytes))
            })?;
        }

        Ok(config)
    }

    /// Override the host when a flag supplied one
    pub fn with_host(mut self, host: Option<String>) -> Self {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.host = host;
        }
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build the backend client for this configuration
    pub fn client(&self) -> Result<Arc<EsClient>> {
        let client = EsClient::new(&self.host, self.request_timeout)?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
        assert_eq!(config.max_line_bytes, DEFAULT_MAX_LINE_BYTES);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            (HOST_ENV, "http://es:9200"),
            (REQUEST_TIMEOUT_ENV, "30"),
            (MAX_LINE_BYTES_ENV, "4096"),
        ]))
        .unwrap();

        assert_eq!(config.host, "http://es:9200");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_line_bytes, 4096);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[(REQUEST_TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(err.to_string().contains(REQUEST_TIMEOUT_ENV));
    }

    #[test]
    fn test_flag_host_wins_unless_blank() {
        let config = Config::default().with_host(Some("http://flag:9200".into()));
        assert_eq!(config.host, "http://flag:9200");

        let config = Config::default().with_host(Some("  ".into()));
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn test_client_strips_credentials() {
        let config = Config::default().with_host(Some("http://u:p@es:9200".into()));
        assert_eq!(config.client().unwrap().base_url(), "http://es:9200");
    }
}
