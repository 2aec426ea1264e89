//! Store configuration types.

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::error::{Result, StoreError};

/// Environment variable holding the endpoint credential.
pub const DEFAULT_API_KEY_VAR: &str = "observatory_api_key";

/// Environment variable naming the fallback bucket.
pub const BUCKET_VAR: &str = "observatory-results-bucket";

/// Default request timeout. Kept short: the host may itself be wall-clock limited.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where and how reports are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Endpoint receiving the JSON POST
    pub endpoint: Option<Url>,

    /// Credential sent as `Authorization: Basic <key>`
    pub api_key: Option<String>,

    /// Directory receiving `<uuid>.json.gz` objects
    pub bucket: Option<PathBuf>,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreConfig {
    /// Nothing configured: reports are not stored.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            bucket: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the endpoint from a string
    pub fn endpoint(mut self, endpoint: &str) -> Result<Self> {
        let url = Url::parse(endpoint).map_err(|e| StoreError::InvalidUrl(format!("{endpoint}: {e}")))?;
        self.endpoint = Some(url);
        Ok(self)
    }

    /// Set the API key
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the fallback bucket directory
    #[must_use]
    pub fn bucket(mut self, bucket: impl Into<PathBuf>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a POST will be attempted
    #[must_use]
    pub const fn can_post(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }

    /// Whether any delivery is configured
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.can_post() || self.bucket.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stores_nothing() {
        let config = StoreConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn post_needs_endpoint_and_key() {
        let config = StoreConfig::new().endpoint("https://example.com/api/profile").unwrap();
        assert!(!config.can_post());
        assert!(config.api_key("k").can_post());
    }

    #[test]
    fn rejects_invalid_endpoint() {
        assert!(matches!(
            StoreConfig::new().endpoint("not a url"),
            Err(StoreError::InvalidUrl(_))
        ));
    }
}
