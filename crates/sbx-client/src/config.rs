//! Connection settings for the analysis service.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Where the service listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Upper bound on any single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How to reach the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and port, without the `/api` prefix.
    pub base_url: String,

    /// Per-request timeout.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The base URL with any trailing slash removed.
    ///
    /// Fails unless the URL is `http://` or `https://` with a host.
    pub fn normalized_base_url(&self) -> Result<String> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"));

        match host {
            Some(host) if !host.is_empty() => Ok(trimmed.to_string()),
            _ => Err(ClientError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            ))),
        }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_trailing_slash_is_removed() {
        let config = ClientConfig::new("https://sbox.example.org/ ");
        assert_eq!(
            config.normalized_base_url().unwrap(),
            "https://sbox.example.org"
        );
    }

    #[test]
    fn test_scheme_is_required() {
        for url in ["127.0.0.1:8000", "ftp://host", "http://", ""] {
            let err = ClientConfig::new(url).normalized_base_url().unwrap_err();
            assert!(matches!(err, ClientError::InvalidConfig(_)), "{url}");
        }
    }

    #[test]
    fn test_timeout_serializes_as_seconds() {
        let config = ClientConfig::default().with_timeout(Duration::from_secs(5));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"base_url":"http://127.0.0.1:8000","timeout":5}"#);
    }
}
