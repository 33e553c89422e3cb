//! Pipeline configuration and credential handling.
//!
//! Credentials are injected at adapter construction time rather than read
//! from process-wide environment variables inside the adapters, so tests can
//! run with fake keys (or none). Uses the `secrecy` crate so API keys are
//! never accidentally exposed in logs, debug output, or error messages.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;
use std::time::Duration;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when actually using the secret (e.g., in an API request).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Configuration for the discovery pipeline.
///
/// A missing provider key disables that provider (its adapter contributes
/// zero candidates) rather than producing an error.
#[derive(Clone)]
pub struct PipelineConfig {
    /// Google Places API key (also used by the geocoder)
    pub google_api_key: Option<SecretString>,

    /// Yelp Fusion API key
    pub yelp_api_key: Option<SecretString>,

    /// Per-request timeout for outbound search calls
    pub request_timeout: Duration,

    /// Optional cap on outbound search requests per second, per adapter
    pub requests_per_second: Option<u32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            yelp_api_key: None,
            request_timeout: Duration::from_secs(10),
            requests_per_second: None,
        }
    }
}

impl PipelineConfig {
    /// Create a config with no credentials (all providers disabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// `GOOGLE_PLACES_API_KEY` and `YELP_API_KEY` are both optional; the
    /// caller is responsible for loading a `.env` file first if desired.
    pub fn from_env() -> Self {
        Self {
            google_api_key: std::env::var("GOOGLE_PLACES_API_KEY")
                .ok()
                .filter(|k| !k.is_empty())
                .map(SecretString::new),
            yelp_api_key: std::env::var("YELP_API_KEY")
                .ok()
                .filter(|k| !k.is_empty())
                .map(SecretString::new),
            ..Self::default()
        }
    }

    /// Set the Google Places API key.
    pub fn with_google_api_key(mut self, key: impl Into<String>) -> Self {
        self.google_api_key = Some(SecretString::new(key));
        self
    }

    /// Set the Yelp Fusion API key.
    pub fn with_yelp_api_key(mut self, key: impl Into<String>) -> Self {
        self.yelp_api_key = Some(SecretString::new(key));
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Cap outbound search requests per second.
    pub fn with_requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = Some(rps);
        self
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("yelp_api_key", &self.yelp_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout", &self.request_timeout)
            .field("requests_per_second", &self.requests_per_second)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug() {
        let secret = SecretString::new("sk-super-secret-key");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("sk-super"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_secret_not_in_display() {
        let secret = SecretString::new("sk-super-secret-key");
        let display = format!("{}", secret);
        assert!(!display.contains("sk-super"));
        assert!(display.contains("[REDACTED]"));
    }

    #[test]
    fn test_expose_works() {
        let secret = SecretString::new("sk-super-secret-key");
        assert_eq!(secret.expose(), "sk-super-secret-key");
    }

    #[test]
    fn test_config_debug_redacts_keys() {
        let config = PipelineConfig::new()
            .with_google_api_key("g-secret")
            .with_yelp_api_key("y-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("g-secret"));
        assert!(!debug.contains("y-secret"));
    }

    #[test]
    fn test_default_has_no_credentials() {
        let config = PipelineConfig::new();
        assert!(config.google_api_key.is_none());
        assert!(config.yelp_api_key.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}
