//! Client configuration.
//!
//! The base URL is resolved once, from `PLACEMENT_API_URL`, and stays fixed
//! for the lifetime of the client.

use std::env;

/// Environment variable holding the service base URL.
pub const API_URL_ENV: &str = "PLACEMENT_API_URL";

/// Base URL used when `PLACEMENT_API_URL` is unset or empty.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Headers merged over the default `Content-Type` on every request
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: Vec::new(),
        }
    }

    /// Create configuration from the environment, falling back to
    /// `DEFAULT_API_URL`.
    pub fn from_env() -> Self {
        Self::from_value(env::var(API_URL_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        match value {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Builder-style method to add a header sent with every request
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_uses_default() {
        assert_eq!(ClientConfig::from_value(None).base_url, "http://localhost:8000");
        assert_eq!(
            ClientConfig::from_value(Some("  ".to_string())).base_url,
            "http://localhost:8000"
        );
    }

    #[test]
    fn provided_value_is_trimmed() {
        let config = ClientConfig::from_value(Some("https://placements.example.edu/api/".to_string()));
        assert_eq!(config.base_url, "https://placements.example.edu/api");
    }

    #[test]
    fn with_header_accumulates() {
        let config = ClientConfig::default()
            .with_header("Authorization", "Bearer abc")
            .with_header("X-Trace", "1");
        assert_eq!(config.headers.len(), 2);
    }
}
