//! Connection configuration.

use crate::error::{ClientError, Result};
use plainsearch_log::debug;
use serde::Deserialize;
use std::time::Duration;

/// Default host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default port.
pub const DEFAULT_PORT: u16 = 9200;
/// Default scheme.
pub const DEFAULT_SCHEME: &str = "http";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to reach the search server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Host name or address.
    pub host: String,
    /// Port.
    pub port: u16,
    /// `http` or `https`.
    pub scheme: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Index used when a caller does not name one.
    pub default_index: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            scheme: DEFAULT_SCHEME.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_index: None,
        }
    }
}

/// On-disk shape of a TOML connection file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConnectionFile {
    host: Option<String>,
    port: Option<u16>,
    scheme: Option<String>,
    timeout_secs: Option<u64>,
    default_index: Option<String>,
}

impl ConnectionConfig {
    /// Configuration for `host` with default port, scheme and timeout.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the scheme.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the default index.
    pub fn with_default_index(mut self, index: impl Into<String>) -> Self {
        let index = index.into();
        self.default_index = if index.is_empty() { None } else { Some(index) };
        self
    }

    /// Load a `.env` file if present, then read `PLAINSEARCH_*` variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Ignore if .env doesn't exist
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("PLAINSEARCH_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PLAINSEARCH_PORT") {
            config.port = port
                .parse()
                .map_err(|_| ClientError::Config(format!("Invalid PLAINSEARCH_PORT: {}", port)))?;
        }
        if let Some(scheme) = lookup("PLAINSEARCH_SCHEME") {
            config.scheme = scheme;
        }
        if let Some(secs) = lookup("PLAINSEARCH_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                ClientError::Config(format!("Invalid PLAINSEARCH_TIMEOUT_SECS: {}", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(index) = lookup("PLAINSEARCH_DEFAULT_INDEX") {
            config = config.with_default_index(index);
        }

        config.validate()?;
        debug!("Connection configured from environment: {}", config.base_url());
        Ok(config)
    }

    /// Parse a TOML document with `host`, `port`, `scheme`, `timeout_secs`
    /// and `default_index` keys.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConnectionFile = toml::from_str(content)
            .map_err(|e| ClientError::Config(format!("TOML parse error: {}", e)))?;

        let mut config = Self::default();
        if let Some(host) = file.host {
            config.host = host;
        }
        if let Some(port) = file.port {
            config.port = port;
        }
        if let Some(scheme) = file.scheme {
            config.scheme = scheme;
        }
        if let Some(secs) = file.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(index) = file.default_index {
            config = config.with_default_index(index);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings no request could be sent with.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ClientError::Config("host must not be empty".to_string()));
        }
        if self.scheme != "http" && self.scheme != "https" {
            return Err(ClientError::Config(format!(
                "unsupported scheme '{}'",
                self.scheme
            )));
        }
        Ok(())
    }

    /// `scheme://host:port`.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConnectionConfig::default();
        assert_eq!(config.base_url(), "http://localhost:9200");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.default_index.is_none());
    }

    #[test]
    fn test_from_lookup() {
        let config = ConnectionConfig::from_lookup(lookup(&[
            ("PLAINSEARCH_HOST", "search.internal"),
            ("PLAINSEARCH_PORT", "9201"),
            ("PLAINSEARCH_SCHEME", "https"),
            ("PLAINSEARCH_TIMEOUT_SECS", "5"),
            ("PLAINSEARCH_DEFAULT_INDEX", "products"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), "https://search.internal:9201");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.default_index.as_deref(), Some("products"));
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let err = ConnectionConfig::from_lookup(lookup(&[("PLAINSEARCH_PORT", "nine")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_empty_host_is_config_error() {
        let err = ConnectionConfig::from_lookup(lookup(&[("PLAINSEARCH_HOST", "")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_from_toml_str() {
        let config = ConnectionConfig::from_toml_str(
            r#"
            host = "10.0.0.7"
            timeout_secs = 2
            default_index = ""
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "http://10.0.0.7:9200");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(config.default_index.is_none());

        assert!(ConnectionConfig::from_toml_str("port = \"x\"").is_err());
        assert!(ConnectionConfig::from_toml_str("scheme = \"ftp\"").is_err());
    }
}
