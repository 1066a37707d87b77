//! Blocking HTTP transport.

use crate::config::ConnectionConfig;
use crate::error::{ClientError, Result};
use plainsearch_log::{trace, warn};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::fmt;
use url::Url;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// HEAD
    Head,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
        }
    }
}

/// Sends a request and returns the raw response body.
///
/// Implementations map non-success statuses to [`ClientError::Server`].
pub trait Transport {
    /// Send `body` (if any) to `path` relative to the server root.
    fn send(&self, method: Method, path: &str, body: Option<&str>) -> Result<String>;
}

/// [`Transport`] over `reqwest`'s blocking client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build a transport for the configured server.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url())
            .map_err(|e| ClientError::Config(format!("Invalid URL: {}", e)))?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Server root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn send(&self, method: Method, path: &str, body: Option<&str>) -> Result<String> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::Transport(format!("Invalid path '{}': {}", path, e)))?;

        let mut request = self.client.request(method.into(), url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;
        trace!("{} {} -> {} ({} bytes)", method, path, status.as_u16(), text.len());

        if !status.is_success() {
            let reason = error_reason(&text)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
            warn!("{} {} failed: {} - {}", method, path, status.as_u16(), reason);
            return Err(ClientError::Server {
                status: status.as_u16(),
                reason,
            });
        }

        Ok(text)
    }
}

/// Pull a readable reason out of an error body.
///
/// Older servers send `{"error":"..."}`, newer ones
/// `{"error":{"type":..,"reason":..}}`.
pub fn error_reason(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(reason) => Some(reason.clone()),
        Value::Object(error) => error
            .get("reason")
            .or_else(|| error.get("type"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reason_shapes() {
        assert_eq!(
            error_reason(r#"{"error":"IndexMissingException[[shop] missing]","status":404}"#).as_deref(),
            Some("IndexMissingException[[shop] missing]")
        );
        assert_eq!(
            error_reason(r#"{"error":{"type":"index_not_found_exception","reason":"no such index"},"status":404}"#)
                .as_deref(),
            Some("no such index")
        );
        assert_eq!(error_reason(r#"{"error":{"type":"parse_exception"}}"#).as_deref(), Some("parse_exception"));
        assert_eq!(error_reason("<html>bad gateway</html>"), None);
        assert_eq!(error_reason(""), None);
    }

    #[test]
    fn test_transport_rejects_bad_config() {
        let config = ConnectionConfig::new("");
        assert!(matches!(HttpTransport::new(&config), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(reqwest::Method::from(Method::Head), reqwest::Method::HEAD);
    }
}
