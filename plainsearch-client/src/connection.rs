//! Connection to a search server.

use crate::commands::Command;
use crate::config::ConnectionConfig;
use crate::error::{ClientError, Result};
use crate::transport::{HttpTransport, Method, Transport};
use plainsearch_log::{debug, info, trace};

/// Sends command paths and bodies through a [`Transport`].
#[derive(Debug, Clone)]
pub struct ElasticConnection<T = HttpTransport> {
    config: ConnectionConfig,
    transport: T,
}

impl ElasticConnection<HttpTransport> {
    /// Connect over HTTP.
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        info!("Initializing connection to {}", config.base_url());
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }

    /// Connect using `PLAINSEARCH_*` environment settings.
    pub fn from_env() -> Result<Self> {
        Self::new(ConnectionConfig::from_env()?)
    }
}

impl<T: Transport> ElasticConnection<T> {
    /// Use a custom transport.
    pub fn with_transport(config: ConnectionConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Connection settings.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, method: Method, command: &Command, body: Option<&str>) -> Result<String> {
        let path = command.build()?;
        debug!("{} {}", method, path);
        if let Some(body) = body {
            trace!("request body: {}", body);
        }
        self.transport.send(method, &path, body)
    }

    /// `GET`.
    pub fn get(&self, command: &Command) -> Result<String> {
        self.send(Method::Get, command, None)
    }

    /// `GET` with a body, as search and count accept.
    pub fn get_with_body(&self, command: &Command, body: &str) -> Result<String> {
        self.send(Method::Get, command, Some(body))
    }

    /// `PUT`.
    pub fn put(&self, command: &Command, body: &str) -> Result<String> {
        self.send(Method::Put, command, Some(body))
    }

    /// `POST`.
    pub fn post(&self, command: &Command, body: &str) -> Result<String> {
        self.send(Method::Post, command, Some(body))
    }

    /// `DELETE`.
    pub fn delete(&self, command: &Command) -> Result<String> {
        self.send(Method::Delete, command, None)
    }

    /// `DELETE` with a body, as delete-by-query expects.
    pub fn delete_with_body(&self, command: &Command, body: &str) -> Result<String> {
        self.send(Method::Delete, command, Some(body))
    }

    /// `HEAD`: `true` on success, `false` on 404.
    pub fn head(&self, command: &Command) -> Result<bool> {
        match self.send(Method::Head, command, None) {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Default index from the configuration.
    pub fn default_index(&self) -> Result<&str> {
        self.config
            .default_index
            .as_deref()
            .ok_or(ClientError::MissingArgument("index"))
    }
}
