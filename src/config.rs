//! Client construction parameters.

use serde::{Deserialize, Serialize};

use crate::error::{DbError, Result};

/// Environment variable overriding the backend selector.
pub const ENV_BACKEND: &str = "VECDB_BACKEND";
/// Environment variable overriding the backend host.
pub const ENV_HOST: &str = "VECDB_HOST";
/// Environment variable overriding the backend port.
pub const ENV_PORT: &str = "VECDB_PORT";
/// Environment variable overriding the API key.
pub const ENV_API_KEY: &str = "VECDB_API_KEY";

/// Construction parameters for [`DbClient`](crate::client::DbClient).
///
/// The `backend` selector picks the concrete adapter (`"qdrant"` or
/// `"memory"`); the remaining fields are connection parameters for
/// network backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend selector, resolved at client construction.
    pub backend: String,
    /// Host address of the backend server.
    pub host: String,
    /// Port of the backend server (Qdrant gRPC default: 6334).
    pub port: u16,
    /// Optional API key for authentication.
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: "qdrant".to_string(),
            host: "localhost".to_string(),
            port: 6334,
            api_key: None,
        }
    }
}

impl ClientConfig {
    /// Create a new builder for constructing a [`ClientConfig`].
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build a config from defaults overridden by the `VECDB_*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if `VECDB_PORT` is set but not a valid
    /// port number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from defaults overridden by the given lookup.
    /// Seam for [`from_env`](Self::from_env); exercised directly in tests.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(backend) = lookup(ENV_BACKEND) {
            config.backend = backend;
        }
        if let Some(host) = lookup(ENV_HOST) {
            config.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.port = port
                .parse()
                .map_err(|_| DbError::Config(format!("{ENV_PORT} is not a valid port: {port}")))?;
        }
        config.api_key = lookup(ENV_API_KEY).or(config.api_key);
        Ok(config)
    }

    /// The backend URL in `http://host:port` form.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Builder for constructing a validated [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the backend selector.
    pub fn backend(mut self, backend: impl Into<String>) -> Self {
        self.config.backend = backend.into();
        self
    }

    /// Set the backend host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the backend port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the API key used for authentication.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Build the [`ClientConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the backend selector or host is empty.
    pub fn build(self) -> Result<ClientConfig> {
        if self.config.backend.is_empty() {
            return Err(DbError::Config("backend selector must not be empty".to_string()));
        }
        if self.config.host.is_empty() {
            return Err(DbError::Config("host must not be empty".to_string()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_local_qdrant() {
        let config = ClientConfig::default();
        assert_eq!(config.backend, "qdrant");
        assert_eq!(config.url(), "http://localhost:6334");
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = ClientConfig::builder()
            .backend("memory")
            .host("qdrant.internal")
            .port(7000)
            .api_key("secret")
            .build()
            .unwrap();
        assert_eq!(config.backend, "memory");
        assert_eq!(config.url(), "http://qdrant.internal:7000");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn builder_rejects_empty_host() {
        let err = ClientConfig::builder().host("").build().unwrap_err();
        assert!(matches!(err, DbError::Config(_)));
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = ClientConfig::from_lookup(|key| match key {
            ENV_HOST => Some("remote".to_string()),
            ENV_PORT => Some("19000".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.host, "remote");
        assert_eq!(config.port, 19000);
        assert_eq!(config.backend, "qdrant");
    }

    #[test]
    fn invalid_port_override_is_a_config_error() {
        let err = ClientConfig::from_lookup(|key| {
            (key == ENV_PORT).then(|| "not-a-port".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, DbError::Config(_)));
    }
}
