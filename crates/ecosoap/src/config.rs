//! Client configuration loaded from TOML.
//!
//! ```toml
//! endpoint = "https://api.example.com/graphql"
//! timeout_secs = 15
//! proxy = "http://proxy.internal:3128"
//!
//! [headers]
//! x-client = "ecosoap"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ecosoap_net::NetworkError;
use ecosoap_net::http::HttpClient;
use serde::Deserialize;

/// The production GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://35.208.9.187:9094/ios-api-1/";

/// Errors raised while loading a [`Config`] or building a client from it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid network settings: {0}")]
    Network(#[from] NetworkError),
}

/// Connection settings for a session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: Option<String>,
    /// Route every request through this proxy.
    pub proxy: Option<String>,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    /// Extra headers sent with every request.
    pub headers: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: None,
            proxy: None,
            follow_redirects: true,
            max_redirects: 10,
            headers: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            target: crate::targets::SESSION,
            path = %path.display(),
            endpoint = %config.endpoint,
            "loaded config"
        );
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Build the HTTP client these settings describe.
    pub fn http_client(&self) -> Result<HttpClient, ConfigError> {
        let mut builder = HttpClient::builder()
            .timeout(self.timeout())
            .connect_timeout(self.connect_timeout());
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(proxy.clone());
        }
        builder = if self.follow_redirects {
            builder.max_redirects(self.max_redirects)
        } else {
            builder.no_redirects()
        };
        for (name, value) in &self.headers {
            builder = builder.default_header(name.as_str(), value.as_str())?;
        }
        Ok(builder.build()?)
    }
}
