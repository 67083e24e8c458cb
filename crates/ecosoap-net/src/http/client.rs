//! HTTP client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::Policy;

use super::request::{HttpRequest, RequestBody};
use super::response::HttpResponse;
use crate::error::{NetworkError, Result};
use crate::targets;

/// Configuration for the HTTP client.
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Option<Duration>,
    /// Whether to follow redirects.
    pub follow_redirects: bool,
    /// Maximum number of redirects to follow.
    pub max_redirects: usize,
    /// Default user agent.
    pub user_agent: Option<String>,
    /// Proxy URL.
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            follow_redirects: true,
            max_redirects: 10,
            user_agent: Some(format!("EcoSoap/{} (Rust)", env!("CARGO_PKG_VERSION"))),
            proxy: None,
        }
    }
}

/// Builder for creating an HTTP client with custom configuration.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
    default_headers: http::HeaderMap,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClientBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
            default_headers: http::HeaderMap::new(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Disable redirect following.
    pub fn no_redirects(mut self) -> Self {
        self.config.follow_redirects = false;
        self
    }

    /// Set the maximum number of redirects to follow.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Set a proxy URL.
    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy_url.into());
        self
    }

    /// Add a default header that will be sent with every request.
    pub fn default_header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Result<Self> {
        let name = name
            .try_into()
            .map_err(|_| NetworkError::InvalidHeader("Invalid header name".to_string()))?;
        let value = value
            .try_into()
            .map_err(|_| NetworkError::InvalidHeader("Invalid header value".to_string()))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Build the HTTP client.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if self.config.follow_redirects {
            builder = builder.redirect(Policy::limited(self.config.max_redirects));
        } else {
            builder = builder.redirect(Policy::none());
        }

        if let Some(ref ua) = self.config.user_agent {
            builder = builder.user_agent(ua);
        }

        if let Some(ref proxy_url) = self.config.proxy {
            let proxy =
                reqwest::Proxy::all(proxy_url).map_err(|e| NetworkError::Proxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        builder = builder.default_headers(self.default_headers);

        let client = builder.build()?;

        Ok(HttpClient {
            inner: Arc::new(HttpClientInner {
                client,
                config: self.config,
            }),
        })
    }
}

struct HttpClientInner {
    client: reqwest::Client,
    config: HttpClientConfig,
}

/// A high-level HTTP client for making requests.
///
/// The client is cheaply cloneable and thread-safe. Clones share the same
/// underlying connection pool and configuration.
///
/// # Example
///
/// ```ignore
/// use ecosoap_net::http::HttpClient;
///
/// let client = HttpClient::builder().timeout(Duration::from_secs(10)).build()?;
///
/// let mut request = HttpRequest::new(HttpMethod::Post, "https://api.example.com/graphql");
/// request.body = RequestBody::Bytes(body);
/// let response = client.execute(request).await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration.
    pub fn new() -> Result<Self> {
        HttpClientBuilder::new().build()
    }

    /// Create a builder for configuring a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Get the client's configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.inner.config
    }

    /// Send an already built request.
    ///
    /// The status code is not inspected; a 4xx or 5xx reply is still `Ok`.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = url::Url::parse(&request.url)?;

        let mut req_builder = self
            .inner
            .client
            .request(request.method.to_reqwest(), url);

        for (name, value) in request.headers.iter() {
            req_builder = req_builder.header(name, value);
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        match request.body {
            RequestBody::None => {}
            RequestBody::Bytes(bytes) => {
                req_builder = req_builder.body(bytes);
            }
        }

        tracing::trace!(
            target: targets::HTTP,
            method = %request.method,
            url = %request.url,
            "sending request"
        );
        let response = req_builder.send().await?;
        Ok(HttpResponse::from_reqwest(response))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(10)));
        assert!(config.follow_redirects);
        assert!(config.user_agent.unwrap().starts_with("EcoSoap/"));
    }

    #[test]
    fn test_builder_overrides() {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .no_redirects()
            .max_redirects(3)
            .user_agent("tests/1.0")
            .build()
            .expect("Failed to build client");

        assert_eq!(client.config().timeout, Some(Duration::from_secs(5)));
        assert!(!client.config().follow_redirects);
        assert_eq!(client.config().max_redirects, 3);
        assert_eq!(client.config().user_agent.as_deref(), Some("tests/1.0"));
    }

    #[test]
    fn test_invalid_proxy() {
        let result = HttpClient::builder().proxy("http://not a proxy").build();
        assert!(matches!(result, Err(NetworkError::Proxy(_))));
    }

    #[test]
    fn test_invalid_default_header() {
        let result = HttpClient::builder().default_header("bad header", "value");
        assert!(matches!(result, Err(NetworkError::InvalidHeader(_))));
    }
}
