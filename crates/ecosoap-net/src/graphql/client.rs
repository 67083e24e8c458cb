//! Authenticated query client.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::envelope;
use super::error::QueryError;
use super::request::{QueryDescriptor, RequestEnvelope};
use crate::error::{NetworkError, Result};
use crate::http::{HttpClient, HttpMethod, HttpRequest, RequestBody};
use crate::targets;
use crate::transport::{HttpTransport, Transport};

/// Builder for creating a query client.
pub struct QueryClientBuilder {
    endpoint: String,
    transport: Option<Arc<dyn Transport>>,
    http_client: Option<HttpClient>,
    default_headers: http::HeaderMap,
    token: Option<String>,
    request_timeout: Option<Duration>,
}

impl QueryClientBuilder {
    /// Create a new builder with the specified GraphQL endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport: None,
            http_client: None,
            default_headers: http::HeaderMap::new(),
            token: None,
            request_timeout: None,
        }
    }

    /// Use a custom transport instead of HTTP.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use an existing HTTP client for the default transport.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Add a header sent with every request.
    pub fn header(
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

    /// Start with a token already provisioned.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set a per-request timeout passed down to the transport.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the query client.
    ///
    /// With no explicit transport, an [`HttpTransport`] is created around the
    /// given HTTP client or a default one.
    pub fn build(self) -> Result<QueryClient> {
        let transport: Arc<dyn Transport> = match (self.transport, self.http_client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(HttpTransport::new(client)),
            (None, None) => Arc::new(HttpTransport::with_defaults()?),
        };

        Ok(QueryClient {
            inner: Arc::new(QueryClientInner {
                transport,
                endpoint: self.endpoint,
                default_headers: self.default_headers,
                request_timeout: self.request_timeout,
                token: RwLock::new(self.token),
            }),
        })
    }
}

struct QueryClientInner {
    transport: Arc<dyn Transport>,
    endpoint: String,
    default_headers: http::HeaderMap,
    request_timeout: Option<Duration>,
    token: RwLock<Option<String>>,
}

/// A GraphQL client that attaches a credential to every call.
///
/// Each instance owns its token. No request leaves the client without one:
/// calls made before [`set_token`] fail with [`QueryError::NoToken`] and never
/// reach the transport.
///
/// The client is cheap to clone; clones share the transport and the token.
///
/// # Example
///
/// ```ignore
/// use ecosoap_net::graphql::{QueryClient, QueryDescriptor};
///
/// let client = QueryClient::builder("https://api.example.com/graphql").build()?;
/// client.set_token(token_from_login_flow);
///
/// let descriptor = QueryDescriptor::new(USER_BY_ID)
///     .variable("input", serde_json::json!({ "userId": "4" }));
/// let payload: UserPayload = client.query(descriptor).await?;
/// ```
///
/// [`set_token`]: QueryClient::set_token
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<QueryClientInner>,
}

impl QueryClient {
    /// Create a new builder for configuring a query client.
    pub fn builder(endpoint: impl Into<String>) -> QueryClientBuilder {
        QueryClientBuilder::new(endpoint)
    }

    /// Create a client over an explicit transport.
    pub fn with_transport(endpoint: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(QueryClientInner {
                transport,
                endpoint: endpoint.into(),
                default_headers: http::HeaderMap::new(),
                request_timeout: None,
                token: RwLock::new(None),
            }),
        }
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Provide (or replace) the credential used for subsequent calls.
    ///
    /// Calls already in flight keep the token they started with.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.inner.token.write() = Some(token.into());
        tracing::debug!(target: targets::GRAPHQL, "token provisioned");
    }

    /// Forget the current credential.
    pub fn clear_token(&self) {
        *self.inner.token.write() = None;
        tracing::debug!(target: targets::GRAPHQL, "token cleared");
    }

    /// The current credential, if any.
    pub fn token(&self) -> Option<String> {
        self.inner.token.read().clone()
    }

    /// Check whether a credential is set.
    pub fn is_logged_in(&self) -> bool {
        self.inner.token.read().is_some()
    }

    /// Build the wire body for `descriptor` with the current token.
    pub fn build_envelope(
        &self,
        descriptor: &QueryDescriptor,
    ) -> std::result::Result<RequestEnvelope, QueryError> {
        let token = self.token().ok_or(QueryError::NoToken)?;
        if let Some(rejected) = descriptor.rejected_variable() {
            return Err(QueryError::InvalidVariable {
                name: rejected.name.clone(),
                message: rejected.message.clone(),
            });
        }
        Ok(RequestEnvelope::new(&token, descriptor))
    }

    /// Execute `descriptor` and decode the payload into `T`.
    pub async fn query<T: DeserializeOwned>(
        &self,
        descriptor: QueryDescriptor,
    ) -> std::result::Result<T, QueryError> {
        let operation = descriptor.name().unwrap_or("anonymous").to_string();
        let kind = descriptor.operation_type().as_str();

        let envelope = match self.build_envelope(&descriptor) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!(
                    target: targets::GRAPHQL,
                    %operation,
                    kind = err.kind(),
                    "refusing to send"
                );
                return Err(err);
            }
        };

        let request = self.http_request(&envelope);
        tracing::debug!(
            target: targets::GRAPHQL,
            %operation,
            kind,
            variables = envelope.variables.len(),
            "sending"
        );

        let response = match self.inner.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    target: targets::GRAPHQL,
                    %operation,
                    error = %err,
                    "transport failed"
                );
                return Err(err.into());
            }
        };

        if !response.is_success() {
            let message = String::from_utf8_lossy(&response.body).into_owned();
            let err = NetworkError::HttpStatus {
                status: response.status,
                message: (!message.is_empty()).then_some(message),
            };
            tracing::warn!(
                target: targets::GRAPHQL,
                %operation,
                status = response.status,
                "server rejected request"
            );
            return Err(err.into());
        }

        envelope::decode(&response.body).map_err(|err| {
            tracing::warn!(
                target: targets::GRAPHQL,
                %operation,
                error = %err,
                "could not decode response"
            );
            err.into()
        })
    }

    /// Execute `template` with `variables` and decode the payload into `T`.
    pub async fn query_template<T: DeserializeOwned>(
        &self,
        template: impl Into<String>,
        variables: Map<String, Value>,
    ) -> std::result::Result<T, QueryError> {
        let descriptor = QueryDescriptor::new(template.into()).variables(variables);
        self.query(descriptor).await
    }

    fn http_request(&self, envelope: &RequestEnvelope) -> HttpRequest {
        let mut request = HttpRequest::new(HttpMethod::Post, self.inner.endpoint.clone());
        request.headers = self.inner.default_headers.clone();
        request.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        request.headers.insert(
            http::header::ACCEPT,
            http::HeaderValue::from_static("application/json"),
        );
        request.body = RequestBody::Bytes(envelope.to_bytes());
        request.timeout = self.inner.request_timeout;
        request
    }
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("endpoint", &self.inner.endpoint)
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ReplayTransport;

    fn replay_client() -> QueryClient {
        QueryClient::with_transport("http://localhost", Arc::new(ReplayTransport::new()))
    }

    #[test]
    fn test_builder_with_transport() {
        let client = QueryClient::builder("http://localhost/graphql")
            .transport(Arc::new(ReplayTransport::new()))
            .token("abc")
            .build()
            .unwrap();

        assert_eq!(client.endpoint(), "http://localhost/graphql");
        assert_eq!(client.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_token_accessors() {
        let client = replay_client();
        assert!(!client.is_logged_in());

        client.set_token("one");
        assert!(client.is_logged_in());
        assert_eq!(client.token().as_deref(), Some("one"));

        client.clear_token();
        assert_eq!(client.token(), None);
    }

    #[test]
    fn test_clones_share_token() {
        let client = replay_client();
        let other = client.clone();
        client.set_token("shared");
        assert_eq!(other.token().as_deref(), Some("shared"));
    }

    #[test]
    fn test_instances_are_independent() {
        let a = replay_client();
        let b = replay_client();
        a.set_token("a");
        assert!(!b.is_logged_in());
    }

    #[test]
    fn test_build_envelope_requires_token() {
        let client = replay_client();
        let result = client.build_envelope(&QueryDescriptor::new("{ ping }"));
        assert!(matches!(result, Err(QueryError::NoToken)));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let result = QueryClient::builder("http://localhost").header("bad header", "x");
        assert!(matches!(result, Err(NetworkError::InvalidHeader(_))));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let client = QueryClient::builder("http://localhost")
            .transport(Arc::new(ReplayTransport::new()))
            .token("very-secret")
            .build()
            .unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("logged_in: true"));
    }
}
