use futures_util::future::BoxFuture;

use super::{Transport, TransportResponse};
use crate::error::Result;
use crate::http::{HttpClient, HttpRequest};
use crate::targets;

/// Transport backed by [`HttpClient`].
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: HttpClient,
}

impl HttpTransport {
    /// Wrap an existing HTTP client.
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Create a transport with a default-configured HTTP client.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(HttpClient::new()?))
    }

    /// Get the underlying HTTP client.
    pub fn client(&self) -> &HttpClient {
        &self.client
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<TransportResponse>> {
        Box::pin(async move {
            let response = self.client.execute(request).await?;
            let status = response.status();
            let body = response.bytes().await?;
            tracing::debug!(
                target: targets::TRANSPORT,
                status,
                bytes = body.len(),
                "received response"
            );
            Ok(TransportResponse { status, body })
        })
    }
}
