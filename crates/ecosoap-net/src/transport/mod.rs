//! Pluggable byte transport.
//!
//! A [`Transport`] moves one request body to an endpoint and hands back the
//! status code and raw response bytes. It knows nothing about GraphQL and does
//! not interpret the status code; that is left to the caller.
//!
//! Two implementations ship with the crate:
//!
//! - [`HttpTransport`] sends requests over the network with [`HttpClient`].
//! - [`ReplayTransport`] replays queued responses without any network access,
//!   recording every request it receives.
//!
//! [`HttpClient`]: crate::http::HttpClient

mod http_transport;
mod replay;

use bytes::Bytes;
use futures_util::future::BoxFuture;

use crate::error::Result;
use crate::http::HttpRequest;

pub use http_transport::HttpTransport;
pub use replay::ReplayTransport;

/// Raw reply yielded by a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code as received.
    pub status: u16,
    /// Response body, untouched.
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 200 response carrying `body`.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(200, body)
    }

    /// Check if the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a fully formed request and yields the raw reply.
///
/// Every call performs at most one exchange: no retries, no caching. The
/// returned future may be dropped at any point to abandon the request.
pub trait Transport: Send + Sync {
    /// Send `request` and wait for the reply.
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<TransportResponse>>;
}
