//! Networking layer for the EcoSoap client.
//!
//! This crate provides the request/response plumbing behind the session
//! facade:
//!
//! - **Transport**: a pluggable "send these bytes, get bytes back" seam, with
//!   an HTTP implementation and a deterministic replay fixture for tests
//! - **HTTP Client**: a small reqwest wrapper the HTTP transport drives
//! - **GraphQL**: request envelopes, response envelope decoding, and the
//!   authenticated [`QueryClient`]
//!
//! # Query Client
//!
//! ```ignore
//! use ecosoap_net::{QueryClient, QueryDescriptor};
//!
//! let client = QueryClient::builder("https://api.example.com/graphql").build()?;
//!
//! // No request is sent until a token has been provided.
//! client.set_token(token);
//!
//! let stats: ImpactStatsPayload = client
//!     .query(QueryDescriptor::new(IMPACT_STATS).variable("input", input))
//!     .await?;
//! ```
//!
//! # Testing Without a Network
//!
//! ```ignore
//! use std::sync::Arc;
//! use ecosoap_net::transport::ReplayTransport;
//!
//! let transport = ReplayTransport::new()
//!     .respond_with_json(serde_json::json!({"data": {"x": {"id": "4"}}}));
//! let client = QueryClient::with_transport("http://localhost", Arc::new(transport.clone()));
//! ```
//!
//! # Logging
//!
//! All log output goes through `tracing` under the targets in [`targets`].
//! Installing a subscriber is left to the application.

mod error;
pub mod graphql;
pub mod http;
pub mod transport;

pub use error::{NetworkError, Result};
pub use graphql::{DecodeError, QueryClient, QueryClientBuilder, QueryDescriptor, QueryError};
pub use transport::{HttpTransport, ReplayTransport, Transport, TransportResponse};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Root target for the whole crate.
    pub const NET: &str = "ecosoap_net";
    /// HTTP client target.
    pub const HTTP: &str = "ecosoap_net::http";
    /// Transport target.
    pub const TRANSPORT: &str = "ecosoap_net::transport";
    /// Query client target.
    pub const GRAPHQL: &str = "ecosoap_net::graphql";
}
