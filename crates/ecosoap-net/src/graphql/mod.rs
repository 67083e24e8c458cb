//! Typed GraphQL query client.
//!
//! This module turns a query template plus variables into an authenticated
//! request, and the response envelope back into a typed value or a
//! classified [`QueryError`].
//!
//! # Example
//!
//! ```ignore
//! use ecosoap_net::graphql::{QueryClient, QueryDescriptor};
//!
//! let client = QueryClient::builder("https://api.example.com/graphql").build()?;
//! client.set_token(token);
//!
//! let descriptor = QueryDescriptor::new(r#"
//!     query UserByIdInput($input: UserByIdInput) {
//!         userById(input: $input) {
//!             user { id firstName }
//!         }
//!     }
//! "#)
//! .variable("input", serde_json::json!({ "userId": "4" }));
//!
//! let payload: UserPayload = client.query(descriptor).await?;
//! ```
//!
//! On the wire every request is a single POST:
//!
//! ```text
//! {"query": "<template>", "variables": {..., "token": "<credential>"}}
//! ```
//!
//! and every successful reply nests its payload under one root key:
//!
//! ```text
//! {"data": {"<operationName>": <payload>}}
//! ```

mod client;
pub mod envelope;
mod error;
mod request;

pub use client::{QueryClient, QueryClientBuilder};
pub use envelope::{
    GraphQLError, GraphQLLocation, PathSegment, ResponseEnvelope, RootPayload, decode,
    decode_envelope,
};
pub use error::{DecodeError, MalformedBody, QueryError};
pub use request::{OperationType, QueryDescriptor, RejectedVariable, RequestEnvelope, TOKEN_KEY};
