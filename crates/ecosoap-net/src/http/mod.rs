//! HTTP client used by the production transport.
//!
//! # Example
//!
//! ```ignore
//! use ecosoap_net::http::{HttpClient, HttpMethod, HttpRequest, RequestBody};
//!
//! let client = HttpClient::new()?;
//!
//! let mut request = HttpRequest::new(HttpMethod::Post, "https://api.example.com/graphql");
//! request.body = RequestBody::Bytes(r#"{"query":"{ ping }"}"#.into());
//! let response = client.execute(request).await?;
//! println!("Status: {}", response.status());
//! ```

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use request::{HttpMethod, HttpRequest, RequestBody};
pub use response::HttpResponse;
