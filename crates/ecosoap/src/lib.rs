//! Client for the EcoSoap Bank hospitality API.
//!
//! [`Session`] is the entry point: it exposes each supported API call as a
//! typed async method and leaves the GraphQL plumbing to [`ecosoap_net`].
//!
//! ```ignore
//! use ecosoap::{Config, ErrorMessage, Session};
//!
//! let session = Session::from_config(&Config::default())?;
//! session.provide_token(token);
//!
//! match session.log_in().await {
//!     Ok(user) => println!("Welcome, {}", user.display_name()),
//!     Err(err) => eprintln!("{}", ErrorMessage::from(&err)),
//! }
//! ```
//!
//! # Crate Organization
//!
//! - [`model`]: users, properties, pickups, impact stats, and payments
//! - [`catalog`]: the fixed query and mutation templates
//! - [`session`]: the operations themselves
//! - [`provider`]: trait seams for presentation code
//! - [`config`]: TOML configuration
//! - [`message`]: errors rendered for display

pub mod catalog;
pub mod config;
pub mod message;
pub mod model;
pub mod provider;
pub mod session;

pub use ecosoap_net as net;
pub use ecosoap_net::graphql::QueryError;

pub use config::{Config, ConfigError, DEFAULT_ENDPOINT};
pub use message::ErrorMessage;
pub use provider::{ImpactDataProvider, PaymentDataProvider, PickupDataProvider, UserDataProvider};
pub use session::Session;

/// Target names for log filtering.
pub mod targets {
    /// Session operations and config loading.
    pub const SESSION: &str = "ecosoap::session";

    pub use ecosoap_net::targets::{GRAPHQL, HTTP, NET, TRANSPORT};
}
