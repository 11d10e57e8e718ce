//! # Veridian Client SDK
//!
//! Client library for the Veridian identity verification API. The client
//! authenticates itself against the SSO token endpoint with the OAuth2
//! client-credentials grant, caches the bearer token for as long as its
//! `exp` claim allows, and exposes the four verification operations:
//! register, verify, login, logout.
//!
//! Modules:
//! - `client` — public facade with fluent configuration
//! - `token` — token lifecycle manager and unverified JWT payload codec
//! - `cache` — pluggable token store capability plus an in-process store
//! - `request` — generic request executor and error normalization
//! - `config` — client configuration
//!
//! ```no_run
//! use std::sync::Arc;
//! use veridian_client::{Client, InMemoryTokenStore};
//!
//! # async fn example() -> veridian_client::Result<()> {
//! let client = Client::new("acme", "client-id", "client-secret")?
//!     .with_timeout(5)?
//!     .with_cache(Arc::new(InMemoryTokenStore::new()));
//!
//! let registration = client.register("<sdk jwt>", "user@example.com").await?;
//! let c_uuid = registration["c_uuid"].as_str().unwrap_or_default().to_owned();
//!
//! client.verify("<sdk jwt>", &c_uuid).await?;
//! let login = client.login("<sdk jwt>", &c_uuid).await?;
//!
//! let session_id = login["session_id"].as_str().unwrap_or_default().to_owned();
//! client.logout("<sdk jwt>", &session_id, &c_uuid).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod helpers;
pub mod request;
pub mod tests;
pub mod token;
pub mod utils;

pub use crate::cache::memory::InMemoryTokenStore;
pub use crate::cache::store::TokenStore;
pub use crate::client::Client;
pub use crate::config::settings::ClientConfig;
pub use crate::error::{Error, Result};
