//! # Hyperproof Client
//!
//! Typed async client for the Hyperproof GRC REST API.
//!
//! The [`Session`] façade owns the OAuth2 client-credentials token manager
//! and one shared request dispatcher; resource accessors and the correlated
//! queries are built lazily on first use and reuse both for the lifetime of
//! the session.
//!
//! ```no_run
//! use hyperproof_client::Session;
//!
//! # async fn example() -> hyperproof_client::Result<()> {
//! let session = Session::from_env()?;
//! let users = session.users()?.get_organization_users(None, false).await?;
//! println!("{} users", users.len());
//! # Ok(())
//! # }
//! ```
//!
//! The client does not retry or rate-limit. The remote service throttles
//! heavy correlated-query traffic; callers running wide fan-outs should
//! expect elevated latency and decide their own retry policy.

pub mod auth;
pub mod config;
pub mod http;
pub mod resources;
pub mod session;

// Re-export commonly used items
pub use config::load_from_env;
pub use hyperproof_core::{
    CancellationToken, Correlated, CorrelatedQueries, FanOutFailure, Matched,
};
pub use hyperproof_domain::{ClientConfig, Credentials, HyperproofError, Result};
pub use session::Session;

/// Wire types, filters and payloads.
pub use hyperproof_domain as domain;
