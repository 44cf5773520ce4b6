//! OAuth2 client-credentials session management
//!
//! One [`TokenManager`] per session owns the cached access token. The
//! dispatcher asks it for a bearer token before every request; refresh is
//! transparent and serialized so concurrent callers never race duplicate
//! grants.

pub mod token_manager;
pub mod types;

pub use token_manager::TokenManager;
pub use types::{CachedToken, TokenResponse};
