//! Client configuration structures
//!
//! Credentials are supplied once at construction and owned by the token
//! manager for its lifetime. Everything else has defaults that match the
//! hosted Hyperproof service.

use std::fmt;
use std::time::Duration;

/// Default base URL for resource endpoints.
pub const DEFAULT_API_BASE_URL: &str = "https://api.hyperproof.app/v1";

/// Default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.hyperproof.app/oauth/token";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default safety margin subtracted from a token's reported lifetime so a
/// request never races expiry mid-flight.
pub const DEFAULT_TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(30);

/// OAuth2 client credentials issued by Hyperproof.
#[derive(Clone)]
pub struct Credentials {
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

impl Credentials {
    /// Create a new credential pair.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into() }
    }
}

// The secret must never end up in logs, so Debug is written by hand.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Configuration for a client session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OAuth2 client credentials.
    pub credentials: Credentials,
    /// Base URL all resource paths are appended to.
    pub api_base_url: String,
    /// OAuth2 token endpoint.
    pub token_url: String,
    /// Timeout applied to every HTTP exchange, including token requests.
    pub timeout: Duration,
    /// Tokens are refreshed this far before their reported expiry.
    pub token_refresh_margin: Duration,
    /// When set, a correlated query aborts on the first fan-out failure
    /// instead of collecting it and continuing.
    pub fail_fast: bool,
}

impl ClientConfig {
    /// Create a configuration with the hosted-service defaults.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            token_url: DEFAULT_TOKEN_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            token_refresh_margin: DEFAULT_TOKEN_REFRESH_MARGIN,
            fail_fast: false,
        }
    }

    /// Override the resource base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Override the OAuth2 token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Override the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the token refresh safety margin.
    #[must_use]
    pub const fn with_token_refresh_margin(mut self, margin: Duration) -> Self {
        self.token_refresh_margin = margin;
        self
    }

    /// Toggle fail-fast fan-out behaviour.
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}
