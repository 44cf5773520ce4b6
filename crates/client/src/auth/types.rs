//! OAuth token types

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Token response from the authorization server (RFC 6749).
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// The opaque access token.
    pub access_token: String,
    /// Token type; `Bearer` when present.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Access token cached in memory with its computed absolute expiry.
///
/// Never persisted; lives for the process only.
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The opaque access token.
    pub access_token: String,
    /// Absolute expiry, when the server reported a lifetime.
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Compute the absolute expiry from the grant's reported lifetime.
    #[must_use]
    pub fn from_response(response: TokenResponse) -> Self {
        let expires_at = response.expires_in.map(|seconds| Utc::now() + Duration::seconds(seconds));
        Self { access_token: response.access_token, expires_at }
    }

    /// True when the token is expired or within `margin` of expiry.
    ///
    /// A token without a reported lifetime never expires.
    #[must_use]
    pub fn is_expired(&self, margin: Duration) -> bool {
        self.expires_at.is_some_and(|expires_at| Utc::now() + margin >= expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(expires_in: Option<i64>) -> TokenResponse {
        TokenResponse { access_token: "tok".to_owned(), token_type: None, expires_in }
    }

    #[test]
    fn fresh_token_is_not_expired() {
        let token = CachedToken::from_response(response(Some(3600)));
        assert!(!token.is_expired(Duration::seconds(30)));
    }

    #[test]
    fn margin_expires_a_token_early() {
        let token = CachedToken::from_response(response(Some(60)));
        // A 2-minute margin swallows the whole 60-second lifetime.
        assert!(token.is_expired(Duration::seconds(120)));
    }

    #[test]
    fn token_without_lifetime_never_expires() {
        let token = CachedToken::from_response(response(None));
        assert!(token.expires_at.is_none());
        assert!(!token.is_expired(Duration::seconds(30)));
    }
}
