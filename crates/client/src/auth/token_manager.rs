//! Token manager for the OAuth2 client-credentials grant
//!
//! Owns the credentials and the single cached token of a session. Reads of
//! a valid token only take the read half of the cache lock; the refresh
//! path is serialized behind a separate mutex, with a re-check after
//! acquisition, so N concurrent callers finding an expired token produce
//! exactly one grant request.

use chrono::Duration;
use reqwest::Method;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error};

use hyperproof_domain::{body_snippet, ClientConfig, Credentials, HyperproofError, Result};

use crate::auth::types::{CachedToken, TokenResponse};
use crate::http::HttpClient;

/// Manages acquisition and transparent refresh of the session access token.
pub struct TokenManager {
    http: HttpClient,
    token_url: String,
    credentials: Credentials,
    refresh_margin: Duration,
    cached: RwLock<Option<CachedToken>>,
    refresh_lock: Mutex<()>,
}

impl TokenManager {
    /// Create a token manager. No request is made until a token is needed.
    #[must_use]
    pub fn new(http: HttpClient, config: &ClientConfig) -> Self {
        let margin_seconds =
            i64::try_from(config.token_refresh_margin.as_secs()).unwrap_or(i64::MAX);
        Self {
            http,
            token_url: config.token_url.clone(),
            credentials: config.credentials.clone(),
            refresh_margin: Duration::seconds(margin_seconds),
            cached: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Return a valid access token, refreshing synchronously when the
    /// cached one is absent or within the safety margin of expiry.
    ///
    /// # Errors
    ///
    /// Returns [`HyperproofError::Auth`] when the credentials are rejected
    /// or the authorization endpoint cannot be reached.
    pub async fn current_token(&self) -> Result<String> {
        if let Some(token) = self.valid_cached().await {
            return Ok(token);
        }

        let _refresh = self.refresh_lock.lock().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = self.valid_cached().await {
            return Ok(token);
        }
        self.acquire().await
    }

    /// Perform the client-credentials grant unconditionally and cache the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`HyperproofError::Auth`] when the grant is rejected, the
    /// endpoint is unreachable, or the response is malformed.
    pub async fn acquire(&self) -> Result<String> {
        debug!(token_url = %self.token_url, "requesting access token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];
        let builder = self.http.request(Method::POST, &self.token_url).form(&form);
        let response = self.http.send(builder).await.map_err(|err| {
            HyperproofError::Auth(format!("authorization endpoint unreachable: {err}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "access token request rejected");
            return Err(HyperproofError::Auth(format!(
                "token request failed (HTTP {}): {}",
                status.as_u16(),
                body_snippet(&body)
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| HyperproofError::Auth(format!("malformed token response: {err}")))?;
        if let Some(token_type) = &token.token_type {
            if !token_type.eq_ignore_ascii_case("bearer") {
                return Err(HyperproofError::Auth(format!(
                    "unsupported token type: {token_type}"
                )));
            }
        }

        let cached = CachedToken::from_response(token);
        let access_token = cached.access_token.clone();
        *self.cached.write().await = Some(cached);
        debug!("access token refreshed");
        Ok(access_token)
    }

    /// Drop the cached token; the next call re-authenticates.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    /// Whether a token is currently cached (expired or not).
    pub async fn has_token(&self) -> bool {
        self.cached.read().await.is_some()
    }

    async fn valid_cached(&self) -> Option<String> {
        let cached = self.cached.read().await;
        cached
            .as_ref()
            .filter(|token| !token.is_expired(self.refresh_margin))
            .map(|token| token.access_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration as StdDuration;

    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn manager_for(server: &MockServer) -> TokenManager {
        manager_with_margin(server, StdDuration::from_secs(30))
    }

    fn manager_with_margin(server: &MockServer, margin: StdDuration) -> TokenManager {
        let config = ClientConfig::new(Credentials::new("test-client", "test-secret"))
            .with_token_url(format!("{}/oauth/token", server.uri()))
            .with_token_refresh_margin(margin);
        let http = HttpClient::builder()
            .timeout(StdDuration::from_secs(5))
            .build()
            .expect("http client");
        TokenManager::new(http, &config)
    }

    fn token_body(token: &str, expires_in: i64) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": expires_in,
        }))
    }

    #[tokio::test]
    async fn caches_token_across_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=test-client"))
            .and(body_string_contains("client_secret=test-secret"))
            .respond_with(token_body("tok-1", 3600))
            .expect(1)
            .mount(&server)
            .await;

        let manager = manager_for(&server);
        let first = manager.current_token().await.expect("token");
        let second = manager.current_token().await.expect("token");

        assert_eq!(first, "tok-1");
        assert_eq!(second, "tok-1");
    }

    #[tokio::test]
    async fn rejected_credentials_cache_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_client"}"#),
            )
            .mount(&server)
            .await;

        let manager = manager_for(&server);
        let err = manager.current_token().await.expect_err("auth failure");

        assert!(matches!(err, HyperproofError::Auth(_)));
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid_client"));
        assert!(!manager.has_token().await);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_auth_error() {
        let config = ClientConfig::new(Credentials::new("id", "secret"))
            .with_token_url("http://127.0.0.1:9/oauth/token".to_owned());
        let http = HttpClient::builder()
            .timeout(StdDuration::from_secs(1))
            .build()
            .expect("http client");
        let manager = TokenManager::new(http, &config);

        let err = manager.current_token().await.expect_err("unreachable");
        assert!(matches!(err, HyperproofError::Auth(_)));
    }

    #[tokio::test]
    async fn expired_token_is_refreshed() {
        let server = MockServer::start().await;
        // 10-second lifetime against a 30-second margin: always stale.
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(token_body("tok-short", 10))
            .expect(2)
            .mount(&server)
            .await;

        let manager = manager_for(&server);
        manager.current_token().await.expect("token");
        manager.current_token().await.expect("token");
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(token_body("tok-1", 3600).set_delay(StdDuration::from_millis(50)))
            .expect(1)
            .mount(&server)
            .await;

        let manager = Arc::new(manager_for(&server));
        let callers = (0..8).map(|_| {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.current_token().await })
        });
        let tokens = futures::future::join_all(callers).await;

        for token in tokens {
            assert_eq!(token.expect("join").expect("token"), "tok-1");
        }
    }

    #[tokio::test]
    async fn non_bearer_token_type_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok",
                "token_type": "mac",
            })))
            .mount(&server)
            .await;

        let manager = manager_for(&server);
        let err = manager.current_token().await.expect_err("token type");

        assert!(matches!(err, HyperproofError::Auth(ref msg) if msg.contains("mac")));
    }

    #[tokio::test]
    async fn invalidate_forces_reauthentication() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(token_body("tok-1", 3600))
            .expect(2)
            .mount(&server)
            .await;

        let manager = manager_for(&server);
        manager.current_token().await.expect("token");
        manager.invalidate().await;
        assert!(!manager.has_token().await);
        manager.current_token().await.expect("token");
    }
}
