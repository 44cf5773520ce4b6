//! The single gateway every resource accessor uses to reach the API
//!
//! The dispatcher builds the full URL, attaches the bearer token from the
//! token manager, serializes JSON bodies, and normalizes response handling:
//! 2xx decodes (JSON or raw), 4xx and 5xx become typed errors carrying the
//! status and a body excerpt, and network failures surface as transport
//! errors. Nothing is retried here.

use std::path::Path;
use std::sync::Arc;

use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use hyperproof_domain::{body_snippet, HyperproofError, Page, Result};

use crate::auth::TokenManager;
use crate::http::HttpClient;

/// Shared request gateway bound to one base URL and one token manager.
pub struct Dispatcher {
    base_url: String,
    http: HttpClient,
    tokens: Arc<TokenManager>,
}

impl Dispatcher {
    /// Create a dispatcher. Trailing slashes on `base_url` are dropped so
    /// paths always start with `/`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, http: HttpClient, tokens: Arc<TokenManager>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http, tokens }
    }

    /// The token manager this dispatcher authenticates with.
    #[must_use]
    pub fn token_manager(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Issue a request and decode the response body as JSON.
    ///
    /// Empty and `204 No Content` bodies decode as JSON `null`, which fits
    /// `()` and `Option<T>` targets.
    ///
    /// # Errors
    ///
    /// [`HyperproofError::Decode`] when the body does not match `T`, plus
    /// the auth/transport/status errors of the dispatch itself.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<T> {
        let (status, text) = self.execute(method, path, query, body).await?;
        decode_json(status, &text)
    }

    /// Issue a request and return the response body uninterpreted.
    ///
    /// # Errors
    ///
    /// The auth/transport/status errors of the dispatch; the body itself is
    /// never parsed.
    pub async fn request_raw(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<String> {
        let (_, text) = self.execute(method, path, query, body).await?;
        Ok(text)
    }

    /// GET a paginated collection, following `continuationToken` until the
    /// server stops returning one.
    ///
    /// # Errors
    ///
    /// Any page failing fails the whole listing.
    pub async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut page_query = query.to_vec();
            if let Some(token) = &next_token {
                page_query.push(("nextToken", token.clone()));
            }
            let page: Page<T> = self.request(Method::GET, path, &page_query, None).await?;
            records.extend(page.data);
            next_token = page.continuation_token;
            if next_token.is_none() {
                break;
            }
            debug!(path, fetched = records.len(), "following continuation token");
        }

        Ok(records)
    }

    /// Upload a file as `multipart/form-data` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// [`HyperproofError::InvalidInput`] when the file cannot be read, plus
    /// the usual dispatch errors.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file_field: &str,
        file_path: &Path,
        fields: &[(&'static str, String)],
    ) -> Result<T> {
        let (status, text) = self.execute_upload(path, file_field, file_path, fields).await?;
        decode_json(status, &text)
    }

    /// Upload a file and return the response body uninterpreted.
    ///
    /// # Errors
    ///
    /// Same as [`Self::upload`], without the decode step.
    pub async fn upload_raw(
        &self,
        path: &str,
        file_field: &str,
        file_path: &Path,
        fields: &[(&'static str, String)],
    ) -> Result<String> {
        let (_, text) = self.execute_upload(path, file_field, file_path, fields).await?;
        Ok(text)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<(StatusCode, String)> {
        let token = self.tokens.current_token().await?;
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .http
            .request(method, &url)
            .header(ACCEPT, "application/json")
            .bearer_auth(token);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.finish(builder).await
    }

    async fn execute_upload(
        &self,
        path: &str,
        file_field: &str,
        file_path: &Path,
        fields: &[(&'static str, String)],
    ) -> Result<(StatusCode, String)> {
        // Reject unreadable files before authenticating or touching the
        // network.
        let bytes = tokio::fs::read(file_path).await.map_err(|err| {
            HyperproofError::InvalidInput(format!(
                "cannot read proof file {}: {err}",
                file_path.display()
            ))
        })?;
        let token = self.tokens.current_token().await?;
        let file_name = file_path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());

        let mut form =
            Form::new().part(file_field.to_owned(), Part::bytes(bytes).file_name(file_name));
        for (name, value) in fields {
            form = form.text(*name, value.clone());
        }

        let url = format!("{}{}", self.base_url, path);
        let builder = self
            .http
            .request(Method::POST, &url)
            .header(ACCEPT, "application/json")
            .bearer_auth(token)
            .multipart(form);
        self.finish(builder).await
    }

    async fn finish(&self, builder: RequestBuilder) -> Result<(StatusCode, String)> {
        let response = self.http.send(builder).await?;
        let status = response.status();
        let text = response.text().await.map_err(|err| {
            HyperproofError::Transport(format!("failed to read response body: {err}"))
        })?;

        if status.is_success() {
            return Ok((status, text));
        }
        debug!(status = status.as_u16(), "request rejected by remote");
        Err(HyperproofError::from_status(status.as_u16(), &text))
    }
}

/// Serialize a request payload, mapping the (pathological) failure case to
/// an input error instead of panicking.
pub(crate) fn to_body<T: Serialize>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload)
        .map_err(|err| HyperproofError::InvalidInput(format!("unserializable payload: {err}")))
}

fn decode_json<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    let trimmed = body.trim();
    let effective =
        if status == StatusCode::NO_CONTENT || trimmed.is_empty() { "null" } else { trimmed };
    serde_json::from_str(effective).map_err(|err| {
        HyperproofError::Decode(format!(
            "response body did not match the expected shape: {err}; body: {}",
            body_snippet(trimmed)
        ))
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use hyperproof_domain::{ClientConfig, Credentials};

    use super::*;

    /// Dispatcher wired to a mock server that also serves the token
    /// endpoint (`tok-1`, long-lived). Shared by the resource tests.
    pub(crate) async fn test_dispatcher(server: &MockServer) -> Dispatcher {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-1",
                "token_type": "Bearer",
                "expires_in": 3600,
            })))
            .mount(server)
            .await;

        let config = ClientConfig::new(Credentials::new("test-client", "test-secret"))
            .with_token_url(format!("{}/oauth/token", server.uri()))
            .with_api_base_url(server.uri());
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("http client");
        let tokens = Arc::new(TokenManager::new(http.clone(), &config));
        Dispatcher::new(config.api_base_url.clone(), http, tokens)
    }

    #[tokio::test]
    async fn attaches_bearer_token_and_accept_header() {
        let server = MockServer::start().await;
        let dispatcher = test_dispatcher(&server).await;

        Mock::given(method("GET"))
            .and(path("/roles"))
            .and(header("authorization", "Bearer tok-1"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let roles: Vec<Value> =
            dispatcher.request(Method::GET, "/roles", &[], None).await.expect("roles");
        assert!(roles.is_empty());
    }

    #[tokio::test]
    async fn status_4xx_is_a_client_error() {
        let server = MockServer::start().await;
        let dispatcher = test_dispatcher(&server).await;

        Mock::given(method("GET"))
            .and(path("/controls/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("control not found"))
            .mount(&server)
            .await;

        let err = dispatcher
            .request::<Value>(Method::GET, "/controls/missing", &[], None)
            .await
            .expect_err("not found");

        assert!(matches!(
            err,
            HyperproofError::Client { status: 404, ref body } if body.contains("control not found")
        ));
    }

    #[tokio::test]
    async fn status_5xx_is_a_server_error() {
        let server = MockServer::start().await;
        let dispatcher = test_dispatcher(&server).await;

        Mock::given(method("GET"))
            .and(path("/risks"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = dispatcher
            .request::<Value>(Method::GET, "/risks", &[], None)
            .await
            .expect_err("server error");

        assert!(matches!(err, HyperproofError::Server { status: 502, .. }));
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let server = MockServer::start().await;
        let dispatcher = test_dispatcher(&server).await;

        Mock::given(method("GET"))
            .and(path("/labels"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = dispatcher
            .request::<Vec<Value>>(Method::GET, "/labels", &[], None)
            .await
            .expect_err("decode");

        assert!(matches!(err, HyperproofError::Decode(_)));
    }

    #[tokio::test]
    async fn raw_mode_never_parses_the_body() {
        let server = MockServer::start().await;
        let dispatcher = test_dispatcher(&server).await;

        // Valid JSON stays untouched in raw mode.
        let body = r#"{"data":[1,2,3]}"#;
        Mock::given(method("GET"))
            .and(path("/proof/p-1/contents"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let raw = dispatcher
            .request_raw(Method::GET, "/proof/p-1/contents", &[], None)
            .await
            .expect("raw body");

        assert_eq!(raw, body);
    }

    #[tokio::test]
    async fn no_content_decodes_to_unit() {
        let server = MockServer::start().await;
        let dispatcher = test_dispatcher(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/customapps/app-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        dispatcher
            .request::<()>(Method::DELETE, "/customapps/app-1", &[], None)
            .await
            .expect("no content");
    }

    #[tokio::test]
    async fn paged_get_follows_continuation_tokens() {
        let server = MockServer::start().await;
        let dispatcher = test_dispatcher(&server).await;

        // Most specific mock first: wiremock picks the first match.
        Mock::given(method("GET"))
            .and(path("/proof"))
            .and(query_param("nextToken", "t-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [3],
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/proof"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [1, 2],
                "continuationToken": "t-1",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let records: Vec<u32> =
            dispatcher.get_paged("/proof", &[("limit", "500".to_owned())]).await.expect("pages");

        assert_eq!(records, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn upload_sends_multipart_file_and_fields() {
        let server = MockServer::start().await;
        let dispatcher = test_dispatcher(&server).await;

        Mock::given(method("POST"))
            .and(path("/tasks/t-1/proof"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "p-1",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("tempdir");
        let file_path = dir.path().join("evidence.txt");
        std::fs::write(&file_path, b"proof bytes").expect("write file");

        let uploaded: Value = dispatcher
            .upload(
                "/tasks/t-1/proof",
                "proof",
                &file_path,
                &[("hp-proof-source", "System A".to_owned())],
            )
            .await
            .expect("upload");
        assert_eq!(uploaded["id"], "p-1");

        let requests = server.received_requests().await.expect("requests");
        let upload = requests
            .iter()
            .find(|request| request.url.path() == "/tasks/t-1/proof")
            .expect("upload request");
        let content_type = upload
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&upload.body);
        assert!(body.contains("proof bytes"));
        assert!(body.contains("evidence.txt"));
        assert!(body.contains("hp-proof-source"));
    }

    #[tokio::test]
    async fn missing_file_is_rejected_before_any_request() {
        let server = MockServer::start().await;
        let dispatcher = test_dispatcher(&server).await;

        let err = dispatcher
            .upload::<Value>("/proof", "file", Path::new("/nonexistent/file.pdf"), &[])
            .await
            .expect_err("missing file");

        assert!(matches!(err, HyperproofError::InvalidInput(_)));
    }
}
