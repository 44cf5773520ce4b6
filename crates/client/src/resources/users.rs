//! Users accessor

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use hyperproof_core::UserReader;
use hyperproof_domain::{CurrentUser, OrgUser, Result};

use crate::http::Dispatcher;

/// Access to the `/users` endpoints.
#[derive(Clone)]
pub struct UsersApi {
    dispatcher: Arc<Dispatcher>,
}

impl UsersApi {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve the currently authenticated user.
    ///
    /// `expand` is a comma-separated list of fields to expand
    /// (`identityProviders`, `organizations`).
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_current_user(&self, expand: Option<&str>) -> Result<CurrentUser> {
        self.dispatcher.request(Method::GET, "/users/me", &expand_pairs(expand), None).await
    }

    /// Raw-mode variant of [`Self::get_current_user`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_current_user_raw(&self, expand: Option<&str>) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, "/users/me", &expand_pairs(expand), None).await
    }

    /// Retrieve the users in the organization.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_organization_users(
        &self,
        expand: Option<&str>,
        include_deactivated: bool,
    ) -> Result<Vec<OrgUser>> {
        let mut query = expand_pairs(expand);
        query.push(("includeDeactivated", include_deactivated.to_string()));
        self.dispatcher.request(Method::GET, "/users", &query, None).await
    }

    /// Raw-mode variant of [`Self::get_organization_users`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_organization_users_raw(
        &self,
        expand: Option<&str>,
        include_deactivated: bool,
    ) -> Result<String> {
        let mut query = expand_pairs(expand);
        query.push(("includeDeactivated", include_deactivated.to_string()));
        self.dispatcher.request_raw(Method::GET, "/users", &query, None).await
    }
}

fn expand_pairs(expand: Option<&str>) -> Vec<(&'static str, String)> {
    expand.map_or_else(Vec::new, |fields| vec![("expand", fields.to_owned())])
}

#[async_trait]
impl UserReader for UsersApi {
    async fn organization_users(&self) -> Result<Vec<OrgUser>> {
        self.get_organization_users(None, false).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::dispatcher::tests::test_dispatcher;

    use super::*;

    #[tokio::test]
    async fn organization_users_carries_deactivated_flag() {
        let server = MockServer::start().await;
        let api = UsersApi::new(Arc::new(test_dispatcher(&server).await));

        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("includeDeactivated", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "u1", "givenName": "Jane", "surname": "Doe"},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let users = api.get_organization_users(None, true).await.expect("users");

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "u1");
        assert_eq!(users[0].given_name.as_deref(), Some("Jane"));
    }

    #[tokio::test]
    async fn current_user_expands_requested_fields() {
        let server = MockServer::start().await;
        let api = UsersApi::new(Arc::new(test_dispatcher(&server).await));

        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(query_param("expand", "organizations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
                {"id": "me", "email": "jane@example.com"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let me = api.get_current_user(Some("organizations")).await.expect("current user");
        assert_eq!(me.id, "me");
    }
}
