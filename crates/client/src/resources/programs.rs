//! Programs accessor

use std::sync::Arc;

use reqwest::Method;

use hyperproof_domain::{NewProgram, Program, ProgramPatch, Result};

use crate::http::dispatcher::to_body;
use crate::http::Dispatcher;

/// Access to the `/programs` endpoints.
#[derive(Clone)]
pub struct ProgramsApi {
    dispatcher: Arc<Dispatcher>,
}

impl ProgramsApi {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve all programs, optionally filtered by work status.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_programs(&self, status: Option<&str>) -> Result<Vec<Program>> {
        self.dispatcher.request(Method::GET, "/programs", &status_pairs(status), None).await
    }

    /// Raw-mode variant of [`Self::get_programs`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_programs_raw(&self, status: Option<&str>) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, "/programs", &status_pairs(status), None).await
    }

    /// Retrieve a specific program by its unique ID.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_program_by_id(&self, program_id: &str) -> Result<Program> {
        self.dispatcher.request(Method::GET, &format!("/programs/{program_id}"), &[], None).await
    }

    /// Raw-mode variant of [`Self::get_program_by_id`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_program_by_id_raw(&self, program_id: &str) -> Result<String> {
        self.dispatcher
            .request_raw(Method::GET, &format!("/programs/{program_id}"), &[], None)
            .await
    }

    /// Add a new program to the organization.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn add_program(&self, program: &NewProgram) -> Result<Program> {
        let body = to_body(program)?;
        self.dispatcher.request(Method::POST, "/programs", &[], Some(&body)).await
    }

    /// Update an existing program; only the fields set on `patch` are sent.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn update_program(&self, program_id: &str, patch: &ProgramPatch) -> Result<Program> {
        let body = patch.to_body();
        self.dispatcher
            .request(Method::PATCH, &format!("/programs/{program_id}"), &[], Some(&body))
            .await
    }
}

fn status_pairs(status: Option<&str>) -> Vec<(&'static str, String)> {
    status.map_or_else(Vec::new, |status| vec![("status", status.to_owned())])
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::dispatcher::tests::test_dispatcher;

    use super::*;

    #[tokio::test]
    async fn listing_filters_by_work_status() {
        let server = MockServer::start().await;
        let api = ProgramsApi::new(Arc::new(test_dispatcher(&server).await));

        Mock::given(method("GET"))
            .and(path("/programs"))
            .and(query_param("status", "operating"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "pr-1", "name": "SOC 2", "workStatus": "operating"},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let programs = api.get_programs(Some("operating")).await.expect("programs");
        assert_eq!(programs[0].work_status.as_deref(), Some("operating"));
    }

    #[tokio::test]
    async fn update_patches_only_set_fields() {
        let server = MockServer::start().await;
        let api = ProgramsApi::new(Arc::new(test_dispatcher(&server).await));

        Mock::given(method("PATCH"))
            .and(path("/programs/pr-1"))
            .and(body_json(serde_json::json!({"workStatus": "operating"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
                {"id": "pr-1", "name": "SOC 2", "workStatus": "operating"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let patch = ProgramPatch::default().with_work_status("operating");
        api.update_program("pr-1", &patch).await.expect("updated");
    }
}
