//! Labels accessor

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use hyperproof_core::LabelReader;
use hyperproof_domain::{
    Label, LabelFilter, LabelPatch, LabelSummary, NewLabel, ProofMetadata, Result,
};

use crate::http::dispatcher::to_body;
use crate::http::Dispatcher;

/// Access to the `/labels` endpoints.
#[derive(Clone)]
pub struct LabelsApi {
    dispatcher: Arc<Dispatcher>,
}

impl LabelsApi {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve all labels in the organization, with optional filters.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_labels(&self, filter: &LabelFilter) -> Result<Vec<Label>> {
        self.dispatcher.request(Method::GET, "/labels", &filter.query_pairs(), None).await
    }

    /// Raw-mode variant of [`Self::get_labels`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_labels_raw(&self, filter: &LabelFilter) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, "/labels", &filter.query_pairs(), None).await
    }

    /// Retrieve label summaries, with optional filters.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_label_summaries(&self, filter: &LabelFilter) -> Result<Vec<LabelSummary>> {
        self.dispatcher.request(Method::GET, "/labels/summaries", &filter.query_pairs(), None).await
    }

    /// Raw-mode variant of [`Self::get_label_summaries`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_label_summaries_raw(&self, filter: &LabelFilter) -> Result<String> {
        self.dispatcher
            .request_raw(Method::GET, "/labels/summaries", &filter.query_pairs(), None)
            .await
    }

    /// Retrieve a specific label by its unique ID.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_label_by_id(&self, label_id: &str) -> Result<Label> {
        self.dispatcher.request(Method::GET, &format!("/labels/{label_id}"), &[], None).await
    }

    /// Raw-mode variant of [`Self::get_label_by_id`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_label_by_id_raw(&self, label_id: &str) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, &format!("/labels/{label_id}"), &[], None).await
    }

    /// Add a new label to the organization.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn add_label(&self, label: &NewLabel) -> Result<Label> {
        let body = to_body(label)?;
        self.dispatcher.request(Method::POST, "/labels", &[], Some(&body)).await
    }

    /// Update an existing label; only the fields set on `patch` are sent.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn update_label(&self, label_id: &str, patch: &LabelPatch) -> Result<Label> {
        let body = patch.to_body();
        self.dispatcher
            .request(Method::PATCH, &format!("/labels/{label_id}"), &[], Some(&body))
            .await
    }

    /// Upload a file as proof on a label.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the file cannot be read; otherwise dispatch
    /// errors.
    pub async fn add_label_proof(&self, label_id: &str, file_path: &Path) -> Result<ProofMetadata> {
        self.dispatcher.upload(&format!("/labels/{label_id}/proof"), "file", file_path, &[]).await
    }
}

#[async_trait]
impl LabelReader for LabelsApi {
    async fn labels(&self) -> Result<Vec<Label>> {
        self.get_labels(&LabelFilter::default()).await
    }

    async fn label_summaries(&self) -> Result<Vec<LabelSummary>> {
        self.get_label_summaries(&LabelFilter::default()).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::dispatcher::tests::test_dispatcher;

    use super::*;

    #[tokio::test]
    async fn add_label_posts_name_and_description() {
        let server = MockServer::start().await;
        let api = LabelsApi::new(Arc::new(test_dispatcher(&server).await));

        Mock::given(method("POST"))
            .and(path("/labels"))
            .and(body_json(serde_json::json!({
                "name": "Malware Policy",
                "description": "Evidence for the malware policy",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!(
                {"id": "l-1", "name": "Malware Policy"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let label = NewLabel::new("Malware Policy", "Evidence for the malware policy");
        let created = api.add_label(&label).await.expect("created");
        assert_eq!(created.id, "l-1");
    }

    #[tokio::test]
    async fn summaries_decode_into_the_summary_shape() {
        let server = MockServer::start().await;
        let api = LabelsApi::new(Arc::new(test_dispatcher(&server).await));

        Mock::given(method("GET"))
            .and(path("/labels/summaries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "l-1", "name": "Malware Policy", "status": "active"},
                {"id": "l-2", "name": "Phishing"},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let summaries = api.get_label_summaries(&LabelFilter::default()).await.expect("summaries");
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].status, None);
    }
}
