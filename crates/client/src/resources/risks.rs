//! Risks accessor

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use hyperproof_core::RiskReader;
use hyperproof_domain::{NewRisk, Result, Risk, RiskFilter, RiskPatch, RiskSelection};

use crate::http::dispatcher::to_body;
use crate::http::Dispatcher;

/// Access to the `/risks` endpoints.
#[derive(Clone)]
pub struct RisksApi {
    dispatcher: Arc<Dispatcher>,
}

impl RisksApi {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve all risks, with optional register and status filters.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_risks(&self, filter: &RiskFilter) -> Result<Vec<Risk>> {
        self.dispatcher.request(Method::GET, "/risks", &filter.query_pairs(), None).await
    }

    /// Raw-mode variant of [`Self::get_risks`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_risks_raw(&self, filter: &RiskFilter) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, "/risks", &filter.query_pairs(), None).await
    }

    /// Retrieve a specific risk by its unique ID.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_risk_by_id(&self, risk_id: &str) -> Result<Risk> {
        self.dispatcher.request(Method::GET, &format!("/risks/{risk_id}"), &[], None).await
    }

    /// Raw-mode variant of [`Self::get_risk_by_id`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_risk_by_id_raw(&self, risk_id: &str) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, &format!("/risks/{risk_id}"), &[], None).await
    }

    /// Add a new risk to a risk register.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn add_risk(&self, risk: &NewRisk) -> Result<Risk> {
        let body = to_body(risk)?;
        self.dispatcher.request(Method::POST, "/risks", &[], Some(&body)).await
    }

    /// Update an existing risk. Fields set on `patch` are sent; fields
    /// flagged for clearing are sent as explicit nulls.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn update_risk(&self, risk_id: &str, patch: &RiskPatch) -> Result<Risk> {
        let body = patch.to_body();
        self.dispatcher.request(Method::PATCH, &format!("/risks/{risk_id}"), &[], Some(&body)).await
    }

    /// Retrieve the risks matching a server-side selection.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn filter_risks(&self, selection: &RiskSelection) -> Result<Vec<Risk>> {
        let body = selection.to_body();
        self.dispatcher.request(Method::PUT, "/risks/filter", &[], Some(&body)).await
    }
}

#[async_trait]
impl RiskReader for RisksApi {
    async fn risks(&self) -> Result<Vec<Risk>> {
        self.get_risks(&RiskFilter::default()).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::dispatcher::tests::test_dispatcher;

    use super::*;

    #[tokio::test]
    async fn update_serializes_cleared_fields_as_null() {
        let server = MockServer::start().await;
        let api = RisksApi::new(Arc::new(test_dispatcher(&server).await));

        Mock::given(method("PATCH"))
            .and(path("/risks/r-1"))
            .and(body_json(serde_json::json!({
                "name": "Renamed",
                "category": null,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
                {"id": "r-1", "name": "Renamed"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let patch = RiskPatch::default().with_name("Renamed").clear_category();
        api.update_risk("r-1", &patch).await.expect("updated");
    }

    #[tokio::test]
    async fn filter_always_sends_risk_ids() {
        let server = MockServer::start().await;
        let api = RisksApi::new(Arc::new(test_dispatcher(&server).await));

        Mock::given(method("PUT"))
            .and(path("/risks/filter"))
            .and(body_json(serde_json::json!({"riskIds": [], "status": "active"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let selection = RiskSelection::default().with_status("active");
        let risks = api.filter_risks(&selection).await.expect("risks");
        assert!(risks.is_empty());
    }
}
