//! Controls accessor

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use hyperproof_core::ControlReader;
use hyperproof_domain::{
    Control, ControlFilter, ControlPatch, ControlSummary, NewControl, ProofMetadata, Result,
};

use crate::http::dispatcher::to_body;
use crate::http::Dispatcher;

/// Access to the `/controls` endpoints.
#[derive(Clone)]
pub struct ControlsApi {
    dispatcher: Arc<Dispatcher>,
}

impl ControlsApi {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve all controls for the organization, with optional filters.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_controls(&self, filter: &ControlFilter) -> Result<Vec<Control>> {
        self.dispatcher.request(Method::GET, "/controls", &filter.query_pairs(), None).await
    }

    /// Raw-mode variant of [`Self::get_controls`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_controls_raw(&self, filter: &ControlFilter) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, "/controls", &filter.query_pairs(), None).await
    }

    /// Retrieve control summaries, with optional filters.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_control_summaries(
        &self,
        can_link: Option<bool>,
        status: Option<&str>,
    ) -> Result<Vec<ControlSummary>> {
        self.dispatcher
            .request(Method::GET, "/controls/summaries", &summary_pairs(can_link, status), None)
            .await
    }

    /// Raw-mode variant of [`Self::get_control_summaries`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_control_summaries_raw(
        &self,
        can_link: Option<bool>,
        status: Option<&str>,
    ) -> Result<String> {
        self.dispatcher
            .request_raw(Method::GET, "/controls/summaries", &summary_pairs(can_link, status), None)
            .await
    }

    /// Retrieve a specific control by its unique ID.
    ///
    /// # Errors
    ///
    /// `Client { status: 404, .. }` when the control does not exist.
    pub async fn get_control_by_id(&self, control_id: &str) -> Result<Control> {
        self.dispatcher.request(Method::GET, &format!("/controls/{control_id}"), &[], None).await
    }

    /// Raw-mode variant of [`Self::get_control_by_id`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_control_by_id_raw(&self, control_id: &str) -> Result<String> {
        self.dispatcher
            .request_raw(Method::GET, &format!("/controls/{control_id}"), &[], None)
            .await
    }

    /// Add a new control to the organization.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn add_control(&self, control: &NewControl) -> Result<Control> {
        let body = to_body(control)?;
        self.dispatcher.request(Method::POST, "/controls", &[], Some(&body)).await
    }

    /// Update an existing control; only the fields set on `patch` are sent.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn update_control(&self, control_id: &str, patch: &ControlPatch) -> Result<Control> {
        let body = patch.to_body();
        self.dispatcher
            .request(Method::PATCH, &format!("/controls/{control_id}"), &[], Some(&body))
            .await
    }

    /// Upload a file as proof on a control.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the file cannot be read; otherwise dispatch
    /// errors.
    pub async fn add_control_proof(
        &self,
        control_id: &str,
        file_path: &Path,
    ) -> Result<ProofMetadata> {
        self.dispatcher
            .upload(&format!("/controls/{control_id}/proof"), "file", file_path, &[])
            .await
    }
}

fn summary_pairs(can_link: Option<bool>, status: Option<&str>) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(can_link) = can_link {
        pairs.push(("canLink", can_link.to_string()));
    }
    if let Some(status) = status {
        pairs.push(("status", status.to_owned()));
    }
    pairs
}

#[async_trait]
impl ControlReader for ControlsApi {
    async fn controls(&self) -> Result<Vec<Control>> {
        self.get_controls(&ControlFilter::default()).await
    }
}
