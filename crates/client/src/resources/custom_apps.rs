//! Custom apps accessor

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use hyperproof_domain::{CustomApp, CustomAppEvent, CustomAppPatch, NewCustomApp, Result};

use crate::http::dispatcher::to_body;
use crate::http::Dispatcher;

/// Access to the `/customapps` endpoints.
#[derive(Clone)]
pub struct CustomAppsApi {
    dispatcher: Arc<Dispatcher>,
}

impl CustomAppsApi {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve the custom apps installed in the organization.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_custom_apps(&self) -> Result<Vec<CustomApp>> {
        self.dispatcher.request(Method::GET, "/customapps", &[], None).await
    }

    /// Raw-mode variant of [`Self::get_custom_apps`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_custom_apps_raw(&self) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, "/customapps", &[], None).await
    }

    /// Retrieve a custom app by its unique ID.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_custom_app_by_id(&self, app_id: &str) -> Result<CustomApp> {
        self.dispatcher.request(Method::GET, &format!("/customapps/{app_id}"), &[], None).await
    }

    /// Register a new custom app.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn add_custom_app(&self, app: &NewCustomApp) -> Result<CustomApp> {
        let body = to_body(app)?;
        self.dispatcher.request(Method::POST, "/customapps", &[], Some(&body)).await
    }

    /// Update a custom app; only the fields set on `patch` are sent.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn update_custom_app(&self, app_id: &str, patch: &CustomAppPatch) -> Result<CustomApp> {
        let body = patch.to_body();
        self.dispatcher
            .request(Method::PATCH, &format!("/customapps/{app_id}"), &[], Some(&body))
            .await
    }

    /// Remove a custom app from the organization.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn delete_custom_app(&self, app_id: &str) -> Result<()> {
        self.dispatcher.request(Method::DELETE, &format!("/customapps/{app_id}"), &[], None).await
    }

    /// Retrieve the events emitted by a custom app.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_custom_app_events(&self, app_id: &str) -> Result<Vec<CustomAppEvent>> {
        self.dispatcher
            .request(Method::GET, &format!("/customapps/{app_id}/events"), &[], None)
            .await
    }

    /// Retrieve usage statistics for a custom app. The shape is
    /// app-specific, so the value is returned undecoded.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_custom_app_stats(&self, app_id: &str) -> Result<Value> {
        self.dispatcher
            .request(Method::GET, &format!("/customapps/{app_id}/stats"), &[], None)
            .await
    }
}
