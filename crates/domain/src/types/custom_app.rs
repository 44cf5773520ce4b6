//! Custom app records and payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A custom app installed in the organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomApp {
    /// App ID.
    pub id: String,
    /// App name.
    #[serde(default)]
    pub name: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// App type.
    #[serde(default)]
    pub app_type: Option<String>,
    /// Installed version.
    #[serde(default)]
    pub version: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Option<String>,
}

/// An event emitted by a custom app.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAppEvent {
    /// Event ID, when assigned.
    #[serde(default)]
    pub id: Option<String>,
    /// Event instant (ISO 8601).
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Severity level.
    #[serde(default)]
    pub level: Option<String>,
    /// Event message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload for registering a custom app.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomApp {
    /// App name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// App type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_type: Option<String>,
}

impl NewCustomApp {
    /// Create an app payload.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), description: None, app_type: None }
    }

    /// Set a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the app type.
    #[must_use]
    pub fn with_app_type(mut self, app_type: impl Into<String>) -> Self {
        self.app_type = Some(app_type.into());
        self
    }
}

/// Partial update for a custom app; unset fields are omitted from the body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAppPatch {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CustomAppPatch {
    /// Set a new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a new lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Request body containing only the set fields.
    #[must_use]
    pub fn to_body(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
    }
}
