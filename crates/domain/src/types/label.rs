//! Label records, filters and payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A label in the organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Label ID.
    pub id: String,
    /// Label name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// User ID of the creator.
    #[serde(default)]
    pub created_by: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Summary projection of a label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSummary {
    /// Label ID.
    pub id: String,
    /// Label name.
    pub name: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Optional filters for listing labels.
#[derive(Debug, Clone, Default)]
pub struct LabelFilter {
    /// Filter by link permission.
    pub can_link: Option<bool>,
    /// Filter by label status.
    pub status: Option<String>,
}

impl LabelFilter {
    /// Filter by link permission.
    #[must_use]
    pub const fn with_can_link(mut self, can_link: bool) -> Self {
        self.can_link = Some(can_link);
        self
    }

    /// Filter by label status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Query parameters for the listing endpoints; unset filters are omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(can_link) = self.can_link {
            pairs.push(("canLink", can_link.to_string()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        pairs
    }
}

/// Payload for creating a label.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLabel {
    /// Label name.
    pub name: String,
    /// Description.
    pub description: String,
}

impl NewLabel {
    /// Create a label payload.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into() }
    }
}

/// Partial update for a label; unset fields are omitted from the body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPatch {
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

impl LabelPatch {
    /// Set a new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_body_omits_unset_fields() {
        let body = LabelPatch::default().with_description("updated").to_body();
        let object = body.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert_eq!(object["description"], "updated");
    }

    #[test]
    fn filter_pairs_cover_both_params() {
        let pairs = LabelFilter::default().with_can_link(false).with_status("active").query_pairs();

        assert_eq!(
            pairs,
            vec![("canLink", "false".to_owned()), ("status", "active".to_owned())]
        );
    }
}
