//! Control records, filters and payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Owner reference embedded in a control record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// User ID of the owner.
    pub id: String,
}

/// A control in the organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    /// Control ID.
    pub id: String,
    /// Human-assigned control identifier (e.g. `AC-2`).
    #[serde(default)]
    pub control_identifier: Option<String>,
    /// Control name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Domain the control falls under.
    #[serde(default)]
    pub domain_name: Option<String>,
    /// Implementation status.
    #[serde(default)]
    pub implementation: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Option<String>,
    /// Owner of the control.
    #[serde(default)]
    pub owner: Option<Owner>,
}

/// Summary projection of a control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSummary {
    /// Control ID.
    pub id: String,
    /// Human-assigned control identifier.
    #[serde(default)]
    pub control_identifier: Option<String>,
    /// Control name.
    pub name: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Option<String>,
}

/// Optional filters for listing controls.
#[derive(Debug, Clone, Default)]
pub struct ControlFilter {
    /// Filter by link permission.
    pub can_link: Option<bool>,
    /// Expand scopes in the response.
    pub expand_scopes: Option<bool>,
    /// Expand teams in the response.
    pub expand_teams: Option<bool>,
    /// Filter by control status.
    pub status: Option<String>,
}

impl ControlFilter {
    /// Filter by link permission.
    #[must_use]
    pub const fn with_can_link(mut self, can_link: bool) -> Self {
        self.can_link = Some(can_link);
        self
    }

    /// Filter by control status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Query parameters for the listing endpoint; unset filters are omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(can_link) = self.can_link {
            pairs.push(("canLink", can_link.to_string()));
        }
        if let Some(expand) = self.expand_scopes {
            pairs.push(("expandScopes", expand.to_string()));
        }
        if let Some(expand) = self.expand_teams {
            pairs.push(("expandTeams", expand.to_string()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        pairs
    }
}

/// Payload for creating a control.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewControl {
    /// Human-assigned control identifier.
    pub control_identifier: String,
    /// Control name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Domain the control falls under.
    pub domain_name: String,
    /// Implementation status; defaults to `inProgress`.
    pub implementation: String,
    /// Owner of the control.
    pub owner: Owner,
}

impl NewControl {
    /// Create a control payload with the default implementation status.
    #[must_use]
    pub fn new(
        control_identifier: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        domain_name: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            control_identifier: control_identifier.into(),
            name: name.into(),
            description: description.into(),
            domain_name: domain_name.into(),
            implementation: "inProgress".to_owned(),
            owner: Owner { id: owner_id.into() },
        }
    }

    /// Override the implementation status.
    #[must_use]
    pub fn with_implementation(mut self, implementation: impl Into<String>) -> Self {
        self.implementation = implementation.into();
        self
    }
}

/// Partial update for a control; unset fields are omitted from the body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPatch {
    /// New control identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_identifier: Option<String>,
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    /// New implementation status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
    /// New lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ControlPatch {
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

    /// Set a new implementation status.
    #[must_use]
    pub fn with_implementation(mut self, implementation: impl Into<String>) -> Self {
        self.implementation = Some(implementation.into());
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
    fn filter_omits_unset_params() {
        let filter = ControlFilter::default().with_status("active");
        assert_eq!(filter.query_pairs(), vec![("status", "active".to_owned())]);
    }

    #[test]
    fn filter_serializes_booleans() {
        let filter = ControlFilter::default().with_can_link(true);
        assert_eq!(filter.query_pairs(), vec![("canLink", "true".to_owned())]);
    }

    #[test]
    fn new_control_defaults_to_in_progress() {
        let control = NewControl::new("AC-2", "Account Management", "desc", "Access Control", "u1");
        let body = serde_json::to_value(&control).unwrap();

        assert_eq!(body["implementation"], "inProgress");
        assert_eq!(body["controlIdentifier"], "AC-2");
        assert_eq!(body["owner"]["id"], "u1");
    }

    #[test]
    fn patch_body_contains_only_set_fields() {
        let body = ControlPatch::default().with_name("Renamed").to_body();
        let object = body.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert_eq!(object["name"], "Renamed");
    }
}
