//! Risk records, filters and payloads
//!
//! Risk updates support null-out semantics: a handful of fields can be
//! cleared on the server by sending an explicit JSON `null`. The patch type
//! models that with `clear_*` flags instead of overloading `None`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A risk in a risk register.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    /// Risk ID.
    pub id: String,
    /// Human-assigned risk identifier.
    #[serde(default)]
    pub risk_identifier: Option<String>,
    /// Risk name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category.
    #[serde(default)]
    pub category: Option<String>,
    /// Response strategy (`mitigate`, `accept`, ...).
    #[serde(default)]
    pub response: Option<String>,
    /// Likelihood level.
    #[serde(default)]
    pub likelihood_level: Option<i32>,
    /// Rationale for the likelihood level.
    #[serde(default)]
    pub likelihood_rationale: Option<String>,
    /// Impact level.
    #[serde(default)]
    pub impact_level: Option<i32>,
    /// Rationale for the impact level.
    #[serde(default)]
    pub impact_rationale: Option<String>,
    /// Tolerance level.
    #[serde(default)]
    pub tolerance_level: Option<i32>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: Option<String>,
    /// Owner user ID.
    #[serde(default)]
    pub owner_id: Option<String>,
    /// Custom field values.
    #[serde(default)]
    pub custom_fields: Vec<Value>,
}

/// Optional filters for listing risks.
#[derive(Debug, Clone, Default)]
pub struct RiskFilter {
    /// Restrict to one risk register.
    pub risk_register_id: Option<String>,
    /// Filter by risk status.
    pub status: Option<String>,
}

impl RiskFilter {
    /// Restrict to one risk register.
    #[must_use]
    pub fn with_risk_register_id(mut self, id: impl Into<String>) -> Self {
        self.risk_register_id = Some(id.into());
        self
    }

    /// Filter by risk status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Query parameters for the listing endpoint; unset filters are omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(register) = &self.risk_register_id {
            pairs.push(("riskRegisterId", register.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        pairs
    }
}

/// Server-side risk selection used by the filter endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSelection {
    /// Risk IDs to select; an empty list selects by the other criteria.
    pub risk_ids: Vec<String>,
    /// Only risks modified after this instant (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_after: Option<String>,
    /// Filter by risk status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RiskSelection {
    /// Select by risk IDs.
    #[must_use]
    pub fn with_risk_ids(mut self, risk_ids: Vec<String>) -> Self {
        self.risk_ids = risk_ids;
        self
    }

    /// Only risks modified after this instant.
    #[must_use]
    pub fn with_modified_after(mut self, modified_after: impl Into<String>) -> Self {
        self.modified_after = Some(modified_after.into());
        self
    }

    /// Filter by status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Request body for the filter endpoint.
    #[must_use]
    pub fn to_body(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
    }
}

/// Payload for creating a risk.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRisk {
    /// Risk register the risk belongs to.
    pub risk_register_id: String,
    /// Human-assigned risk identifier.
    pub risk_identifier: String,
    /// Risk name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Category.
    pub category: String,
    /// Response strategy.
    pub response: String,
    /// Likelihood level.
    pub likelihood_level: i32,
    /// Rationale for the likelihood level.
    pub likelihood_rationale: String,
    /// Impact level.
    pub impact_level: i32,
    /// Rationale for the impact level.
    pub impact_rationale: String,
    /// Tolerance level.
    pub tolerance_level: i32,
    /// Owner user ID.
    pub owner_id: String,
    /// Custom field values.
    pub custom_fields: Vec<Value>,
}

/// Partial update for a risk.
///
/// Unset fields are omitted from the body; `clear_*` flags serialize the
/// corresponding field as `null` so the server clears it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPatch {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New response strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// New likelihood level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likelihood_level: Option<i32>,
    /// New likelihood rationale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likelihood_rationale: Option<String>,
    /// New impact level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_level: Option<i32>,
    /// New impact rationale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_rationale: Option<String>,
    /// New tolerance level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance_level: Option<i32>,
    /// New lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New owner user ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// New custom field values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<Value>>,
    /// Clear the category field.
    #[serde(skip)]
    pub clear_category: bool,
    /// Clear the likelihood level field.
    #[serde(skip)]
    pub clear_likelihood_level: bool,
    /// Clear the impact level field.
    #[serde(skip)]
    pub clear_impact_level: bool,
    /// Clear the tolerance level field.
    #[serde(skip)]
    pub clear_tolerance_level: bool,
}

impl RiskPatch {
    /// Set a new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a new response strategy.
    #[must_use]
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Set a new likelihood level.
    #[must_use]
    pub const fn with_likelihood_level(mut self, level: i32) -> Self {
        self.likelihood_level = Some(level);
        self
    }

    /// Set a new lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set a new owner.
    #[must_use]
    pub fn with_owner_id(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Clear the category field on the server.
    #[must_use]
    pub const fn clear_category(mut self) -> Self {
        self.clear_category = true;
        self
    }

    /// Clear the likelihood level field on the server.
    #[must_use]
    pub const fn clear_likelihood_level(mut self) -> Self {
        self.clear_likelihood_level = true;
        self
    }

    /// Clear the impact level field on the server.
    #[must_use]
    pub const fn clear_impact_level(mut self) -> Self {
        self.clear_impact_level = true;
        self
    }

    /// Clear the tolerance level field on the server.
    #[must_use]
    pub const fn clear_tolerance_level(mut self) -> Self {
        self.clear_tolerance_level = true;
        self
    }

    /// Request body: set fields, plus explicit nulls for cleared fields.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut body =
            serde_json::to_value(self).unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        if let Value::Object(map) = &mut body {
            if self.clear_category {
                map.insert("category".to_owned(), Value::Null);
            }
            if self.clear_likelihood_level {
                map.insert("likelihoodLevel".to_owned(), Value::Null);
            }
            if self.clear_impact_level {
                map.insert("impactLevel".to_owned(), Value::Null);
            }
            if self.clear_tolerance_level {
                map.insert("toleranceLevel".to_owned(), Value::Null);
            }
        }
        body
    }
}
