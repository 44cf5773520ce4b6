//! Program records and payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A compliance program.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    /// Program ID.
    pub id: String,
    /// Program name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Work status (`defining`, `operating`, ...).
    #[serde(default)]
    pub work_status: Option<String>,
    /// Section root ID.
    #[serde(default)]
    pub section_root_id: Option<String>,
    /// Primary contact user ID.
    #[serde(default)]
    pub primary_contact_id: Option<String>,
    /// Computed health indicator.
    #[serde(default)]
    pub health: Option<String>,
}

/// Payload for creating a program.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgram {
    /// Program name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Section root ID.
    pub section_root_id: String,
    /// Primary contact user ID.
    pub primary_contact_id: String,
    /// Work status; defaults to `defining`.
    pub work_status: String,
    /// Template the program is created from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_template_id: Option<String>,
    /// Selected baselines.
    pub selected_baselines: Vec<String>,
    /// Jumpstart program IDs.
    pub jumpstart_program_ids: Vec<String>,
    /// Name of a program to clone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_program_name: Option<String>,
    /// Framework license notice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework_license_notice: Option<String>,
}

impl NewProgram {
    /// Create a program payload with the default work status.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        section_root_id: impl Into<String>,
        primary_contact_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            section_root_id: section_root_id.into(),
            primary_contact_id: primary_contact_id.into(),
            work_status: "defining".to_owned(),
            source_template_id: None,
            selected_baselines: Vec::new(),
            jumpstart_program_ids: Vec::new(),
            clone_program_name: None,
            framework_license_notice: None,
        }
    }

    /// Override the work status.
    #[must_use]
    pub fn with_work_status(mut self, work_status: impl Into<String>) -> Self {
        self.work_status = work_status.into();
        self
    }

    /// Create the program from a template.
    #[must_use]
    pub fn with_source_template_id(mut self, template_id: impl Into<String>) -> Self {
        self.source_template_id = Some(template_id.into());
        self
    }

    /// Select baselines for the program.
    #[must_use]
    pub fn with_selected_baselines(mut self, baselines: Vec<String>) -> Self {
        self.selected_baselines = baselines;
        self
    }
}

/// Partial update for a program; unset fields are omitted from the body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramPatch {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New work status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_status: Option<String>,
    /// Whether to override computed health.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_health: Option<bool>,
    /// Health value to report while overridden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_health_health: Option<String>,
    /// User ID overriding health.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_health_by: Option<String>,
    /// Reason for the override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_health_reason: Option<String>,
    /// New baseline selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_baselines: Option<Vec<String>>,
    /// Whether baselines are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_enabled: Option<bool>,
    /// Framework version mapping ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework_version_mapping_id: Option<String>,
    /// Requirement IDs removed by a framework update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_requirement_ids: Option<Vec<String>>,
    /// Requirement IDs updated by a framework update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_requirement_ids: Option<Vec<String>>,
    /// Name of a program to clone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_program_name: Option<String>,
    /// Whether a framework update is complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_update_complete: Option<bool>,
}

impl ProgramPatch {
    /// Set a new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a new work status.
    #[must_use]
    pub fn with_work_status(mut self, work_status: impl Into<String>) -> Self {
        self.work_status = Some(work_status.into());
        self
    }

    /// Override the computed health indicator.
    #[must_use]
    pub fn with_health_override(
        mut self,
        health: impl Into<String>,
        by: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.override_health = Some(true);
        self.override_health_health = Some(health.into());
        self.override_health_by = Some(by.into());
        self.override_health_reason = Some(reason.into());
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
    fn new_program_defaults_to_defining() {
        let body = serde_json::to_value(NewProgram::new("SOC 2", "desc", "root-1", "u1")).unwrap();

        assert_eq!(body["workStatus"], "defining");
        assert_eq!(body["selectedBaselines"], serde_json::json!([]));
        assert!(body.get("sourceTemplateId").is_none());
    }

    #[test]
    fn health_override_sets_all_four_fields() {
        let body = ProgramPatch::default()
            .with_health_override("critical", "u1", "audit finding")
            .to_body();
        let object = body.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(object["overrideHealth"], true);
        assert_eq!(object["overrideHealthHealth"], "critical");
        assert_eq!(object["overrideHealthBy"], "u1");
        assert_eq!(object["overrideHealthReason"], "audit finding");
    }
}
