//! Task records, statuses, comments, filters and payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A task assigned to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task ID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Assignee user ID.
    #[serde(default)]
    pub assignee_id: Option<String>,
    /// Target object ID.
    #[serde(default)]
    pub target_id: Option<String>,
    /// Target object type.
    #[serde(default)]
    pub target_type: Option<String>,
    /// Task status ID.
    #[serde(default)]
    pub task_status_id: Option<String>,
    /// Priority (`highest` ... `lowest`).
    #[serde(default)]
    pub priority: Option<String>,
    /// Sort order within the status column.
    #[serde(default)]
    pub sort_order: Option<i64>,
    /// Due date (ISO 8601).
    #[serde(default)]
    pub due_date: Option<String>,
    /// Whether the task is driven by an integration.
    #[serde(default)]
    pub has_integration: Option<bool>,
}

/// A task status value configured for the organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    /// Status ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Built-in status kind, when reported.
    #[serde(default)]
    pub status_type: Option<String>,
}

/// Object a task is attached to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetObject {
    /// Object ID.
    pub object_id: String,
    /// Object type.
    pub object_type: String,
}

/// Payload for creating a task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Title.
    pub title: String,
    /// Object the task is attached to.
    pub target_object: TargetObject,
    /// Description.
    pub description: String,
    /// Assignee user ID.
    pub assignee_id: String,
    /// Priority (`highest`, `high`, `medium`, `low`, `lowest`).
    pub priority: String,
    /// Due date (ISO 8601).
    pub due_date: String,
    /// Whether the task is driven by an integration.
    pub has_integration: bool,
}

impl NewTask {
    /// Create a task payload.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        target_object: TargetObject,
        description: impl Into<String>,
        assignee_id: impl Into<String>,
        priority: impl Into<String>,
        due_date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            target_object,
            description: description.into(),
            assignee_id: assignee_id.into(),
            priority: priority.into(),
            due_date: due_date.into(),
            has_integration: false,
        }
    }

    /// Mark the task as integration-driven.
    #[must_use]
    pub const fn with_integration(mut self, has_integration: bool) -> Self {
        self.has_integration = has_integration;
        self
    }
}

/// Partial update for a task; unset fields are omitted from the body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New assignee user ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// New target object ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    /// New target object type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    /// New task status ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_status_id: Option<String>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// New sort order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    /// New due date (ISO 8601).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl TaskPatch {
    /// Set a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Reassign the task.
    #[must_use]
    pub fn with_assignee_id(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }

    /// Move the task to a status.
    #[must_use]
    pub fn with_task_status_id(mut self, task_status_id: impl Into<String>) -> Self {
        self.task_status_id = Some(task_status_id.into());
        self
    }

    /// Set a new due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Request body containing only the set fields.
    #[must_use]
    pub fn to_body(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
    }
}

/// Server-side task selection used by the filter endpoint.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Filter by target object type.
    pub target_object_type: Option<String>,
    /// Filter by target object IDs.
    pub target_object_ids: Vec<String>,
    /// Filter by task IDs.
    pub task_ids: Vec<String>,
    /// Filter by assignee user IDs.
    pub assignee_ids: Vec<String>,
    /// Filter by task status ID.
    pub task_status_id: Option<String>,
    /// Only tasks modified after this instant (ISO 8601).
    pub modified_after: Option<String>,
}

impl TaskFilter {
    /// Filter by target object type.
    #[must_use]
    pub fn with_target_object_type(mut self, object_type: impl Into<String>) -> Self {
        self.target_object_type = Some(object_type.into());
        self
    }

    /// Add one assignee to the filter.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_ids.push(assignee_id.into());
        self
    }

    /// Filter by task IDs.
    #[must_use]
    pub fn with_task_ids(mut self, task_ids: Vec<String>) -> Self {
        self.task_ids = task_ids;
        self
    }

    /// Filter by task status ID.
    #[must_use]
    pub fn with_task_status_id(mut self, task_status_id: impl Into<String>) -> Self {
        self.task_status_id = Some(task_status_id.into());
        self
    }

    /// Only tasks modified after this instant.
    #[must_use]
    pub fn with_modified_after(mut self, modified_after: impl Into<String>) -> Self {
        self.modified_after = Some(modified_after.into());
        self
    }

    /// Request body for the filter endpoint; empty criteria are omitted.
    #[must_use]
    pub fn to_body(&self) -> Value {
        let mut map = serde_json::Map::new();
        if let Some(object_type) = &self.target_object_type {
            map.insert("targetObjectType".to_owned(), Value::from(object_type.clone()));
        }
        if !self.target_object_ids.is_empty() {
            map.insert("targetObjectIds".to_owned(), Value::from(self.target_object_ids.clone()));
        }
        if !self.task_ids.is_empty() {
            map.insert("taskIds".to_owned(), Value::from(self.task_ids.clone()));
        }
        if !self.assignee_ids.is_empty() {
            map.insert("assigneeIds".to_owned(), Value::from(self.assignee_ids.clone()));
        }
        if let Some(status) = &self.task_status_id {
            map.insert("taskStatusId".to_owned(), Value::from(status.clone()));
        }
        if let Some(modified) = &self.modified_after {
            map.insert("modifiedAfter".to_owned(), Value::from(modified.clone()));
        }
        Value::Object(map)
    }
}

/// Metadata accompanying a task proof upload.
#[derive(Debug, Clone, Default)]
pub struct TaskProofOptions {
    /// User ID owning the proof.
    pub owned_by: Option<String>,
    /// Source system of the proof.
    pub source: Option<String>,
    /// Source system ID.
    pub source_id: Option<String>,
    /// Source file ID.
    pub source_file_id: Option<String>,
    /// Source modification instant (ISO 8601).
    pub source_modified_on: Option<String>,
    /// Whether live sync is enabled for the proof.
    pub live_sync_enabled: bool,
}

impl TaskProofOptions {
    /// Set the proof owner.
    #[must_use]
    pub fn with_owned_by(mut self, owned_by: impl Into<String>) -> Self {
        self.owned_by = Some(owned_by.into());
        self
    }

    /// Name the source system.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Enable live sync for the proof.
    #[must_use]
    pub const fn with_live_sync(mut self, enabled: bool) -> Self {
        self.live_sync_enabled = enabled;
        self
    }

    /// Multipart form fields for the upload; unset options are omitted.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(owned_by) = &self.owned_by {
            fields.push(("hp-proof-owned-by", owned_by.clone()));
        }
        if let Some(source) = &self.source {
            fields.push(("hp-proof-source", source.clone()));
        }
        if let Some(source_id) = &self.source_id {
            fields.push(("hp-proof-source-id", source_id.clone()));
        }
        if let Some(file_id) = &self.source_file_id {
            fields.push(("hp-proof-source-file-id", file_id.clone()));
        }
        if let Some(modified) = &self.source_modified_on {
            fields.push(("hp-proof-source-modified-on", modified.clone()));
        }
        fields.push(("hp-proof-live-sync-enabled", self.live_sync_enabled.to_string()));
        fields
    }
}

/// A comment in a task's activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComment {
    /// Comment ID.
    pub id: String,
    /// Formatted comment text.
    #[serde(default)]
    pub comment_text_formatted: Option<String>,
    /// Whether the comment is internal.
    #[serde(default)]
    pub is_internal_comment: Option<bool>,
    /// User ID of the author.
    #[serde(default)]
    pub created_by: Option<String>,
    /// Creation instant (ISO 8601).
    #[serde(default)]
    pub created_on: Option<String>,
}

/// Payload for adding a comment to a task's activity feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    /// Formatted comment text.
    pub comment_text_formatted: String,
    /// Whether the comment is internal.
    pub is_internal_comment: bool,
    /// Object type the comment relates to; defaults to `task`.
    pub object_type: String,
    /// Related object ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

impl NewComment {
    /// Create a comment payload.
    #[must_use]
    pub fn new(comment_text_formatted: impl Into<String>) -> Self {
        Self {
            comment_text_formatted: comment_text_formatted.into(),
            is_internal_comment: false,
            object_type: "task".to_owned(),
            object_id: None,
        }
    }

    /// Mark the comment as internal.
    #[must_use]
    pub const fn internal(mut self) -> Self {
        self.is_internal_comment = true;
        self
    }

    /// Relate the comment to an object.
    #[must_use]
    pub fn with_object(mut self, object_type: impl Into<String>, object_id: impl Into<String>) -> Self {
        self.object_type = object_type.into();
        self.object_id = Some(object_id.into());
        self
    }
}

/// Partial update for a task comment.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPatch {
    /// New formatted comment text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_text_formatted: Option<String>,
    /// New internal flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_internal_comment: Option<bool>,
}

impl CommentPatch {
    /// Replace the comment text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.comment_text_formatted = Some(text.into());
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
    fn filter_body_omits_empty_criteria() {
        let body = TaskFilter::default().with_assignee("u1").to_body();
        let object = body.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert_eq!(object["assigneeIds"], serde_json::json!(["u1"]));
    }

    #[test]
    fn filter_body_carries_status_and_modified_after() {
        let body = TaskFilter::default()
            .with_task_status_id("s-1")
            .with_modified_after("2024-09-01T00:00:00Z")
            .to_body();

        assert_eq!(body["taskStatusId"], "s-1");
        assert_eq!(body["modifiedAfter"], "2024-09-01T00:00:00Z");
    }

    #[test]
    fn proof_options_always_carry_live_sync_flag() {
        let fields = TaskProofOptions::default().form_fields();

        assert_eq!(fields, vec![("hp-proof-live-sync-enabled", "false".to_owned())]);
    }

    #[test]
    fn proof_options_include_set_metadata() {
        let fields = TaskProofOptions::default()
            .with_owned_by("u1")
            .with_source("System A")
            .with_live_sync(true)
            .form_fields();

        assert!(fields.contains(&("hp-proof-owned-by", "u1".to_owned())));
        assert!(fields.contains(&("hp-proof-source", "System A".to_owned())));
        assert!(fields.contains(&("hp-proof-live-sync-enabled", "true".to_owned())));
    }

    #[test]
    fn new_comment_defaults_to_task_object() {
        let body = serde_json::to_value(NewComment::new("Looks good")).unwrap();

        assert_eq!(body["objectType"], "task");
        assert_eq!(body["isInternalComment"], false);
        assert!(body.get("objectId").is_none());
    }
}
