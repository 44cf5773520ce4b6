//! Proof metadata records and listing query

use serde::{Deserialize, Serialize};

/// Metadata of one proof item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofMetadata {
    /// Proof ID.
    pub id: String,
    /// Original file name.
    #[serde(default)]
    pub filename: Option<String>,
    /// User ID of the uploader.
    #[serde(default)]
    pub created_by: Option<String>,
    /// Upload timestamp (ISO 8601).
    #[serde(default)]
    pub uploaded_on: Option<String>,
    /// Object type the proof is attached to (`control`, `label`, ...).
    #[serde(default)]
    pub object_type: Option<String>,
    /// Object ID the proof is attached to.
    #[serde(default)]
    pub object_id: Option<String>,
    /// Latest version number.
    #[serde(default)]
    pub version: Option<u32>,
}

/// Query for the paginated proof metadata collection.
#[derive(Debug, Clone)]
pub struct ProofQuery {
    /// Page size per request.
    pub limit: u32,
    /// Sort field.
    pub sort_by: String,
    /// Sort direction (`asc` or `desc`).
    pub sort_direction: String,
    /// Restrict to proof attached to this object type.
    pub object_type: Option<String>,
    /// Restrict to proof attached to this object ID.
    pub object_id: Option<String>,
}

impl Default for ProofQuery {
    fn default() -> Self {
        Self {
            limit: 500,
            sort_by: "uploadedOn".to_owned(),
            sort_direction: "desc".to_owned(),
            object_type: None,
            object_id: None,
        }
    }
}

impl ProofQuery {
    /// Restrict the query to proof attached to one object.
    #[must_use]
    pub fn with_object(mut self, object_type: impl Into<String>, object_id: impl Into<String>) -> Self {
        self.object_type = Some(object_type.into());
        self.object_id = Some(object_id.into());
        self
    }

    /// Override the sort field.
    #[must_use]
    pub fn with_sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self
    }

    /// Query parameters for the listing endpoint. The continuation token is
    /// appended by the dispatcher while paging.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("sortBy", self.sort_by.clone()),
            ("sortDirection", self.sort_direction.clone()),
        ];
        if let Some(object_type) = &self.object_type {
            pairs.push(("objectType", object_type.clone()));
        }
        if let Some(object_id) = &self.object_id {
            pairs.push(("objectId", object_id.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_sorts_by_upload_time() {
        let pairs = ProofQuery::default().query_pairs();

        assert!(pairs.contains(&("limit", "500".to_owned())));
        assert!(pairs.contains(&("sortBy", "uploadedOn".to_owned())));
        assert!(pairs.contains(&("sortDirection", "desc".to_owned())));
        assert!(!pairs.iter().any(|(name, _)| *name == "objectType"));
    }

    #[test]
    fn object_scope_adds_both_params() {
        let pairs = ProofQuery::default().with_object("label", "l-1").query_pairs();

        assert!(pairs.contains(&("objectType", "label".to_owned())));
        assert!(pairs.contains(&("objectId", "l-1".to_owned())));
    }
}
