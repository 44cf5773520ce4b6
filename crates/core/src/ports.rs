//! Read-side accessor ports consumed by the correlated-query engine
//!
//! These traits abstract the resource accessors so the engine can be tested
//! with mock implementations. The client crate implements each of them on
//! the corresponding HTTP accessor.

use async_trait::async_trait;
use hyperproof_domain::{
    Control, Label, LabelSummary, OrgUser, ProofMetadata, ProofQuery, Result, Risk, Task,
    TaskFilter, TaskStatus,
};

/// Read access to the organization's user directory.
#[async_trait]
pub trait UserReader: Send + Sync {
    /// Fetch all active users in the organization.
    async fn organization_users(&self) -> Result<Vec<OrgUser>>;
}

/// Read access to controls.
#[async_trait]
pub trait ControlReader: Send + Sync {
    /// Fetch all controls in the organization.
    async fn controls(&self) -> Result<Vec<Control>>;
}

/// Read access to labels.
#[async_trait]
pub trait LabelReader: Send + Sync {
    /// Fetch all labels in the organization.
    async fn labels(&self) -> Result<Vec<Label>>;

    /// Fetch label summaries.
    async fn label_summaries(&self) -> Result<Vec<LabelSummary>>;
}

/// Read access to the proof metadata collection.
#[async_trait]
pub trait ProofReader: Send + Sync {
    /// Fetch proof metadata matching `query`, following pagination to the
    /// end of the collection.
    async fn proof_metadata(&self, query: &ProofQuery) -> Result<Vec<ProofMetadata>>;
}

/// Read access to risks.
#[async_trait]
pub trait RiskReader: Send + Sync {
    /// Fetch all risks in the organization.
    async fn risks(&self) -> Result<Vec<Risk>>;
}

/// Read access to tasks via the server-side filter endpoint.
#[async_trait]
pub trait TaskReader: Send + Sync {
    /// Fetch the tasks matching `filter`.
    async fn filter_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;
}

/// Read access to the organization's task status values.
#[async_trait]
pub trait TaskStatusReader: Send + Sync {
    /// Fetch the configured task statuses.
    async fn task_statuses(&self) -> Result<Vec<TaskStatus>>;
}
