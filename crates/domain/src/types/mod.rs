//! Resource record types, listing filters and update payloads
//!
//! Field names follow the wire format (camelCase). Unknown fields are
//! ignored on deserialization so new API fields do not break decoding.

use serde::Deserialize;

pub mod control;
pub mod custom_app;
pub mod label;
pub mod program;
pub mod proof;
pub mod risk;
pub mod role;
pub mod task;
pub mod user;

pub use control::{Control, ControlFilter, ControlPatch, ControlSummary, NewControl, Owner};
pub use custom_app::{CustomApp, CustomAppEvent, CustomAppPatch, NewCustomApp};
pub use label::{Label, LabelFilter, LabelPatch, LabelSummary, NewLabel};
pub use program::{NewProgram, Program, ProgramPatch};
pub use proof::{ProofMetadata, ProofQuery};
pub use risk::{NewRisk, Risk, RiskFilter, RiskPatch, RiskSelection};
pub use role::Role;
pub use task::{
    CommentPatch, NewComment, NewTask, TargetObject, Task, TaskComment, TaskFilter, TaskPatch,
    TaskProofOptions, TaskStatus,
};
pub use user::{CurrentUser, OrgUser, UserQuery};

/// One page of a paginated collection response.
///
/// The proof endpoints return `{ "data": [...], "continuationToken": "..." }`;
/// a missing token means the last page has been reached.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Records in this page.
    #[serde(default)]
    pub data: Vec<T>,
    /// Opaque token for the next page, when more data exists.
    #[serde(default)]
    pub continuation_token: Option<String>,
}
