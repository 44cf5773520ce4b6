//! Resource accessors
//!
//! One stateless accessor per resource family. Each holds a reference to
//! the session's shared [`crate::http::Dispatcher`] and translates method
//! calls into exactly one HTTP request (uploads included). Read endpoints
//! carry a `*_raw` twin returning the unparsed response body.

pub mod controls;
pub mod custom_apps;
pub mod labels;
pub mod programs;
pub mod proof;
pub mod risks;
pub mod roles;
pub mod task_statuses;
pub mod tasks;
pub mod users;

pub use controls::ControlsApi;
pub use custom_apps::CustomAppsApi;
pub use labels::LabelsApi;
pub use programs::ProgramsApi;
pub use proof::ProofApi;
pub use risks::RisksApi;
pub use roles::RolesApi;
pub use task_statuses::TaskStatusesApi;
pub use tasks::TasksApi;
pub use users::UsersApi;
