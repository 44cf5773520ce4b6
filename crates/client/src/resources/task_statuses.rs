//! Task statuses accessor

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use hyperproof_core::TaskStatusReader;
use hyperproof_domain::{Result, TaskStatus};

use crate::http::Dispatcher;

/// Access to the `/taskstatuses` endpoint.
#[derive(Clone)]
pub struct TaskStatusesApi {
    dispatcher: Arc<Dispatcher>,
}

impl TaskStatusesApi {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve the task status values configured for the organization.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_task_statuses(&self) -> Result<Vec<TaskStatus>> {
        self.dispatcher.request(Method::GET, "/taskstatuses", &[], None).await
    }

    /// Raw-mode variant of [`Self::get_task_statuses`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_task_statuses_raw(&self) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, "/taskstatuses", &[], None).await
    }
}

#[async_trait]
impl TaskStatusReader for TaskStatusesApi {
    async fn task_statuses(&self) -> Result<Vec<TaskStatus>> {
        self.get_task_statuses().await
    }
}
