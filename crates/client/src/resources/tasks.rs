//! Tasks accessor
//!
//! Tasks have no organization-wide listing endpoint; reads go through the
//! server-side filter. The comment methods operate on a task's activity
//! feed.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use hyperproof_core::TaskReader;
use hyperproof_domain::{
    CommentPatch, NewComment, NewTask, ProofMetadata, Result, Task, TaskComment, TaskFilter,
    TaskPatch, TaskProofOptions,
};

use crate::http::dispatcher::to_body;
use crate::http::Dispatcher;

/// Access to the `/tasks` endpoints.
#[derive(Clone)]
pub struct TasksApi {
    dispatcher: Arc<Dispatcher>,
}

impl TasksApi {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Add a new task to the organization.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn add_task(&self, task: &NewTask) -> Result<Task> {
        let body = to_body(task)?;
        self.dispatcher.request(Method::POST, "/tasks", &[], Some(&body)).await
    }

    /// Retrieve a task by its unique ID.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_task_by_id(&self, task_id: &str) -> Result<Task> {
        self.dispatcher.request(Method::GET, &format!("/tasks/{task_id}"), &[], None).await
    }

    /// Raw-mode variant of [`Self::get_task_by_id`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_task_by_id_raw(&self, task_id: &str) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, &format!("/tasks/{task_id}"), &[], None).await
    }

    /// Update an existing task; only the fields set on `patch` are sent.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task> {
        let body = patch.to_body();
        self.dispatcher.request(Method::PATCH, &format!("/tasks/{task_id}"), &[], Some(&body)).await
    }

    /// Retrieve the tasks matching a server-side filter.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn filter_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let body = filter.to_body();
        self.dispatcher.request(Method::PUT, "/tasks/filter", &[], Some(&body)).await
    }

    /// Upload a proof file on a task, with optional source metadata.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the file cannot be read; otherwise dispatch
    /// errors.
    pub async fn add_task_proof(
        &self,
        task_id: &str,
        file_path: &Path,
        options: &TaskProofOptions,
    ) -> Result<ProofMetadata> {
        self.dispatcher
            .upload(&format!("/tasks/{task_id}/proof"), "proof", file_path, &options.form_fields())
            .await
    }

    /// Retrieve the proof metadata attached to a task.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_task_proof_metadata(&self, task_id: &str) -> Result<Vec<ProofMetadata>> {
        self.dispatcher.request(Method::GET, &format!("/tasks/{task_id}/proof"), &[], None).await
    }

    /// Retrieve the comments in a task's activity feed.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_task_comments(&self, task_id: &str) -> Result<Vec<TaskComment>> {
        self.dispatcher.request(Method::GET, &format!("/tasks/{task_id}/comments"), &[], None).await
    }

    /// Raw-mode variant of [`Self::get_task_comments`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_task_comments_raw(&self, task_id: &str) -> Result<String> {
        self.dispatcher
            .request_raw(Method::GET, &format!("/tasks/{task_id}/comments"), &[], None)
            .await
    }

    /// Add a comment to a task's activity feed.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn add_task_comment(
        &self,
        task_id: &str,
        comment: &NewComment,
    ) -> Result<TaskComment> {
        let body = to_body(comment)?;
        self.dispatcher
            .request(Method::POST, &format!("/tasks/{task_id}/comments"), &[], Some(&body))
            .await
    }

    /// Update an existing comment in a task's activity feed.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn update_task_comment(
        &self,
        task_id: &str,
        comment_id: &str,
        patch: &CommentPatch,
    ) -> Result<TaskComment> {
        let body = patch.to_body();
        self.dispatcher
            .request(
                Method::PATCH,
                &format!("/tasks/{task_id}/comments/{comment_id}"),
                &[],
                Some(&body),
            )
            .await
    }

    /// Delete a comment from a task's activity feed.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn delete_task_comment(&self, task_id: &str, comment_id: &str) -> Result<()> {
        self.dispatcher
            .request(
                Method::DELETE,
                &format!("/tasks/{task_id}/comments/{comment_id}"),
                &[],
                None,
            )
            .await
    }
}

#[async_trait]
impl TaskReader for TasksApi {
    async fn filter_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        Self::filter_tasks(self, filter).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::http::dispatcher::tests::test_dispatcher;

    use super::*;

    #[tokio::test]
    async fn filter_puts_only_populated_criteria() {
        let server = MockServer::start().await;
        let api = TasksApi::new(Arc::new(test_dispatcher(&server).await));

        Mock::given(method("PUT"))
            .and(path("/tasks/filter"))
            .and(body_json(serde_json::json!({"assigneeIds": ["u1"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "t-1", "title": "Collect evidence", "assigneeId": "u1"},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let filter = TaskFilter::default().with_assignee("u1");
        let tasks = api.filter_tasks(&filter).await.expect("tasks");
        assert_eq!(tasks[0].id, "t-1");
    }

    #[tokio::test]
    async fn comment_round_trip_hits_the_feed_endpoints() {
        let server = MockServer::start().await;
        let api = TasksApi::new(Arc::new(test_dispatcher(&server).await));

        Mock::given(method("POST"))
            .and(path("/tasks/t-1/comments"))
            .and(body_json(serde_json::json!({
                "commentTextFormatted": "Looks good",
                "isInternalComment": true,
                "objectType": "task",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!(
                {"id": "cm-1", "commentTextFormatted": "Looks good"}
            )))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/tasks/t-1/comments/cm-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let comment = NewComment::new("Looks good").internal();
        let created = api.add_task_comment("t-1", &comment).await.expect("comment");
        assert_eq!(created.id, "cm-1");

        api.delete_task_comment("t-1", "cm-1").await.expect("deleted");
    }

    #[tokio::test]
    async fn proof_upload_carries_source_metadata_fields() {
        let server = MockServer::start().await;
        let api = TasksApi::new(Arc::new(test_dispatcher(&server).await));

        Mock::given(method("POST"))
            .and(path("/tasks/t-1/proof"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
                {"id": "p-1"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().expect("tempdir");
        let file_path = dir.path().join("screenshot.png");
        std::fs::write(&file_path, b"png bytes").expect("write");

        let options = TaskProofOptions::default().with_source("System A").with_live_sync(true);
        api.add_task_proof("t-1", &file_path, &options).await.expect("uploaded");

        let requests = server.received_requests().await.expect("requests");
        let upload = requests
            .iter()
            .find(|r| r.url.path() == "/tasks/t-1/proof")
            .expect("upload request");
        let body = String::from_utf8_lossy(&upload.body);
        assert!(body.contains("hp-proof-source"));
        assert!(body.contains("hp-proof-live-sync-enabled"));
        assert!(body.contains("screenshot.png"));
    }
}
