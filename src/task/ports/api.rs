//! Ports for task operations and file transfer.

use crate::error::{ApiError, ApiResult};
use crate::task::domain::{
    DownloadedFile, FileId, FileUpload, NewTask, Task, TaskId, TaskUpdate, TimerAction,
};
use async_trait::async_trait;

/// Task operations offered by the remote workflow service.
///
/// Every call is authenticated as the current user; the server decides what
/// that user may see and change.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Lists every task visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails or a record is malformed.
    async fn list_tasks(&self) -> ApiResult<Vec<Task>>;

    /// Creates a task and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the caller may not create the
    /// task, or another [`ApiError`] when the request fails.
    async fn create_task(&self, task: &NewTask) -> ApiResult<Task>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the server rejects the update.
    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> ApiResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] or [`ApiError::NotFound`] when the
    /// server refuses.
    async fn delete_task(&self, id: &TaskId) -> ApiResult<()>;

    /// Starts or pauses the task timer.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the server rejects the toggle.
    async fn toggle_timer(&self, id: &TaskId, action: TimerAction) -> ApiResult<()>;

    /// Uploads completed work for a task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the upload fails.
    async fn upload_task_file(&self, id: &TaskId, file: FileUpload) -> ApiResult<()>;

    /// Fetches the current server state of one task.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the task is not visible to the
    /// caller.
    async fn find_task(&self, id: &TaskId) -> ApiResult<Task> {
        self.list_tasks()
            .await?
            .into_iter()
            .find(|task| task.id() == id)
            .ok_or_else(|| ApiError::NotFound(format!("task {id}")))
    }
}

/// Access to stored files.
#[async_trait]
pub trait FileApi: Send + Sync {
    /// Downloads a file as an attachment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the file cannot be fetched.
    async fn download_file(&self, file_id: &FileId) -> ApiResult<DownloadedFile>;

    /// Fetches a file for inline preview.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the file cannot be fetched.
    async fn preview_file(&self, file_id: &FileId) -> ApiResult<DownloadedFile>;
}
