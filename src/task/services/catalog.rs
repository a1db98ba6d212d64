//! Task management screen operations.

use std::sync::Arc;

use super::{TaskServiceError, TaskServiceResult};
use crate::identity::{domain::User, ports::UserDirectory};
use crate::task::{
    domain::{Capabilities, NewTask, Task, TaskId, TaskUpdate},
    ports::TaskApi,
};

/// Lists, creates, edits and deletes tasks.
#[derive(Clone)]
pub struct TaskCatalogService<A, D>
where
    A: TaskApi,
    D: UserDirectory,
{
    api: Arc<A>,
    directory: Arc<D>,
}

impl<A, D> TaskCatalogService<A, D>
where
    A: TaskApi,
    D: UserDirectory,
{
    /// Creates a catalog service.
    #[must_use]
    pub const fn new(api: Arc<A>, directory: Arc<D>) -> Self {
        Self { api, directory }
    }

    /// Lists tasks visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Api`] when the request fails.
    pub async fn list(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.api.list_tasks().await?)
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Api`] when the task is missing or the
    /// request fails.
    pub async fn get(&self, id: &TaskId) -> TaskServiceResult<Task> {
        Ok(self.api.find_task(id).await?)
    }

    /// Validates and creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when local validation fails, or
    /// [`TaskServiceError::Api`] when the server rejects the task.
    pub async fn create(&self, task: &NewTask) -> TaskServiceResult<Task> {
        task.validate()?;
        let created = self.api.create_task(task).await?;
        tracing::info!(task_id = %created.id(), "task created");
        Ok(created)
    }

    /// Applies a partial update and returns the refetched task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::EmptyUpdate`] without sending anything
    /// when the update changes nothing.
    pub async fn update(&self, id: &TaskId, update: &TaskUpdate) -> TaskServiceResult<Task> {
        if update.is_empty() {
            return Err(TaskServiceError::EmptyUpdate);
        }
        self.api.update_task(id, update).await?;
        tracing::info!(task_id = %id, "task updated");
        Ok(self.api.find_task(id).await?)
    }

    /// Deletes a task the viewer may delete.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotPermitted`] without sending anything
    /// when the viewer lacks the delete capability.
    pub async fn delete(&self, viewer: &User, task: &Task) -> TaskServiceResult<()> {
        if !Capabilities::evaluate(viewer, task).delete_task {
            return Err(TaskServiceError::NotPermitted("delete this task"));
        }
        self.api.delete_task(task.id()).await.inspect_err(|err| {
            tracing::warn!(task_id = %task.id(), error = %err, "task deletion failed");
        })?;
        tracing::info!(task_id = %task.id(), "task deleted");
        Ok(())
    }

    /// Lists users that tasks may be assigned to.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Api`] when the directory cannot be read.
    pub async fn assignable_users(&self) -> TaskServiceResult<Vec<User>> {
        let users = self.directory.list_users().await?;
        Ok(users.into_iter().filter(User::is_active).collect())
    }
}
