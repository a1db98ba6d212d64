//! Submitting rework requests.

use mockable::Clock;
use std::sync::Arc;

use super::TaskServiceResult;
use crate::task::{
    domain::{ReworkForm, Task},
    ports::TaskApi,
};

/// Sends completed tasks back for rework.
#[derive(Clone)]
pub struct ReworkService<A, C>
where
    A: TaskApi,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    clock: Arc<C>,
}

impl<A, C> ReworkService<A, C>
where
    A: TaskApi,
    C: Clock + Send + Sync,
{
    /// Creates a rework service.
    #[must_use]
    pub const fn new(api: Arc<A>, clock: Arc<C>) -> Self {
        Self { api, clock }
    }

    /// Validates the form, sends a single update and returns the refetched
    /// task.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Validation`] when fields are
    /// missing and [`super::TaskServiceError::Domain`] when the task is not
    /// completed; no request is sent in either case. Returns
    /// [`super::TaskServiceError::Api`] when the update or refetch fails.
    pub async fn submit(&self, task: &Task, form: &ReworkForm) -> TaskServiceResult<Task> {
        let request = form.validate()?;
        let update = request.into_update(task, self.clock.utc())?;
        self.api
            .update_task(task.id(), &update)
            .await
            .inspect_err(|err| {
                tracing::warn!(task_id = %task.id(), error = %err, "rework request failed");
            })?;
        tracing::info!(task_id = %task.id(), "task sent back for rework");
        Ok(self.api.find_task(task.id()).await?)
    }
}
