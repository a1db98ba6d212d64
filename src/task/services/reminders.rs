//! Urgent-task reminder banner.

use mockable::Clock;
use std::sync::Arc;

use super::TaskServiceResult;
use crate::task::{
    domain::{ReminderBanner, ReminderPolicy},
    ports::TaskApi,
};

/// Builds the reminder banner from the caller's visible tasks.
#[derive(Clone)]
pub struct ReminderService<A, C>
where
    A: TaskApi,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    clock: Arc<C>,
    policy: ReminderPolicy,
}

impl<A, C> ReminderService<A, C>
where
    A: TaskApi,
    C: Clock + Send + Sync,
{
    /// Creates a reminder service with the default two-day window.
    #[must_use]
    pub fn new(api: Arc<A>, clock: Arc<C>) -> Self {
        Self::with_policy(api, clock, ReminderPolicy::default())
    }

    /// Creates a reminder service with a custom policy.
    #[must_use]
    pub const fn with_policy(api: Arc<A>, clock: Arc<C>, policy: ReminderPolicy) -> Self {
        Self { api, clock, policy }
    }

    /// Lists tasks and builds the banner at the current time.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Api`] when the task list cannot be
    /// fetched.
    pub async fn banner(&self) -> TaskServiceResult<ReminderBanner> {
        let tasks = self.api.list_tasks().await?;
        let banner = ReminderBanner::build(&tasks, self.clock.utc(), &self.policy);
        tracing::debug!(urgent = banner.total(), "reminder banner built");
        Ok(banner)
    }
}
