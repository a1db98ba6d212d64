//! Timer toggles and the once-per-second display refresh.

use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::TaskServiceResult;
use crate::task::{
    domain::{Task, TaskId, TimerAction, TimerReading, timer::needs_refresh},
    ports::TaskApi,
};

const REFRESH_PERIOD: Duration = Duration::from_secs(1);

/// Starts and pauses task timers on the server.
///
/// Local state is never changed optimistically: every toggle is followed by
/// a refetch and the refetched task is returned.
#[derive(Clone)]
pub struct TaskTimerService<A>
where
    A: TaskApi,
{
    api: Arc<A>,
}

impl<A> TaskTimerService<A>
where
    A: TaskApi,
{
    /// Creates a timer service.
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Starts or resumes the timer. The server pauses the caller's other
    /// running timers.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Api`] when the toggle or refetch
    /// fails.
    pub async fn start(&self, id: &TaskId) -> TaskServiceResult<Task> {
        self.toggle(id, TimerAction::Start).await
    }

    /// Pauses the timer.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Api`] when the toggle or refetch
    /// fails.
    pub async fn pause(&self, id: &TaskId) -> TaskServiceResult<Task> {
        self.toggle(id, TimerAction::Pause).await
    }

    async fn toggle(&self, id: &TaskId, action: TimerAction) -> TaskServiceResult<Task> {
        self.api.toggle_timer(id, action).await.inspect_err(|err| {
            tracing::warn!(
                task_id = %id,
                action = action.as_str(),
                error = %err,
                "timer toggle failed"
            );
        })?;
        tracing::info!(task_id = %id, action = action.as_str(), "timer toggled");
        Ok(self.api.find_task(id).await?)
    }
}

/// Periodic recomputation of a running timer's display.
///
/// Holds a snapshot of the task and publishes a fresh [`TimerReading`] every
/// second. It never writes to the task. Dropping the handle stops the loop.
#[derive(Debug)]
pub struct TimerRefresh {
    readings: watch::Receiver<TimerReading>,
    handle: JoinHandle<()>,
}

impl TimerRefresh {
    /// Spawns the refresh loop for `task`, or returns `None` when the timer
    /// is not running or the task is completed.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn<C>(task: &Task, clock: Arc<C>) -> Option<Self>
    where
        C: Clock + Send + Sync + 'static,
    {
        if !needs_refresh(task) {
            return None;
        }
        let snapshot = task.clone();
        let (sender, readings) = watch::channel(TimerReading::at(&snapshot, clock.utc()));
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(REFRESH_PERIOD);
            loop {
                ticker.tick().await;
                let reading = TimerReading::at(&snapshot, clock.utc());
                if sender.send(reading).is_err() || reading.is_expired() {
                    break;
                }
            }
        });
        Some(Self { readings, handle })
    }

    /// Returns the latest published reading.
    #[must_use]
    pub fn current(&self) -> TimerReading {
        *self.readings.borrow()
    }

    /// Returns a receiver notified on every new reading.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TimerReading> {
        self.readings.clone()
    }

    /// Returns whether the loop has finished, e.g. after expiry.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the loop.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for TimerRefresh {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
