//! Checklist toggles and the upload gate they control.

use std::sync::Arc;

use super::TaskServiceResult;
use crate::task::{
    domain::{Capabilities, Task, TaskUpdate},
    ports::TaskApi,
};

/// Warning shown to assignees while the checklist is incomplete.
pub const CHECKLIST_WARNING: &str =
    "Please complete all checklist items before uploading your work.";

/// Persists checklist changes.
#[derive(Clone)]
pub struct ChecklistService<A>
where
    A: TaskApi,
{
    api: Arc<A>,
}

impl<A> ChecklistService<A>
where
    A: TaskApi,
{
    /// Creates a checklist service.
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Flips one checkpoint and returns the refetched task.
    ///
    /// The whole checklist is sent in a single update.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskServiceError::Domain`] for an invalid index and
    /// [`super::TaskServiceError::Api`] when the update or refetch fails.
    pub async fn toggle(&self, task: &Task, index: usize) -> TaskServiceResult<Task> {
        let checklist = task.checklist().toggled(index)?;
        let update = TaskUpdate::new().checkpoints(checklist);
        self.api
            .update_task(task.id(), &update)
            .await
            .inspect_err(|err| {
                tracing::warn!(
                    task_id = %task.id(),
                    index,
                    error = %err,
                    "checklist update failed"
                );
            })?;
        tracing::info!(task_id = %task.id(), index, "checkpoint toggled");
        Ok(self.api.find_task(task.id()).await?)
    }
}

/// Why the upload control is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadBlock {
    /// The viewer may not upload to this task.
    NotPermitted,
    /// No file has been chosen.
    NoFileSelected,
    /// A request is in flight.
    Busy,
    /// Checklist items remain unticked.
    ChecklistIncomplete,
}

/// State of the upload control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadGate {
    blocked_by: Option<UploadBlock>,
    warning: Option<&'static str>,
    replaces_existing: bool,
}

impl UploadGate {
    /// Evaluates the gate for the viewer's capabilities and the current
    /// selection.
    #[must_use]
    pub fn evaluate(
        task: &Task,
        capabilities: &Capabilities,
        file_selected: bool,
        busy: bool,
    ) -> Self {
        let checklist_done = task.checklist().all_completed();
        let blocked_by = if !capabilities.upload_work {
            Some(UploadBlock::NotPermitted)
        } else if !file_selected {
            Some(UploadBlock::NoFileSelected)
        } else if busy {
            Some(UploadBlock::Busy)
        } else if !checklist_done {
            Some(UploadBlock::ChecklistIncomplete)
        } else {
            None
        };
        Self {
            blocked_by,
            warning: capabilities.checklist_warning.then_some(CHECKLIST_WARNING),
            replaces_existing: task.file().is_some(),
        }
    }

    /// Returns whether the upload control is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.blocked_by.is_none()
    }

    /// Returns why the control is disabled, if it is.
    #[must_use]
    pub const fn blocked_by(&self) -> Option<UploadBlock> {
        self.blocked_by
    }

    /// Returns the checklist warning for the assignee, if shown.
    #[must_use]
    pub const fn warning(&self) -> Option<&'static str> {
        self.warning
    }

    /// Returns the upload section heading.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        if self.replaces_existing {
            "Replace Completed Work"
        } else {
            "Upload Completed Work"
        }
    }
}
