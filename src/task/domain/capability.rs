//! Role-based visibility of task controls.
//!
//! The whole authorization policy of the task views lives in
//! [`Capabilities::evaluate`]. Views read the resulting flags instead of
//! inspecting roles themselves; a missing capability hides or disables the
//! control rather than producing an error.

use super::{Task, TaskStatus};
use crate::identity::domain::User;

/// Controls a viewer may use on one task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "one independent flag per control"
)]
pub struct Capabilities {
    /// Start and pause the timer.
    pub control_timer: bool,
    /// Tick and untick checklist items.
    pub toggle_checkpoints: bool,
    /// Upload or replace completed work.
    pub upload_work: bool,
    /// Show the incomplete-checklist warning.
    pub checklist_warning: bool,
    /// Send completed work back for rework.
    pub request_rework: bool,
    /// Edit task fields.
    pub edit_task: bool,
    /// Delete the task.
    pub delete_task: bool,
}

impl Capabilities {
    /// Evaluates the capabilities of `viewer` on `task`.
    #[must_use]
    pub fn evaluate(viewer: &User, task: &Task) -> Self {
        let elevated = viewer.role().is_elevated();
        let assignee = task.is_assigned_to(viewer.id());
        let creator = task.created_by() == viewer.id();
        let involved = assignee || creator || elevated;

        Self {
            control_timer: involved,
            toggle_checkpoints: involved,
            upload_work: involved,
            checklist_warning: assignee && !task.checklist().all_completed(),
            request_rework: elevated && task.status() == TaskStatus::Completed,
            edit_task: involved,
            delete_task: elevated,
        }
    }

    /// Capabilities of a viewer who may do nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            control_timer: false,
            toggle_checkpoints: false,
            upload_work: false,
            checklist_warning: false,
            request_rework: false,
            edit_task: false,
            delete_task: false,
        }
    }
}
