//! Sending completed work back for rework.

use super::{Assignees, Task, TaskDomainError, TaskStatus, TaskUpdate};
use crate::identity::domain::UserId;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;
use thiserror::Error;

/// Format of the timestamp stamped into the rework note.
pub const REWORK_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Rework dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReworkForm {
    /// Instructions for the assignees.
    pub remarks: String,
    /// Users the task goes back to.
    pub reassign_to: Vec<UserId>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
}

/// A required rework field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReworkField {
    /// Rework remarks.
    Remarks,
    /// Reassigned users.
    AssignTo,
    /// New due date.
    DueDate,
}

impl ReworkField {
    /// Returns the field label used in validation messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Remarks => "Remarks",
            Self::AssignTo => "Assign To",
            Self::DueDate => "Due Date",
        }
    }
}

impl fmt::Display for ReworkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rework form with blank required fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Please fill in all fields ({})", join_labels(.missing))]
pub struct ReworkValidationError {
    /// Missing fields in form order.
    pub missing: Vec<ReworkField>,
}

fn join_labels(fields: &[ReworkField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ReworkForm {
    /// Pre-fills the form with the task's assignees and due date.
    #[must_use]
    pub fn for_task(task: &Task) -> Self {
        Self {
            remarks: String::new(),
            reassign_to: task.assignees().iter().cloned().collect(),
            due_date: Some(task.due_date().date_naive()),
        }
    }

    /// Checks that every field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ReworkValidationError`] naming every missing field.
    pub fn validate(&self) -> Result<ReworkRequest, ReworkValidationError> {
        let mut missing = Vec::new();
        let remarks = self.remarks.trim();
        if remarks.is_empty() {
            missing.push(ReworkField::Remarks);
        }
        let assignees = Assignees::new(self.reassign_to.iter().cloned()).ok();
        if assignees.is_none() {
            missing.push(ReworkField::AssignTo);
        }
        if self.due_date.is_none() {
            missing.push(ReworkField::DueDate);
        }
        match (assignees, self.due_date) {
            (Some(reassign_to), Some(due_date)) if missing.is_empty() => Ok(ReworkRequest {
                remarks: remarks.to_owned(),
                reassign_to,
                due_date,
            }),
            _ => Err(ReworkValidationError { missing }),
        }
    }
}

/// A validated rework request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReworkRequest {
    remarks: String,
    reassign_to: Assignees,
    due_date: NaiveDate,
}

impl ReworkRequest {
    /// Returns the trimmed remarks.
    #[must_use]
    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    /// Returns the users the task goes back to.
    #[must_use]
    pub const fn reassign_to(&self) -> &Assignees {
        &self.reassign_to
    }

    /// Returns the new due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Builds the update reopening `task`.
    ///
    /// The remarks are prepended to the existing description under a
    /// timestamped header. Priority is carried over unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the task is
    /// completed.
    pub fn into_update(
        self,
        task: &Task,
        now: DateTime<Utc>,
    ) -> Result<TaskUpdate, TaskDomainError> {
        if task.status() != TaskStatus::Completed {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: task.id().clone(),
                from: task.status(),
                to: TaskStatus::Pending,
            });
        }
        let description = format!(
            "[REWORK REQUESTED - {}]\nRemarks: {}\n\n---\n{}",
            now.format(REWORK_TIMESTAMP_FORMAT),
            self.remarks,
            task.description().unwrap_or_default(),
        );
        let due = self.due_date.and_time(NaiveTime::MIN).and_utc();
        Ok(TaskUpdate::new()
            .status(TaskStatus::Pending)
            .assigned_to(self.reassign_to)
            .due_date(due)
            .description(description)
            .priority(task.priority()))
    }
}
