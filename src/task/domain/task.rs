//! Task aggregate and its lifecycle status.

use super::{
    AllocatedHours, Assignees, Checklist, DesignType, ParseTaskStatusError, ProjectId,
    TaskDomainError, TaskId, TaskPriority, TimerState, UploadedFile,
};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Assigned but not started.
    Pending,
    /// Work is underway; set by the server when a timer starts.
    InProgress,
    /// Work has been delivered.
    Completed,
    /// The task was called off.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns the label shown to users (`in progress` rather than
    /// `in_progress`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether the task no longer needs attention.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns whether a task may move from this status to `target`.
    ///
    /// Completed work only goes back to pending through a rework request;
    /// cancelled tasks stay cancelled.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Pending,
                Self::InProgress | Self::Completed | Self::Cancelled
            ) | (
                Self::InProgress,
                Self::Pending | Self::Completed | Self::Cancelled
            ) | (Self::Completed, Self::Pending)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task record as last confirmed by the server.
///
/// The client never mutates a task in place: every change is a request to
/// the remote service followed by a refetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    assignees: Assignees,
    assignee_names: Vec<String>,
    project_id: Option<ProjectId>,
    project_name: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: DateTime<Utc>,
    created_by: UserId,
    created_by_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    design_type: Option<DesignType>,
    checklist: Checklist,
    allocated_hours: Option<AllocatedHours>,
    time_spent_ms: i64,
    timer: TimerState,
    file: Option<UploadedFile>,
}

/// Parameter object for reconstructing a task from a service record.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Free-text description, including any rework notes.
    pub description: Option<String>,
    /// Assigned users.
    pub assignees: Assignees,
    /// Display names of the assigned users, as resolved by the server.
    pub assignee_names: Vec<String>,
    /// Linked project, if any.
    pub project_id: Option<ProjectId>,
    /// Display name of the linked project.
    pub project_name: Option<String>,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Due timestamp.
    pub due_date: DateTime<Utc>,
    /// Creator of the task.
    pub created_by: UserId,
    /// Display name of the creator.
    pub created_by_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp, if ever updated.
    pub updated_at: Option<DateTime<Utc>>,
    /// Kind of deliverable.
    pub design_type: Option<DesignType>,
    /// Mandatory checklist.
    pub checklist: Checklist,
    /// Budgeted hours, if any.
    pub allocated_hours: Option<AllocatedHours>,
    /// Time accumulated by finished timer sessions.
    pub time_spent_ms: i64,
    /// Timer state.
    pub timer: TimerState,
    /// Uploaded completed work, if any.
    pub file: Option<UploadedFile>,
}

impl Task {
    /// Reconstructs a task from a service record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NegativeTimeSpent`] when the accumulated
    /// time is negative.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        if data.time_spent_ms < 0 {
            return Err(TaskDomainError::NegativeTimeSpent(data.time_spent_ms));
        }
        Ok(Self {
            id: data.id,
            title: data.title,
            description: data.description,
            assignees: data.assignees,
            assignee_names: data.assignee_names,
            project_id: data.project_id,
            project_name: data.project_name,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            created_by: data.created_by,
            created_by_name: data.created_by_name,
            created_at: data.created_at,
            updated_at: data.updated_at,
            design_type: data.design_type,
            checklist: data.checklist,
            allocated_hours: data.allocated_hours,
            time_spent_ms: data.time_spent_ms,
            timer: data.timer,
            file: data.file,
        })
    }

    /// Returns the parts of this task, e.g. for a simulated store.
    #[must_use]
    pub fn into_persisted(self) -> PersistedTaskData {
        PersistedTaskData {
            id: self.id,
            title: self.title,
            description: self.description,
            assignees: self.assignees,
            assignee_names: self.assignee_names,
            project_id: self.project_id,
            project_name: self.project_name,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            created_by: self.created_by,
            created_by_name: self.created_by_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
            design_type: self.design_type,
            checklist: self.checklist,
            allocated_hours: self.allocated_hours,
            time_spent_ms: self.time_spent_ms,
            timer: self.timer,
            file: self.file,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assigned users.
    #[must_use]
    pub const fn assignees(&self) -> &Assignees {
        &self.assignees
    }

    /// Returns the assignee display names, if the server resolved them.
    #[must_use]
    pub fn assignee_names(&self) -> &[String] {
        &self.assignee_names
    }

    /// Returns the linked project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Returns the linked project's name, if any.
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due timestamp.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the creator.
    #[must_use]
    pub const fn created_by(&self) -> &UserId {
        &self.created_by
    }

    /// Returns the creator's display name, if resolved.
    #[must_use]
    pub fn created_by_name(&self) -> Option<&str> {
        self.created_by_name.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp, if any.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the design type, if any.
    #[must_use]
    pub const fn design_type(&self) -> Option<DesignType> {
        self.design_type
    }

    /// Returns the mandatory checklist.
    #[must_use]
    pub const fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Returns the allocated hours, if any.
    #[must_use]
    pub const fn allocated_hours(&self) -> Option<AllocatedHours> {
        self.allocated_hours
    }

    /// Returns the time accumulated by finished timer sessions.
    #[must_use]
    pub const fn time_spent_ms(&self) -> i64 {
        self.time_spent_ms
    }

    /// Returns the timer state.
    #[must_use]
    pub const fn timer(&self) -> TimerState {
        self.timer
    }

    /// Returns the uploaded completed work, if any.
    #[must_use]
    pub const fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    /// Returns whether the user is one of the assignees.
    #[must_use]
    pub fn is_assigned_to(&self, user: &UserId) -> bool {
        self.assignees.contains(user)
    }

    /// Returns the assignee names joined for display, falling back to
    /// `Unassigned` when the server resolved none.
    #[must_use]
    pub fn assignee_label(&self) -> String {
        if self.assignee_names.is_empty() {
            return "Unassigned".to_owned();
        }
        self.assignee_names.join(", ")
    }
}
