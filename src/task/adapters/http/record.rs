//! Wire representation of task records.
//!
//! Records are normalised here so that the domain never sees legacy or
//! inconsistent shapes: scalar assignees become a set, naive timestamps are
//! read as UTC, and a running timer must carry its start time.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::identity::domain::UserId;
use crate::task::domain::{
    AllocatedHours, Assignees, Checklist, DesignType, FileId, PersistedTaskData, ProjectId, Task,
    TaskDomainError, TaskId, TaskPriority, TaskStatus, TimerState, UploadedFile,
};

/// `assigned_to` as stored by current and legacy records.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AssignedTo {
    /// Legacy single assignee.
    One(String),
    /// Current list of assignees.
    Many(Vec<String>),
}

impl AssignedTo {
    fn into_ids(self) -> Vec<UserId> {
        match self {
            Self::One(id) => vec![UserId::new(id)],
            Self::Many(ids) => ids.into_iter().map(UserId::new).collect(),
        }
    }
}

/// A task as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Assignees, scalar or list.
    pub assigned_to: AssignedTo,
    /// Assignee display names.
    #[serde(default)]
    pub assigned_to_names: Option<Vec<String>>,
    /// Linked project.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Linked project name.
    #[serde(default)]
    pub project_name: Option<String>,
    /// Due timestamp.
    pub due_date: String,
    /// Priority.
    #[serde(default)]
    pub priority: Option<String>,
    /// Status.
    pub status: String,
    /// Creator.
    pub created_by: String,
    /// Creator display name.
    #[serde(default)]
    pub created_by_name: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Latest update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Design type.
    #[serde(default)]
    pub design_type: Option<String>,
    /// Checklist.
    #[serde(default)]
    pub checkpoints: Option<Checklist>,
    /// Budgeted hours.
    #[serde(default)]
    pub allocated_hours: Option<f64>,
    /// Start of the running session.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Time accumulated by finished sessions.
    #[serde(default)]
    pub time_spent_ms: Option<i64>,
    /// Whether the timer is running.
    #[serde(default)]
    pub is_timer_running: bool,
    /// Uploaded file identifier.
    #[serde(default)]
    pub file_id: Option<String>,
    /// Uploaded file name.
    #[serde(default)]
    pub filename: Option<String>,
    /// Upload timestamp.
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

/// A record that cannot be represented as a task.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    /// A field value is outside the domain.
    #[error("task {id}: {source}")]
    Domain {
        /// Offending record.
        id: String,
        /// Domain rule that was broken.
        source: TaskDomainError,
    },
    /// A timestamp could not be parsed.
    #[error("task {id}: invalid timestamp '{value}' in {field}")]
    Timestamp {
        /// Offending record.
        id: String,
        /// Field holding the timestamp.
        field: &'static str,
        /// Raw value.
        value: String,
    },
    /// The status is not one of the known values.
    #[error("task {id}: unknown status '{value}'")]
    Status {
        /// Offending record.
        id: String,
        /// Raw value.
        value: String,
    },
}

/// Parses RFC 3339 timestamps, reading values without an offset as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

impl TaskRecord {
    fn timestamp(&self, field: &'static str, raw: &str) -> Result<DateTime<Utc>, RecordError> {
        parse_timestamp(raw).ok_or_else(|| RecordError::Timestamp {
            id: self.id.clone(),
            field,
            value: raw.to_owned(),
        })
    }

    fn optional_timestamp(
        &self,
        field: &'static str,
        raw: Option<&str>,
    ) -> Result<Option<DateTime<Utc>>, RecordError> {
        raw.filter(|value| !value.trim().is_empty())
            .map(|value| self.timestamp(field, value))
            .transpose()
    }

    fn domain(&self, source: TaskDomainError) -> RecordError {
        RecordError::Domain {
            id: self.id.clone(),
            source,
        }
    }

    /// Converts the record into a domain task.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] for empty assignees, unknown enumerations,
    /// bad timestamps, or a running timer without a start time.
    pub fn into_task(self) -> Result<Task, RecordError> {
        let id = TaskId::new(self.id.as_str());
        let status = TaskStatus::try_from(self.status.as_str()).map_err(|err| {
            RecordError::Status {
                id: self.id.clone(),
                value: err.0,
            }
        })?;
        let priority = self
            .priority
            .as_deref()
            .map(TaskPriority::try_from)
            .transpose()
            .map_err(|err| self.domain(err))?
            .unwrap_or_default();
        let design_type = self
            .design_type
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(DesignType::try_from)
            .transpose()
            .map_err(|err| self.domain(err))?;
        let allocated_hours = self
            .allocated_hours
            .map(AllocatedHours::new)
            .transpose()
            .map_err(|err| self.domain(err))?;
        let timer = if self.is_timer_running {
            let started_at = self
                .optional_timestamp("start_time", self.start_time.as_deref())?
                .ok_or_else(|| self.domain(TaskDomainError::RunningTimerWithoutStart(id.clone())))?;
            TimerState::Running { started_at }
        } else {
            TimerState::Stopped
        };
        let due_date = self.timestamp("due_date", &self.due_date)?;
        let created_at = self.timestamp("created_at", &self.created_at)?;
        let updated_at = self.optional_timestamp("updated_at", self.updated_at.as_deref())?;
        let uploaded_at = self.optional_timestamp("uploaded_at", self.uploaded_at.as_deref())?;
        let assignees =
            Assignees::new(self.assigned_to.clone().into_ids()).map_err(|err| self.domain(err))?;
        let file = match (self.file_id.as_deref(), self.filename.as_deref()) {
            (Some(file_id), filename) if !file_id.trim().is_empty() => Some(UploadedFile {
                file_id: FileId::new(file_id),
                filename: filename.unwrap_or_default().to_owned(),
                uploaded_at,
            }),
            _ => None,
        };
        let record_id = self.id.clone();

        Task::from_persisted(PersistedTaskData {
            id,
            title: self.title,
            description: self.description,
            assignees,
            assignee_names: self.assigned_to_names.unwrap_or_default(),
            project_id: self
                .project_id
                .filter(|value| !value.trim().is_empty())
                .map(ProjectId::new),
            project_name: self.project_name,
            status,
            priority,
            due_date,
            created_by: UserId::new(self.created_by),
            created_by_name: self.created_by_name,
            created_at,
            updated_at,
            design_type,
            checklist: self.checkpoints.unwrap_or_default(),
            allocated_hours,
            time_spent_ms: self.time_spent_ms.unwrap_or_default(),
            timer,
            file,
        })
        .map_err(|source| RecordError::Domain {
            id: record_id,
            source,
        })
    }
}
