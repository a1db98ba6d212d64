//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or transforming domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A task must always have at least one assignee.
    #[error("at least one user must be assigned to the task")]
    EmptyAssignees,

    /// The title is too short or too long after trimming.
    #[error("task title must be between 3 and 200 characters, got {0}")]
    InvalidTitle(usize),

    /// Allocated hours must be a positive, finite number.
    #[error("allocated hours must be a positive number, got {0}")]
    InvalidAllocatedHours(String),

    /// Elapsed time can never be negative.
    #[error("time spent must not be negative, got {0} ms")]
    NegativeTimeSpent(i64),

    /// A running timer was reported without the time it started.
    #[error("task {0} reports a running timer without a start time")]
    RunningTimerWithoutStart(TaskId),

    /// The checkpoint index does not address an item.
    #[error("checkpoint {index} does not exist, checklist has {len} items")]
    CheckpointOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of checkpoints in the checklist.
        len: usize,
    },

    /// Logo tasks only accept checkpoints from the fixed vocabulary.
    #[error("'{0}' is not a logo checkpoint")]
    UnknownLogoCheckpoint(String),

    /// The priority value is unsupported.
    #[error("unknown task priority: {0}")]
    UnknownPriority(String),

    /// The design type value is unsupported.
    #[error("unknown design type: {0}")]
    UnknownDesignType(String),

    /// The requested state transition is not permitted.
    #[error("task {task_id} cannot move from {} to {}", from.as_str(), to.as_str())]
    InvalidStateTransition {
        /// Task whose status was to change.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// Uploaded files must carry a name.
    #[error("uploaded file name must not be empty")]
    EmptyFileName,
}

/// Error returned while parsing task statuses from the wire.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
