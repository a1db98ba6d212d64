//! Domain model for design-studio tasks.
//!
//! Tasks are owned by the remote service. The types here describe the last
//! server-confirmed state of a task and derive everything the views show
//! from it: timer readings, checklist gates, reminders, rework requests and
//! the controls a viewer may use.

mod assignees;
mod capability;
mod changes;
mod checklist;
mod classification;
mod error;
mod file;
mod ids;
pub mod reminder;
pub mod rework;
mod task;
pub mod timer;

pub use assignees::Assignees;
pub use capability::Capabilities;
pub use changes::{NewTask, TaskUpdate, TimerAction};
pub use checklist::{Checklist, Checkpoint, LOGO_CHECKPOINTS};
pub use classification::{DesignType, TaskPriority};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use file::{DownloadedFile, FileUpload, UploadedFile};
pub use ids::{FileId, ProjectId, TaskId};
pub use reminder::{ReminderBanner, ReminderEntry, ReminderPolicy, UrgencyMarker};
pub use rework::{ReworkField, ReworkForm, ReworkRequest, ReworkValidationError};
pub use task::{PersistedTaskData, Task, TaskStatus};
pub use timer::{AllocatedHours, TimerBand, TimerControl, TimerPanel, TimerReading, TimerState};
