//! Application services for the task screens.
//!
//! Services send one request per user action and then refetch; the
//! refetched task is the only state they hand back.

mod catalog;
mod checklist;
mod detail;
mod error;
mod reminders;
mod rework;
mod timer;

pub use catalog::TaskCatalogService;
pub use checklist::{CHECKLIST_WARNING, ChecklistService, UploadBlock, UploadGate};
pub use detail::{Notice, Outcome, TaskDetailController};
pub use error::{TaskServiceError, TaskServiceResult};
pub use reminders::ReminderService;
pub use rework::ReworkService;
pub use timer::{TaskTimerService, TimerRefresh};
