//! Urgent-task reminders.
//!
//! A task is urgent while it is open and due within the reminder window.
//! Overdue tasks stay urgent however late they are; the reminder only goes
//! away when the task is completed or cancelled.

use super::{Task, TaskId};
use chrono::{DateTime, TimeDelta, Utc};

/// Window and size limits of the reminder banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPolicy {
    window: TimeDelta,
    max_entries: usize,
}

impl ReminderPolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(window: TimeDelta, max_entries: usize) -> Self {
        Self {
            window,
            max_entries,
        }
    }

    /// Builds a policy from a window expressed in hours.
    #[must_use]
    pub fn from_hours(window_hours: u32, max_entries: usize) -> Self {
        Self::new(TimeDelta::hours(i64::from(window_hours)), max_entries)
    }

    /// Returns the look-ahead window.
    #[must_use]
    pub const fn window(&self) -> TimeDelta {
        self.window
    }

    /// Returns the number of entries listed before the overflow link.
    #[must_use]
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self::new(TimeDelta::days(2), 3)
    }
}

/// Selects urgent tasks, ordered by ascending due timestamp.
///
/// Tasks sharing a due timestamp keep their input order.
#[must_use]
pub fn select_urgent<'a>(
    tasks: &'a [Task],
    now: DateTime<Utc>,
    policy: &ReminderPolicy,
) -> Vec<&'a Task> {
    // A window reaching past the last representable instant has no bound.
    let horizon = now.checked_add_signed(policy.window());
    let mut urgent: Vec<&Task> = tasks
        .iter()
        .filter(|task| !task.status().is_closed())
        .filter(|task| horizon.is_none_or(|limit| task.due_date() <= limit))
        .collect();
    urgent.sort_by_key(|task| task.due_date());
    urgent
}

/// Marker shown next to an urgent task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyMarker {
    /// The due timestamp has passed.
    Overdue,
    /// Due within the window.
    DueSoon,
}

impl UrgencyMarker {
    /// Returns the marker label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::DueSoon => "Due Soon",
        }
    }
}

/// One listed urgent task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEntry {
    /// Task to open when the entry is chosen.
    pub task_id: TaskId,
    /// Task title.
    pub title: String,
    /// Overdue or due-soon marker.
    pub marker: UrgencyMarker,
    /// Who assigned the task.
    pub assigned_by: String,
    /// Who the task is assigned to.
    pub assigned_to: String,
    /// Due timestamp.
    pub due_date: DateTime<Utc>,
}

/// Reminder banner contents.
///
/// The banner has no dismiss action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReminderBanner {
    entries: Vec<ReminderEntry>,
    total: usize,
}

impl ReminderBanner {
    /// Builds the banner for the visible tasks at `now`.
    #[must_use]
    pub fn build(tasks: &[Task], now: DateTime<Utc>, policy: &ReminderPolicy) -> Self {
        let urgent = select_urgent(tasks, now, policy);
        let total = urgent.len();
        let entries = urgent
            .into_iter()
            .take(policy.max_entries())
            .map(|task| ReminderEntry {
                task_id: task.id().clone(),
                title: task.title().to_owned(),
                marker: if task.due_date() < now {
                    UrgencyMarker::Overdue
                } else {
                    UrgencyMarker::DueSoon
                },
                assigned_by: task.created_by_name().unwrap_or("Unknown").to_owned(),
                assigned_to: task.assignee_label(),
                due_date: task.due_date(),
            })
            .collect();
        Self { entries, total }
    }

    /// Returns whether the banner is shown at all.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.total > 0
    }

    /// Returns the listed entries.
    #[must_use]
    pub fn entries(&self) -> &[ReminderEntry] {
        &self.entries
    }

    /// Returns the number of urgent tasks, listed or not.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns how many urgent tasks are only reachable through the full
    /// task list.
    #[must_use]
    pub const fn overflow(&self) -> usize {
        self.total.saturating_sub(self.entries.len())
    }

    /// Returns the summary sentence, e.g. `You have 2 tasks that require
    /// immediate attention.`
    #[must_use]
    pub fn headline(&self) -> String {
        if self.total == 1 {
            return "You have 1 task that requires immediate attention.".to_owned();
        }
        format!(
            "You have {} tasks that require immediate attention.",
            self.total
        )
    }
}
