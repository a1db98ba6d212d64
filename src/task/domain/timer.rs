//! Allocated-time tracking for tasks.
//!
//! The server owns elapsed time. Everything here is a projection of the last
//! server-confirmed task record onto the current instant; nothing in this
//! module accumulates time on its own.

use super::{Capabilities, Task, TaskDomainError, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Running state of a task timer.
///
/// A running timer always knows when it started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimerState {
    /// The timer is paused or was never started.
    #[default]
    Stopped,
    /// The timer is counting from `started_at`.
    Running {
        /// Server-assigned start of the current session.
        started_at: DateTime<Utc>,
    },
}

impl TimerState {
    /// Returns whether the timer is counting.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running { .. })
    }

    /// Returns the start of the current session, if running.
    #[must_use]
    pub const fn started_at(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Running { started_at } => Some(started_at),
            Self::Stopped => None,
        }
    }

    /// Milliseconds elapsed in the current session; zero when stopped or when
    /// the start lies in the future.
    #[must_use]
    pub fn session_ms(self, now: DateTime<Utc>) -> i64 {
        self.started_at()
            .map_or(0, |started_at| (now - started_at).num_milliseconds().max(0))
    }
}

/// Hours of work budgeted for a task.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AllocatedHours(f64);

impl AllocatedHours {
    /// Creates a validated allocation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidAllocatedHours`] for zero, negative
    /// or non-finite values.
    pub fn new(hours: f64) -> Result<Self, TaskDomainError> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(TaskDomainError::InvalidAllocatedHours(hours.to_string()));
        }
        Ok(Self(hours))
    }

    /// Returns the allocation in hours.
    #[must_use]
    pub const fn hours(self) -> f64 {
        self.0
    }

    /// Returns the allocation in whole milliseconds.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "allocations are validated finite and far below i64::MAX milliseconds"
    )]
    pub fn as_millis(self) -> i64 {
        (self.0 * MILLIS_PER_HOUR).round() as i64
    }
}

impl TryFrom<f64> for AllocatedHours {
    type Error = TaskDomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AllocatedHours> for f64 {
    fn from(value: AllocatedHours) -> Self {
        value.0
    }
}

/// Remaining allocated time, floored at zero.
///
/// Returns `None` when the task has no allocation.
#[must_use]
pub fn remaining(task: &Task, now: DateTime<Utc>) -> Option<Duration> {
    let allocated_ms = task.allocated_hours()?.as_millis();
    let elapsed_ms = task
        .time_spent_ms()
        .saturating_add(task.timer().session_ms(now));
    let remaining_ms = allocated_ms.saturating_sub(elapsed_ms).max(0);
    Some(Duration::from_millis(
        u64::try_from(remaining_ms).unwrap_or_default(),
    ))
}

/// Returns whether the display should be recomputed every second.
#[must_use]
pub fn needs_refresh(task: &Task) -> bool {
    task.timer().is_running() && task.status() != TaskStatus::Completed
}

/// What the timer display shows at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerReading {
    /// The task has no allocated time.
    Unallocated,
    /// Allocated time left.
    Remaining(Duration),
    /// The allocation is used up. Terminal display state.
    Expired,
}

impl TimerReading {
    /// Reads the timer of a task at `now`.
    #[must_use]
    pub fn at(task: &Task, now: DateTime<Utc>) -> Self {
        match remaining(task, now) {
            None => Self::Unallocated,
            Some(left) if left.is_zero() => Self::Expired,
            Some(left) => Self::Remaining(left),
        }
    }

    /// Returns whether this is the terminal expired state.
    #[must_use]
    pub const fn is_expired(self) -> bool {
        matches!(self, Self::Expired)
    }

    /// Returns the urgency band used for colouring the display.
    #[must_use]
    pub fn band(self) -> Option<TimerBand> {
        match self {
            Self::Unallocated => None,
            Self::Expired => Some(TimerBand::Expired),
            Self::Remaining(left) if left < Duration::from_secs(3600) => Some(TimerBand::Low),
            Self::Remaining(_) => Some(TimerBand::Comfortable),
        }
    }

    /// Renders the reading: `HH:MM:SS`, `TIME EXPIRED`, or `--:--:--`.
    #[must_use]
    pub fn display(self) -> String {
        match self {
            Self::Unallocated => "--:--:--".to_owned(),
            Self::Expired => "TIME EXPIRED".to_owned(),
            Self::Remaining(left) => format_hms(left),
        }
    }
}

/// Urgency band of the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerBand {
    /// At least an hour left.
    Comfortable,
    /// Less than an hour left.
    Low,
    /// Nothing left.
    Expired,
}

/// Formats a duration as zero-padded `HH:MM:SS`. Hours do not wrap at 24.
#[must_use]
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total.div_euclid(3600);
    let minutes = total.rem_euclid(3600).div_euclid(60);
    let seconds = total.rem_euclid(60);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Control offered next to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerControl {
    /// First start of the timer.
    Start,
    /// Restart after a pause.
    Resume,
    /// Pause a running timer.
    Pause,
}

impl TimerControl {
    /// Returns the control label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start Timer",
            Self::Resume => "Resume Timer",
            Self::Pause => "Pause",
        }
    }
}

/// Timer section of the task detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerPanel {
    /// The task has no allocation; no timer section is shown.
    Hidden,
    /// The timer is stopped.
    Idle {
        /// Start or resume control; `None` renders the `Not Started` label.
        control: Option<TimerControl>,
    },
    /// The timer is counting.
    Running {
        /// Reading at the time the panel was built.
        reading: TimerReading,
        /// Pause control, when the viewer may control the timer.
        control: Option<TimerControl>,
    },
}

impl TimerPanel {
    /// Static label shown to viewers who cannot start the timer.
    pub const NOT_STARTED: &'static str = "Not Started";

    /// Builds the panel for a viewer with the given capabilities.
    #[must_use]
    pub fn build(task: &Task, capabilities: &Capabilities, now: DateTime<Utc>) -> Self {
        if task.allocated_hours().is_none() {
            return Self::Hidden;
        }
        let allowed = capabilities.control_timer;
        if task.timer().is_running() {
            return Self::Running {
                reading: TimerReading::at(task, now),
                control: allowed.then_some(TimerControl::Pause),
            };
        }
        let control = if task.time_spent_ms() > 0 {
            TimerControl::Resume
        } else {
            TimerControl::Start
        };
        Self::Idle {
            control: allowed.then_some(control),
        }
    }

    /// Returns the text shown in place of, or beside, the controls.
    #[must_use]
    pub fn status_text(&self) -> Option<String> {
        match self {
            Self::Hidden | Self::Idle { control: Some(_) } => None,
            Self::Idle { control: None } => Some(Self::NOT_STARTED.to_owned()),
            Self::Running { reading, .. } => Some(reading.display()),
        }
    }

    /// Returns the offered control, if any.
    #[must_use]
    pub const fn control(&self) -> Option<TimerControl> {
        match self {
            Self::Hidden => None,
            Self::Idle { control } | Self::Running { control, .. } => *control,
        }
    }
}
