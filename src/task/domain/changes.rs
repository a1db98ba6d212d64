//! Requests that change tasks on the server.

use super::{
    AllocatedHours, Assignees, Checklist, DesignType, ProjectId, TaskDomainError, TaskPriority,
    TaskStatus,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

const TITLE_MIN_CHARS: usize = 3;
const TITLE_MAX_CHARS: usize = 200;

/// Payload for creating a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    assigned_to: Assignees,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<ProjectId>,
    due_date: DateTime<Utc>,
    priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    design_type: Option<DesignType>,
    checkpoints: Checklist,
    #[serde(skip_serializing_if = "Option::is_none")]
    allocated_hours: Option<AllocatedHours>,
}

impl NewTask {
    /// Creates a medium-priority task with no project, design type or
    /// allocation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTitle`] when the trimmed title is
    /// shorter than 3 or longer than 200 characters.
    pub fn new(
        title: impl AsRef<str>,
        assigned_to: Assignees,
        due_date: DateTime<Utc>,
    ) -> Result<Self, TaskDomainError> {
        let trimmed = title.as_ref().trim();
        let chars = trimmed.chars().count();
        if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&chars) {
            return Err(TaskDomainError::InvalidTitle(chars));
        }
        Ok(Self {
            title: trimmed.to_owned(),
            description: None,
            assigned_to,
            project_id: None,
            due_date,
            priority: TaskPriority::default(),
            design_type: None,
            checkpoints: Checklist::default(),
            allocated_hours: None,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Links the task to a project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the design type. Logo tasks without a checklist receive the
    /// logo checklist.
    #[must_use]
    pub fn with_design_type(mut self, design_type: DesignType) -> Self {
        self.design_type = Some(design_type);
        if self.checkpoints.is_empty() {
            self.checkpoints = Checklist::for_design_type(Some(design_type));
        }
        self
    }

    /// Replaces the checklist.
    #[must_use]
    pub fn with_checklist(mut self, checklist: Checklist) -> Self {
        self.checkpoints = checklist;
        self
    }

    /// Sets the hour budget.
    #[must_use]
    pub fn with_allocated_hours(mut self, hours: AllocatedHours) -> Self {
        self.allocated_hours = Some(hours);
        self
    }

    /// Checks cross-field rules that builders cannot enforce alone.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownLogoCheckpoint`] when a logo task
    /// carries an item outside the logo vocabulary.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        self.checkpoints.validate_for(self.design_type)
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

    /// Returns the assignees.
    #[must_use]
    pub const fn assigned_to(&self) -> &Assignees {
        &self.assigned_to
    }

    /// Returns the linked project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Returns the due timestamp.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the design type, if any.
    #[must_use]
    pub const fn design_type(&self) -> Option<DesignType> {
        self.design_type
    }

    /// Returns the checklist.
    #[must_use]
    pub const fn checklist(&self) -> &Checklist {
        &self.checkpoints
    }

    /// Returns the hour budget, if any.
    #[must_use]
    pub const fn allocated_hours(&self) -> Option<AllocatedHours> {
        self.allocated_hours
    }
}

/// Partial task update. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement assignees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Assignees>,
    /// New due timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Whole replacement checklist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoints: Option<Checklist>,
}

impl TaskUpdate {
    /// Returns an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the assignees.
    #[must_use]
    pub fn assigned_to(mut self, assignees: Assignees) -> Self {
        self.assigned_to = Some(assignees);
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub fn due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the checklist.
    #[must_use]
    pub fn checkpoints(mut self, checklist: Checklist) -> Self {
        self.checkpoints = Some(checklist);
        self
    }

    /// Returns whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assigned_to.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.checkpoints.is_none()
    }
}

/// Timer toggle sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Start or resume the timer.
    Start,
    /// Pause the timer.
    Pause,
}

impl TimerAction {
    /// Returns the query value understood by the server.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewTask, TaskUpdate};
    use crate::identity::domain::UserId;
    use crate::task::domain::{
        Assignees, Checklist, Checkpoint, DesignType, TaskDomainError, TaskPriority, TaskStatus,
        LOGO_CHECKPOINTS,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn assignees() -> Assignees {
        Assignees::new([UserId::from("u-1")]).expect("non-empty assignees")
    }

    #[fixture]
    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case("ab", 2)]
    #[case("   ab   ", 2)]
    #[case("", 0)]
    fn short_titles_are_rejected(
        assignees: Assignees,
        due: DateTime<Utc>,
        #[case] title: &str,
        #[case] len: usize,
    ) {
        assert_eq!(
            NewTask::new(title, assignees, due),
            Err(TaskDomainError::InvalidTitle(len))
        );
    }

    #[rstest]
    fn long_titles_are_rejected(assignees: Assignees, due: DateTime<Utc>) {
        let title = "x".repeat(201);
        assert_eq!(
            NewTask::new(title, assignees, due),
            Err(TaskDomainError::InvalidTitle(201))
        );
    }

    #[rstest]
    fn new_tasks_default_to_medium_priority(assignees: Assignees, due: DateTime<Utc>) {
        let task = NewTask::new("  Poster for launch ", assignees, due).expect("valid task");
        assert_eq!(task.title(), "Poster for launch");
        assert_eq!(task.priority(), TaskPriority::Medium);
        assert!(task.checklist().is_empty());
    }

    #[rstest]
    fn logo_tasks_receive_the_logo_checklist(assignees: Assignees, due: DateTime<Utc>) {
        let task = NewTask::new("Brand mark", assignees, due)
            .expect("valid task")
            .with_design_type(DesignType::Logo);
        assert_eq!(task.checklist().len(), LOGO_CHECKPOINTS.len());
        assert!(task.validate().is_ok());
    }

    #[rstest]
    fn logo_tasks_with_foreign_items_fail_validation(assignees: Assignees, due: DateTime<Utc>) {
        let task = NewTask::new("Brand mark", assignees, due)
            .expect("valid task")
            .with_checklist(Checklist::new(vec![Checkpoint::new("sparkles")]))
            .with_design_type(DesignType::Logo);
        assert_eq!(
            task.validate(),
            Err(TaskDomainError::UnknownLogoCheckpoint("sparkles".to_owned()))
        );
    }

    #[rstest]
    fn update_serialises_only_present_fields() {
        let update = TaskUpdate::new().status(TaskStatus::Pending);
        let json = serde_json::to_value(&update).expect("serialisable");
        assert_eq!(json, serde_json::json!({ "status": "pending" }));
        assert!(!update.is_empty());
        assert!(TaskUpdate::new().is_empty());
    }
}
