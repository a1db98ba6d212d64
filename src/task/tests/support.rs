//! Shared fixtures for task unit tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex};

use crate::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Role, User, UserId},
};
use crate::task::{
    adapters::memory::InMemoryWorkflow,
    domain::{
        Assignees, Checklist, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus,
        TimerState,
    },
};

pub const DESIGNER: &str = "u-designer";
pub const OTHER_DESIGNER: &str = "u-other";
pub const MANAGER: &str = "u-manager";
pub const MARKETER: &str = "u-marketer";

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(Mutex::new(at))
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.0.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 20, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn user(id: &str, role: Role) -> User {
    User::new(id, format!("User {id}"), format!("{id}@studio.test"), role)
}

/// Record assigned to [`DESIGNER`] and created by [`MANAGER`].
pub fn task_data(id: &str) -> PersistedTaskData {
    PersistedTaskData {
        id: TaskId::from(id),
        title: format!("Design {id}"),
        description: Some("Original brief".to_owned()),
        assignees: Assignees::single(UserId::from(DESIGNER)),
        assignee_names: vec![format!("User {DESIGNER}")],
        project_id: None,
        project_name: None,
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        due_date: epoch() + TimeDelta::days(3),
        created_by: UserId::from(MANAGER),
        created_by_name: Some(format!("User {MANAGER}")),
        created_at: epoch() - TimeDelta::days(1),
        updated_at: None,
        design_type: None,
        checklist: Checklist::default(),
        allocated_hours: None,
        time_spent_ms: 0,
        timer: TimerState::Stopped,
        file: None,
    }
}

pub fn build(data: PersistedTaskData) -> Task {
    Task::from_persisted(data).expect("valid task record")
}

pub fn task(id: &str) -> Task {
    build(task_data(id))
}

/// Workflow with four users, signed in as [`DESIGNER`].
pub fn workflow(clock: &Arc<FixedClock>) -> InMemoryWorkflow<FixedClock> {
    let directory = InMemoryUserDirectory::new();
    for (id, role) in [
        (DESIGNER, Role::Designer),
        (OTHER_DESIGNER, Role::Designer),
        (MANAGER, Role::Manager),
        (MARKETER, Role::DigitalMarketer),
    ] {
        directory.insert(user(id, role)).expect("insert user");
    }
    directory
        .sign_in(&UserId::from(DESIGNER))
        .expect("sign in");
    InMemoryWorkflow::new(directory, Arc::clone(clock))
}

pub fn sign_in(workflow: &InMemoryWorkflow<FixedClock>, id: &str) {
    workflow
        .directory()
        .sign_in(&UserId::from(id))
        .expect("sign in");
}
