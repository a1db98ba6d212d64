//! Shared test helpers for in-memory workflow integration tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{Arc, Mutex};
use studioflow::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Role, User, UserId},
};
use studioflow::task::{
    adapters::memory::InMemoryWorkflow,
    domain::{AllocatedHours, Assignees, NewTask, ProjectId, Task},
    ports::TaskApi,
};

pub const DESIGNER: &str = "u-designer";
pub const SECOND_DESIGNER: &str = "u-designer-2";
pub const MANAGER: &str = "u-manager";
pub const ADMIN: &str = "u-admin";
pub const PROJECT: &str = "p-rebrand";

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    /// Freezes the clock at `at`.
    #[must_use]
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(Mutex::new(at))
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.0.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

/// Workflow service, its clock, and the seeded users.
pub struct Studio {
    pub clock: Arc<ManualClock>,
    pub workflow: Arc<InMemoryWorkflow<ManualClock>>,
}

impl Studio {
    /// Signs `id` in for the next calls.
    pub fn act_as(&self, id: &str) {
        self.workflow
            .directory()
            .sign_in(&UserId::from(id))
            .expect("sign in");
    }

    /// Returns the user record for `id`.
    #[must_use]
    pub fn user(&self, id: &str) -> User {
        self.workflow
            .directory()
            .find(&UserId::from(id))
            .expect("directory lock")
            .expect("seeded user")
    }

    /// Creates a project task as the manager, assigned to `assignees`.
    pub async fn project_task(&self, title: &str, assignees: &[&str], hours: f64) -> Task {
        self.act_as(MANAGER);
        let assigned = Assignees::new(assignees.iter().map(|id| UserId::from(*id)))
            .expect("at least one assignee");
        let task = NewTask::new(title, assigned, self.clock.utc() + TimeDelta::days(3))
            .expect("valid title")
            .with_project(ProjectId::from(PROJECT))
            .with_allocated_hours(AllocatedHours::new(hours).expect("positive allocation"));
        self.workflow.create_task(&task).await.expect("create task")
    }
}

/// Start of every scenario.
#[must_use]
pub fn start_of_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Provides a fresh studio for each test.
#[fixture]
pub fn studio() -> Studio {
    new_studio()
}

/// Builds a studio with two designers, a manager, an admin, one inactive
/// account and one project.
#[must_use]
pub fn new_studio() -> Studio {
    let clock = Arc::new(ManualClock::new(start_of_day()));
    let directory = InMemoryUserDirectory::new();
    for (id, name, role) in [
        (DESIGNER, "Dana Designer", Role::Designer),
        (SECOND_DESIGNER, "Devi Designer", Role::Designer),
        (MANAGER, "Mo Manager", Role::Manager),
        (ADMIN, "Ari Admin", Role::Admin),
    ] {
        directory
            .insert(User::new(id, name, format!("{id}@studio.test"), role))
            .expect("insert user");
    }
    directory
        .insert(
            User::new("u-former", "Former Staff", "former@studio.test", Role::Designer)
                .with_active(false),
        )
        .expect("insert user");
    let workflow = InMemoryWorkflow::new(directory, Arc::clone(&clock));
    workflow
        .insert_project(ProjectId::from(PROJECT), "Rebrand")
        .expect("insert project");
    Studio {
        clock,
        workflow: Arc::new(workflow),
    }
}
