//! Shared world state for rework BDD scenarios.

use std::sync::Arc;

use crate::helpers::{ManualClock, Studio, new_studio};
use rstest::fixture;
use studioflow::task::{
    adapters::memory::InMemoryWorkflow,
    domain::Task,
    services::{Outcome, TaskDetailController},
};

/// Controller type driven by the scenarios.
pub type TestController =
    TaskDetailController<InMemoryWorkflow<ManualClock>, InMemoryWorkflow<ManualClock>, ManualClock>;

/// Scenario world for rework behaviour tests.
pub struct ReworkWorld {
    pub studio: Studio,
    pub task: Option<Task>,
    pub controller: Option<TestController>,
    pub last_outcome: Option<Outcome>,
}

impl ReworkWorld {
    /// Creates a world around a freshly seeded studio.
    #[must_use]
    pub fn new() -> Self {
        Self {
            studio: new_studio(),
            task: None,
            controller: None,
            last_outcome: None,
        }
    }

    /// Opens the scenario task as `viewer`.
    pub fn open_as(&mut self, viewer: &str) -> Result<(), eyre::Report> {
        let task = self
            .task
            .clone()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
        self.studio.act_as(viewer);
        self.controller = Some(TaskDetailController::new(
            Arc::clone(&self.studio.workflow),
            Arc::clone(&self.studio.workflow),
            Arc::clone(&self.studio.clock),
            self.studio.user(viewer),
            task,
        ));
        Ok(())
    }

    /// Returns the open controller.
    pub fn controller_mut(&mut self) -> Result<&mut TestController, eyre::Report> {
        self.controller
            .as_mut()
            .ok_or_else(|| eyre::eyre!("no task open in scenario world"))
    }

    /// Returns the open controller.
    pub fn controller(&self) -> Result<&TestController, eyre::Report> {
        self.controller
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no task open in scenario world"))
    }
}

impl Default for ReworkWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReworkWorld {
    ReworkWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
