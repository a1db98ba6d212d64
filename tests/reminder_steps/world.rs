//! Shared world state for reminder banner BDD scenarios.

use crate::helpers::{Studio, new_studio};
use rstest::fixture;
use studioflow::task::domain::ReminderBanner;

/// Scenario world for reminder behaviour tests.
pub struct ReminderWorld {
    pub studio: Studio,
    pub banner: Option<ReminderBanner>,
}

impl ReminderWorld {
    /// Creates a world around a freshly seeded studio.
    #[must_use]
    pub fn new() -> Self {
        Self {
            studio: new_studio(),
            banner: None,
        }
    }

    /// Returns the banner computed by the when step.
    pub fn banner(&self) -> Result<&ReminderBanner, eyre::Report> {
        self.banner
            .as_ref()
            .ok_or_else(|| eyre::eyre!("banner not computed in scenario world"))
    }
}

impl Default for ReminderWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReminderWorld {
    ReminderWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
