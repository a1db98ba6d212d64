//! In-memory adapters for tests and offline use.

mod workflow;

pub use workflow::InMemoryWorkflow;
