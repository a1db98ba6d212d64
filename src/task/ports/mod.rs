//! Port contracts for the remote task and file services.
//!
//! Ports define transport-agnostic interfaces used by task services.

pub mod api;

pub use api::{FileApi, TaskApi};
