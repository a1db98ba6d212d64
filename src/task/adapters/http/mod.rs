//! REST adapters for the task and file ports.

mod api;
mod record;

pub use api::HttpTaskApi;
pub use record::{AssignedTo, RecordError, TaskRecord, parse_timestamp};
