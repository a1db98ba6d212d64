//! Adapter implementations for the user directory.

pub mod http;
pub mod memory;
