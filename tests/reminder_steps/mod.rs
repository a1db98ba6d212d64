//! Step definitions for reminder banner BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
