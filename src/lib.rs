//! Studioflow: client for a design-studio task approval workflow.
//!
//! This crate models the tasks that studio staff are assigned, talks to the
//! remote workflow service that owns them, and derives what the task screens
//! show: allocated-time countdowns, mandatory checklists gating uploads,
//! urgent-task reminders and the rework flow for completed work.
//!
//! # Architecture
//!
//! Studioflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the remote service
//! - **Adapters**: Concrete implementations of ports (REST, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Tasks, timers, checklists, reminders and rework
//! - [`identity`]: Users, roles and the user directory
//! - [`http`]: Authenticated REST client shared by the adapters
//! - [`config`]: Layered client configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod task;
pub mod telemetry;
