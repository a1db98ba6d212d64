//! Domain model for users and roles.

mod ids;
mod role;
mod user;

pub use ids::UserId;
pub use role::{ParseRoleError, Role};
pub use user::User;
