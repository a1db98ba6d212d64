//! Shared REST plumbing for the remote workflow service.
//!
//! Every adapter goes through [`ApiClient`], which attaches the bearer
//! credential, logs each exchange and turns non-success responses into
//! [`crate::error::ApiError`] values.

mod client;
mod credential;
mod response;

pub use client::ApiClient;
pub use credential::BearerToken;
pub use response::{check_response, extract_detail};
