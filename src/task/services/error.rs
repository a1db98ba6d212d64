//! Errors reported by task services.

use crate::error::ApiError;
use crate::task::domain::{ReworkValidationError, TaskDomainError};
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Clone, Error)]
pub enum TaskServiceError {
    /// A domain rule rejected the request before it was sent.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The remote service rejected the request or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A form was submitted with missing fields.
    #[error(transparent)]
    Validation(#[from] ReworkValidationError),
    /// The viewer lacks the capability for the action.
    #[error("not permitted to {0}")]
    NotPermitted(&'static str),
    /// An update carried no changes.
    #[error("update contains no changes")]
    EmptyUpdate,
}

impl TaskServiceError {
    /// Returns the server-reported detail, if the server produced one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api(err) => err.detail(),
            _ => None,
        }
    }

    /// Returns a message for the control that triggered the request.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
