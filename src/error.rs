//! Errors shared by every port that talks to the remote workflow service.

use std::sync::Arc;
use thiserror::Error;

/// Result type for remote service operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure reported by, or while reaching, the remote workflow service.
///
/// Authorization gaps that the client can predict are handled by hiding
/// controls; this type covers what only the server can decide.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The bearer credential is missing, invalid or expired.
    #[error("authentication required")]
    Unauthenticated,

    /// The caller is not allowed to perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The addressed resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server rejected the request for another reason.
    #[error("request rejected ({status}): {detail}")]
    Rejected {
        /// HTTP status code returned by the server.
        status: u16,
        /// Server-reported detail message.
        detail: String,
    },

    /// The request could not be delivered or the response not read.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns the server-reported detail, when the server produced one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Forbidden(detail) | Self::NotFound(detail) | Self::Rejected { detail, .. }
                if !detail.is_empty() =>
            {
                Some(detail)
            }
            _ => None,
        }
    }

    /// Returns a short message suitable for showing next to the control that
    /// triggered the request.
    #[must_use]
    pub fn user_message(&self) -> String {
        if let Some(detail) = self.detail() {
            return detail.to_owned();
        }
        match self {
            Self::Unauthenticated => "Your session has expired, please sign in again".to_owned(),
            Self::Forbidden(_) => "You are not allowed to do that".to_owned(),
            Self::NotFound(_) => "The item no longer exists".to_owned(),
            Self::Rejected { status, .. } => format!("Request failed ({status})"),
            Self::Transport(_) => "Could not reach the server".to_owned(),
            Self::Decode(_) => "The server sent an unexpected response".to_owned(),
        }
    }
}
