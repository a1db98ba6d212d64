//! Directory port used to resolve the caller and list assignable users.

use crate::error::ApiResult;
use crate::identity::domain::User;
use async_trait::async_trait;

/// Read-only access to the remote user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolves the user that owns the current credential.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError::Unauthenticated`] when the
    /// credential is missing or expired.
    async fn current_user(&self) -> ApiResult<User>;

    /// Lists the users visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ApiError`] when the request fails.
    async fn list_users(&self) -> ApiResult<Vec<User>>;
}
