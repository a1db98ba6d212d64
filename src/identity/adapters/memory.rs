//! In-memory user directory.

use crate::error::{ApiError, ApiResult};
use crate::identity::{
    domain::{User, UserId},
    ports::UserDirectory,
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory user directory.
///
/// Clones share the same state, so a task adapter and a test can observe the
/// same set of users and the same signed-in user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    users: Vec<User>,
    signed_in: Option<UserId>,
}

fn lock_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryUserDirectory {
    /// Creates an empty directory with nobody signed in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the state lock is poisoned.
    pub fn insert(&self, user: User) -> ApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.users.retain(|existing| existing.id() != user.id());
        state.users.push(user);
        Ok(())
    }

    /// Marks the given user as the owner of the current credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the user is unknown.
    pub fn sign_in(&self, id: &UserId) -> ApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.users.iter().any(|user| user.id() == id) {
            return Err(ApiError::NotFound(format!("User with ID {id} not found")));
        }
        state.signed_in = Some(id.clone());
        Ok(())
    }

    /// Clears the signed-in user, simulating an expired credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the state lock is poisoned.
    pub fn sign_out(&self) -> ApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.signed_in = None;
        Ok(())
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the state lock is poisoned.
    pub fn find(&self, id: &UserId) -> ApiResult<Option<User>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.iter().find(|user| user.id() == id).cloned())
    }

    /// Returns the signed-in user without going through the async port.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] when nobody is signed in.
    pub fn signed_in(&self) -> ApiResult<User> {
        let state = self.state.read().map_err(lock_error)?;
        let id = state.signed_in.as_ref().ok_or(ApiError::Unauthenticated)?;
        state
            .users
            .iter()
            .find(|user| user.id() == id)
            .cloned()
            .ok_or(ApiError::Unauthenticated)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn current_user(&self) -> ApiResult<User> {
        self.signed_in()
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        let state = self.state.read().map_err(lock_error)?;
        if state.signed_in.is_none() {
            return Err(ApiError::Unauthenticated);
        }
        Ok(state.users.clone())
    }
}
