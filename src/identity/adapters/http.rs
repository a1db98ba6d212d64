//! REST adapter for the user directory.

use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::identity::{
    domain::{Role, User},
    ports::UserDirectory,
};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: String,
    name: String,
    email: String,
    role: String,
    #[serde(default = "default_active")]
    is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl TryFrom<UserRecord> for User {
    type Error = ApiError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let role = Role::try_from(record.role.as_str())
            .map_err(|err| ApiError::Decode(format!("user {}: {err}", record.id)))?;
        Ok(Self::new(record.id, record.name, record.email, role).with_active(record.is_active))
    }
}

/// User directory backed by `GET /users/` and `GET /auth/me`.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: ApiClient,
}

impl HttpUserDirectory {
    /// Wraps an authenticated client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn current_user(&self) -> ApiResult<User> {
        let record: UserRecord = self.client.get_json("/auth/me").await?;
        User::try_from(record)
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        let records: Vec<UserRecord> = self.client.get_json("/users/").await?;
        records.into_iter().map(User::try_from).collect()
    }
}
