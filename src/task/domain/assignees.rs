//! Non-empty assignee collections.

use super::TaskDomainError;
use crate::identity::domain::UserId;
use serde::{Deserialize, Serialize};

/// The users a task is assigned to.
///
/// Always holds at least one user and never holds the same user twice.
/// Order is preserved for display but carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<UserId>", into = "Vec<UserId>")]
pub struct Assignees(Vec<UserId>);

impl Assignees {
    /// Builds an assignee set, dropping duplicates and blank identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyAssignees`] when no usable identifier
    /// remains.
    pub fn new(ids: impl IntoIterator<Item = UserId>) -> Result<Self, TaskDomainError> {
        let mut unique: Vec<UserId> = Vec::new();
        for id in ids {
            if !id.as_str().is_empty() && !unique.contains(&id) {
                unique.push(id);
            }
        }
        if unique.is_empty() {
            return Err(TaskDomainError::EmptyAssignees);
        }
        Ok(Self(unique))
    }

    /// Builds a set holding a single user.
    #[must_use]
    pub fn single(id: UserId) -> Self {
        Self(vec![id])
    }

    /// Returns whether the user is one of the assignees.
    #[must_use]
    pub fn contains(&self, id: &UserId) -> bool {
        self.0.contains(id)
    }

    /// Iterates over the assignees in their stored order.
    pub fn iter(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter()
    }

    /// Returns the assignees as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[UserId] {
        &self.0
    }

    /// Returns the number of assignees; never zero.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<Vec<UserId>> for Assignees {
    type Error = TaskDomainError;

    fn try_from(value: Vec<UserId>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Assignees> for Vec<UserId> {
    fn from(value: Assignees) -> Self {
        value.0
    }
}

impl<'a> IntoIterator for &'a Assignees {
    type Item = &'a UserId;
    type IntoIter = std::slice::Iter<'a, UserId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
