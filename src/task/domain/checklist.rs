//! Mandatory checklists gating the upload of completed work.

use super::{DesignType, TaskDomainError};
use serde::{Deserialize, Serialize};

/// Requirements every logo deliverable is checked against.
pub const LOGO_CHECKPOINTS: [&str; 6] = [
    "vector source files",
    "colour variations",
    "monochrome version",
    "transparent background",
    "legible at small sizes",
    "font licences included",
];

/// A single checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Requirement text.
    pub title: String,
    /// Whether the assignee has ticked the item.
    #[serde(default)]
    pub completed: bool,
}

impl Checkpoint {
    /// Creates an unticked checkpoint.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }

    /// Returns the title with its first letter capitalised.
    #[must_use]
    pub fn display_title(&self) -> String {
        let mut chars = self.title.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

/// Ordered checklist attached to a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist(Vec<Checkpoint>);

impl Checklist {
    /// Wraps checkpoints in their given order.
    #[must_use]
    pub const fn new(items: Vec<Checkpoint>) -> Self {
        Self(items)
    }

    /// Returns the default checklist for a design type.
    ///
    /// Logo tasks get every [`LOGO_CHECKPOINTS`] item, unticked; other design
    /// types start without a checklist.
    #[must_use]
    pub fn for_design_type(design_type: Option<DesignType>) -> Self {
        match design_type {
            Some(DesignType::Logo) => Self(
                LOGO_CHECKPOINTS
                    .iter()
                    .map(|title| Checkpoint::new(*title))
                    .collect(),
            ),
            _ => Self::default(),
        }
    }

    /// Returns the checkpoints.
    #[must_use]
    pub fn items(&self) -> &[Checkpoint] {
        &self.0
    }

    /// Returns the number of checkpoints.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the checklist has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of ticked items.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|item| item.completed).count()
    }

    /// Returns whether the gate is open: no items, or every item ticked.
    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.0.iter().all(|item| item.completed)
    }

    /// Returns a copy with the item at `index` set to `completed`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CheckpointOutOfRange`] for an invalid index.
    pub fn with_completed(&self, index: usize, completed: bool) -> Result<Self, TaskDomainError> {
        let mut items = self.0.clone();
        let len = items.len();
        let item = items
            .get_mut(index)
            .ok_or(TaskDomainError::CheckpointOutOfRange { index, len })?;
        item.completed = completed;
        Ok(Self(items))
    }

    /// Returns a copy with the item at `index` flipped.
    ///
    /// Toggling the same index twice yields the original checklist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CheckpointOutOfRange`] for an invalid index.
    pub fn toggled(&self, index: usize) -> Result<Self, TaskDomainError> {
        let current = self
            .0
            .get(index)
            .ok_or(TaskDomainError::CheckpointOutOfRange {
                index,
                len: self.0.len(),
            })?;
        self.with_completed(index, !current.completed)
    }

    /// Checks the titles against the vocabulary required by the design type.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownLogoCheckpoint`] when a logo task
    /// carries an item outside [`LOGO_CHECKPOINTS`].
    pub fn validate_for(&self, design_type: Option<DesignType>) -> Result<(), TaskDomainError> {
        if design_type != Some(DesignType::Logo) {
            return Ok(());
        }
        match self
            .0
            .iter()
            .find(|item| !LOGO_CHECKPOINTS.contains(&item.title.as_str()))
        {
            Some(unknown) => Err(TaskDomainError::UnknownLogoCheckpoint(unknown.title.clone())),
            None => Ok(()),
        }
    }
}

impl From<Vec<Checkpoint>> for Checklist {
    fn from(value: Vec<Checkpoint>) -> Self {
        Self(value)
    }
}
