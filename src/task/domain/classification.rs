//! Priority and design-type classification of tasks.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency assigned by the task creator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Needs immediate attention.
    Urgent,
}

impl TaskPriority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(TaskDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

/// Kind of design deliverable a task produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignType {
    /// Web page design.
    Webdesign,
    /// Logo; carries the mandatory logo checklist.
    Logo,
    /// Poster.
    Poster,
    /// Brochure.
    Brochure,
    /// Flyers.
    Flyers,
    /// Video.
    Video,
    /// Name board.
    Nameboard,
    /// Letterhead.
    Letterhead,
}

impl DesignType {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Webdesign => "webdesign",
            Self::Logo => "logo",
            Self::Poster => "poster",
            Self::Brochure => "brochure",
            Self::Flyers => "flyers",
            Self::Video => "video",
            Self::Nameboard => "nameboard",
            Self::Letterhead => "letterhead",
        }
    }
}

impl fmt::Display for DesignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DesignType {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "webdesign" | "webpage" => Ok(Self::Webdesign),
            "logo" => Ok(Self::Logo),
            "poster" => Ok(Self::Poster),
            "brochure" => Ok(Self::Brochure),
            "flyers" => Ok(Self::Flyers),
            "video" => Ok(Self::Video),
            "nameboard" => Ok(Self::Nameboard),
            "letterhead" => Ok(Self::Letterhead),
            _ => Err(TaskDomainError::UnknownDesignType(value.to_owned())),
        }
    }
}
