//! Workflow roles and the privileges attached to them.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Role held by a user of the approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    /// Produces design work.
    Designer,
    /// Supplies content and opens projects.
    DigitalMarketer,
    /// Administers the system and reviews work.
    Admin,
    /// Reviews designs at the graphic-design stage.
    GraphicDesigner,
    /// Implements approved web designs.
    FrontendDeveloper,
    /// Reviews work and manages assignments.
    Manager,
    /// Maintains automation and reporting.
    PythonDeveloper,
    /// Executive viewer.
    Ceo,
    /// External customer approving the final design.
    Client,
}

impl Role {
    /// Returns the canonical wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Designer => "Designer",
            Self::DigitalMarketer => "Digital Marketer",
            Self::Admin => "Admin",
            Self::GraphicDesigner => "Graphic Designer",
            Self::FrontendDeveloper => "Frontend Developer",
            Self::Manager => "Manager",
            Self::PythonDeveloper => "Python Developer",
            Self::Ceo => "CEO",
            Self::Client => "Client",
        }
    }

    /// Returns whether the role reviews work and may act on any task.
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Returns whether the role may create tasks that are not linked to a
    /// project.
    #[must_use]
    pub const fn can_create_standalone_tasks(self) -> bool {
        matches!(self, Self::Admin | Self::Manager | Self::DigitalMarketer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "designer" => Ok(Self::Designer),
            "digital marketer" => Ok(Self::DigitalMarketer),
            "admin" => Ok(Self::Admin),
            "graphic designer" => Ok(Self::GraphicDesigner),
            "frontend developer" => Ok(Self::FrontendDeveloper),
            "manager" => Ok(Self::Manager),
            "python developer" => Ok(Self::PythonDeveloper),
            "ceo" => Ok(Self::Ceo),
            "client" => Ok(Self::Client),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ParseRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_owned()
    }
}

/// Error returned when a role name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
