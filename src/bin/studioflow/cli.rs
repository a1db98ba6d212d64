//! Command-line surface of the `studioflow` binary.

use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI parser.
#[derive(Debug, Parser)]
#[command(name = "studioflow", version, about = "Design-studio task workflow client")]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Override `api.base_url`.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the log filter (e.g. `debug`).
    #[arg(long, global = true)]
    pub log: Option<String>,
}

/// Top-level command tree.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Task operations.
    Tasks {
        /// Task action.
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// User directory operations.
    Users {
        /// User action.
        #[command(subcommand)]
        action: UserCommands,
    },
}

/// Task commands.
#[derive(Debug, Clone, Subcommand)]
pub enum TaskCommands {
    /// List visible tasks.
    List,
    /// Show urgent tasks.
    Reminders,
    /// Show one task with its timer, checklist and upload state.
    Show {
        /// Task identifier.
        id: String,
    },
    /// Start or resume the timer.
    Start {
        /// Task identifier.
        id: String,
    },
    /// Pause the timer.
    Pause {
        /// Task identifier.
        id: String,
    },
    /// Tick or untick a checklist item (zero-based index).
    Check {
        /// Task identifier.
        id: String,
        /// Checklist item index.
        index: usize,
    },
    /// Send a completed task back for rework.
    Rework {
        /// Task identifier.
        id: String,
        /// Instructions for the assignees.
        #[arg(long, default_value = "")]
        remarks: String,
        /// Users to assign; defaults to the current assignees.
        #[arg(long = "assign", num_args = 1..)]
        assign: Vec<String>,
        /// New due date (YYYY-MM-DD); defaults to the current due date.
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Upload completed work.
    Upload {
        /// Task identifier.
        id: String,
        /// File to upload.
        path: Utf8PathBuf,
    },
    /// Download the uploaded work of a task.
    Download {
        /// Task identifier.
        id: String,
        /// Destination file.
        path: Utf8PathBuf,
    },
    /// Delete a task.
    Delete {
        /// Task identifier.
        id: String,
    },
}

/// User commands.
#[derive(Debug, Clone, Subcommand)]
pub enum UserCommands {
    /// List users that tasks can be assigned to.
    List,
}
