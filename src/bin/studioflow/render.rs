//! Plain-text rendering of command results.

use chrono::{DateTime, Utc};
use std::io::{self, Write};
use studioflow::identity::domain::User;
use studioflow::task::{
    domain::{ReminderBanner, Task, TimerPanel},
    services::{CHECKLIST_WARNING, UploadBlock, UploadGate},
};

const DUE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn due(at: DateTime<Utc>) -> String {
    at.format(DUE_FORMAT).to_string()
}

/// Explains why the upload gate refused a file.
pub const fn upload_block(block: Option<UploadBlock>) -> &'static str {
    match block {
        Some(UploadBlock::NotPermitted) => "you may not upload work for this task",
        Some(UploadBlock::NoFileSelected) => "no file selected",
        Some(UploadBlock::Busy) => "another request is in progress",
        Some(UploadBlock::ChecklistIncomplete) => CHECKLIST_WARNING,
        None => "the upload was refused",
    }
}

/// Writes one line per task.
pub fn task_list(out: &mut impl Write, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "No tasks.");
    }
    for task in tasks {
        writeln!(
            out,
            "{id}  {status:<11}  {priority:<6}  due {due}  {title}",
            id = task.id(),
            status = task.status().label(),
            priority = task.priority().as_str(),
            due = due(task.due_date()),
            title = task.title(),
        )?;
    }
    Ok(())
}

/// Writes the reminder banner.
pub fn reminders(out: &mut impl Write, banner: &ReminderBanner) -> io::Result<()> {
    if !banner.is_visible() {
        return writeln!(out, "No urgent tasks.");
    }
    writeln!(out, "{}", banner.headline())?;
    for entry in banner.entries() {
        writeln!(
            out,
            "  [{marker}] {title} (due {due}, assigned by {by} to {to})",
            marker = entry.marker.label(),
            title = entry.title,
            due = due(entry.due_date),
            by = entry.assigned_by,
            to = entry.assigned_to,
        )?;
    }
    if banner.overflow() > 0 {
        writeln!(out, "  + {} more", banner.overflow())?;
    }
    Ok(())
}

/// Writes the detail view of one task.
pub fn task_detail(
    out: &mut impl Write,
    task: &Task,
    panel: &TimerPanel,
    gate: &UploadGate,
) -> io::Result<()> {
    writeln!(out, "{} [{}]", task.title(), task.id())?;
    writeln!(
        out,
        "Status: {}  Priority: {}  Due: {}",
        task.status().label(),
        task.priority().as_str(),
        due(task.due_date())
    )?;
    writeln!(out, "Assigned to: {}", task.assignee_label())?;
    if let Some(project) = task.project_name() {
        writeln!(out, "Project: {project}")?;
    }
    if let Some(description) = task.description() {
        writeln!(out, "\n{description}\n")?;
    }
    timer(out, panel)?;
    if !task.checklist().is_empty() {
        writeln!(
            out,
            "Checklist ({}/{}):",
            task.checklist().completed_count(),
            task.checklist().len()
        )?;
        for (index, item) in task.checklist().items().iter().enumerate() {
            let mark = if item.completed { 'x' } else { ' ' };
            writeln!(out, "  {index}. [{mark}] {}", item.display_title())?;
        }
    }
    if let Some(warning) = gate.warning() {
        writeln!(out, "Warning: {warning}")?;
    }
    if let Some(file) = task.file() {
        writeln!(out, "Completed work: {} ({})", file.filename, file.file_id)?;
    }
    Ok(())
}

fn timer(out: &mut impl Write, panel: &TimerPanel) -> io::Result<()> {
    if matches!(panel, TimerPanel::Hidden) {
        return Ok(());
    }
    write!(out, "Timer:")?;
    if let Some(text) = panel.status_text() {
        write!(out, " {text}")?;
    }
    if let Some(control) = panel.control() {
        write!(out, " [{}]", control.label())?;
    }
    writeln!(out)
}

/// Writes one line per user.
pub fn users(out: &mut impl Write, users: &[User]) -> io::Result<()> {
    for user in users {
        writeln!(out, "{}  {}  <{}>", user.id(), user.assignee_label(), user.email())?;
    }
    Ok(())
}
