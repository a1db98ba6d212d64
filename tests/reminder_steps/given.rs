//! Given steps for reminder banner BDD scenarios.

use super::world::{ReminderWorld, run_async};
use crate::helpers::{DESIGNER, MANAGER, PROJECT};
use chrono::TimeDelta;
use eyre::WrapErr;
use mockable::Clock;
use rstest_bdd_macros::given;
use studioflow::identity::domain::UserId;
use studioflow::task::{
    domain::{Assignees, NewTask, ProjectId, Task, TaskStatus, TaskUpdate},
    ports::TaskApi,
};

fn create_due_in(world: &ReminderWorld, title: &str, hours: i64) -> Result<Task, eyre::Report> {
    world.studio.act_as(MANAGER);
    let due = world.studio.clock.utc() + TimeDelta::hours(hours);
    let task = NewTask::new(title, Assignees::single(UserId::from(DESIGNER)), due)
        .wrap_err("build scenario task")?
        .with_project(ProjectId::from(PROJECT));
    run_async(world.studio.workflow.create_task(&task)).wrap_err("create scenario task")
}

#[given(r#"a task "{title}" due in {hours:i64} hours"#)]
fn task_due_in(world: &mut ReminderWorld, title: String, hours: i64) -> Result<(), eyre::Report> {
    create_due_in(world, &title, hours)?;
    Ok(())
}

#[given(r#"a completed task "{title}" due in {hours:i64} hours"#)]
fn completed_task_due_in(
    world: &mut ReminderWorld,
    title: String,
    hours: i64,
) -> Result<(), eyre::Report> {
    let created = create_due_in(world, &title, hours)?;
    run_async(world.studio.workflow.update_task(
        created.id(),
        &TaskUpdate::new().status(TaskStatus::Completed),
    ))
    .wrap_err("complete scenario task")?;
    Ok(())
}
