//! Given steps for rework BDD scenarios.

use super::world::{ReworkWorld, run_async};
use crate::helpers::{DESIGNER, MANAGER};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use studioflow::task::{
    domain::{TaskStatus, TaskUpdate},
    ports::TaskApi,
};

#[given(r#"a completed task "{title}" assigned to "{assignee}""#)]
fn completed_task(
    world: &mut ReworkWorld,
    title: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let created = run_async(world.studio.project_task(&title, &[assignee.as_str()], 4.0));
    run_async(world.studio.workflow.update_task(
        created.id(),
        &TaskUpdate::new().status(TaskStatus::Completed),
    ))
    .wrap_err("complete task for rework scenario")?;
    let completed = run_async(world.studio.workflow.find_task(created.id()))
        .wrap_err("refetch completed task")?;
    world.task = Some(completed);
    Ok(())
}

#[given("the manager has the task open")]
fn manager_opens_task(world: &mut ReworkWorld) -> Result<(), eyre::Report> {
    world.open_as(MANAGER)
}

#[given("the designer has the task open")]
fn designer_opens_task(world: &mut ReworkWorld) -> Result<(), eyre::Report> {
    world.open_as(DESIGNER)
}
