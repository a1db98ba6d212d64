//! Then steps for rework BDD scenarios.

use super::world::ReworkWorld;
use rstest_bdd_macros::then;
use studioflow::identity::domain::UserId;
use studioflow::task::{
    domain::TaskStatus,
    services::{Notice, Outcome},
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &ReworkWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let actual = world.controller()?.task().status();
    eyre::ensure!(
        actual == expected,
        "expected status {expected}, found {actual}"
    );
    Ok(())
}

#[then(r#"the task is assigned to "{assignee}""#)]
fn task_is_assigned_to(world: &ReworkWorld, assignee: String) -> Result<(), eyre::Report> {
    let task = world.controller()?.task();
    eyre::ensure!(
        task.assignees().as_slice() == [UserId::new(assignee.as_str())],
        "expected only {assignee}, found {:?}",
        task.assignees()
    );
    Ok(())
}

#[then(r#"the description starts with "{prefix}""#)]
fn description_starts_with(world: &ReworkWorld, prefix: String) -> Result<(), eyre::Report> {
    let description = world
        .controller()?
        .task()
        .description()
        .ok_or_else(|| eyre::eyre!("task has no description"))?;
    eyre::ensure!(
        description.starts_with(&prefix),
        "description does not start with {prefix:?}: {description:?}"
    );
    Ok(())
}

#[then(r#"the notice reads "{message}""#)]
fn notice_reads(world: &ReworkWorld, message: String) -> Result<(), eyre::Report> {
    let notice = world
        .controller()?
        .notice()
        .map(Notice::message)
        .ok_or_else(|| eyre::eyre!("no notice shown"))?;
    eyre::ensure!(notice == message, "expected notice {message:?}, found {notice:?}");
    Ok(())
}

#[then("the rework form is still open")]
fn rework_form_open(world: &ReworkWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.controller()?.rework_form().is_some(),
        "rework form was closed"
    );
    Ok(())
}

#[then("the action is not permitted")]
fn action_not_permitted(world: &ReworkWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no action taken"))?;
    eyre::ensure!(
        *outcome == Outcome::NotPermitted,
        "expected NotPermitted, got {outcome:?}"
    );
    eyre::ensure!(
        world.controller()?.rework_form().is_none(),
        "rework form opened for a designer"
    );
    Ok(())
}
