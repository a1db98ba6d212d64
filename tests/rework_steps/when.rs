//! When steps for rework BDD scenarios.

use super::world::{ReworkWorld, run_async};
use chrono::NaiveDate;
use rstest_bdd_macros::when;
use studioflow::identity::domain::UserId;

#[when(r#"the manager requests rework with remarks "{remarks}" for "{assignee}" due "{due}""#)]
fn request_rework(
    world: &mut ReworkWorld,
    remarks: String,
    assignee: String,
    due: String,
) -> Result<(), eyre::Report> {
    let due_date = NaiveDate::parse_from_str(&due, "%Y-%m-%d")
        .map_err(|err| eyre::eyre!("invalid due date in scenario: {err}"))?;
    let controller = world.controller_mut()?;
    controller.begin_rework();
    let form = controller
        .rework_form_mut()
        .ok_or_else(|| eyre::eyre!("rework form did not open"))?;
    form.remarks = remarks;
    form.reassign_to = vec![UserId::new(assignee)];
    form.due_date = Some(due_date);
    let outcome = run_async(controller.submit_rework());
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when("the manager submits the rework form without remarks")]
fn submit_without_remarks(world: &mut ReworkWorld) -> Result<(), eyre::Report> {
    let controller = world.controller_mut()?;
    controller.begin_rework();
    let outcome = run_async(controller.submit_rework());
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when("the designer tries to open the rework form")]
fn designer_opens_rework(world: &mut ReworkWorld) -> Result<(), eyre::Report> {
    let outcome = world.controller_mut()?.begin_rework();
    world.last_outcome = Some(outcome);
    Ok(())
}
