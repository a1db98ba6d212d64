//! When steps for reminder banner BDD scenarios.

use super::world::{ReminderWorld, run_async};
use crate::helpers::DESIGNER;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use std::sync::Arc;
use studioflow::task::services::ReminderService;

#[when("the designer checks the reminder banner")]
fn designer_checks_banner(world: &mut ReminderWorld) -> Result<(), eyre::Report> {
    world.studio.act_as(DESIGNER);
    let service = ReminderService::new(
        Arc::clone(&world.studio.workflow),
        Arc::clone(&world.studio.clock),
    );
    let banner = run_async(service.banner()).wrap_err("build reminder banner")?;
    world.banner = Some(banner);
    Ok(())
}
