//! Then steps for reminder banner BDD scenarios.

use super::world::ReminderWorld;
use rstest_bdd_macros::then;

#[then(r#"the banner lists "{titles}""#)]
fn banner_lists(world: &ReminderWorld, titles: String) -> Result<(), eyre::Report> {
    let listed: Vec<&str> = world
        .banner()?
        .entries()
        .iter()
        .map(|entry| entry.title.as_str())
        .collect();
    let expected: Vec<&str> = titles.split(", ").collect();
    eyre::ensure!(listed == expected, "expected {expected:?}, listed {listed:?}");
    Ok(())
}

#[then(r#""{title}" is marked "{marker}""#)]
fn entry_is_marked(
    world: &ReminderWorld,
    title: String,
    marker: String,
) -> Result<(), eyre::Report> {
    let entry = world
        .banner()?
        .entries()
        .iter()
        .find(|entry| entry.title == title)
        .ok_or_else(|| eyre::eyre!("{title} is not listed"))?;
    eyre::ensure!(
        entry.marker.label() == marker,
        "{title} is marked {}, expected {marker}",
        entry.marker.label()
    );
    Ok(())
}

#[then(r#"the headline reads "{headline}""#)]
fn headline_reads(world: &ReminderWorld, headline: String) -> Result<(), eyre::Report> {
    let actual = world.banner()?.headline();
    eyre::ensure!(actual == headline, "headline was {actual:?}");
    Ok(())
}

#[then("{count:usize} more urgent task is not listed")]
fn overflow_count(world: &ReminderWorld, count: usize) -> Result<(), eyre::Report> {
    let overflow = world.banner()?.overflow();
    eyre::ensure!(overflow == count, "expected {count} unlisted, found {overflow}");
    Ok(())
}

#[then("the banner is hidden")]
fn banner_hidden(world: &ReminderWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(!world.banner()?.is_visible(), "banner is visible");
    Ok(())
}
