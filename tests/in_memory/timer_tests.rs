//! Integration tests for server-side timer accounting.

use super::helpers::{DESIGNER, MANAGER, SECOND_DESIGNER, Studio, studio};
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;
use studioflow::error::ApiError;
use studioflow::task::{
    domain::{TaskStatus, TaskUpdate, TimerAction, timer},
    ports::TaskApi,
    services::TaskTimerService,
};

const MINUTE_MS: i64 = 60 * 1000;

#[rstest]
#[tokio::test]
async fn start_marks_task_in_progress(studio: Studio) {
    let task = studio.project_task("Poster", &[DESIGNER], 2.0).await;
    studio.act_as(DESIGNER);
    let timers = TaskTimerService::new(Arc::clone(&studio.workflow));

    let started = timers.start(task.id()).await.expect("start");

    assert_eq!(started.status(), TaskStatus::InProgress);
    assert_eq!(started.timer().started_at(), Some(studio.clock.utc()));
}

#[rstest]
#[tokio::test]
async fn pause_folds_elapsed_time(studio: Studio) {
    let task = studio.project_task("Poster", &[DESIGNER], 2.0).await;
    studio.act_as(DESIGNER);
    let timers = TaskTimerService::new(Arc::clone(&studio.workflow));

    timers.start(task.id()).await.expect("start");
    studio.clock.advance(TimeDelta::minutes(25));
    let paused = timers.pause(task.id()).await.expect("pause");

    assert!(!paused.timer().is_running());
    assert_eq!(paused.time_spent_ms(), 25 * MINUTE_MS);
    assert_eq!(
        timer::remaining(&paused, studio.clock.utc()),
        Some(Duration::from_secs(95 * 60))
    );

    studio.clock.advance(TimeDelta::minutes(10));
    timers.start(task.id()).await.expect("resume");
    studio.clock.advance(TimeDelta::minutes(5));
    let resumed = timers.pause(task.id()).await.expect("pause");
    assert_eq!(resumed.time_spent_ms(), 30 * MINUTE_MS);
}

#[rstest]
#[tokio::test]
async fn pausing_a_stopped_timer_changes_nothing(studio: Studio) {
    let task = studio.project_task("Poster", &[DESIGNER], 2.0).await;
    studio.act_as(DESIGNER);

    studio
        .workflow
        .toggle_timer(task.id(), TimerAction::Pause)
        .await
        .expect("pause accepted");

    let stored = studio.workflow.find_task(task.id()).await.expect("stored");
    assert_eq!(stored.time_spent_ms(), 0);
    assert_eq!(stored.status(), TaskStatus::Pending);
    assert_eq!(stored.updated_at(), None);
}

#[rstest]
#[tokio::test]
async fn one_running_timer_per_assignee(studio: Studio) {
    let poster = studio.project_task("Poster", &[DESIGNER], 2.0).await;
    let flyer = studio.project_task("Flyer", &[DESIGNER], 2.0).await;
    let other = studio
        .project_task("Banner", &[SECOND_DESIGNER], 2.0)
        .await;
    studio.act_as(SECOND_DESIGNER);
    studio
        .workflow
        .toggle_timer(other.id(), TimerAction::Start)
        .await
        .expect("start other");

    studio.act_as(DESIGNER);
    let timers = TaskTimerService::new(Arc::clone(&studio.workflow));
    timers.start(poster.id()).await.expect("start poster");
    studio.clock.advance(TimeDelta::minutes(12));
    timers.start(flyer.id()).await.expect("start flyer");

    studio.act_as(MANAGER);
    let poster_now = studio.workflow.find_task(poster.id()).await.expect("poster");
    let flyer_now = studio.workflow.find_task(flyer.id()).await.expect("flyer");
    let other_now = studio.workflow.find_task(other.id()).await.expect("other");

    assert!(!poster_now.timer().is_running());
    assert_eq!(poster_now.time_spent_ms(), 12 * MINUTE_MS);
    assert!(flyer_now.timer().is_running());
    assert!(other_now.timer().is_running());
}

#[rstest]
#[tokio::test]
async fn strangers_cannot_touch_the_timer(studio: Studio) {
    let task = studio.project_task("Poster", &[DESIGNER], 2.0).await;
    studio.act_as(SECOND_DESIGNER);

    let result = studio
        .workflow
        .toggle_timer(task.id(), TimerAction::Start)
        .await;

    assert!(matches!(result, Err(ApiError::Forbidden(_))));
}

#[rstest]
#[tokio::test]
async fn completed_task_keeps_status_when_timer_starts(studio: Studio) {
    let task = studio.project_task("Poster", &[DESIGNER], 2.0).await;
    studio
        .workflow
        .update_task(
            task.id(),
            &TaskUpdate::new().status(TaskStatus::Completed),
        )
        .await
        .expect("complete");
    studio.act_as(DESIGNER);

    studio
        .workflow
        .toggle_timer(task.id(), TimerAction::Start)
        .await
        .expect("start");

    let stored = studio.workflow.find_task(task.id()).await.expect("stored");
    assert_eq!(stored.status(), TaskStatus::Completed);
    assert!(!timer::needs_refresh(&stored));
}
