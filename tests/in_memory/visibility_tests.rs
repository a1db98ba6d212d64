//! Integration tests for task visibility and the user directory.

use super::helpers::{ADMIN, DESIGNER, MANAGER, SECOND_DESIGNER, Studio, studio};
use rstest::rstest;
use std::sync::Arc;
use studioflow::error::ApiError;
use studioflow::identity::ports::UserDirectory;
use studioflow::task::{ports::TaskApi, services::TaskCatalogService};

#[rstest]
#[tokio::test]
async fn designers_only_see_their_own_tasks(studio: Studio) {
    let mine = studio.project_task("Rebrand poster", &[DESIGNER], 4.0).await;
    studio
        .project_task("Rebrand flyer", &[SECOND_DESIGNER], 2.0)
        .await;

    studio.act_as(DESIGNER);
    let visible = studio.workflow.list_tasks().await.expect("list tasks");

    assert_eq!(visible.len(), 1);
    assert_eq!(visible.first().map(|task| task.id()), Some(mine.id()));
    let hidden = studio
        .workflow
        .list_tasks()
        .await
        .expect("list tasks")
        .into_iter()
        .any(|task| task.title() == "Rebrand flyer");
    assert!(!hidden);
}

#[rstest]
#[tokio::test]
async fn elevated_roles_see_every_task(studio: Studio) {
    studio.project_task("Rebrand poster", &[DESIGNER], 4.0).await;
    studio
        .project_task("Rebrand flyer", &[SECOND_DESIGNER], 2.0)
        .await;

    studio.act_as(ADMIN);
    assert_eq!(studio.workflow.list_tasks().await.expect("list").len(), 2);
    studio.act_as(MANAGER);
    assert_eq!(studio.workflow.list_tasks().await.expect("list").len(), 2);
}

#[rstest]
#[tokio::test]
async fn records_carry_resolved_names(studio: Studio) {
    let created = studio
        .project_task("Rebrand poster", &[DESIGNER, SECOND_DESIGNER], 4.0)
        .await;

    assert_eq!(created.assignee_label(), "Dana Designer, Devi Designer");
    assert_eq!(created.created_by_name(), Some("Mo Manager"));
    assert_eq!(created.project_name(), Some("Rebrand"));
}

#[rstest]
#[tokio::test]
async fn signed_out_caller_is_unauthenticated(studio: Studio) {
    studio
        .workflow
        .directory()
        .sign_out()
        .expect("sign out");

    let result = studio.workflow.list_tasks().await;

    assert!(matches!(result, Err(ApiError::Unauthenticated)));
    assert!(matches!(
        studio.workflow.current_user().await,
        Err(ApiError::Unauthenticated)
    ));
}

#[rstest]
#[tokio::test]
async fn assignable_users_exclude_inactive_accounts(studio: Studio) {
    studio.act_as(MANAGER);
    let catalog = TaskCatalogService::new(
        Arc::clone(&studio.workflow),
        Arc::clone(&studio.workflow),
    );

    let users = catalog.assignable_users().await.expect("users");

    assert_eq!(users.len(), 4);
    assert!(users.iter().all(|user| user.is_active()));
    assert_eq!(
        studio.workflow.current_user().await.expect("signed in"),
        studio.user(MANAGER)
    );
}
