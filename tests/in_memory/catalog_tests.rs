//! Integration tests for the task management operations.

use super::helpers::{
    ADMIN, DESIGNER, MANAGER, ManualClock, PROJECT, SECOND_DESIGNER, Studio, studio,
};
use chrono::TimeDelta;
use mockable::Clock;
use rstest::rstest;
use std::sync::Arc;
use studioflow::error::ApiError;
use studioflow::identity::domain::UserId;
use studioflow::task::{
    adapters::memory::InMemoryWorkflow,
    domain::{
        Assignees, Checklist, DesignType, LOGO_CHECKPOINTS, NewTask, ProjectId, TaskPriority,
        TaskStatus, TaskUpdate,
    },
    services::{TaskCatalogService, TaskServiceError},
};

type Catalog = TaskCatalogService<InMemoryWorkflow<ManualClock>, InMemoryWorkflow<ManualClock>>;

fn catalog(studio: &Studio) -> Catalog {
    TaskCatalogService::new(Arc::clone(&studio.workflow), Arc::clone(&studio.workflow))
}

fn logo_task(studio: &Studio) -> NewTask {
    NewTask::new(
        "  Rebrand logo  ",
        Assignees::single(UserId::from(DESIGNER)),
        studio.clock.utc() + TimeDelta::days(7),
    )
    .expect("valid title")
    .with_project(ProjectId::from(PROJECT))
    .with_priority(TaskPriority::High)
    .with_design_type(DesignType::Logo)
}

#[rstest]
#[tokio::test]
async fn created_logo_task_carries_full_checklist(studio: Studio) {
    studio.act_as(MANAGER);

    let created = catalog(&studio)
        .create(&logo_task(&studio))
        .await
        .expect("create");

    assert_eq!(created.title(), "Rebrand logo");
    assert_eq!(created.priority(), TaskPriority::High);
    assert_eq!(created.checklist(), &Checklist::for_design_type(Some(DesignType::Logo)));
    assert_eq!(created.checklist().len(), LOGO_CHECKPOINTS.len());
    let listed = catalog(&studio).list().await.expect("list");
    assert_eq!(listed, vec![created]);
}

#[rstest]
#[tokio::test]
async fn designers_need_a_project(studio: Studio) {
    studio.act_as(DESIGNER);
    let standalone = NewTask::new(
        "Side quest",
        Assignees::single(UserId::from(DESIGNER)),
        studio.clock.utc(),
    )
    .expect("valid title");

    let result = catalog(&studio).create(&standalone).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Api(ApiError::Forbidden(_)))
    ));
}

#[rstest]
#[tokio::test]
async fn update_returns_refetched_task(studio: Studio) {
    let task = studio.project_task("Poster", &[DESIGNER], 2.0).await;
    let reassigned = Assignees::new([UserId::from(DESIGNER), UserId::from(SECOND_DESIGNER)])
        .expect("assignees");

    let updated = catalog(&studio)
        .update(
            task.id(),
            &TaskUpdate::new()
                .assigned_to(reassigned)
                .priority(TaskPriority::Urgent)
                .status(TaskStatus::Completed),
        )
        .await
        .expect("update");

    assert_eq!(updated.priority(), TaskPriority::Urgent);
    assert_eq!(updated.status(), TaskStatus::Completed);
    assert_eq!(updated.assignee_label(), "Dana Designer, Devi Designer");
    assert_eq!(updated.updated_at(), Some(studio.clock.utc()));
}

#[rstest]
#[tokio::test]
async fn admin_deletes_designer_cannot(studio: Studio) {
    let task = studio.project_task("Poster", &[DESIGNER], 2.0).await;

    studio.act_as(DESIGNER);
    let refused = catalog(&studio).delete(&studio.user(DESIGNER), &task).await;
    assert!(matches!(refused, Err(TaskServiceError::NotPermitted(_))));

    studio.act_as(ADMIN);
    catalog(&studio)
        .delete(&studio.user(ADMIN), &task)
        .await
        .expect("admin deletes");
    let gone = catalog(&studio).get(task.id()).await;
    assert!(matches!(
        gone,
        Err(TaskServiceError::Api(ApiError::NotFound(_)))
    ));
}
