//! Integration tests for completed-work uploads and downloads.

use super::helpers::{DESIGNER, MANAGER, SECOND_DESIGNER, Studio, start_of_day, studio};
use rstest::rstest;
use std::sync::Arc;
use studioflow::error::ApiError;
use studioflow::task::{
    domain::{FileId, FileUpload},
    ports::{FileApi, TaskApi},
    services::{Outcome, TaskDetailController},
};

fn artwork(name: &str, bytes: &[u8]) -> FileUpload {
    FileUpload::new(name, bytes.to_vec())
        .expect("named file")
        .with_content_type("image/png")
}

#[rstest]
#[tokio::test]
async fn uploaded_work_downloads_intact(studio: Studio) {
    let task = studio.project_task("Poster", &[DESIGNER], 2.0).await;
    studio.act_as(DESIGNER);

    studio
        .workflow
        .upload_task_file(task.id(), artwork("poster.png", b"\x89PNG"))
        .await
        .expect("upload");
    let stored = studio.workflow.find_task(task.id()).await.expect("stored");
    let reference = stored.file().expect("file reference");
    assert_eq!(reference.filename, "poster.png");
    assert_eq!(reference.uploaded_at, Some(start_of_day()));

    studio.act_as(MANAGER);
    let downloaded = studio
        .workflow
        .download_file(&reference.file_id)
        .await
        .expect("download");
    assert_eq!(downloaded.bytes, b"\x89PNG".to_vec());
    assert_eq!(downloaded.content_type, "image/png");
}

#[rstest]
#[tokio::test]
async fn replacing_work_points_at_the_new_file(studio: Studio) {
    let task = studio.project_task("Poster", &[DESIGNER], 2.0).await;
    studio.act_as(DESIGNER);
    studio
        .workflow
        .upload_task_file(task.id(), artwork("draft.png", b"v1"))
        .await
        .expect("first upload");
    studio
        .workflow
        .upload_task_file(task.id(), artwork("final.png", b"v2"))
        .await
        .expect("second upload");

    let stored = studio.workflow.find_task(task.id()).await.expect("stored");
    let reference = stored.file().expect("file reference");
    let preview = studio
        .workflow
        .preview_file(&reference.file_id)
        .await
        .expect("preview");

    assert_eq!(reference.filename, "final.png");
    assert_eq!(preview.bytes, b"v2".to_vec());
}

#[rstest]
#[tokio::test]
async fn strangers_cannot_upload(studio: Studio) {
    let task = studio.project_task("Poster", &[DESIGNER], 2.0).await;
    studio.act_as(SECOND_DESIGNER);

    let result = studio
        .workflow
        .upload_task_file(task.id(), artwork("poster.png", b"x"))
        .await;

    assert!(matches!(result, Err(ApiError::Forbidden(_))));
}

#[rstest]
#[tokio::test]
async fn unknown_file_is_not_found(studio: Studio) {
    studio.act_as(DESIGNER);
    let result = studio.workflow.download_file(&FileId::from("f-missing")).await;
    assert!(matches!(result, Err(ApiError::NotFound(detail)) if detail == "File not found"));
}

#[rstest]
#[tokio::test]
async fn controller_upload_survives_transient_failure(studio: Studio) {
    let task = studio.project_task("Poster", &[DESIGNER], 2.0).await;
    studio.act_as(DESIGNER);
    let mut controller = TaskDetailController::new(
        Arc::clone(&studio.workflow),
        Arc::clone(&studio.workflow),
        Arc::clone(&studio.clock),
        studio.user(DESIGNER),
        task,
    );
    controller.select_file(artwork("poster.png", b"x"));
    studio
        .workflow
        .fail_next(ApiError::Rejected {
            status: 503,
            detail: "Storage is read-only".to_owned(),
        })
        .expect("inject");

    assert_eq!(controller.upload().await, Outcome::Failed);
    assert_eq!(
        controller.notice().map(|notice| notice.message()),
        Some("Storage is read-only")
    );
    assert!(controller.task().file().is_none());

    assert_eq!(controller.upload().await, Outcome::Done(()));
    assert!(controller.task().file().is_some());
}
