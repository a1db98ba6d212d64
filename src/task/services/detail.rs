//! View model for the task detail screen.
//!
//! The controller owns the last server-confirmed task and replaces it only
//! with a refetch after a successful request. A failed request leaves the
//! task untouched and surfaces a [`Notice`]; an action the viewer is not
//! allowed to perform is a silent no-op.

use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

use super::{ChecklistService, ReworkService, TaskServiceError, TaskTimerService, UploadGate};
use crate::identity::domain::User;
use crate::task::{
    domain::{Capabilities, DownloadedFile, FileUpload, ReworkForm, Task, TimerPanel},
    ports::{FileApi, TaskApi},
};

/// Transient message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The action succeeded.
    Success(String),
    /// The action failed.
    Error(String),
}

impl Notice {
    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }
}

/// Result of a controller action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    /// The action completed.
    Done(T),
    /// The viewer may not perform the action; nothing happened.
    NotPermitted,
    /// The control is currently disabled; nothing was sent.
    Blocked,
    /// The action failed; see the notice.
    Failed,
}

impl<T> Outcome<T> {
    /// Returns whether the action completed.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}

const TIMER_START_FAILED: &str = "Failed to start timer";
const TIMER_PAUSE_FAILED: &str = "Failed to pause timer";
const CHECKLIST_FAILED: &str = "Failed to update checklist";
const NO_FILE_SELECTED: &str = "Please select a file first";
const UPLOAD_SUCCEEDED: &str = "File uploaded successfully!";
const UPLOAD_FAILED: &str = "Failed to upload file";
const DOWNLOAD_FAILED: &str = "Failed to download file";
const PREVIEW_FAILED: &str = "Failed to preview file";
const REWORK_SUCCEEDED: &str = "Task reassigned for rework successfully";
const REWORK_FAILED: &str = "Failed to reassign task";

/// Task detail view model.
pub struct TaskDetailController<A, F, C>
where
    A: TaskApi,
    F: FileApi,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    files: Arc<F>,
    clock: Arc<C>,
    timers: TaskTimerService<A>,
    checklists: ChecklistService<A>,
    rework: ReworkService<A, C>,
    viewer: User,
    task: Task,
    selected_file: Option<FileUpload>,
    rework_form: Option<ReworkForm>,
    busy: bool,
    notice: Option<Notice>,
}

impl<A, F, C> TaskDetailController<A, F, C>
where
    A: TaskApi,
    F: FileApi,
    C: Clock + Send + Sync,
{
    /// Opens the detail view of `task` for `viewer`.
    #[must_use]
    pub fn new(api: Arc<A>, files: Arc<F>, clock: Arc<C>, viewer: User, task: Task) -> Self {
        Self {
            timers: TaskTimerService::new(Arc::clone(&api)),
            checklists: ChecklistService::new(Arc::clone(&api)),
            rework: ReworkService::new(Arc::clone(&api), Arc::clone(&clock)),
            api,
            files,
            clock,
            viewer,
            task,
            selected_file: None,
            rework_form: None,
            busy: false,
            notice: None,
        }
    }

    /// Returns the last server-confirmed task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the viewer.
    #[must_use]
    pub const fn viewer(&self) -> &User {
        &self.viewer
    }

    /// Returns the viewer's capabilities on the task.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::evaluate(&self.viewer, &self.task)
    }

    /// Returns whether a request is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns the current notice, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Clears the current notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Returns the selected file, if any.
    #[must_use]
    pub const fn selected_file(&self) -> Option<&FileUpload> {
        self.selected_file.as_ref()
    }

    /// Returns the open rework form, if any.
    #[must_use]
    pub const fn rework_form(&self) -> Option<&ReworkForm> {
        self.rework_form.as_ref()
    }

    /// Returns the open rework form for editing, if any.
    pub fn rework_form_mut(&mut self) -> Option<&mut ReworkForm> {
        self.rework_form.as_mut()
    }

    /// Builds the timer section at `now`.
    #[must_use]
    pub fn timer_panel_at(&self, now: DateTime<Utc>) -> TimerPanel {
        TimerPanel::build(&self.task, &self.capabilities(), now)
    }

    /// Builds the timer section at the current time.
    #[must_use]
    pub fn timer_panel(&self) -> TimerPanel {
        self.timer_panel_at(self.clock.utc())
    }

    /// Evaluates the upload control.
    #[must_use]
    pub fn upload_gate(&self) -> UploadGate {
        UploadGate::evaluate(
            &self.task,
            &self.capabilities(),
            self.selected_file.is_some(),
            self.busy,
        )
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Error(message.into()));
    }

    fn accept(&mut self, refreshed: Task) {
        self.task = refreshed;
    }

    /// Refetches the task from the server.
    pub async fn refresh(&mut self) -> Outcome {
        match self.api.find_task(self.task.id()).await {
            Ok(task) => {
                self.accept(task);
                Outcome::Done(())
            }
            Err(err) => {
                self.fail(err.user_message());
                Outcome::Failed
            }
        }
    }

    /// Starts or resumes the timer.
    pub async fn start_timer(&mut self) -> Outcome {
        if !self.capabilities().control_timer {
            return Outcome::NotPermitted;
        }
        if self.busy {
            return Outcome::Blocked;
        }
        self.busy = true;
        let result = self.timers.start(self.task.id()).await;
        self.busy = false;
        self.settle(result, TIMER_START_FAILED)
    }

    /// Pauses the timer.
    pub async fn pause_timer(&mut self) -> Outcome {
        if !self.capabilities().control_timer {
            return Outcome::NotPermitted;
        }
        if self.busy {
            return Outcome::Blocked;
        }
        self.busy = true;
        let result = self.timers.pause(self.task.id()).await;
        self.busy = false;
        self.settle(result, TIMER_PAUSE_FAILED)
    }

    /// Flips one checkpoint.
    pub async fn toggle_checkpoint(&mut self, index: usize) -> Outcome {
        if !self.capabilities().toggle_checkpoints {
            return Outcome::NotPermitted;
        }
        if self.busy {
            return Outcome::Blocked;
        }
        self.busy = true;
        let result = self.checklists.toggle(&self.task, index).await;
        self.busy = false;
        self.settle(result, CHECKLIST_FAILED)
    }

    fn settle(&mut self, result: Result<Task, TaskServiceError>, failure: &str) -> Outcome {
        match result {
            Ok(task) => {
                self.accept(task);
                Outcome::Done(())
            }
            Err(_) => {
                self.fail(failure);
                Outcome::Failed
            }
        }
    }

    /// Chooses the file to upload.
    pub fn select_file(&mut self, file: FileUpload) {
        self.selected_file = Some(file);
        self.notice = None;
    }

    /// Uploads the selected file.
    pub async fn upload(&mut self) -> Outcome {
        let capabilities = self.capabilities();
        if !capabilities.upload_work {
            return Outcome::NotPermitted;
        }
        if self.busy || !self.task.checklist().all_completed() {
            return Outcome::Blocked;
        }
        let Some(file) = self.selected_file.clone() else {
            self.fail(NO_FILE_SELECTED);
            return Outcome::Failed;
        };
        self.busy = true;
        let uploaded = self.api.upload_task_file(self.task.id(), file).await;
        let result = match uploaded {
            Ok(()) => self.api.find_task(self.task.id()).await,
            Err(err) => Err(err),
        };
        self.busy = false;
        match result {
            Ok(task) => {
                tracing::info!(task_id = %task.id(), "completed work uploaded");
                self.accept(task);
                self.selected_file = None;
                self.notice = Some(Notice::Success(UPLOAD_SUCCEEDED.to_owned()));
                Outcome::Done(())
            }
            Err(err) => {
                tracing::warn!(task_id = %self.task.id(), error = %err, "upload failed");
                let message = err.detail().unwrap_or(UPLOAD_FAILED).to_owned();
                self.fail(message);
                Outcome::Failed
            }
        }
    }

    /// Downloads the uploaded work.
    pub async fn download(&mut self) -> Outcome<DownloadedFile> {
        self.fetch_file(false).await
    }

    /// Fetches the uploaded work for inline preview.
    pub async fn preview(&mut self) -> Outcome<DownloadedFile> {
        self.fetch_file(true).await
    }

    async fn fetch_file(&mut self, preview: bool) -> Outcome<DownloadedFile> {
        let Some(file_id) = self.task.file().map(|file| file.file_id.clone()) else {
            return Outcome::Blocked;
        };
        if self.busy {
            return Outcome::Blocked;
        }
        self.busy = true;
        let result = if preview {
            self.files.preview_file(&file_id).await
        } else {
            self.files.download_file(&file_id).await
        };
        self.busy = false;
        match result {
            Ok(mut file) => {
                if file.filename.is_none() {
                    file.filename = self.task.file().map(|stored| stored.filename.clone());
                }
                Outcome::Done(file)
            }
            Err(err) => {
                tracing::warn!(%file_id, error = %err, preview, "file fetch failed");
                self.fail(if preview { PREVIEW_FAILED } else { DOWNLOAD_FAILED });
                Outcome::Failed
            }
        }
    }

    /// Opens the rework form pre-filled from the task.
    pub fn begin_rework(&mut self) -> Outcome {
        if !self.capabilities().request_rework {
            return Outcome::NotPermitted;
        }
        self.rework_form = Some(ReworkForm::for_task(&self.task));
        self.notice = None;
        Outcome::Done(())
    }

    /// Closes the rework form without sending anything.
    pub fn cancel_rework(&mut self) {
        self.rework_form = None;
    }

    /// Submits the open rework form.
    ///
    /// The form stays open on failure so the user can correct and retry.
    pub async fn submit_rework(&mut self) -> Outcome {
        if !self.capabilities().request_rework {
            return Outcome::NotPermitted;
        }
        if self.busy {
            return Outcome::Blocked;
        }
        let Some(form) = self.rework_form.clone() else {
            return Outcome::Blocked;
        };
        self.busy = true;
        let result = self.rework.submit(&self.task, &form).await;
        self.busy = false;
        match result {
            Ok(task) => {
                self.accept(task);
                self.rework_form = None;
                self.notice = Some(Notice::Success(REWORK_SUCCEEDED.to_owned()));
                Outcome::Done(())
            }
            Err(err @ (TaskServiceError::Validation(_) | TaskServiceError::Domain(_))) => {
                self.fail(err.to_string());
                Outcome::Failed
            }
            Err(err) => {
                let message = err.detail().unwrap_or(REWORK_FAILED).to_owned();
                self.fail(message);
                Outcome::Failed
            }
        }
    }
}
