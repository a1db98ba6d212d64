//! In-memory simulation of the remote workflow service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::identity::{
    adapters::memory::InMemoryUserDirectory,
    domain::{User, UserId},
    ports::UserDirectory,
};
use crate::task::{
    domain::{
        Checklist, DownloadedFile, FileId, FileUpload, NewTask, PersistedTaskData, ProjectId,
        Task, TaskId, TaskStatus, TaskUpdate, TimerAction, TimerState, UploadedFile,
    },
    ports::{FileApi, TaskApi},
};

const UNKNOWN_NAME: &str = "Unknown";

/// Thread-safe in-memory workflow service.
///
/// Enforces the same visibility, permission and timer rules as the remote
/// service, resolving the caller through a shared [`InMemoryUserDirectory`].
/// Clones share the same state.
pub struct InMemoryWorkflow<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<WorkflowState>>,
    directory: InMemoryUserDirectory,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryWorkflow<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            directory: self.directory.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct WorkflowState {
    tasks: Vec<PersistedTaskData>,
    projects: HashMap<ProjectId, String>,
    files: HashMap<FileId, DownloadedFile>,
    next_failure: Option<ApiError>,
}

fn lock_error(err: impl std::fmt::Display) -> ApiError {
    ApiError::transport(std::io::Error::other(err.to_string()))
}

fn task_not_found() -> ApiError {
    ApiError::NotFound("Task not found".to_owned())
}

fn is_involved(viewer: &User, task: &PersistedTaskData) -> bool {
    viewer.role().is_elevated()
        || task.assignees.contains(viewer.id())
        || task.created_by == *viewer.id()
}

fn fold_elapsed(task: &mut PersistedTaskData, now: DateTime<Utc>) {
    task.time_spent_ms = task.time_spent_ms.saturating_add(task.timer.session_ms(now));
    task.timer = TimerState::Stopped;
    task.updated_at = Some(now);
}

fn task_mut<'a>(
    state: &'a mut WorkflowState,
    id: &TaskId,
) -> ApiResult<&'a mut PersistedTaskData> {
    state
        .tasks
        .iter_mut()
        .find(|task| task.id == *id)
        .ok_or_else(task_not_found)
}

impl<C> InMemoryWorkflow<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty workflow backed by `directory`.
    #[must_use]
    pub fn new(directory: InMemoryUserDirectory, clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(WorkflowState::default())),
            directory,
            clock,
        }
    }

    /// Returns the shared user directory.
    #[must_use]
    pub const fn directory(&self) -> &InMemoryUserDirectory {
        &self.directory
    }

    /// Registers a project that tasks may be linked to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the state lock is poisoned.
    pub fn insert_project(&self, id: ProjectId, name: impl Into<String>) -> ApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.projects.insert(id, name.into());
        Ok(())
    }

    /// Seeds a task record directly, bypassing permission checks.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the state lock is poisoned.
    pub fn seed(&self, task: Task) -> ApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let data = task.into_persisted();
        state.tasks.retain(|existing| existing.id != data.id);
        state.tasks.push(data);
        Ok(())
    }

    /// Makes the next port call fail with `error` without touching state.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the state lock is poisoned.
    pub fn fail_next(&self, error: ApiError) -> ApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.next_failure = Some(error);
        Ok(())
    }

    fn take_failure(&self) -> ApiResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.next_failure.take().map_or(Ok(()), Err)
    }

    /// Resolves the caller, consuming any injected failure first.
    fn viewer(&self) -> ApiResult<User> {
        self.take_failure()?;
        self.directory.signed_in()
    }

    fn user_name(&self, id: &UserId) -> ApiResult<String> {
        Ok(self
            .directory
            .find(id)?
            .map_or_else(|| UNKNOWN_NAME.to_owned(), |user| user.name().to_owned()))
    }

    /// Builds the response record, resolving display names as the server
    /// does.
    fn hydrate(&self, state: &WorkflowState, data: &PersistedTaskData) -> ApiResult<Task> {
        let mut record = data.clone();
        record.assignee_names = data
            .assignees
            .iter()
            .map(|id| self.user_name(id))
            .collect::<ApiResult<_>>()?;
        record.created_by_name = Some(self.user_name(&data.created_by)?);
        record.project_name = data
            .project_id
            .as_ref()
            .and_then(|id| state.projects.get(id).cloned());
        Task::from_persisted(record).map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn ensure_assignees_exist(&self, assignees: &[UserId]) -> ApiResult<()> {
        for id in assignees {
            if self.directory.find(id)?.is_none() {
                return Err(ApiError::NotFound(format!("User with ID {id} not found")));
            }
        }
        Ok(())
    }

    fn ensure_involved(viewer: &User, task: &PersistedTaskData, detail: &str) -> ApiResult<()> {
        if is_involved(viewer, task) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(detail.to_owned()))
        }
    }

    fn apply_update(task: &mut PersistedTaskData, update: &TaskUpdate) -> ApiResult<()> {
        if let Some(status) = update.status
            && status != task.status
            && !task.status.can_transition_to(status)
        {
            return Err(ApiError::Rejected {
                status: 400,
                detail: format!("Cannot move task from {} to {}", task.status, status),
            });
        }
        if let Some(checklist) = &update.checkpoints {
            checklist
                .validate_for(task.design_type)
                .map_err(|err| ApiError::Rejected {
                    status: 422,
                    detail: err.to_string(),
                })?;
        }
        if let Some(title) = &update.title {
            task.title.clone_from(title);
        }
        if let Some(description) = &update.description {
            task.description = Some(description.clone());
        }
        if let Some(assignees) = &update.assigned_to {
            task.assignees = assignees.clone();
        }
        if let Some(due_date) = update.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(checklist) = &update.checkpoints {
            task.checklist = checklist.clone();
        }
        Ok(())
    }
}

#[async_trait]
impl<C> TaskApi for InMemoryWorkflow<C>
where
    C: Clock + Send + Sync,
{
    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let viewer = self.viewer()?;
        let state = self.state.read().map_err(lock_error)?;
        state
            .tasks
            .iter()
            .filter(|task| is_involved(&viewer, task))
            .map(|task| self.hydrate(&state, task))
            .collect()
    }

    async fn create_task(&self, new_task: &NewTask) -> ApiResult<Task> {
        let viewer = self.viewer()?;
        if new_task.project_id().is_none() && !viewer.role().can_create_standalone_tasks() {
            return Err(ApiError::Forbidden(
                "Only Admin, Manager, or Digital Marketer can create standalone tasks. \
                 Please link the task to a project."
                    .to_owned(),
            ));
        }
        new_task.validate().map_err(|err| ApiError::Rejected {
            status: 422,
            detail: err.to_string(),
        })?;
        self.ensure_assignees_exist(new_task.assigned_to().as_slice())?;

        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(project_id) = new_task.project_id()
            && !state.projects.contains_key(project_id)
        {
            return Err(ApiError::NotFound("Project not found".to_owned()));
        }
        let data = PersistedTaskData {
            id: TaskId::new(Uuid::new_v4().to_string()),
            title: new_task.title().to_owned(),
            description: new_task.description().map(str::to_owned),
            assignees: new_task.assigned_to().clone(),
            assignee_names: Vec::new(),
            project_id: new_task.project_id().cloned(),
            project_name: None,
            status: TaskStatus::Pending,
            priority: new_task.priority(),
            due_date: new_task.due_date(),
            created_by: viewer.id().clone(),
            created_by_name: None,
            created_at: self.clock.utc(),
            updated_at: None,
            design_type: new_task.design_type(),
            checklist: if new_task.checklist().is_empty() {
                Checklist::for_design_type(new_task.design_type())
            } else {
                new_task.checklist().clone()
            },
            allocated_hours: new_task.allocated_hours(),
            time_spent_ms: 0,
            timer: TimerState::Stopped,
            file: None,
        };
        let created = self.hydrate(&state, &data)?;
        state.tasks.push(data);
        Ok(created)
    }

    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> ApiResult<()> {
        let viewer = self.viewer()?;
        if let Some(assignees) = &update.assigned_to {
            self.ensure_assignees_exist(assignees.as_slice())?;
        }
        let now = self.clock.utc();
        let mut state = self.state.write().map_err(lock_error)?;
        let task = task_mut(&mut state, id)?;
        Self::ensure_involved(
            &viewer,
            task,
            "You can only update tasks you created or are assigned to",
        )?;
        Self::apply_update(task, update)?;
        task.updated_at = Some(now);
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> ApiResult<()> {
        let viewer = self.viewer()?;
        if !viewer.role().is_elevated() {
            return Err(ApiError::Forbidden(
                "Only Admin or Manager can delete tasks".to_owned(),
            ));
        }
        let mut state = self.state.write().map_err(lock_error)?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != *id);
        if state.tasks.len() == before {
            return Err(task_not_found());
        }
        Ok(())
    }

    async fn toggle_timer(&self, id: &TaskId, action: TimerAction) -> ApiResult<()> {
        let viewer = self.viewer()?;
        let now = self.clock.utc();
        let mut state = self.state.write().map_err(lock_error)?;
        {
            let task = task_mut(&mut state, id)?;
            Self::ensure_involved(
                &viewer,
                task,
                "You can only control timers for tasks you created or are assigned to",
            )?;
        }
        match action {
            TimerAction::Start => {
                for other in state.tasks.iter_mut().filter(|task| {
                    task.id != *id
                        && task.timer.is_running()
                        && task.assignees.contains(viewer.id())
                }) {
                    fold_elapsed(other, now);
                }
                let task = task_mut(&mut state, id)?;
                task.timer = TimerState::Running { started_at: now };
                if task.status.can_transition_to(TaskStatus::InProgress) {
                    task.status = TaskStatus::InProgress;
                }
                task.updated_at = Some(now);
            }
            TimerAction::Pause => {
                let task = task_mut(&mut state, id)?;
                if task.timer.is_running() {
                    fold_elapsed(task, now);
                }
            }
        }
        Ok(())
    }

    async fn upload_task_file(&self, id: &TaskId, file: FileUpload) -> ApiResult<()> {
        let viewer = self.viewer()?;
        let now = self.clock.utc();
        let mut state = self.state.write().map_err(lock_error)?;
        let file_id = FileId::new(Uuid::new_v4().to_string());
        {
            let task = task_mut(&mut state, id)?;
            Self::ensure_involved(
                &viewer,
                task,
                "You can only upload files for tasks you are assigned to or created",
            )?;
            task.file = Some(UploadedFile {
                file_id: file_id.clone(),
                filename: file.filename().to_owned(),
                uploaded_at: Some(now),
            });
            task.updated_at = Some(now);
        }
        let stored = DownloadedFile {
            filename: Some(file.filename().to_owned()),
            content_type: file.content_type().to_owned(),
            bytes: file.into_bytes(),
        };
        state.files.insert(file_id, stored);
        Ok(())
    }
}

impl<C> InMemoryWorkflow<C>
where
    C: Clock + Send + Sync,
{
    fn stored_file(&self, file_id: &FileId) -> ApiResult<DownloadedFile> {
        self.viewer()?;
        let state = self.state.read().map_err(lock_error)?;
        state
            .files
            .get(file_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("File not found".to_owned()))
    }
}

#[async_trait]
impl<C> FileApi for InMemoryWorkflow<C>
where
    C: Clock + Send + Sync,
{
    async fn download_file(&self, file_id: &FileId) -> ApiResult<DownloadedFile> {
        self.stored_file(file_id)
    }

    async fn preview_file(&self, file_id: &FileId) -> ApiResult<DownloadedFile> {
        self.stored_file(file_id)
    }
}

#[async_trait]
impl<C> UserDirectory for InMemoryWorkflow<C>
where
    C: Clock + Send + Sync,
{
    async fn current_user(&self) -> ApiResult<User> {
        self.viewer()
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.take_failure()?;
        self.directory.list_users().await
    }
}
