//! Command handlers wiring the REST adapters into the services.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use eyre::{Result, WrapErr, bail, eyre};
use mockable::DefaultClock;
use std::io::Write;
use std::sync::Arc;

use studioflow::config::ClientConfig;
use studioflow::http::ApiClient;
use studioflow::identity::{adapters::http::HttpUserDirectory, domain::UserId, ports::UserDirectory};
use studioflow::task::{
    adapters::http::HttpTaskApi,
    domain::{FileUpload, ReminderPolicy, TaskId},
    services::{Notice, Outcome, ReminderService, TaskCatalogService, TaskDetailController},
};

use crate::cli::{Commands, TaskCommands, UserCommands};
use crate::render;

type Controller = TaskDetailController<HttpTaskApi, HttpTaskApi, DefaultClock>;

/// Adapters and services shared by every command.
struct Context {
    api: Arc<HttpTaskApi>,
    directory: Arc<HttpUserDirectory>,
    clock: Arc<DefaultClock>,
    config: ClientConfig,
}

impl Context {
    fn new(config: ClientConfig) -> Result<Self> {
        let client = ApiClient::new(&config.api).wrap_err("failed to build HTTP client")?;
        if !client.has_credential() {
            tracing::warn!("no API token configured; set STUDIOFLOW_API__TOKEN");
        }
        Ok(Self {
            api: Arc::new(HttpTaskApi::new(client.clone())),
            directory: Arc::new(HttpUserDirectory::new(client)),
            clock: Arc::new(DefaultClock),
            config,
        })
    }

    fn catalog(&self) -> TaskCatalogService<HttpTaskApi, HttpUserDirectory> {
        TaskCatalogService::new(Arc::clone(&self.api), Arc::clone(&self.directory))
    }

    async fn controller(&self, id: &str) -> Result<Controller> {
        let viewer = self.directory.current_user().await?;
        let task = self.catalog().get(&TaskId::new(id)).await?;
        Ok(TaskDetailController::new(
            Arc::clone(&self.api),
            Arc::clone(&self.api),
            Arc::clone(&self.clock),
            viewer,
            task,
        ))
    }
}

/// Runs one command, writing its report to `out`.
pub async fn run(command: Commands, config: ClientConfig, out: &mut impl Write) -> Result<()> {
    let context = Context::new(config)?;
    match command {
        Commands::Tasks { action } => tasks(&context, action, out).await,
        Commands::Users {
            action: UserCommands::List,
        } => {
            let users = context.catalog().assignable_users().await?;
            render::users(out, &users)?;
            Ok(())
        }
    }
}

async fn tasks(context: &Context, action: TaskCommands, out: &mut impl Write) -> Result<()> {
    match action {
        TaskCommands::List => {
            let tasks = context.catalog().list().await?;
            render::task_list(out, &tasks)?;
        }
        TaskCommands::Reminders => {
            let settings = context.config.reminders;
            let service = ReminderService::with_policy(
                Arc::clone(&context.api),
                Arc::clone(&context.clock),
                ReminderPolicy::from_hours(settings.window_hours, settings.max_entries),
            );
            render::reminders(out, &service.banner().await?)?;
        }
        TaskCommands::Show { id } => {
            let controller = context.controller(&id).await?;
            show(&controller, out)?;
        }
        TaskCommands::Start { id } => {
            let mut controller = context.controller(&id).await?;
            let outcome = controller.start_timer().await;
            finish(&controller, outcome, "start this timer")?;
            show(&controller, out)?;
        }
        TaskCommands::Pause { id } => {
            let mut controller = context.controller(&id).await?;
            let outcome = controller.pause_timer().await;
            finish(&controller, outcome, "pause this timer")?;
            show(&controller, out)?;
        }
        TaskCommands::Check { id, index } => {
            let mut controller = context.controller(&id).await?;
            let outcome = controller.toggle_checkpoint(index).await;
            finish(&controller, outcome, "update this checklist")?;
            show(&controller, out)?;
        }
        TaskCommands::Rework {
            id,
            remarks,
            assign,
            due,
        } => {
            let mut controller = context.controller(&id).await?;
            let opened = controller.begin_rework();
            finish(&controller, opened, "request rework on this task")?;
            if let Some(form) = controller.rework_form_mut() {
                form.remarks = remarks;
                if !assign.is_empty() {
                    form.reassign_to = assign.into_iter().map(UserId::new).collect();
                }
                if due.is_some() {
                    form.due_date = due;
                }
            }
            let outcome = controller.submit_rework().await;
            finish(&controller, outcome, "request rework on this task")?;
            report_notice(&controller, out)?;
        }
        TaskCommands::Upload { id, path } => {
            let file = read_upload(&path)?;
            let mut controller = context.controller(&id).await?;
            controller.select_file(file);
            let outcome = controller.upload().await;
            if matches!(outcome, Outcome::Blocked) {
                bail!("upload is disabled: {}", blocked_reason(&controller));
            }
            finish(&controller, outcome, "upload work for this task")?;
            report_notice(&controller, out)?;
        }
        TaskCommands::Download { id, path } => {
            let mut controller = context.controller(&id).await?;
            let outcome = controller.download().await;
            let Outcome::Done(file) = outcome else {
                finish(&controller, outcome, "download this file")?;
                bail!("task {id} has no uploaded work");
            };
            write_download(&path, &file.bytes)?;
            writeln!(out, "Saved {} bytes to {path}", file.bytes.len())?;
        }
        TaskCommands::Delete { id } => {
            let viewer = context.directory.current_user().await?;
            let catalog = context.catalog();
            let task = catalog.get(&TaskId::new(id.as_str())).await?;
            catalog.delete(&viewer, &task).await?;
            writeln!(out, "Deleted task {id}")?;
        }
    }
    Ok(())
}

fn show(controller: &Controller, out: &mut impl Write) -> Result<()> {
    render::task_detail(
        out,
        controller.task(),
        &controller.timer_panel(),
        &controller.upload_gate(),
    )?;
    Ok(())
}

/// Turns a controller outcome into a command result.
fn finish<T>(controller: &Controller, outcome: Outcome<T>, action: &str) -> Result<()> {
    match outcome {
        Outcome::Done(_) | Outcome::Blocked => Ok(()),
        Outcome::NotPermitted => Err(eyre!("you are not permitted to {action}")),
        Outcome::Failed => Err(eyre!(
            "{}",
            controller
                .notice()
                .map_or("request failed", Notice::message)
        )),
    }
}

fn report_notice(controller: &Controller, out: &mut impl Write) -> Result<()> {
    if let Some(notice) = controller.notice() {
        writeln!(out, "{}", notice.message())?;
    }
    Ok(())
}

fn blocked_reason(controller: &Controller) -> &'static str {
    render::upload_block(controller.upload_gate().blocked_by())
}

fn split_path(path: &Utf8Path) -> Result<(Dir, &str)> {
    let name = path
        .file_name()
        .ok_or_else(|| eyre!("{path} does not name a file"))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("failed to open directory {parent}"))?;
    Ok((dir, name))
}

fn read_upload(path: &Utf8Path) -> Result<FileUpload> {
    let (dir, name) = split_path(path)?;
    let bytes = dir
        .read(name)
        .wrap_err_with(|| format!("failed to read {path}"))?;
    Ok(FileUpload::new(name, bytes)?)
}

fn write_download(path: &Utf8Path, bytes: &[u8]) -> Result<()> {
    let (dir, name) = split_path(path)?;
    dir.write(name, bytes)
        .wrap_err_with(|| format!("failed to write {path}"))
}
