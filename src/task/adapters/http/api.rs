//! REST adapter for the task and file ports.

use async_trait::async_trait;
use reqwest::{
    Method, Response,
    header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap},
    multipart::{Form, Part},
};

use super::record::TaskRecord;
use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::task::{
    domain::{DownloadedFile, FileId, FileUpload, NewTask, Task, TaskId, TaskUpdate, TimerAction},
    ports::{FileApi, TaskApi},
};

/// Task and file ports over the service's REST API.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: ApiClient,
}

impl HttpTaskApi {
    /// Wraps an authenticated client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn fetch_file(&self, path: &str) -> ApiResult<DownloadedFile> {
        let response = self
            .client
            .execute(self.client.request(Method::GET, path)?)
            .await?;
        read_file(response).await
    }
}

fn decode_record(record: TaskRecord) -> ApiResult<Task> {
    record
        .into_task()
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// Extracts the file name from a `Content-Disposition` header.
pub(crate) fn disposition_filename(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_owned())
        .filter(|name| !name.is_empty())
}

async fn read_file(response: Response) -> ApiResult<DownloadedFile> {
    let filename = disposition_filename(response.headers());
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(FileUpload::OCTET_STREAM)
        .to_owned();
    let bytes = response.bytes().await.map_err(ApiError::transport)?;
    Ok(DownloadedFile {
        filename,
        content_type,
        bytes: bytes.to_vec(),
    })
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> ApiResult<Vec<Task>> {
        let records: Vec<TaskRecord> = self.client.get_json("/tasks/").await?;
        records.into_iter().map(decode_record).collect()
    }

    async fn create_task(&self, task: &NewTask) -> ApiResult<Task> {
        let record: TaskRecord = self.client.send_json(Method::POST, "/tasks/", task).await?;
        tracing::info!(task_id = %record.id, "task created");
        decode_record(record)
    }

    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> ApiResult<()> {
        let builder = self
            .client
            .request(Method::PUT, &format!("/tasks/{id}"))?
            .json(update);
        self.client.execute(builder).await?;
        tracing::info!(task_id = %id, "task updated");
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> ApiResult<()> {
        self.client.delete(&format!("/tasks/{id}")).await?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }

    async fn toggle_timer(&self, id: &TaskId, action: TimerAction) -> ApiResult<()> {
        let path = format!("/tasks/{id}/timer?action={}", action.as_str());
        self.client
            .execute(self.client.request(Method::POST, &path)?)
            .await?;
        tracing::info!(task_id = %id, action = action.as_str(), "timer toggled");
        Ok(())
    }

    async fn upload_task_file(&self, id: &TaskId, file: FileUpload) -> ApiResult<()> {
        let filename = file.filename().to_owned();
        let content_type = file.content_type().to_owned();
        let size = file.size();
        let part = Part::bytes(file.into_bytes())
            .file_name(filename.clone())
            .mime_str(&content_type)
            .map_err(ApiError::transport)?;
        let builder = self
            .client
            .request(Method::POST, &format!("/tasks/{id}/upload"))?
            .multipart(Form::new().part("file", part));
        self.client.execute(builder).await?;
        tracing::info!(task_id = %id, %filename, size, "task file uploaded");
        Ok(())
    }
}

#[async_trait]
impl FileApi for HttpTaskApi {
    async fn download_file(&self, file_id: &FileId) -> ApiResult<DownloadedFile> {
        self.fetch_file(&format!("/uploads/{file_id}")).await
    }

    async fn preview_file(&self, file_id: &FileId) -> ApiResult<DownloadedFile> {
        self.fetch_file(&format!("/uploads/preview/{file_id}")).await
    }
}
