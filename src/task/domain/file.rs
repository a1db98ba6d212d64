//! File references and payloads exchanged with the file store.

use super::{FileId, TaskDomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to completed work uploaded against a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Stored file identifier.
    pub file_id: FileId,
    /// Original file name.
    pub filename: String,
    /// When the file was uploaded, if the server recorded it.
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// A file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl FileUpload {
    /// Default content type when none can be determined.
    pub const OCTET_STREAM: &'static str = "application/octet-stream";

    /// Creates an upload payload.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyFileName`] when the name is blank.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Result<Self, TaskDomainError> {
        let name: String = filename.into();
        if name.trim().is_empty() {
            return Err(TaskDomainError::EmptyFileName);
        }
        Ok(Self {
            filename: name,
            content_type: Self::OCTET_STREAM.to_owned(),
            bytes,
        })
    }

    /// Sets the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Returns the file name.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the payload, returning its contents.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the size in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// A file fetched from the file store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// File name suggested by the server, if any.
    pub filename: Option<String>,
    /// Content type reported by the server.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}
