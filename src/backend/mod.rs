/// Backend module for the assistant service
///
/// The controller and the upload channel only see the [`Backend`] trait, so a
/// session can be wired to the real HTTP service or to an in-process double.
///
/// # Architecture
///
/// - `http` - `HttpBackend`, the reqwest client for `/chat`, `/upload` and `/health`
///
/// # Usage
///
/// ```rust,no_run
/// use jobhelper::backend::{Backend, HttpBackend};
///
/// # async fn example() -> Result<(), jobhelper::backend::BackendError> {
/// let backend = HttpBackend::new("http://127.0.0.1:8000");
/// let reply = backend.chat("Which roles fit my resume?").await?;
/// # Ok(())
/// # }
/// ```
mod http;

use async_trait::async_trait;
use std::path::Path;

pub use http::{DEFAULT_BASE_URL, HttpBackend};

/// File extensions offered by file pickers. Advisory only: uploads are never
/// re-validated against this list.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "pdf"];

// ============================================
// Error Types
// ============================================

/// Failures of a backend request. `Display` is the bare message so callers can
/// surface it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Decode(String),

    /// The local file could not be read.
    #[error("{0}")]
    File(String),
}

impl BackendError {
    /// Build a rejection from a non-2xx body, using `fallback` when the body is blank.
    pub fn rejected(status: u16, body: &str, fallback: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() { fallback } else { body };
        BackendError::Rejected {
            status,
            message: message.to_string(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::File(err.to_string())
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

// ============================================
// Upload payload
// ============================================

/// A user-selected document, read fully into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> BackendResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self { name, bytes })
    }

    /// MIME type sent with the multipart part.
    pub fn mime_type(&self) -> &'static str {
        match Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("pdf") => "application/pdf",
            Some("txt") => "text/plain",
            _ => "application/octet-stream",
        }
    }
}

// ============================================
// Backend trait
// ============================================

#[async_trait]
pub trait Backend: Send + Sync {
    /// Send one user message and return the raw (unsanitized) reply.
    async fn chat(&self, message: &str) -> BackendResult<String>;

    /// Submit a document and return the file name the service stored it under.
    async fn upload(&self, file: UploadFile) -> BackendResult<String>;

    /// Whether the service answers its health probe.
    async fn health(&self) -> BackendResult<bool> {
        Ok(true)
    }
}
