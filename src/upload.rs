use crate::backend::{Backend, BackendError, UploadFile};
use crate::store::{ConversationStore, StatusToken};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(2);

pub const UPLOADING_STATUS: &str = "Uploading...";

/// Sends user documents to the backend and reports through the transient status line.
#[derive(Clone)]
pub struct UploadChannel {
    store: Arc<ConversationStore>,
    backend: Arc<dyn Backend>,
    clear_after: Duration,
}

impl UploadChannel {
    pub fn new(store: Arc<ConversationStore>, backend: Arc<dyn Backend>) -> Self {
        Self::with_clear_delay(store, backend, STATUS_CLEAR_DELAY)
    }

    pub fn with_clear_delay(
        store: Arc<ConversationStore>,
        backend: Arc<dyn Backend>,
        clear_after: Duration,
    ) -> Self {
        Self {
            store,
            backend,
            clear_after,
        }
    }

    /// Read `path` from disk and upload it.
    pub async fn upload_path(&self, path: &Path) {
        match UploadFile::from_path(path).await {
            Ok(file) => self.upload_file(file).await,
            Err(err) => self.settle(Err(err)),
        }
    }

    /// Upload one file. The outcome lands in the status line and is cleared
    /// after the configured delay unless a newer status replaced it.
    pub async fn upload_file(&self, file: UploadFile) {
        self.store.set_status(UPLOADING_STATUS);
        tracing::debug!(name = %file.name, bytes = file.bytes.len(), "uploading document");
        let result = self.backend.upload(file).await;
        self.settle(result);
    }

    fn settle(&self, result: Result<String, BackendError>) {
        let status = match result {
            Ok(filename) => format!("File uploaded:{filename}"),
            Err(err) => {
                tracing::warn!(error = %err, "upload failed");
                format!("Upload error:{err}")
            }
        };
        let token = self.store.set_status(status);
        self.schedule_clear(token);
    }

    fn schedule_clear(&self, token: StatusToken) {
        let store = Arc::clone(&self.store);
        let delay = self.clear_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.clear_status_if_current(token);
        });
    }
}
