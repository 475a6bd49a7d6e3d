use crate::backend::{Backend, HttpBackend};
use crate::config::ClientConfig;
use crate::controller::ChatController;
use crate::store::ConversationStore;
use crate::upload::UploadChannel;
use std::sync::Arc;

/// One chat session: a fresh conversation plus the components allowed to mutate it.
///
/// Nothing outlives the session; dropping it discards the history.
#[derive(Clone)]
pub struct Session {
    store: Arc<ConversationStore>,
    backend: Arc<dyn Backend>,
    controller: ChatController,
    uploads: UploadChannel,
}

impl Session {
    pub fn new(config: &ClientConfig, backend: Arc<dyn Backend>) -> Self {
        let store = Arc::new(ConversationStore::new(config.greeting.clone()));
        let controller = ChatController::new(Arc::clone(&store), Arc::clone(&backend));
        let uploads = UploadChannel::with_clear_delay(
            Arc::clone(&store),
            Arc::clone(&backend),
            config.status_clear_delay,
        );
        Self {
            store,
            backend,
            controller,
            uploads,
        }
    }

    /// Session talking to the HTTP service at `config.backend_url`.
    pub fn connect(config: &ClientConfig) -> Self {
        tracing::info!(backend = %config.backend_url, "starting chat session");
        let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(config.backend_url.clone()));
        Self::new(config, backend)
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    pub fn controller(&self) -> &ChatController {
        &self.controller
    }

    pub fn uploads(&self) -> &UploadChannel {
        &self.uploads
    }

    /// Probe the backend. Transport failures count as unreachable.
    pub async fn backend_reachable(&self) -> bool {
        match self.backend.health().await {
            Ok(healthy) => healthy,
            Err(err) => {
                tracing::debug!(error = %err, "health probe failed");
                false
            }
        }
    }
}
