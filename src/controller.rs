use crate::backend::Backend;
use crate::sanitize::sanitize;
use crate::store::ConversationStore;
use crate::types::ChatMessage;
use std::sync::Arc;

const REQUEST_FALLBACK: &str = "Request failed";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, or another send still in flight. Nothing was appended.
    Ignored,
    /// The sanitized reply was appended.
    Replied,
    /// An `Error: ...` entry was appended.
    Failed,
}

/// Drives the send/receive cycle of one conversation.
#[derive(Clone)]
pub struct ChatController {
    store: Arc<ConversationStore>,
    backend: Arc<dyn Backend>,
}

impl ChatController {
    pub fn new(store: Arc<ConversationStore>, backend: Arc<dyn Backend>) -> Self {
        Self { store, backend }
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.store.set_pending_input(text);
    }

    /// Send whatever is staged in the input field.
    pub async fn submit(&self) -> SendOutcome {
        let text = self.store.pending_input();
        self.send(&text).await
    }

    /// Send one message and append the reply (or an error entry) once it settles.
    ///
    /// The user message is appended before the request is dispatched. Blank
    /// text and calls made while a send is in flight are ignored.
    pub async fn send(&self, raw_text: &str) -> SendOutcome {
        let text = raw_text.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }
        let Some(_sending) = self.store.try_begin_send() else {
            tracing::debug!("send ignored, previous request still in flight");
            return SendOutcome::Ignored;
        };

        self.store.clear_pending_input();
        self.store.append(ChatMessage::user(text));

        tracing::debug!(chars = text.len(), "dispatching chat request");
        match self.backend.chat(text).await {
            Ok(reply) => {
                self.store.append(ChatMessage::assistant(sanitize(&reply)));
                SendOutcome::Replied
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat request failed");
                let message = err.to_string();
                let message = if message.is_empty() {
                    REQUEST_FALLBACK
                } else {
                    message.as_str()
                };
                self.store
                    .append(ChatMessage::assistant(format!("Error: {message}")));
                SendOutcome::Failed
            }
        }
        // `_sending` drops here, and on panic or cancellation, resetting `is_sending`.
    }
}
