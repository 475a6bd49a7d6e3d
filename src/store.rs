//! Conversation state shared by the controller, the upload channel and the view.
//!
//! The message log is append-only. `is_sending` and the status line are the
//! only scalar flags; renderers learn about changes through [`ConversationStore::subscribe`].

use crate::types::ChatMessage;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Identifies one write of the status line. A later write invalidates earlier tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusToken(u64);

#[derive(Default)]
struct ConversationState {
    messages: Vec<ChatMessage>,
    pending_input: String,
    is_sending: bool,
    status_text: String,
    status_token: u64,
}

pub struct ConversationStore {
    state: Mutex<ConversationState>,
    revision: watch::Sender<u64>,
}

impl ConversationStore {
    /// Start a conversation seeded with one assistant greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        let state = ConversationState {
            messages: vec![ChatMessage::assistant(greeting)],
            ..ConversationState::default()
        };
        let (revision, _) = watch::channel(0);
        Self {
            state: Mutex::new(state),
            revision,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Receiver whose value changes after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    // ---------------
    // Message log
    // ---------------

    pub fn append(&self, message: ChatMessage) {
        self.lock().messages.push(message);
        self.touch();
    }

    /// Messages in display order, oldest first.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.lock().messages.clone()
    }

    pub fn last(&self) -> Option<ChatMessage> {
        self.lock().messages.last().cloned()
    }

    // ---------------
    // Pending input
    // ---------------

    pub fn pending_input(&self) -> String {
        self.lock().pending_input.clone()
    }

    pub fn set_pending_input(&self, text: impl Into<String>) {
        self.lock().pending_input = text.into();
        self.touch();
    }

    pub fn clear_pending_input(&self) {
        self.lock().pending_input.clear();
        self.touch();
    }

    // ---------------
    // Sending flag
    // ---------------

    pub fn is_sending(&self) -> bool {
        self.lock().is_sending
    }

    /// Mark a send as in flight, or return `None` if one already is.
    ///
    /// The flag is cleared when the returned guard drops.
    pub fn try_begin_send(&self) -> Option<SendingGuard<'_>> {
        {
            let mut state = self.lock();
            if state.is_sending {
                return None;
            }
            state.is_sending = true;
        }
        self.touch();
        Some(SendingGuard { store: self })
    }

    fn finish_send(&self) {
        self.lock().is_sending = false;
        self.touch();
    }

    // ---------------
    // Status line
    // ---------------

    pub fn status_text(&self) -> String {
        self.lock().status_text.clone()
    }

    pub fn set_status(&self, text: impl Into<String>) -> StatusToken {
        let token = {
            let mut state = self.lock();
            state.status_token += 1;
            state.status_text = text.into();
            StatusToken(state.status_token)
        };
        self.touch();
        token
    }

    /// Clear the status line unless it was rewritten after `token` was issued.
    pub fn clear_status_if_current(&self, token: StatusToken) -> bool {
        {
            let mut state = self.lock();
            if state.status_token != token.0 {
                return false;
            }
            state.status_text.clear();
        }
        self.touch();
        true
    }
}

/// Holds `is_sending` for the lifetime of one request.
pub struct SendingGuard<'a> {
    store: &'a ConversationStore,
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.store.finish_send();
    }
}
