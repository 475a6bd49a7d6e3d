//! In-process backend double shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use jobhelper::backend::{Backend, BackendError, BackendResult, UploadFile};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Holds a request open until the test releases it.
#[derive(Default)]
pub struct Gate {
    pub started: Notify,
    pub release: Notify,
}

impl Gate {
    async fn pass(&self) {
        self.started.notify_one();
        self.release.notified().await;
    }
}

pub struct MockBackend {
    chat_result: BackendResult<String>,
    upload_error: Option<BackendError>,
    healthy: bool,
    panic_on_chat: bool,
    chat_gate: Option<Arc<Gate>>,
    upload_gate: Option<Arc<Gate>>,
    pub chat_calls: Mutex<Vec<String>>,
    pub uploaded: Mutex<Vec<UploadFile>>,
}

impl MockBackend {
    /// Chat answers with `reply`; uploads succeed and echo the file name.
    pub fn replying(reply: &str) -> Self {
        Self {
            chat_result: Ok(reply.to_string()),
            upload_error: None,
            healthy: true,
            panic_on_chat: false,
            chat_gate: None,
            upload_gate: None,
            chat_calls: Mutex::new(Vec::new()),
            uploaded: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_chat(err: BackendError) -> Self {
        Self {
            chat_result: Err(err),
            ..Self::replying("")
        }
    }

    pub fn failing_upload(err: BackendError) -> Self {
        Self {
            upload_error: Some(err),
            ..Self::replying("")
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic_on_chat: true,
            ..Self::replying("")
        }
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub fn gate_chat(mut self) -> (Self, Arc<Gate>) {
        let gate = Arc::new(Gate::default());
        self.chat_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn gate_upload(mut self) -> (Self, Arc<Gate>) {
        let gate = Arc::new(Gate::default());
        self.upload_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn chat_calls(&self) -> Vec<String> {
        self.chat_calls.lock().unwrap().clone()
    }

    pub fn uploaded_names(&self) -> Vec<String> {
        self.uploaded
            .lock()
            .unwrap()
            .iter()
            .map(|file| file.name.clone())
            .collect()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn chat(&self, message: &str) -> BackendResult<String> {
        self.chat_calls.lock().unwrap().push(message.to_string());
        if self.panic_on_chat {
            panic!("backend blew up");
        }
        if let Some(gate) = &self.chat_gate {
            gate.pass().await;
        }
        self.chat_result.clone()
    }

    async fn upload(&self, file: UploadFile) -> BackendResult<String> {
        let name = file.name.clone();
        self.uploaded.lock().unwrap().push(file);
        if let Some(gate) = &self.upload_gate {
            gate.pass().await;
        }
        match &self.upload_error {
            Some(err) => Err(err.clone()),
            None => Ok(name),
        }
    }

    async fn health(&self) -> BackendResult<bool> {
        Ok(self.healthy)
    }
}
