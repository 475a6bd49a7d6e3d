use super::{Backend, BackendError, BackendResult, UploadFile};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const CHAT_FALLBACK: &str = "Chat failed";
const UPLOAD_FALLBACK: &str = "Upload failed";

/// Client for the assistant service's HTTP endpoints.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    reply: String,
    #[serde(default)]
    sources: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct UploadResponse {
    filename: String,
    #[serde(default)]
    chunks_added: Option<u64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

#[async_trait]
impl Backend for HttpBackend {
    async fn chat(&self, message: &str) -> BackendResult<String> {
        let response = self
            .client
            .post(self.endpoint("chat"))
            .json(&ChatRequest { message })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::rejected(status.as_u16(), &body, CHAT_FALLBACK));
        }

        let data: ChatResponse = serde_json::from_str(&body)?;
        tracing::debug!(sources = data.sources.len(), "chat reply received");
        Ok(data.reply)
    }

    async fn upload(&self, file: UploadFile) -> BackendResult<String> {
        let mime = file.mime_type();
        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(mime)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::rejected(
                status.as_u16(),
                &body,
                UPLOAD_FALLBACK,
            ));
        }

        let receipt: UploadResponse = serde_json::from_str(&body)?;
        tracing::info!(
            filename = %receipt.filename,
            chunks_added = ?receipt.chunks_added,
            message = ?receipt.message,
            "document accepted by backend"
        );
        Ok(receipt.filename)
    }

    async fn health(&self) -> BackendResult<bool> {
        let response = self.client.get(self.endpoint("health")).send().await?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let data: HealthResponse = response.json().await?;
        Ok(data.status.eq_ignore_ascii_case("ok"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let backend = HttpBackend::new("http://localhost:8000/");
        assert_eq!(backend.endpoint("chat"), "http://localhost:8000/chat");
    }

    #[test]
    fn missing_reply_defaults_to_empty() {
        let data: ChatResponse = serde_json::from_str(r#"{"sources":[]}"#).unwrap();
        assert_eq!(data.reply, "");
    }

    #[test]
    fn upload_receipt_needs_only_filename() {
        let receipt: UploadResponse = serde_json::from_str(r#"{"filename":"cv.pdf"}"#).unwrap();
        assert_eq!(receipt.filename, "cv.pdf");
        assert_eq!(receipt.chunks_added, None);
    }
}
