//! Client adapter: what the chat widget uses to talk to the relay.

pub mod widget;

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::message::{ChatRequest, FALLBACK_REPLY};

pub use widget::{ChatWidget, SendOutcome, Sender, TranscriptEntry};

/// Reply fields in priority order, as JSON pointers.
const REPLY_FIELDS: [&str; 3] = ["/output/answer", "/answer", "/response"];

#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay reported an `error` in its body.
    #[error("{0}")]
    Server(String),

    #[error("Request failed with status code {status}")]
    Http { status: u16 },

    #[error("{0}")]
    Transport(String),
}

impl ClientError {
    fn transport(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full URL of the relay's chat endpoint, e.g. `http://localhost:3007/api/chat`.
    pub endpoint: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ClientError::transport)?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
        })
    }

    /// Sends one message and returns the text to display.
    pub async fn send_message(&self, message: &str) -> Result<String, ClientError> {
        debug!(message, endpoint = %self.endpoint, "sending message to relay");

        let request = ChatRequest {
            message: message.to_string(),
        };
        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "relay request failed");
                ClientError::transport(e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(ClientError::transport)?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        debug!(status = status.as_u16(), body = %body, "relay response");

        if let Some(message) = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
        {
            error!(status = status.as_u16(), error = message, "relay reported an error");
            return Err(ClientError::Server(message.to_string()));
        }
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }

        Ok(normalize_reply(&body))
    }
}

/// Picks the first non-empty string among `output.answer`, `answer` and
/// `response`, falling back to the apology.
pub fn normalize_reply(body: &Value) -> String {
    REPLY_FIELDS
        .iter()
        .filter_map(|pointer| body.pointer(pointer).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or(FALLBACK_REPLY)
        .to_string()
}
