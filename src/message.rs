// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reply used whenever the upstream answered but said nothing we can show.
pub const FALLBACK_REPLY: &str =
    "I apologize, but I am unable to process your request at the moment.";

/// Reply the widget shows when the relay call itself failed.
pub const CLIENT_ERROR_REPLY: &str =
    "I apologize, but I encountered an error while processing your request. Please try again.";

pub const GREETING: &str = "Hello! I'm your AI Medical Assistant. How can I help you today?";

pub const UPSTREAM_FAILURE_ERROR: &str = "Failed to process your request";
pub const INVALID_REQUEST_ERROR: &str = "Invalid request";

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UpstreamPayload {
    pub input: UpstreamInput,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UpstreamInput {
    pub question: String,
}

impl UpstreamPayload {
    pub fn from_question(question: impl Into<String>) -> Self {
        Self {
            input: UpstreamInput {
                question: question.into(),
            },
        }
    }
}

/// Body of every non-200 response from the gateway.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
