//! Locating the reply inside the upstream's nested response.

use serde_json::Value;

/// Path of the reply string: `outputs[0].outputs[0].messages[0].message`.
const REPLY_POINTER: &str = "/outputs/0/outputs/0/messages/0/message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Reply(String),
    /// The upstream answered, but not with a usable reply string.
    Miss,
}

pub fn extract_reply(body: &Value) -> Extraction {
    match body.pointer(REPLY_POINTER).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => Extraction::Reply(text.to_string()),
        _ => Extraction::Miss,
    }
}
