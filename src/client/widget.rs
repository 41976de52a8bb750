// src/client/widget.rs
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{ChatClient, ClientError};
use crate::message::{CLIENT_ERROR_REPLY, GREETING};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug)]
pub struct TranscriptEntry {
    pub text: String,
    pub sender: Sender,
    pub is_error: bool,
}

impl TranscriptEntry {
    fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            is_error: false,
        }
    }

    fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            is_error: false,
        }
    }
}

#[derive(Debug)]
pub enum SendOutcome {
    /// Blank input, or another message is still in flight.
    Ignored,
    Replied(String),
    Failed(ClientError),
}

/// Headless model of the chat widget: a transcript plus a busy flag that
/// allows at most one pending relay call.
pub struct ChatWidget {
    client: ChatClient,
    messages: RwLock<Vec<TranscriptEntry>>,
    busy: AtomicBool,
}

// Clears the busy flag however the send ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ChatWidget {
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            messages: RwLock::new(vec![TranscriptEntry::bot(GREETING)]),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Copy of the transcript, oldest first.
    pub async fn transcript(&self) -> Vec<TranscriptEntry> {
        self.messages.read().await.clone()
    }

    pub async fn send(&self, input: &str) -> SendOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("send ignored, a request is already pending");
            return SendOutcome::Ignored;
        }
        let _guard = BusyGuard(&self.busy);

        self.messages.write().await.push(TranscriptEntry::user(text));

        match self.client.send_message(text).await {
            Ok(reply) => {
                self.messages
                    .write()
                    .await
                    .push(TranscriptEntry::bot(reply.clone()));
                SendOutcome::Replied(reply)
            }
            Err(err) => {
                warn!(error = %err, "chat request failed");
                self.messages.write().await.push(TranscriptEntry {
                    text: CLIENT_ERROR_REPLY.to_string(),
                    sender: Sender::Bot,
                    is_error: true,
                });
                SendOutcome::Failed(err)
            }
        }
    }
}
