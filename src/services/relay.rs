//! Relay gateway: forwards one chat message upstream and reduces the reply.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use super::extract::{Extraction, extract_reply};
use crate::config::UpstreamConfig;
use crate::error::ConfigError;
use crate::message::{FALLBACK_REPLY, UpstreamPayload};

/// Result of a relay call that reached the upstream and got a 2xx back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Answered(String),
    ExtractionMiss,
}

impl RelayOutcome {
    pub fn response_text(&self) -> &str {
        match self {
            RelayOutcome::Answered(text) => text,
            RelayOutcome::ExtractionMiss => FALLBACK_REPLY,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelayOutcome::Answered(_) => "answered",
            RelayOutcome::ExtractionMiss => "extraction-miss",
        }
    }
}

impl From<Extraction> for RelayOutcome {
    fn from(extraction: Extraction) -> Self {
        match extraction {
            Extraction::Reply(text) => RelayOutcome::Answered(text),
            Extraction::Miss => RelayOutcome::ExtractionMiss,
        }
    }
}

/// Transport error or non-2xx answer from the upstream.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct UpstreamFailure {
    pub message: String,
    pub status: Option<u16>,
    /// Upstream error payload, passed through verbatim.
    pub data: Option<Value>,
}

impl UpstreamFailure {
    fn transport(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("upstream request timed out: {err}")
        } else {
            err.to_string()
        };
        Self {
            message,
            status: None,
            data: None,
        }
    }

    fn from_status(status: StatusCode, body: &str) -> Self {
        let data = if body.trim().is_empty() {
            None
        } else {
            Some(
                serde_json::from_str(body)
                    .unwrap_or_else(|_| Value::String(body.to_string())),
            )
        };
        Self {
            message: format!("Request failed with status code {}", status.as_u16()),
            status: Some(status.as_u16()),
            data,
        }
    }
}

/// Stateless forwarder; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct RelayGateway {
    client: reqwest::Client,
    upstream: UpstreamConfig,
}

impl RelayGateway {
    pub fn new(upstream: UpstreamConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = upstream.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            upstream,
        })
    }

    /// Single attempt, no retry. An unusable 2xx body is an `ExtractionMiss`,
    /// never an error.
    pub async fn relay(&self, message: &str) -> Result<RelayOutcome, UpstreamFailure> {
        let span = info_span!("relay", request_id = %Uuid::new_v4());
        self.forward(message).instrument(span).await
    }

    async fn forward(&self, message: &str) -> Result<RelayOutcome, UpstreamFailure> {
        let payload = UpstreamPayload::from_question(message);
        debug!(?payload, url = %self.upstream.url, "sending payload upstream");

        let response = self
            .client
            .post(&self.upstream.url)
            .bearer_auth(&self.upstream.token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let failure = UpstreamFailure::transport(e);
                error!(error = %failure, "upstream request failed");
                failure
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            let failure = UpstreamFailure::transport(e);
            error!(error = %failure, "failed to read upstream body");
            failure
        })?;

        if !status.is_success() {
            let failure = UpstreamFailure::from_status(status, &text);
            error!(status = status.as_u16(), body = %text, "upstream returned an error");
            return Err(failure);
        }

        debug!(body = %text, "raw upstream response");

        // A 2xx that is not JSON has no reply path either.
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        let outcome = RelayOutcome::from(extract_reply(&body));

        match &outcome {
            RelayOutcome::Answered(_) => info!("upstream answered"),
            RelayOutcome::ExtractionMiss => {
                warn!(body = %text, "could not find message in upstream response")
            }
        }
        Ok(outcome)
    }
}
