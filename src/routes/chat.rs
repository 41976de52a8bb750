use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::{
    error::AppError,
    message::{ChatReply, ChatRequest},
    state::SharedState,
};

/// Tells callers whether `response` came from the upstream or is the fallback.
pub const RELAY_OUTCOME_HEADER: &str = "x-relay-outcome";

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) =
        payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    info!(message = %payload.message, "received chat message");

    let outcome = state.relay.relay(&payload.message).await?;

    let reply = ChatReply {
        response: outcome.response_text().to_string(),
    };
    Ok(([(RELAY_OUTCOME_HEADER, outcome.label())], Json(reply)).into_response())
}
