// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::{ErrorBody, ErrorDetails, INVALID_REQUEST_ERROR, UPSTREAM_FAILURE_ERROR};
use crate::services::relay::UpstreamFailure;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Errors a chat handler can hand back to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamFailure),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidInput(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: INVALID_REQUEST_ERROR.to_string(),
                    details: ErrorDetails {
                        message,
                        status: None,
                        data: None,
                    },
                },
            ),
            AppError::Upstream(failure) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: UPSTREAM_FAILURE_ERROR.to_string(),
                    details: ErrorDetails {
                        message: failure.message,
                        status: failure.status,
                        data: failure.data,
                    },
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
