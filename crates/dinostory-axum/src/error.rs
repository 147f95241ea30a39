//! Axum-specific error types and mappings.
//!
//! Maps [`CoreError`] to HTTP status codes and a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dinostory_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (missing fields, malformed JSON).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The upstream provider failed or produced nothing usable.
    #[error("Bad gateway: {message}")]
    BadGateway {
        message: String,
        upstream_status: Option<u16>,
        detail: Option<String>,
    },

    /// Internal server error, including missing provider configuration.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::BadGateway {
            message: message.into(),
            upstream_status: None,
            detail: None,
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none", rename = "upstreamStatus")]
    upstream_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest(msg) | Self::Internal(msg) => ErrorBody {
                error: msg,
                status: status.as_u16(),
                upstream_status: None,
                detail: None,
            },
            Self::BadGateway {
                message,
                upstream_status,
                detail,
            } => ErrorBody {
                error: message,
                status: status.as_u16(),
                upstream_status,
                detail,
            },
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::Configuration(msg) => Self::Internal(format!("Config: {msg}")),
            CoreError::Upstream {
                message,
                status,
                detail,
            } => Self::BadGateway {
                message,
                upstream_status: status,
                detail,
            },
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}
