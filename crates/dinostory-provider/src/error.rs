//! Internal error types for provider operations.
//!
//! These errors are internal to `dinostory-provider` and are mapped to
//! [`CoreError`] at the port boundary.

use dinostory_core::CoreError;
use dinostory_core::utils::truncate_detail;
use thiserror::Error;

/// Result type alias for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors related to the upstream provider API.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// API request failed with an HTTP error status.
    #[error("Provider request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Response body, truncated for diagnostics
        body: String,
    },

    /// API key or model identifiers are not configured.
    #[error("Missing provider credentials: {0}")]
    MissingCredentials(String),

    /// The provider answered but the payload held nothing usable.
    #[error("Provider returned no content: {0}")]
    NoContent(String),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Inline audio was not valid base64.
    #[error("Invalid inline audio: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl ProviderError {
    pub(crate) fn api_request_failed(status: u16, url: &str, body: &str) -> Self {
        Self::ApiRequestFailed {
            status,
            url: url.to_string(),
            body: truncate_detail(body),
        }
    }
}

impl From<ProviderError> for CoreError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiRequestFailed { status, body, .. } => Self::Upstream {
                message: "provider request failed".to_string(),
                status: Some(status),
                detail: (!body.is_empty()).then_some(body),
            },
            ProviderError::MissingCredentials(what) => Self::Configuration(what),
            ProviderError::InvalidUrl(e) => Self::Configuration(format!("invalid provider URL: {e}")),
            ProviderError::NoContent(what) => Self::upstream(what),
            ProviderError::Network(e) => Self::Upstream {
                message: "provider unreachable".to_string(),
                status: e.status().map(|s| s.as_u16()),
                detail: Some(truncate_detail(&e.to_string())),
            },
            ProviderError::JsonParse(e) => Self::Upstream {
                message: "provider returned malformed JSON".to_string(),
                status: None,
                detail: Some(e.to_string()),
            },
            ProviderError::Base64(e) => Self::Upstream {
                message: "provider returned malformed audio".to_string(),
                status: None,
                detail: Some(e.to_string()),
            },
        }
    }
}
