//! HTTP handlers for the story and speech endpoints.
//!
//! Bodies are taken as raw bytes and parsed here so that malformed JSON
//! produces the same `{ error, status }` body as every other failure.

pub mod speech;
pub mod story;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// Parse a JSON request body; an empty body parses as `{}`.
pub(crate) fn parse_json_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, HttpError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| HttpError::BadRequest(format!("Invalid JSON body: {e}")))
}
