//! Errors raised while setting up the clients.
//!
//! Request-time failures never surface here: the story client falls back and
//! the speech client reports [`SpeechError`](dinostory_core::SpeechError).

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be built (TLS backend, proxy settings).
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
