//! Speech ports: the client-facing speech endpoint and the upstream TTS model.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use super::CoreError;
use crate::domain::{SpeechRequest, SpeechResult};

/// Failures observed when asking the speech endpoint for audio.
///
/// The playback orchestrator branches on these to pick its next strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    /// The endpoint answered but carried no usable audio.
    #[error("Audio unavailable")]
    AudioUnavailable,

    /// Timeout, transport failure or non-2xx status.
    #[error("Speech request failed (status {status:?}): {detail}")]
    RequestFailed {
        /// `None` when no HTTP response arrived (timeout, connection refused).
        status: Option<u16>,
        /// Response body or transport error, at most 800 characters.
        detail: String,
    },
}

/// Client for the speech endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechService: Send + Sync {
    async fn request_speech(&self, request: &SpeechRequest) -> Result<SpeechResult, SpeechError>;
}

/// Audio locations reported by the upstream TTS model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamAudio {
    pub base64: Option<String>,
    pub url: Option<String>,
}

impl UpstreamAudio {
    pub const fn is_empty(&self) -> bool {
        self.base64.is_none() && self.url.is_none()
    }
}

/// Audio fetched from a provider-hosted URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAudio {
    pub bytes: Bytes,
    /// The remote `Content-Type`, if it sent one.
    pub mime: Option<String>,
}

/// Upstream text-to-speech model used by the speech endpoint.
#[async_trait]
pub trait SpeechGenerator: Send + Sync {
    /// Synthesize `text`, returning whatever audio locations the model produced.
    async fn synthesize(&self, text: &str) -> Result<UpstreamAudio, CoreError>;

    /// Download a provider-hosted audio file so it can be re-streamed.
    async fn fetch_remote_audio(&self, url: &str) -> Result<RemoteAudio, CoreError>;
}
