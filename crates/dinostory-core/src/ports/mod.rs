//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure: the story and speech endpoints (client side), the
//! upstream generative provider (server side) and the host's audio
//! capabilities (playback side).
//!
//! # Design Rules
//!
//! - No `reqwest` or `axum` types in any signature
//! - Host audio objects are capabilities injected into the orchestrator,
//!   never reached through globals
//! - Each port has its own small error type where callers branch on it

pub mod playback;
pub mod speech;
pub mod story;

use thiserror::Error;

pub use playback::{
    AudioContextFactory, AudioPlaybackDevice, DecodedAudio, LowLevelAudioBuffer, PlaybackError,
    SpeechSynthesizer, UtteranceParams,
};
pub use speech::{RemoteAudio, SpeechError, SpeechGenerator, SpeechService, UpstreamAudio};
pub use story::{StoryGenerator, StoryService};

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters map it to their own shapes (HTTP status codes, CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required field is missing or blank.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials or model identifiers are missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The upstream provider failed or returned nothing usable.
    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        /// HTTP status reported by the provider, if it answered at all.
        status: Option<u16>,
        /// Truncated provider response body for diagnostics.
        detail: Option<String>,
    },

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
            status: None,
            detail: None,
        }
    }
}
