//! Host audio capabilities used by the playback orchestrator.
//!
//! Three independent capabilities mirror what a browser exposes: an audio
//! element that plays a whole asset, a low-level buffer API that decodes and
//! plays one buffer at a time, and on-device speech synthesis. The
//! orchestrator only ever talks to these traits.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::domain::{AudioAsset, AudioFormat, StoryLocale};

/// Errors raised by playback capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The environment refused to start playback (autoplay policy, busy device).
    #[error("Playback rejected: {0}")]
    Rejected(String),

    /// Audio bytes could not be decoded.
    #[error("Audio decode failed: {0}")]
    Decode(String),

    /// The capability does not exist on this host.
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    /// The device failed after playback started.
    #[error("Audio device error: {0}")]
    Device(String),
}

/// Plays one complete audio asset (an `<audio>` element in a browser).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AudioPlaybackDevice: Send + Sync {
    /// Load `asset` and play it.
    ///
    /// Resolves when playback ends, either naturally or because [`stop`]
    /// was called. Returns [`PlaybackError::Rejected`] if playback could not
    /// start.
    ///
    /// [`stop`]: AudioPlaybackDevice::stop
    async fn play_asset(&self, asset: AudioAsset) -> Result<(), PlaybackError>;

    /// Pause, rewind and release the loaded asset, including any object URL
    /// generated for in-memory audio. Must be a no-op when nothing is loaded.
    fn stop(&self);
}

/// A decoded audio buffer ready for a buffer-source node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    pub format: AudioFormat,
    pub data: Bytes,
}

/// Low-level buffer playback (a Web Audio `AudioContext`).
#[async_trait]
pub trait LowLevelAudioBuffer: Send + Sync {
    /// Resume a suspended context before use.
    async fn resume(&self) -> Result<(), PlaybackError>;

    /// Decode encoded audio into a playable buffer.
    async fn decode(&self, data: Bytes, mime: &str) -> Result<DecodedAudio, PlaybackError>;

    /// Play one buffer through a fresh source node, resolving when it ends
    /// or when [`stop`] is called.
    ///
    /// [`stop`]: LowLevelAudioBuffer::stop
    async fn play(&self, buffer: DecodedAudio) -> Result<(), PlaybackError>;

    /// Stop and discard the active source node, if any.
    fn stop(&self);

    /// Suspend the context. The context stays reusable.
    fn suspend(&self);
}

/// Creates the shared low-level audio context on first use.
#[cfg_attr(test, mockall::automock)]
pub trait AudioContextFactory: Send + Sync {
    fn create(&self) -> Result<Arc<dyn LowLevelAudioBuffer>, PlaybackError>;
}

/// Voice parameters for on-device synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct UtteranceParams {
    pub lang: &'static str,
    pub rate: f32,
    pub pitch: f32,
}

impl UtteranceParams {
    /// Slightly slow, slightly high: a bedtime reading voice.
    pub const fn bedtime(locale: StoryLocale) -> Self {
        Self {
            lang: locale.voice_tag(),
            rate: 0.9,
            pitch: 1.1,
        }
    }
}

/// On-device speech synthesis (`speechSynthesis` in a browser).
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text`, resolving at end of utterance or on [`cancel`].
    ///
    /// [`cancel`]: SpeechSynthesizer::cancel
    async fn speak(&self, text: &str, params: &UtteranceParams) -> Result<(), PlaybackError>;

    /// Cancel any in-flight utterance. Safe to call when idle.
    fn cancel(&self);
}
