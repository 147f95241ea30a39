//! Speech request/result types and audio container sniffing.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use crate::ports::{CoreError, SpeechError};

/// Mime type assumed when neither the provider nor a response header names one.
pub const DEFAULT_AUDIO_MIME: &str = "audio/mpeg";

/// Text to synthesize, either a whole story or one chunk of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    text: String,
    binary: bool,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, binary: bool) -> Result<Self, CoreError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(CoreError::Validation("text is required".to_string()));
        }
        Ok(Self { text, binary })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn binary(&self) -> bool {
        self.binary
    }
}

/// What the speech endpoint handed back. Exactly one variant per response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechResult {
    /// Base64 payload from a JSON response, already decoded.
    InlineAudio { bytes: Bytes, mime: String },
    /// Audio hosted by the upstream provider.
    RemoteAudioUrl(String),
    /// Raw body of a binary-mode response.
    BinaryStream { bytes: Bytes, mime: String },
}

impl SpeechResult {
    /// Audio bytes carried in the response, if any.
    pub const fn bytes(&self) -> Option<&Bytes> {
        match self {
            Self::InlineAudio { bytes, .. } | Self::BinaryStream { bytes, .. } => Some(bytes),
            Self::RemoteAudioUrl(_) => None,
        }
    }

    /// Convert into something an audio element can load.
    pub fn into_asset(self) -> AudioAsset {
        match self {
            Self::InlineAudio { bytes, mime } | Self::BinaryStream { bytes, mime } => {
                AudioAsset::Bytes { data: bytes, mime }
            }
            Self::RemoteAudioUrl(url) => AudioAsset::Url(url),
        }
    }
}

/// A playable single asset: in-memory audio or a URL to stream from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioAsset {
    Bytes { data: Bytes, mime: String },
    Url(String),
}

/// Decode a base64 audio payload.
pub fn decode_inline_audio(payload: &str) -> Result<Bytes, SpeechError> {
    let data = STANDARD
        .decode(payload.trim())
        .map_err(|_| SpeechError::AudioUnavailable)?;
    if data.is_empty() {
        return Err(SpeechError::AudioUnavailable);
    }
    Ok(Bytes::from(data))
}

/// Encode audio bytes for a JSON payload.
pub fn encode_inline_audio(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Audio container recognised from leading magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mpeg,
    Wav,
    Ogg,
    Flac,
}

impl AudioFormat {
    /// Identify the container from the first bytes of `data`.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data {
            [b'I', b'D', b'3', ..] => Some(Self::Mpeg),
            [0xFF, second, ..] if second & 0xE0 == 0xE0 => Some(Self::Mpeg),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => Some(Self::Wav),
            [b'O', b'g', b'g', b'S', ..] => Some(Self::Ogg),
            [b'f', b'L', b'a', b'C', ..] => Some(Self::Flac),
            _ => None,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mpeg => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
        }
    }
}
