//! Speech endpoint client.
//!
//! JSON mode asks the endpoint where the audio lives; binary mode asks for
//! the audio bytes themselves. Every failure is reported as a
//! [`SpeechError`] so the caller can decide what to try next.

use async_trait::async_trait;
use dinostory_core::contracts::http::{SpeechRequestBody, SpeechResponseBody};
use dinostory_core::{
    DEFAULT_AUDIO_MIME, SpeechError, SpeechRequest, SpeechResult, SpeechService,
    decode_inline_audio, truncate_detail,
};
use reqwest::header::CONTENT_TYPE;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// [`SpeechService`] backed by the speech endpoint.
pub struct HttpSpeechClient {
    http: reqwest::Client,
    endpoint: String,
    binary_endpoint: String,
}

impl HttpSpeechClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: crate::build_http(config)?,
            endpoint: config.speech_endpoint(),
            binary_endpoint: config.binary_speech_endpoint(),
        })
    }

    async fn send(&self, request: &SpeechRequest) -> Result<SpeechResult, SpeechError> {
        let url = if request.binary() {
            &self.binary_endpoint
        } else {
            &self.endpoint
        };
        let body = SpeechRequestBody {
            text: request.text().to_string(),
        };
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SpeechError::RequestFailed {
                status: Some(status.as_u16()),
                detail: truncate_detail(&text),
            });
        }

        if request.binary() {
            let mime = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
                .map_or_else(|| DEFAULT_AUDIO_MIME.to_string(), str::to_string);
            let bytes = response.bytes().await.map_err(transport_failure)?;
            if bytes.is_empty() {
                return Err(SpeechError::AudioUnavailable);
            }
            return Ok(SpeechResult::BinaryStream { bytes, mime });
        }

        let body: SpeechResponseBody =
            response
                .json()
                .await
                .map_err(|err| SpeechError::RequestFailed {
                    status: Some(status.as_u16()),
                    detail: truncate_detail(&err.to_string()),
                })?;
        interpret_json(body)
    }
}

/// Inline audio wins over a hosted URL; neither means no audio.
fn interpret_json(body: SpeechResponseBody) -> Result<SpeechResult, SpeechError> {
    if let Some(payload) = body.audio_base64.filter(|p| !p.trim().is_empty()) {
        let bytes = decode_inline_audio(&payload)?;
        let mime = body
            .mime
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_AUDIO_MIME.to_string());
        return Ok(SpeechResult::InlineAudio { bytes, mime });
    }
    body.audio_url
        .filter(|url| !url.trim().is_empty())
        .map(SpeechResult::RemoteAudioUrl)
        .ok_or(SpeechError::AudioUnavailable)
}

fn transport_failure(err: reqwest::Error) -> SpeechError {
    SpeechError::RequestFailed {
        status: err.status().map(|s| s.as_u16()),
        detail: truncate_detail(&err.to_string()),
    }
}

#[async_trait]
impl SpeechService for HttpSpeechClient {
    async fn request_speech(&self, request: &SpeechRequest) -> Result<SpeechResult, SpeechError> {
        let result = self.send(request).await;
        match &result {
            Ok(speech) => tracing::debug!(
                target: "dinostory.speech",
                binary = request.binary(),
                bytes = speech.bytes().map_or(0, |b| b.len()),
                "Speech received"
            ),
            Err(err) => tracing::warn!(
                target: "dinostory.speech",
                binary = request.binary(),
                error = %err,
                "Speech request failed"
            ),
        }
        result
    }
}
