//! `POST /generate-audio` (and its `/tts` alias).
//!
//! JSON mode reports where the audio lives. Binary mode (`?format=binary`)
//! returns the audio bytes themselves, decoding inline audio or downloading
//! the hosted file server-side.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use dinostory_core::contracts::http::{BINARY_FORMAT, SpeechRequestBody, SpeechResponseBody};
use dinostory_core::{CoreError, DEFAULT_AUDIO_MIME, UpstreamAudio, decode_inline_audio};
use serde::Deserialize;

use super::parse_json_body;
use crate::error::HttpError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SpeechQuery {
    pub format: Option<String>,
}

impl SpeechQuery {
    fn wants_binary(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|format| format.eq_ignore_ascii_case(BINARY_FORMAT))
    }
}

pub async fn generate(
    State(state): State<AppState>,
    Query(query): Query<SpeechQuery>,
    body: Bytes,
) -> Result<Response, HttpError> {
    let body: SpeechRequestBody = parse_json_body(&body)?;
    if body.text.trim().is_empty() {
        return Err(HttpError::BadRequest("text is required".to_string()));
    }

    let audio = state
        .speech
        .synthesize(&body.text)
        .await
        .map_err(|err| log_failure("Speech synthesis failed", err))?;
    if audio.is_empty() {
        return Err(HttpError::bad_gateway("Audio unavailable"));
    }

    if query.wants_binary() {
        binary_response(&state, audio).await
    } else {
        Ok(Json(SpeechResponseBody {
            audio_url: audio.url,
            audio_base64: audio.base64,
            mime: Some(DEFAULT_AUDIO_MIME.to_string()),
        })
        .into_response())
    }
}

async fn binary_response(state: &AppState, audio: UpstreamAudio) -> Result<Response, HttpError> {
    let (bytes, mime) = match (audio.base64, audio.url) {
        (Some(payload), _) => {
            let bytes = decode_inline_audio(&payload)
                .map_err(|_| HttpError::bad_gateway("Binary audio unavailable"))?;
            (bytes, DEFAULT_AUDIO_MIME.to_string())
        }
        (None, Some(url)) => {
            let remote = state
                .speech
                .fetch_remote_audio(&url)
                .await
                .map_err(|err| log_failure("Hosted audio download failed", err))?;
            let mime = remote
                .mime
                .filter(|mime| !mime.is_empty())
                .unwrap_or_else(|| DEFAULT_AUDIO_MIME.to_string());
            (remote.bytes, mime)
        }
        (None, None) => return Err(HttpError::bad_gateway("Binary audio unavailable")),
    };

    if bytes.is_empty() {
        return Err(HttpError::bad_gateway("Binary audio unavailable"));
    }
    tracing::debug!(target: "dinostory.http", bytes = bytes.len(), mime = %mime, "Streaming binary audio");
    Ok(([(header::CONTENT_TYPE, mime)], bytes).into_response())
}

fn log_failure(what: &str, err: CoreError) -> HttpError {
    let err = HttpError::from(err);
    tracing::warn!(target: "dinostory.http", status = err.status().as_u16(), error = %err, "{what}");
    err
}
