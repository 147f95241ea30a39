//! `HttpSpeechClient` against a fake speech endpoint.

mod common;

use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{StatusCode, Uri, header};
use axum::routing::post;
use serde_json::{Value, json};

use common::{Recorder, closed_origin, serve};
use dinostory_client::{ClientConfig, HttpSpeechClient};
use dinostory_core::{SpeechError, SpeechRequest, SpeechResult, SpeechService};

const SPEECH_PATH: &str = "/.netlify/functions/generate-audio";

fn client_for(origin: &str) -> HttpSpeechClient {
    let config = ClientConfig::new()
        .with_backend_base_url(format!("{origin}/.netlify/functions"))
        .with_timeout(Duration::from_millis(500));
    HttpSpeechClient::new(&config).unwrap()
}

fn json_request() -> SpeechRequest {
    SpeechRequest::new("Good night, little Rex.", false).unwrap()
}

fn binary_request() -> SpeechRequest {
    SpeechRequest::new("Good night.", true).unwrap()
}

/// A speech endpoint that records each request and answers with `reply`.
fn recording_router(path: &str, recorder: &Recorder, reply: Value) -> Router {
    let rec = recorder.clone();
    Router::new().route(
        path,
        post(move |uri: Uri, Json(body): Json<Value>| {
            let rec = rec.clone();
            let reply = reply.clone();
            async move {
                rec.record(&uri, body);
                Json(reply)
            }
        }),
    )
}

#[tokio::test]
async fn json_mode_decodes_inline_audio() {
    let recorder = Recorder::default();
    let router = recording_router(
        SPEECH_PATH,
        &recorder,
        json!({"audioUrl": "https://cdn.example/a.mp3", "audioBase64": "SUQz", "mime": "audio/mpeg"}),
    );
    let origin = serve(router).await;

    let result = client_for(&origin).request_speech(&json_request()).await.unwrap();

    assert!(matches!(result, SpeechResult::InlineAudio { ref mime, .. } if mime == "audio/mpeg"));
    assert_eq!(result.bytes().map(|b| &b[..]), Some(&b"ID3"[..]));
    let hits = recorder.hits();
    assert_eq!(hits[0].body, json!({"text": "Good night, little Rex."}));
    assert_eq!(hits[0].query, None);
}

#[tokio::test]
async fn json_mode_returns_hosted_url() {
    let recorder = Recorder::default();
    let router = recording_router(
        SPEECH_PATH,
        &recorder,
        json!({"audioUrl": "https://cdn.example/a.mp3"}),
    );
    let origin = serve(router).await;

    let result = client_for(&origin).request_speech(&json_request()).await;

    assert_eq!(
        result,
        Ok(SpeechResult::RemoteAudioUrl("https://cdn.example/a.mp3".to_string()))
    );
}

#[tokio::test]
async fn json_mode_without_audio_is_unavailable() {
    let recorder = Recorder::default();
    let router = recording_router(SPEECH_PATH, &recorder, json!({"mime": "audio/mpeg"}));
    let origin = serve(router).await;

    let result = client_for(&origin).request_speech(&json_request()).await;

    assert_eq!(result, Err(SpeechError::AudioUnavailable));
}

#[tokio::test]
async fn binary_mode_returns_body_and_content_type() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let router = Router::new().route(
        SPEECH_PATH,
        post(move |uri: Uri, Json(body): Json<Value>| {
            let rec = rec.clone();
            async move {
                rec.record(&uri, body);
                ([(header::CONTENT_TYPE, "audio/wav")], b"RIFF\0\0\0\0WAVE".to_vec())
            }
        }),
    );
    let origin = serve(router).await;

    let result = client_for(&origin).request_speech(&binary_request()).await.unwrap();

    assert!(matches!(result, SpeechResult::BinaryStream { ref mime, .. } if mime == "audio/wav"));
    assert_eq!(result.bytes().map(|b| b.len()), Some(12));
    assert_eq!(recorder.hits()[0].query.as_deref(), Some("format=binary"));
}

#[tokio::test]
async fn binary_mode_empty_body_is_unavailable() {
    let router = Router::new().route(
        SPEECH_PATH,
        post(|| async { ([(header::CONTENT_TYPE, "audio/mpeg")], Vec::<u8>::new()) }),
    );
    let origin = serve(router).await;

    let result = client_for(&origin).request_speech(&binary_request()).await;

    assert_eq!(result, Err(SpeechError::AudioUnavailable));
}

#[tokio::test]
async fn error_status_carries_truncated_detail() {
    let router = Router::new().route(
        SPEECH_PATH,
        post(|| async { (StatusCode::BAD_GATEWAY, "z".repeat(2_000)) }),
    );
    let origin = serve(router).await;

    let result = client_for(&origin).request_speech(&json_request()).await;

    match result {
        Err(SpeechError::RequestFailed { status, detail }) => {
            assert_eq!(status, Some(502));
            assert_eq!(detail.len(), 800);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn timeout_has_no_status() {
    let router = Router::new().route(
        SPEECH_PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"audioUrl": "https://cdn.example/late.mp3"}))
        }),
    );
    let origin = serve(router).await;
    let config = ClientConfig::new()
        .with_backend_base_url(format!("{origin}/.netlify/functions"))
        .with_timeout(Duration::from_millis(100));

    let result = HttpSpeechClient::new(&config)
        .unwrap()
        .request_speech(&json_request())
        .await;

    assert!(matches!(result, Err(SpeechError::RequestFailed { status: None, .. })));
}

#[tokio::test]
async fn unreachable_endpoint_has_no_status() {
    let origin = closed_origin().await;

    let result = client_for(&origin).request_speech(&binary_request()).await;

    assert!(matches!(result, Err(SpeechError::RequestFailed { status: None, .. })));
}

#[tokio::test]
async fn separate_tts_base_uses_tts_route() {
    let recorder = Recorder::default();
    let router = recording_router(
        "/voice/tts",
        &recorder,
        json!({"audioUrl": "https://cdn.example/a.mp3"}),
    );
    let origin = serve(router).await;
    let config = ClientConfig::new().with_tts_base_url(format!("{origin}/voice/"));

    let result = HttpSpeechClient::new(&config)
        .unwrap()
        .request_speech(&json_request())
        .await;

    assert!(result.is_ok());
    assert_eq!(recorder.hits()[0].path, "/voice/tts");
}
