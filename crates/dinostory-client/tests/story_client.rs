//! `HttpStoryClient` against a fake story endpoint.

mod common;

use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{StatusCode, Uri};
use axum::routing::post;
use serde_json::{Value, json};

use common::{Recorder, closed_origin, serve};
use dinostory_client::{ClientConfig, HttpStoryClient};
use dinostory_core::{StoryLocale, StoryRequest, StoryService, StorySource, Style};

const STORY_PATH: &str = "/.netlify/functions/generate-story";

fn triceratops() -> StoryRequest {
    StoryRequest::new("Triceratops", Style::Gentle, "Sharing is important").unwrap()
}

fn client_for(origin: &str) -> HttpStoryClient {
    let config = ClientConfig::new()
        .with_backend_base_url(format!("{origin}/.netlify/functions"))
        .with_timeout(Duration::from_millis(500));
    HttpStoryClient::new(&config).unwrap()
}

#[tokio::test]
async fn returns_generated_story() {
    let recorder = Recorder::default();
    let rec = recorder.clone();
    let router = Router::new().route(
        STORY_PATH,
        post(move |uri: Uri, Json(body): Json<Value>| {
            let rec = rec.clone();
            async move {
                rec.record(&uri, body);
                Json(json!({"story": "Tessa the Triceratops shared her ferns."}))
            }
        }),
    );
    let origin = serve(router).await;

    let story = client_for(&origin).request_story(&triceratops()).await;

    assert_eq!(story.source(), StorySource::Generated);
    assert_eq!(story.text(), "Tessa the Triceratops shared her ferns.");
    let hits = recorder.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(
        hits[0].body,
        json!({"dinosaur": "Triceratops", "style": "gentle", "lesson": "Sharing is important"})
    );
}

#[tokio::test]
async fn error_status_falls_back() {
    for status in [StatusCode::INTERNAL_SERVER_ERROR, StatusCode::BAD_GATEWAY] {
        let router = Router::new().route(
            STORY_PATH,
            post(move || async move {
                (
                    status,
                    Json(json!({"error": "provider request failed", "status": status.as_u16()})),
                )
            }),
        );
        let origin = serve(router).await;

        let story = client_for(&origin).request_story(&triceratops()).await;

        assert_eq!(story.source(), StorySource::Fallback, "status {status}");
        assert_eq!(
            story.text(),
            "Once there was a Triceratops who learned: Sharing is important."
        );
    }
}

#[tokio::test]
async fn empty_story_falls_back() {
    let router = Router::new().route(STORY_PATH, post(|| async { Json(json!({"story": "  "})) }));
    let origin = serve(router).await;

    let story = client_for(&origin).request_story(&triceratops()).await;

    assert_eq!(story.source(), StorySource::Fallback);
}

#[tokio::test]
async fn missing_story_field_falls_back() {
    let router = Router::new().route(STORY_PATH, post(|| async { Json(json!({"text": "hi"})) }));
    let origin = serve(router).await;

    let story = client_for(&origin).request_story(&triceratops()).await;

    assert_eq!(story.source(), StorySource::Fallback);
}

#[tokio::test]
async fn unreachable_endpoint_falls_back() {
    let origin = closed_origin().await;

    let story = client_for(&origin).request_story(&triceratops()).await;

    assert_eq!(story.source(), StorySource::Fallback);
}

#[tokio::test]
async fn timeout_falls_back() {
    let router = Router::new().route(
        STORY_PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"story": "too late"}))
        }),
    );
    let origin = serve(router).await;
    let config = ClientConfig::new()
        .with_backend_base_url(format!("{origin}/.netlify/functions"))
        .with_timeout(Duration::from_millis(100));

    let story = HttpStoryClient::new(&config)
        .unwrap()
        .request_story(&triceratops())
        .await;

    assert_eq!(story.source(), StorySource::Fallback);
}

#[tokio::test]
async fn fallback_follows_locale() {
    let origin = closed_origin().await;
    let config = ClientConfig::new()
        .with_backend_base_url(format!("{origin}/.netlify/functions"))
        .with_locale(StoryLocale::Es);

    let story = HttpStoryClient::new(&config)
        .unwrap()
        .request_story(&triceratops())
        .await;

    assert_eq!(
        story.text(),
        "Había una vez un Triceratops que aprendió: Sharing is important."
    );
}
