//! Fake upstream generators and request helpers for route tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use dinostory_axum::bootstrap::{AxumContext, CorsConfig};
use dinostory_axum::routes::create_router;
use dinostory_core::{
    CoreError, RemoteAudio, SpeechGenerator, StoryGenerator, StoryLocale, UpstreamAudio,
};
use http_body_util::BodyExt;

pub const FUNCTIONS: &str = "/.netlify/functions";

/// Story generator answering from a queue and recording prompts.
#[derive(Default)]
pub struct FakeStoryGenerator {
    answers: Mutex<VecDeque<Result<String, CoreError>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeStoryGenerator {
    pub fn answering(answer: Result<String, CoreError>) -> Self {
        let fake = Self::default();
        fake.answers.lock().unwrap().push_back(answer);
        fake
    }
}

#[async_trait]
impl StoryGenerator for FakeStoryGenerator {
    async fn generate_story(&self, prompt: &str) -> Result<String, CoreError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CoreError::Internal("no canned story".to_string())))
    }
}

/// Speech generator with one canned synthesis result and optional hosted file.
#[derive(Default)]
pub struct FakeSpeechGenerator {
    answers: Mutex<VecDeque<Result<UpstreamAudio, CoreError>>>,
    pub remote: Mutex<Option<RemoteAudio>>,
    pub texts: Mutex<Vec<String>>,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeSpeechGenerator {
    pub fn answering(answer: Result<UpstreamAudio, CoreError>) -> Self {
        let fake = Self::default();
        fake.answers.lock().unwrap().push_back(answer);
        fake
    }

    pub fn with_remote(self, remote: RemoteAudio) -> Self {
        *self.remote.lock().unwrap() = Some(remote);
        self
    }
}

#[async_trait]
impl SpeechGenerator for FakeSpeechGenerator {
    async fn synthesize(&self, text: &str) -> Result<UpstreamAudio, CoreError> {
        self.texts.lock().unwrap().push(text.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CoreError::Internal("no canned audio".to_string())))
    }

    async fn fetch_remote_audio(&self, url: &str) -> Result<RemoteAudio, CoreError> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.remote
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CoreError::upstream("hosted audio missing"))
    }
}

pub fn router(
    story: Arc<FakeStoryGenerator>,
    speech: Arc<FakeSpeechGenerator>,
    locale: StoryLocale,
) -> Router {
    let ctx = AxumContext {
        story,
        speech,
        locale,
    };
    create_router(ctx, FUNCTIONS, &CorsConfig::AllowAll)
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// Assert the response body is valid JSON and return the parsed value.
pub async fn parse_json(response: Response) -> serde_json::Value {
    let body = body_bytes(response).await;
    serde_json::from_slice(&body).unwrap_or_else(|e| panic!("Expected valid JSON body: {e}"))
}
