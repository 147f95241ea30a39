//! Story endpoint client.

use async_trait::async_trait;
use dinostory_core::contracts::http::{StoryRequestBody, StoryResponseBody};
use dinostory_core::{StoryLocale, StoryRequest, StoryResult, StoryService, truncate_detail};
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Why a story request fell back. Only ever logged.
#[derive(Debug, Error)]
enum StoryFailure {
    #[error("story endpoint returned {status}")]
    Status { status: u16, detail: String },
    #[error("story endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("story endpoint returned no story")]
    Empty,
}

impl StoryFailure {
    fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::Empty => None,
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Status { detail, .. } => detail.clone(),
            other => truncate_detail(&other.to_string()),
        }
    }
}

/// [`StoryService`] backed by `POST <backend>/generate-story`.
pub struct HttpStoryClient {
    http: reqwest::Client,
    endpoint: String,
    locale: StoryLocale,
}

impl HttpStoryClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: crate::build_http(config)?,
            endpoint: config.story_endpoint(),
            locale: config.locale(),
        })
    }

    async fn fetch(&self, request: &StoryRequest) -> Result<String, StoryFailure> {
        let body = StoryRequestBody {
            dinosaur: request.subject().to_string(),
            style: request.style().key().to_string(),
            lesson: request.lesson().to_string(),
        };
        let response = self.http.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StoryFailure::Status {
                status: status.as_u16(),
                detail: error_detail(&text),
            });
        }

        let body: StoryResponseBody = response.json().await.map_err(|_| StoryFailure::Empty)?;
        Ok(body.story)
    }
}

/// Prefer the `detail` or `error` field of a JSON error body, else the raw text.
fn error_detail(body: &str) -> String {
    let field = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        ["detail", "error"]
            .iter()
            .find_map(|key| json.get(*key).and_then(Value::as_str).map(str::to_string))
    });
    truncate_detail(field.as_deref().unwrap_or(body))
}

#[async_trait]
impl StoryService for HttpStoryClient {
    async fn request_story(&self, request: &StoryRequest) -> StoryResult {
        let outcome = self
            .fetch(request)
            .await
            .and_then(|text| StoryResult::generated(text).ok_or(StoryFailure::Empty));

        match outcome {
            Ok(story) => {
                tracing::debug!(target: "dinostory.story", len = story.text().len(), "Story received");
                story
            }
            Err(failure) => {
                tracing::warn!(
                    target: "dinostory.story",
                    status = ?failure.status(),
                    detail = %failure.detail(),
                    "Story request failed, using fallback story"
                );
                request.fallback(self.locale)
            }
        }
    }
}
