//! Story ports: the client-facing story endpoint and the upstream model.

use async_trait::async_trait;

use super::CoreError;
use crate::domain::{StoryRequest, StoryResult};

/// Fetches a story for the wizard.
///
/// Implementations never fail: any transport or endpoint problem resolves
/// to the request's deterministic fallback story.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryService: Send + Sync {
    async fn request_story(&self, request: &StoryRequest) -> StoryResult;
}

/// Upstream generative-text model used by the story endpoint.
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Generate story text for a fully composed prompt.
    async fn generate_story(&self, prompt: &str) -> Result<String, CoreError>;
}
