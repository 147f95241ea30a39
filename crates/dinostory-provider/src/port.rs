//! Core port implementations for `ClarifaiClient`.
//!
//! Internal [`ProviderError`]s are converted to [`CoreError`] here.
//!
//! [`ProviderError`]: crate::ProviderError

use async_trait::async_trait;
use dinostory_core::{CoreError, RemoteAudio, SpeechGenerator, StoryGenerator, UpstreamAudio};

use crate::client::ClarifaiClient;
use crate::http::HttpBackend;

#[async_trait]
impl<B: HttpBackend> StoryGenerator for ClarifaiClient<B> {
    async fn generate_story(&self, prompt: &str) -> Result<String, CoreError> {
        Ok(self.generate_story_text(prompt).await?)
    }
}

#[async_trait]
impl<B: HttpBackend> SpeechGenerator for ClarifaiClient<B> {
    async fn synthesize(&self, text: &str) -> Result<UpstreamAudio, CoreError> {
        Ok(self.synthesize_speech(text).await?)
    }

    async fn fetch_remote_audio(&self, url: &str) -> Result<RemoteAudio, CoreError> {
        Ok(self.download_audio(url).await?)
    }
}
