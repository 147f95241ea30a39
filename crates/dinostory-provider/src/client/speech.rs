//! Speech synthesis against the configured TTS model.

use dinostory_core::{RemoteAudio, UpstreamAudio};
use url::Url;

use super::ClarifaiClient;
use crate::error::{ProviderError, ProviderResult};
use crate::http::HttpBackend;
use crate::models::{OutputsRequest, TextInput};
use crate::parsing::parse_audio;
use crate::url::build_outputs_url;

impl<B: HttpBackend> ClarifaiClient<B> {
    /// Synthesize `text`; at least one audio location is present on success.
    pub async fn synthesize_speech(&self, text: &str) -> ProviderResult<UpstreamAudio> {
        let api_key = self.config.api_key()?;
        let model = self.config.tts_model()?;
        let url = build_outputs_url(&self.config.base_url, &model)?;

        let body = OutputsRequest::single(&model, TextInput::Raw { raw: text });
        let data = self
            .backend
            .post_json(&url, api_key, &body)
            .await
            .inspect_err(|err| {
                tracing::error!(target: "dinostory.provider", error = %err, "Provider speech request failed");
            })?;

        let audio = parse_audio(&data)?;
        if audio.is_empty() {
            return Err(ProviderError::NoContent("audio unavailable".to_string()));
        }
        tracing::debug!(
            target: "dinostory.provider",
            inline = audio.base64.is_some(),
            hosted = audio.url.is_some(),
            "Speech synthesized"
        );
        Ok(audio)
    }

    /// Download provider-hosted audio for re-streaming.
    pub async fn download_audio(&self, url: &str) -> ProviderResult<RemoteAudio> {
        let url = Url::parse(url)?;
        let download = self.backend.get_bytes(&url).await?;
        Ok(RemoteAudio {
            bytes: download.bytes,
            mime: download.content_type,
        })
    }
}
