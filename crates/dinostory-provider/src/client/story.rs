//! Story generation against the configured text model.

use dinostory_core::utils::truncate_detail;
use serde_json::Value;
use url::Url;

use super::ClarifaiClient;
use crate::config::ModelRef;
use crate::error::{ProviderError, ProviderResult};
use crate::http::HttpBackend;
use crate::models::{OutputsRequest, TextInput};
use crate::parsing::{parse_story_text, payload_snippet};
use crate::url::build_outputs_url;

impl<B: HttpBackend> ClarifaiClient<B> {
    /// Generate story text for `prompt`.
    ///
    /// A rejected request is retried once with the plain-string payload
    /// shape. If both fail, the error carries the second status and the
    /// first non-empty response body.
    pub async fn generate_story_text(&self, prompt: &str) -> ProviderResult<String> {
        let api_key = self.config.api_key()?;
        let model = self.config.story_model()?;
        let url = build_outputs_url(&self.config.base_url, &model)?;

        let raw = TextInput::Raw { raw: prompt };
        let data = match self.post_text(&url, api_key, &model, raw).await {
            Ok(data) => data,
            Err(ProviderError::ApiRequestFailed { status, body: first, .. }) => {
                tracing::debug!(
                    target: "dinostory.provider",
                    status,
                    "Story request rejected; retrying with plain text payload"
                );
                let plain = TextInput::Plain(prompt);
                match self.post_text(&url, api_key, &model, plain).await {
                    Ok(data) => data,
                    Err(ProviderError::ApiRequestFailed { status, url, body: second }) => {
                        let body = if first.is_empty() { second } else { first };
                        tracing::error!(
                            target: "dinostory.provider",
                            status,
                            detail = %truncate_detail(&body),
                            "Provider story request failed"
                        );
                        return Err(ProviderError::ApiRequestFailed { status, url, body });
                    }
                    Err(err) => return Err(err),
                }
            }
            Err(err) => return Err(err),
        };

        parse_story_text(&data).ok_or_else(|| {
            tracing::error!(
                target: "dinostory.provider",
                payload = %payload_snippet(&data),
                "Provider response carried no story"
            );
            ProviderError::NoContent("story text missing from provider response".to_string())
        })
    }

    async fn post_text(
        &self,
        url: &Url,
        api_key: &str,
        model: &ModelRef,
        text: TextInput<'_>,
    ) -> ProviderResult<Value> {
        let body = OutputsRequest::single(model, text);
        self.backend.post_json(url, api_key, &body).await
    }
}
