//! HTTP backend abstraction for the provider API.
//!
//! The client is generic over [`HttpBackend`] so tests can inject canned
//! provider responses without a network.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Bytes downloaded from a hosted URL plus the `Content-Type` it came with.
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// Trait for HTTP backends that talk to the provider.
///
/// This is an implementation detail; external code uses the core
/// `StoryGenerator` and `SpeechGenerator` ports.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST `body` as JSON with `Authorization: Key {api_key}` and return the
    /// parsed JSON response. Non-2xx statuses become
    /// [`ProviderError::ApiRequestFailed`] carrying the response body.
    async fn post_json<T: Serialize + Sync>(
        &self,
        url: &Url,
        api_key: &str,
        body: &T,
    ) -> ProviderResult<Value>;

    /// GET a hosted file without provider credentials.
    async fn get_bytes(&self, url: &Url) -> ProviderResult<Download>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    async fn failure(url: &Url, response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ProviderError::api_request_failed(status, url.as_str(), &body)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json<T: Serialize + Sync>(
        &self,
        url: &Url,
        api_key: &str,
        body: &T,
    ) -> ProviderResult<Value> {
        let response = self
            .client
            .post(url.as_str())
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Key {api_key}"))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(url, response).await);
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_bytes(&self, url: &Url) -> ProviderResult<Download> {
        let response = self.client.get(url.as_str()).send().await?;
        if !response.status().is_success() {
            return Err(Self::failure(url, response).await);
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        Ok(Download {
            bytes,
            content_type,
        })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
