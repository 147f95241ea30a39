//! Public configuration for the provider client.
//!
//! Everything is optional at construction time. Missing credentials and
//! model identifiers surface as [`ProviderError::MissingCredentials`] when a
//! request needs them.
//!
//! [`ProviderError::MissingCredentials`]: crate::ProviderError::MissingCredentials

use std::time::Duration;

use crate::error::{ProviderError, ProviderResult};

pub const DEFAULT_BASE_URL: &str = "https://api.clarifai.com/v2";

/// Public speech-synthesis model used when no TTS model is configured.
pub const DEFAULT_TTS_USER_ID: &str = "eleven-labs";
pub const DEFAULT_TTS_APP_ID: &str = "audio-generation";
pub const DEFAULT_TTS_MODEL_ID: &str = "speech-synthesis";
pub const DEFAULT_TTS_MODEL_VERSION_ID: &str = "f2cead3a965f4c419a61a4a9b501095c";

/// Fully resolved model coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRef {
    pub user_id: String,
    pub app_id: String,
    pub model_id: String,
    pub version_id: String,
}

/// Model coordinates as configured; any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelIds {
    pub user_id: Option<String>,
    pub app_id: Option<String>,
    pub model_id: Option<String>,
    pub version_id: Option<String>,
}

impl ModelIds {
    fn resolve(&self, purpose: &str) -> ProviderResult<ModelRef> {
        match (&self.user_id, &self.app_id, &self.model_id, &self.version_id) {
            (Some(user_id), Some(app_id), Some(model_id), Some(version_id)) => Ok(ModelRef {
                user_id: user_id.clone(),
                app_id: app_id.clone(),
                model_id: model_id.clone(),
                version_id: version_id.clone(),
            }),
            _ => Err(ProviderError::MissingCredentials(format!(
                "{purpose} model needs user, app, model and version ids"
            ))),
        }
    }

    fn default_tts() -> Self {
        Self {
            user_id: Some(DEFAULT_TTS_USER_ID.to_string()),
            app_id: Some(DEFAULT_TTS_APP_ID.to_string()),
            model_id: Some(DEFAULT_TTS_MODEL_ID.to_string()),
            version_id: Some(DEFAULT_TTS_MODEL_VERSION_ID.to_string()),
        }
    }
}

/// Configuration for the provider client.
///
/// # Example
///
/// ```
/// use dinostory_provider::ProviderConfig;
/// use std::time::Duration;
///
/// let config = ProviderConfig::new()
///     .with_api_key("secret")
///     .with_story_model("me", "stories", "llm", "v1")
///     .with_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub(crate) base_url: String,
    pub(crate) api_key: Option<String>,
    pub(crate) story_model: ModelIds,
    pub(crate) tts_model: ModelIds,
    pub(crate) timeout: Duration,
    pub(crate) user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            story_model: ModelIds::default(),
            tts_model: ModelIds::default_tts(),
            timeout: Duration::from_secs(60),
            user_agent: concat!("dinostory-provider/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ProviderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `CLARIFAI_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the `CLARIFAI_*` variables through `lookup`. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = ModelIds::default_tts();
        let mut config = Self::default().with_optional_api_key(get("CLARIFAI_API_KEY"));
        if let Some(base_url) = get("CLARIFAI_BASE_URL") {
            config.base_url = base_url;
        }
        config.story_model = ModelIds {
            user_id: get("CLARIFAI_USER_ID"),
            app_id: get("CLARIFAI_APP_ID"),
            model_id: get("CLARIFAI_MODEL_ID"),
            version_id: get("CLARIFAI_MODEL_VERSION_ID"),
        };
        config.tts_model = ModelIds {
            user_id: get("CLARIFAI_TTS_USER_ID").or(defaults.user_id),
            app_id: get("CLARIFAI_TTS_APP_ID").or(defaults.app_id),
            model_id: get("CLARIFAI_TTS_MODEL_ID").or(defaults.model_id),
            version_id: get("CLARIFAI_TTS_MODEL_VERSION_ID").or(defaults.version_id),
        };
        config
    }

    /// Defaults to `https://api.clarifai.com/v2`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    #[must_use]
    pub fn with_story_model(
        mut self,
        user_id: impl Into<String>,
        app_id: impl Into<String>,
        model_id: impl Into<String>,
        version_id: impl Into<String>,
    ) -> Self {
        self.story_model = ModelIds {
            user_id: Some(user_id.into()),
            app_id: Some(app_id.into()),
            model_id: Some(model_id.into()),
            version_id: Some(version_id.into()),
        };
        self
    }

    #[must_use]
    pub fn with_tts_model(
        mut self,
        user_id: impl Into<String>,
        app_id: impl Into<String>,
        model_id: impl Into<String>,
        version_id: impl Into<String>,
    ) -> Self {
        self.tts_model = ModelIds {
            user_id: Some(user_id.into()),
            app_id: Some(app_id.into()),
            model_id: Some(model_id.into()),
            version_id: Some(version_id.into()),
        };
        self
    }

    /// Upstream request timeout. Defaults to 60 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn api_key(&self) -> ProviderResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredentials("CLARIFAI_API_KEY is not set".to_string()))
    }

    pub(crate) fn story_model(&self) -> ProviderResult<ModelRef> {
        self.story_model.resolve("story")
    }

    pub(crate) fn tts_model(&self) -> ProviderResult<ModelRef> {
        self.tts_model.resolve("speech")
    }
}
