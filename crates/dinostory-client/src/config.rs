//! Endpoint locations and timeouts for the clients.

use std::time::Duration;

use dinostory_core::StoryLocale;
use dinostory_core::contracts::http::{
    BINARY_FORMAT, DEFAULT_FUNCTIONS_PATH, SPEECH_ALIAS_ROUTE, SPEECH_ROUTE, STORY_ROUTE,
};

pub const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:8888/.netlify/functions";

/// Per-request timeout for both endpoints.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration shared by [`HttpStoryClient`](crate::HttpStoryClient) and
/// [`HttpSpeechClient`](crate::HttpSpeechClient).
///
/// # Example
///
/// ```
/// use dinostory_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_backend_base_url("http://localhost:8888/.netlify/functions/")
///     .with_tts_base_url("https://tts.example.com")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.speech_endpoint(), "https://tts.example.com/tts");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    backend_base_url: String,
    tts_base_url: Option<String>,
    timeout: Duration,
    locale: StoryLocale,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
            tts_base_url: None,
            timeout: DEFAULT_TIMEOUT,
            locale: StoryLocale::default(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `DINOSTORY_BACKEND_BASE_URL`, `DINOSTORY_TTS_BASE_URL` and
    /// `DINOSTORY_LOCALE` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();
        if let Some(base) = get("DINOSTORY_BACKEND_BASE_URL") {
            config = config.with_backend_base_url(base);
        }
        if let Some(base) = get("DINOSTORY_TTS_BASE_URL") {
            config = config.with_tts_base_url(base);
        }
        if let Some(locale) = get("DINOSTORY_LOCALE").and_then(|tag| StoryLocale::parse(&tag)) {
            config.locale = locale;
        }
        config
    }

    #[must_use]
    pub fn with_backend_base_url(mut self, base: impl Into<String>) -> Self {
        self.backend_base_url = trim_base(base.into());
        self
    }

    /// Base for the speech endpoint. Defaults to the backend base.
    #[must_use]
    pub fn with_tts_base_url(mut self, base: impl Into<String>) -> Self {
        self.tts_base_url = Some(trim_base(base.into()));
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Language of the fallback story.
    #[must_use]
    pub const fn with_locale(mut self, locale: StoryLocale) -> Self {
        self.locale = locale;
        self
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub const fn locale(&self) -> StoryLocale {
        self.locale
    }

    pub fn story_endpoint(&self) -> String {
        format!("{}{STORY_ROUTE}", self.backend_base_url)
    }

    /// `<tts base>/generate-audio` when the TTS base is the functions hosting
    /// path, `<tts base>/tts` otherwise.
    pub fn speech_endpoint(&self) -> String {
        let base = self.tts_base_url.as_deref().unwrap_or(&self.backend_base_url);
        let route = if base.ends_with(DEFAULT_FUNCTIONS_PATH) {
            SPEECH_ROUTE
        } else {
            SPEECH_ALIAS_ROUTE
        };
        format!("{base}{route}")
    }

    pub fn binary_speech_endpoint(&self) -> String {
        format!("{}?format={BINARY_FORMAT}", self.speech_endpoint())
    }
}

fn trim_base(base: String) -> String {
    base.trim().trim_end_matches('/').to_string()
}
