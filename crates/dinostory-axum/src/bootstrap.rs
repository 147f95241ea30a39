//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where the provider client is wired to the
//! handlers.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dinostory_core::contracts::http::DEFAULT_FUNCTIONS_PATH;
use dinostory_core::{SpeechGenerator, StoryGenerator, StoryLocale};
use dinostory_provider::{DefaultClarifaiClient, ProviderConfig};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Prefix the endpoints are mounted under, e.g. `/.netlify/functions`.
    pub functions_path: String,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Language of prompts sent to the story model.
    pub locale: StoryLocale,
    /// Upstream provider credentials, models and timeout.
    pub provider: ProviderConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8888,
            functions_path: DEFAULT_FUNCTIONS_PATH.to_string(),
            cors: CorsConfig::default(),
            locale: StoryLocale::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read `DINOSTORY_LOCALE` and the provider variables from the process
    /// environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ServerConfig::from_env`], reading variables through `lookup`.
    /// Unknown locales fall back to English.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let locale = lookup("DINOSTORY_LOCALE")
            .and_then(|tag| StoryLocale::parse(&tag))
            .unwrap_or_default();
        Self {
            locale,
            provider: ProviderConfig::from_lookup(lookup),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Mount point for the endpoints. Normalized to a leading slash and no
    /// trailing slash; `/` or an empty string mounts them at the root.
    #[must_use]
    pub fn with_functions_path(mut self, path: &str) -> Self {
        self.functions_path = normalize_functions_path(path);
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    #[must_use]
    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.provider = self.provider.with_timeout(timeout);
        self
    }

    #[must_use]
    pub const fn with_locale(mut self, locale: StoryLocale) -> Self {
        self.locale = locale;
        self
    }
}

pub(crate) fn normalize_functions_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Upstream generative-text model.
    pub story: Arc<dyn StoryGenerator>,
    /// Upstream text-to-speech model.
    pub speech: Arc<dyn SpeechGenerator>,
    /// Language of story prompts.
    pub locale: StoryLocale,
}

/// Build the provider client and wrap it in an [`AxumContext`].
///
/// Credentials are not checked here; a request without them fails with a
/// configuration error.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let client = Arc::new(DefaultClarifaiClient::new(config.provider.clone())?);

    tracing::info!(
        target: "dinostory.http",
        provider = config.provider.base_url(),
        timeout_secs = config.provider.timeout().as_secs(),
        locale = ?config.locale,
        "Axum bootstrap configured provider"
    );

    Ok(AxumContext {
        story: client.clone(),
        speech: client,
        locale: config.locale,
    })
}

/// Start the web server on the configured port.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config)?;
    let app = crate::routes::create_router(ctx, &config.functions_path, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!(
        target: "dinostory.http",
        "dinostory server listening on http://{addr}{}",
        config.functions_path
    );

    axum::serve(listener, app).await?;
    Ok(())
}
