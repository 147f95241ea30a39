//! Provider client for story and speech generation.

mod speech;
mod story;

use crate::config::ProviderConfig;
use crate::error::ProviderResult;
use crate::http::{HttpBackend, ReqwestBackend};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default provider client using the reqwest HTTP backend.
pub type DefaultClarifaiClient = ClarifaiClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the provider's model `outputs` API.
///
/// Generic over the HTTP backend so tests can inject a fake. External code
/// builds a [`DefaultClarifaiClient`] and uses it through the core ports.
pub struct ClarifaiClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: ProviderConfig,
}

impl DefaultClarifaiClient {
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        let backend = ReqwestBackend::new(&config)?;
        Ok(Self { backend, config })
    }
}

impl<B: HttpBackend> ClarifaiClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: ProviderConfig, backend: B) -> Self {
        Self { backend, config }
    }

    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
