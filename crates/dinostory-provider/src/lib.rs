#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]
// `ClarifaiClient` is generic over the crate-private `HttpBackend`; callers
// use `DefaultClarifaiClient` through the core ports.
#![allow(private_bounds)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod parsing;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{ClarifaiClient, DefaultClarifaiClient};

// Configuration
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_TTS_APP_ID, DEFAULT_TTS_MODEL_ID, DEFAULT_TTS_MODEL_VERSION_ID,
    DEFAULT_TTS_USER_ID, ModelIds, ModelRef, ProviderConfig,
};

// Errors
pub use error::{ProviderError, ProviderResult};
