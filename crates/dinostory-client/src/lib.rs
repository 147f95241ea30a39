#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio as _;

mod config;
mod error;
mod speech;
mod story;

pub use config::{ClientConfig, DEFAULT_BACKEND_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ClientError, ClientResult};
pub use speech::HttpSpeechClient;
pub use story::HttpStoryClient;

fn build_http(config: &ClientConfig) -> ClientResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(concat!("dinostory-client/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
