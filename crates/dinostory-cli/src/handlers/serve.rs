//! Serve command handler.

use std::time::Duration;

use anyhow::Result;
use dinostory_axum::{ServerConfig, start_server};

/// Run the HTTP server until it is killed.
pub async fn execute(
    port: u16,
    functions_path: &str,
    allow_origin: Vec<String>,
    upstream_timeout_secs: u64,
) -> Result<()> {
    let config = server_config(port, functions_path, allow_origin, upstream_timeout_secs);
    start_server(config).await
}

fn server_config(
    port: u16,
    functions_path: &str,
    allow_origin: Vec<String>,
    upstream_timeout_secs: u64,
) -> ServerConfig {
    let config = ServerConfig::from_env()
        .with_port(port)
        .with_functions_path(functions_path)
        .with_upstream_timeout(Duration::from_secs(upstream_timeout_secs));
    if allow_origin.is_empty() {
        config
    } else {
        config.with_allowed_origins(allow_origin)
    }
}
