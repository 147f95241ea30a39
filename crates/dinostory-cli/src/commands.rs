//! Subcommands of the `dinostory` binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};
use dinostory_client::ClientConfig;
use dinostory_core::contracts::http::DEFAULT_FUNCTIONS_PATH;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the story and speech endpoints
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8888)]
        port: u16,
        /// Path prefix the endpoints are mounted under
        #[arg(long, default_value = DEFAULT_FUNCTIONS_PATH)]
        functions_path: String,
        /// Allowed CORS origin (repeatable; all origins when omitted)
        #[arg(long = "allow-origin")]
        allow_origin: Vec<String>,
        /// Timeout for requests to the upstream provider, in seconds
        #[arg(long, default_value_t = 60)]
        upstream_timeout_secs: u64,
    },

    /// Walk the wizard against a running server and print the story
    Story(StoryArgs),

    /// Create a story and read it aloud into audio files
    Read {
        #[command(flatten)]
        story: StoryArgs,
        /// Directory the audio files are written to
        #[arg(long)]
        out: PathBuf,
    },
}

/// The three wizard choices plus where to send them.
#[derive(Debug, Clone, Args)]
pub struct StoryArgs {
    /// Dinosaur protagonist, e.g. "Triceratops"
    #[arg(long)]
    pub dinosaur: String,
    /// Narrative style key (funny, adventurous, gentle, magical, educational) or free text
    #[arg(long)]
    pub style: String,
    /// Lesson the story should teach
    #[arg(long)]
    pub lesson: String,
    /// Backend base URL; overrides DINOSTORY_BACKEND_BASE_URL
    #[arg(long)]
    pub backend_url: Option<String>,
    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,
}

impl StoryArgs {
    /// Client configuration from the environment with the flags applied.
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::from_env().with_timeout(Duration::from_secs(self.timeout_secs));
        match &self.backend_url {
            Some(url) => config.with_backend_base_url(url.as_str()),
            None => config,
        }
    }
}
