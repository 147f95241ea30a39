#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use axum as _;
#[cfg(test)]
use serde_json as _;

// Used by the binary target only.
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod export;
pub mod handlers;
pub mod parser;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::{Commands, StoryArgs};
pub use error::CliError;
pub use export::{ExportSink, FileExportContexts, FileExportDevice};
pub use parser::Cli;
