//! CLI bootstrap - the composition root for the headless wizard.
//!
//! Wires the HTTP clients, the file-exporting audio capabilities and the
//! playback orchestrator into a [`WizardController`]. The orchestrator and
//! the export sink write to the same diagnostics log.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use dinostory_client::{ClientConfig, HttpSpeechClient, HttpStoryClient};
use dinostory_core::{PlaybackDeps, PlaybackOrchestrator, WizardConfig, WizardController};

use crate::export::{ExportSink, FileExportContexts, FileExportDevice};

/// Everything a wizard command needs.
pub struct CliContext {
    pub controller: WizardController,
    pub sink: Arc<ExportSink>,
}

/// Build the wizard against the endpoints in `client`, exporting audio to
/// `out_dir`. Nothing is written until playback starts.
pub fn bootstrap(client: &ClientConfig, out_dir: PathBuf, audio_debug: bool) -> Result<CliContext> {
    let stories = Arc::new(HttpStoryClient::new(client)?);
    let speech = Arc::new(HttpSpeechClient::new(client)?);
    let sink = Arc::new(ExportSink::new(out_dir));

    let playback = Arc::new(
        PlaybackOrchestrator::new(PlaybackDeps {
            speech,
            device: Arc::new(FileExportDevice::new(Arc::clone(&sink))),
            contexts: Arc::new(FileExportContexts::new(Arc::clone(&sink))),
            synthesizer: None,
            locale: client.locale(),
        })
        .with_log(Arc::clone(sink.log())),
    );

    tracing::debug!(
        target: "dinostory.story",
        story_endpoint = %client.story_endpoint(),
        speech_endpoint = %client.speech_endpoint(),
        timeout_secs = client.timeout().as_secs(),
        "CLI bootstrap configured clients"
    );

    let controller = WizardController::new(
        stories,
        playback,
        WizardConfig {
            locale: client.locale(),
            audio_debug,
        },
    );
    Ok(CliContext { controller, sink })
}
