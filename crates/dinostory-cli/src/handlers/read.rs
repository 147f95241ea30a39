//! Read command handler: create a story, then read it aloud into files.

use std::path::PathBuf;

use anyhow::Result;
use dinostory_core::{PlaybackOutcome, PlaybackStrategy};

use crate::bootstrap::CliContext;
use crate::commands::StoryArgs;
use crate::handlers::story;

/// What a `read` run produced.
#[derive(Debug)]
pub struct ReadSummary {
    pub outcome: PlaybackOutcome,
    pub files: Vec<PathBuf>,
}

pub async fn execute(ctx: &mut CliContext, args: &StoryArgs) -> Result<ReadSummary> {
    story::execute(ctx, args).await?;

    let outcome = ctx.controller.toggle_reading().await;
    let files = ctx.sink.written();

    match &outcome {
        PlaybackOutcome::Finished(strategy) => {
            println!("Read aloud via {}:", describe(*strategy));
            for file in &files {
                println!("  {}", file.display());
            }
        }
        PlaybackOutcome::Exhausted => {
            eprintln!("No audio could be produced; the story is above.");
        }
        PlaybackOutcome::Interrupted(err) => {
            eprintln!("Reading stopped early: {err}");
        }
        PlaybackOutcome::Stopped | PlaybackOutcome::NothingToPlay => {}
    }

    if let Some(entries) = ctx.controller.audio_log() {
        eprintln!("Audio log:");
        for entry in entries {
            eprintln!("  {entry}");
        }
    }

    Ok(ReadSummary { outcome, files })
}

const fn describe(strategy: PlaybackStrategy) -> &'static str {
    match strategy {
        PlaybackStrategy::SingleAsset => "a single audio file",
        PlaybackStrategy::ChunkedStream => "chunked speech",
        PlaybackStrategy::OnDevice => "on-device synthesis",
    }
}
