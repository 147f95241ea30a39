//! Core services: playback orchestration, the story wizard and diagnostics.

pub mod diagnostics;
pub mod playback;
pub mod wizard;

pub use diagnostics::{AUDIO_LOG_CAPACITY, AudioLog};
pub use playback::{
    ActiveResource, PlaybackDeps, PlaybackOrchestrator, PlaybackOutcome, PlaybackPhase,
    PlaybackStrategy,
};
pub use wizard::{Progress, WizardConfig, WizardController, WizardState, WizardStep};
