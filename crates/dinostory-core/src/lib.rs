#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod contracts;
pub mod domain;
pub mod ports;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{
    AudioAsset, AudioFormat, DEFAULT_AUDIO_MIME, DINOSAURS, LESSONS, LessonOption, STYLES,
    SpeechRequest, SpeechResult, StoryLocale, StoryRequest, StoryResult, StorySource, Style,
    StyleOption, decode_inline_audio, encode_inline_audio, style_option,
};
pub use ports::{
    AudioContextFactory, AudioPlaybackDevice, CoreError, DecodedAudio, LowLevelAudioBuffer,
    PlaybackError, RemoteAudio, SpeechError, SpeechGenerator, SpeechService, SpeechSynthesizer,
    StoryGenerator, StoryService, UpstreamAudio, UtteranceParams,
};
pub use services::{
    AUDIO_LOG_CAPACITY, ActiveResource, AudioLog, PlaybackDeps, PlaybackOrchestrator,
    PlaybackOutcome, PlaybackPhase, PlaybackStrategy, Progress, WizardConfig, WizardController,
    WizardState, WizardStep,
};
pub use utils::{split_into_chunks, truncate_detail};
