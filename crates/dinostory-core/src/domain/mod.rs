//! Domain types shared by every adapter.

pub mod catalog;
pub mod speech;
pub mod story;

pub use catalog::{DINOSAURS, LESSONS, LessonOption, STYLES, StyleOption, style_option};
pub use speech::{
    AudioAsset, AudioFormat, DEFAULT_AUDIO_MIME, SpeechRequest, SpeechResult,
    decode_inline_audio, encode_inline_audio,
};
pub use story::{StoryLocale, StoryRequest, StoryResult, StorySource, Style};
