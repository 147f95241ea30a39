//! HTTP routes and wire bodies for the story and speech endpoints.

use serde::{Deserialize, Serialize};

/// Prefix the endpoints are mounted under by default.
pub const DEFAULT_FUNCTIONS_PATH: &str = "/.netlify/functions";

/// Story generation endpoint, relative to the functions path.
pub const STORY_ROUTE: &str = "/generate-story";

/// Speech endpoint, relative to the functions path.
pub const SPEECH_ROUTE: &str = "/generate-audio";

/// Speech endpoint alias used when the TTS base URL is not the functions path.
pub const SPEECH_ALIAS_ROUTE: &str = "/tts";

/// Query parameter value that switches the speech endpoint to raw audio bytes.
pub const BINARY_FORMAT: &str = "binary";

/// `POST /generate-story` request body.
///
/// Missing fields deserialize as empty strings so the handler can answer
/// with a validation error instead of a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequestBody {
    #[serde(default)]
    pub dinosaur: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub lesson: String,
}

/// `POST /generate-story` success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResponseBody {
    pub story: String,
}

/// `POST /generate-audio` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequestBody {
    #[serde(default)]
    pub text: String,
}

/// `POST /generate-audio` success body in JSON mode.
///
/// At least one of `audio_url` or `audio_base64` is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}
