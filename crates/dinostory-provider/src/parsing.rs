//! JSON parsing for provider responses.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use dinostory_core::UpstreamAudio;
use dinostory_core::utils::truncate_chars;
use serde_json::Value;

use crate::error::ProviderResult;

/// Characters of an unusable payload kept for the log.
pub const PAYLOAD_LOG_CHARS: usize = 500;

/// Extract story text from the first output.
///
/// Accepts `text.raw`, then `text.generated`, then `text` as a plain string.
/// Blank candidates are skipped.
pub fn parse_story_text(json: &Value) -> Option<String> {
    let text = json.pointer("/outputs/0/data/text")?;
    let candidates = [
        text.get("raw").and_then(Value::as_str),
        text.get("generated").and_then(Value::as_str),
        text.as_str(),
    ];
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.trim().is_empty())
        .map(str::to_string)
}

/// Extract inline and hosted audio from the first output.
///
/// Inline audio must be valid base64; a malformed payload is an error rather
/// than silently missing audio.
pub fn parse_audio(json: &Value) -> ProviderResult<UpstreamAudio> {
    let Some(audio) = json.pointer("/outputs/0/data/audio") else {
        return Ok(UpstreamAudio::default());
    };
    let non_empty = |key: &str| {
        audio
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let base64 = non_empty("base64");
    if let Some(payload) = &base64 {
        STANDARD.decode(payload)?;
    }
    Ok(UpstreamAudio {
        base64,
        url: non_empty("url"),
    })
}

/// Serialized payload cut to [`PAYLOAD_LOG_CHARS`] for logging.
pub fn payload_snippet(json: &Value) -> String {
    truncate_chars(&json.to_string(), PAYLOAD_LOG_CHARS).to_string()
}
