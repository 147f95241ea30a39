//! Story request/result types, style table and prompt composition.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ports::CoreError;

/// Language the story, its fallback and the on-device voice use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryLocale {
    #[default]
    En,
    Es,
}

impl StoryLocale {
    /// Parse a locale tag such as `en`, `es`, `es-ES` or `en_US`.
    pub fn parse(tag: &str) -> Option<Self> {
        let lang = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// BCP-47 tag handed to on-device speech synthesis.
    pub const fn voice_tag(self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::Es => "es-ES",
        }
    }

    /// The deterministic story used when generation fails.
    pub fn fallback_story(self, subject: &str, lesson: &str) -> String {
        match self {
            Self::En => format!("Once there was a {subject} who learned: {lesson}."),
            Self::Es => format!("Había una vez un {subject} que aprendió: {lesson}."),
        }
    }

    /// Progress label for wizard step `n` (1-based) of `total`.
    pub fn step_label(self, n: u8, total: u8) -> String {
        match self {
            Self::En => format!("Step {n} of {total}"),
            Self::Es => format!("Paso {n} de {total}"),
        }
    }
}

/// Narrative style of a story.
///
/// The five catalog keys have prompt descriptions; any other key is passed
/// through to the prompt verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Style {
    Funny,
    Adventurous,
    Gentle,
    Magical,
    Educational,
    Custom(String),
}

impl Style {
    pub fn from_key(key: &str) -> Self {
        match key {
            "funny" => Self::Funny,
            "adventurous" => Self::Adventurous,
            "gentle" => Self::Gentle,
            "magical" => Self::Magical,
            "educational" => Self::Educational,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Funny => "funny",
            Self::Adventurous => "adventurous",
            Self::Gentle => "gentle",
            Self::Magical => "magical",
            Self::Educational => "educational",
            Self::Custom(key) => key,
        }
    }

    /// Description embedded in the generation prompt.
    pub fn prompt_description(&self, locale: StoryLocale) -> &str {
        match (self, locale) {
            (Self::Funny, StoryLocale::En) => "funny and playful",
            (Self::Adventurous, StoryLocale::En) => "adventurous and exciting",
            (Self::Gentle, StoryLocale::En) => "gentle and soothing",
            (Self::Magical, StoryLocale::En) => "magical and enchanting",
            (Self::Educational, StoryLocale::En) => "educational and instructive",
            (Self::Funny, StoryLocale::Es) => "divertido y gracioso",
            (Self::Adventurous, StoryLocale::Es) => "aventurero y emocionante",
            (Self::Gentle, StoryLocale::Es) => "suave y relajante",
            (Self::Magical, StoryLocale::Es) => "mágico y encantador",
            (Self::Educational, StoryLocale::Es) => "educativo y didáctico",
            (Self::Custom(key), _) => key,
        }
    }
}

impl From<String> for Style {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl From<Style> for String {
    fn from(style: Style) -> Self {
        style.key().to_string()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The three choices collected by the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest {
    subject: String,
    style: Style,
    lesson: String,
}

impl StoryRequest {
    /// Build a request, rejecting blank fields.
    pub fn new(
        subject: impl Into<String>,
        style: Style,
        lesson: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let subject = subject.into();
        let lesson = lesson.into();
        if subject.trim().is_empty() {
            return Err(CoreError::Validation("dinosaur is required".to_string()));
        }
        if style.key().trim().is_empty() {
            return Err(CoreError::Validation("style is required".to_string()));
        }
        if lesson.trim().is_empty() {
            return Err(CoreError::Validation("lesson is required".to_string()));
        }
        Ok(Self {
            subject,
            style,
            lesson,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub const fn style(&self) -> &Style {
        &self.style
    }

    pub fn lesson(&self) -> &str {
        &self.lesson
    }

    /// Deterministic local story for when the endpoint cannot deliver one.
    pub fn fallback(&self, locale: StoryLocale) -> StoryResult {
        StoryResult::fallback(locale.fallback_story(&self.subject, &self.lesson))
    }

    /// Natural-language prompt sent to the upstream generative model.
    pub fn prompt(&self, locale: StoryLocale) -> String {
        let style = self.style.prompt_description(locale);
        let subject = &self.subject;
        let lesson = &self.lesson;
        match locale {
            StoryLocale::En => format!(
                "Write a bedtime story about a {subject}.\n\n\
                 The story must:\n\
                 - Be written in a {style} style\n\
                 - Teach the lesson: {lesson}\n\
                 - Be appropriate for bedtime (calming ending)\n\
                 - Be entertaining but not overly stimulating\n\
                 - Be around 200-300 words long\n\
                 - Weave a subtle moral naturally into the narrative\n\
                 - Be written entirely in English\n\
                 - Have the dinosaur as the main character\n\n\
                 Please write only the story itself, without a title or extra formatting."
            ),
            StoryLocale::Es => format!(
                "Crea un cuento para dormir sobre un {subject}.\n\n\
                 El cuento debe:\n\
                 - Estar escrito en estilo {style}\n\
                 - Enseñar la lección: {lesson}\n\
                 - Ser apropiado para la hora de dormir (final calmante)\n\
                 - Ser entretenido pero no demasiado estimulante\n\
                 - Tener alrededor de 200-300 palabras\n\
                 - Incluir una moraleja sutil tejida naturalmente en la narrativa\n\
                 - Estar completamente en español\n\
                 - El dinosaurio debe ser el protagonista principal\n\n\
                 Por favor escribe solo el contenido del cuento, sin título ni formato adicional."
            ),
        }
    }
}

/// Where a story's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorySource {
    Generated,
    Fallback,
}

/// A finished story. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryResult {
    text: String,
    source: StorySource,
}

impl StoryResult {
    /// Wrap generated text; `None` if it is blank.
    pub fn generated(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text,
            source: StorySource::Generated,
        })
    }

    pub(crate) const fn fallback(text: String) -> Self {
        Self {
            text,
            source: StorySource::Fallback,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn source(&self) -> StorySource {
        self.source
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_template_english() {
        let request =
            StoryRequest::new("Triceratops", Style::Gentle, "Sharing is important").unwrap();
        let story = request.fallback(StoryLocale::En);
        assert_eq!(
            story.text(),
            "Once there was a Triceratops who learned: Sharing is important."
        );
        assert_eq!(story.source(), StorySource::Fallback);
    }

    #[test]
    fn test_fallback_template_spanish() {
        let request =
            StoryRequest::new("Spinosaurus", Style::Funny, "Decir la verdad").unwrap();
        assert_eq!(
            request.fallback(StoryLocale::Es).text(),
            "Había una vez un Spinosaurus que aprendió: Decir la verdad."
        );
    }

    #[test]
    fn test_request_rejects_blank_fields() {
        assert!(StoryRequest::new("", Style::Gentle, "x").is_err());
        assert!(StoryRequest::new("Rex", Style::Custom(String::new()), "x").is_err());
        assert!(StoryRequest::new("Rex", Style::Gentle, "   ").is_err());
    }

    #[test]
    fn test_style_round_trips_through_key() {
        for key in ["funny", "adventurous", "gentle", "magical", "educational"] {
            assert_eq!(Style::from_key(key).key(), key);
        }
        assert_eq!(
            Style::from_key("spooky"),
            Style::Custom("spooky".to_string())
        );
    }

    #[test]
    fn test_unknown_style_passes_through_to_prompt() {
        let style = Style::from_key("rhyming");
        assert_eq!(style.prompt_description(StoryLocale::Es), "rhyming");
        let request = StoryRequest::new("Stegosaurus", style, "Try new things").unwrap();
        assert!(request.prompt(StoryLocale::En).contains("a rhyming style"));
    }

    #[test]
    fn test_prompt_embeds_all_fields() {
        let request =
            StoryRequest::new("Velociraptor", Style::Magical, "Probar cosas nuevas").unwrap();
        let prompt = request.prompt(StoryLocale::Es);
        assert!(prompt.contains("sobre un Velociraptor"));
        assert!(prompt.contains("estilo mágico y encantador"));
        assert!(prompt.contains("Enseñar la lección: Probar cosas nuevas"));
    }

    #[test]
    fn test_style_serde_uses_key() {
        let json = serde_json::to_string(&Style::Adventurous).unwrap();
        assert_eq!(json, "\"adventurous\"");
        let parsed: Style = serde_json::from_str("\"whimsical\"").unwrap();
        assert_eq!(parsed, Style::Custom("whimsical".to_string()));
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(StoryLocale::parse("es-ES"), Some(StoryLocale::Es));
        assert_eq!(StoryLocale::parse("EN_us"), Some(StoryLocale::En));
        assert_eq!(StoryLocale::parse("fr"), None);
    }

    #[test]
    fn test_generated_rejects_blank() {
        assert!(StoryResult::generated("  ").is_none());
        let story = StoryResult::generated("A story.").unwrap();
        assert_eq!(story.source(), StorySource::Generated);
    }
}
