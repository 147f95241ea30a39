//! Story wizard: an explicit state value plus the controller that drives it.
//!
//! [`WizardState`] transitions are pure: each takes the state by value and
//! returns the next one, leaving it unchanged when a transition is not
//! allowed. [`WizardController`] owns one state per session and performs the
//! side effects (story request, playback) around those transitions. Every
//! committed state is published on a watch channel for hosts that render
//! while a story request is in flight.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{StoryLocale, StoryRequest, StoryResult, Style};
use crate::ports::{CoreError, StoryService};
use crate::services::playback::{PlaybackOrchestrator, PlaybackOutcome, PlaybackPhase};
use crate::utils::split_into_chunks;

/// Number of selection steps shown in the progress indicator.
pub const FORM_STEPS: u8 = 3;

/// The five linear wizard steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    #[default]
    Dinosaur,
    Style,
    Lesson,
    Generating,
    Result,
}

impl WizardStep {
    pub const fn index(self) -> u8 {
        match self {
            Self::Dinosaur => 0,
            Self::Style => 1,
            Self::Lesson => 2,
            Self::Generating => 3,
            Self::Result => 4,
        }
    }

    const fn next_form_step(self) -> Option<Self> {
        match self {
            Self::Dinosaur => Some(Self::Style),
            Self::Style => Some(Self::Lesson),
            _ => None,
        }
    }

    const fn previous_form_step(self) -> Option<Self> {
        match self {
            Self::Style => Some(Self::Dinosaur),
            Self::Lesson => Some(Self::Style),
            _ => None,
        }
    }
}

/// Progress indicator for the selection steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub label: String,
    pub percent: u8,
}

/// Everything the wizard UI renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    step: WizardStep,
    dinosaur: String,
    style: String,
    lesson: String,
    generating: bool,
    story: String,
    reading: bool,
    tts_loading: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn step(&self) -> WizardStep {
        self.step
    }

    pub const fn current_step(&self) -> u8 {
        self.step.index()
    }

    pub fn dinosaur(&self) -> &str {
        &self.dinosaur
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn lesson(&self) -> &str {
        &self.lesson
    }

    pub const fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn story(&self) -> &str {
        &self.story
    }

    pub const fn is_reading(&self) -> bool {
        self.reading
    }

    pub const fn is_tts_loading(&self) -> bool {
        self.tts_loading
    }

    #[must_use]
    pub fn select_dinosaur(mut self, name: impl Into<String>) -> Self {
        self.dinosaur = name.into();
        self
    }

    #[must_use]
    pub fn select_style(mut self, key: impl Into<String>) -> Self {
        self.style = key.into();
        self
    }

    /// Set the lesson, from a suggestion chip or typed text.
    #[must_use]
    pub fn set_lesson(mut self, lesson: impl Into<String>) -> Self {
        self.lesson = lesson.into();
        self
    }

    /// Whether the current step's required field is filled in.
    pub fn can_continue(&self) -> bool {
        match self.step {
            WizardStep::Dinosaur => !self.dinosaur.is_empty(),
            WizardStep::Style => !self.style.is_empty(),
            WizardStep::Lesson => !self.lesson.trim().is_empty(),
            WizardStep::Generating | WizardStep::Result => false,
        }
    }

    #[must_use]
    pub fn go_next(mut self) -> Self {
        if let Some(next) = self.step.next_form_step() {
            if self.can_continue() {
                self.step = next;
            }
        }
        self
    }

    #[must_use]
    pub fn go_back(mut self) -> Self {
        if let Some(previous) = self.step.previous_form_step() {
            self.step = previous;
        }
        self
    }

    /// Leave the lesson step for generation.
    ///
    /// Returns the request to send, or the state untouched with the reason
    /// the submit was refused.
    pub fn submit(mut self) -> Result<(Self, StoryRequest), (Self, CoreError)> {
        if self.step != WizardStep::Lesson {
            return Err((
                self,
                CoreError::Validation("stories are submitted from the lesson step".to_string()),
            ));
        }
        let request = match StoryRequest::new(
            self.dinosaur.clone(),
            Style::from_key(&self.style),
            self.lesson.trim(),
        ) {
            Ok(request) => request,
            Err(err) => return Err((self, err)),
        };
        self.step = WizardStep::Generating;
        self.generating = true;
        self.story.clear();
        Ok((self, request))
    }

    /// A story arrived (generated or fallback); show it.
    #[must_use]
    pub fn story_arrived(mut self, story: &StoryResult) -> Self {
        if self.step == WizardStep::Generating {
            self.story = story.text().to_string();
            self.generating = false;
            self.reading = false;
            self.tts_loading = false;
            self.step = WizardStep::Result;
        }
        self
    }

    /// Mirror the playback orchestrator's phase.
    #[must_use]
    pub const fn with_playback(mut self, phase: PlaybackPhase) -> Self {
        self.reading = !matches!(phase, PlaybackPhase::Idle);
        self.tts_loading = matches!(phase, PlaybackPhase::Loading);
        self
    }

    /// Back to an empty first step.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Progress for the selection steps; `None` once generation starts.
    pub fn progress(&self, locale: StoryLocale) -> Option<Progress> {
        let (n, percent) = match self.step {
            WizardStep::Dinosaur => (1, 33),
            WizardStep::Style => (2, 67),
            WizardStep::Lesson => (3, 100),
            WizardStep::Generating | WizardStep::Result => return None,
        };
        Some(Progress {
            label: locale.step_label(n, FORM_STEPS),
            percent,
        })
    }

    /// The story as sentence paragraphs.
    pub fn paragraphs(&self) -> Vec<String> {
        split_into_chunks(&self.story)
    }
}

/// Controller settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct WizardConfig {
    pub locale: StoryLocale,
    /// Expose the audio diagnostics log to the UI.
    pub audio_debug: bool,
}

/// Owns one wizard session and its collaborators.
pub struct WizardController {
    state: WizardState,
    stories: Arc<dyn StoryService>,
    playback: Arc<PlaybackOrchestrator>,
    config: WizardConfig,
    published: watch::Sender<WizardState>,
}

impl WizardController {
    pub fn new(
        stories: Arc<dyn StoryService>,
        playback: Arc<PlaybackOrchestrator>,
        config: WizardConfig,
    ) -> Self {
        let (published, _) = watch::channel(WizardState::new());
        Self {
            state: WizardState::new(),
            stories,
            playback,
            config,
            published,
        }
    }

    /// Follow committed wizard states, including the generating step while
    /// [`create_story`] is waiting. Playback is not mirrored here; use
    /// [`state`] for that.
    ///
    /// [`create_story`]: WizardController::create_story
    /// [`state`]: WizardController::state
    pub fn subscribe(&self) -> watch::Receiver<WizardState> {
        self.published.subscribe()
    }

    /// Current state with the live playback phase mirrored in.
    pub fn state(&self) -> WizardState {
        self.state.clone().with_playback(self.playback.phase())
    }

    pub fn progress(&self) -> Option<Progress> {
        self.state.progress(self.config.locale)
    }

    pub const fn playback(&self) -> &Arc<PlaybackOrchestrator> {
        &self.playback
    }

    pub fn select_dinosaur(&mut self, name: &str) {
        self.apply(|state| state.select_dinosaur(name));
    }

    pub fn select_style(&mut self, key: &str) {
        self.apply(|state| state.select_style(key));
    }

    pub fn set_lesson(&mut self, lesson: &str) {
        self.apply(|state| state.set_lesson(lesson));
    }

    pub fn go_next(&mut self) {
        self.apply(WizardState::go_next);
    }

    pub fn go_back(&mut self) {
        self.apply(WizardState::go_back);
    }

    /// Submit the lesson step and wait for the story.
    ///
    /// Always ends on the result step: the story service resolves to a
    /// fallback story on failure.
    pub async fn create_story(&mut self) -> Result<StoryResult, CoreError> {
        let request = match std::mem::take(&mut self.state).submit() {
            Ok((state, request)) => {
                self.commit(state);
                request
            }
            Err((state, err)) => {
                self.state = state;
                return Err(err);
            }
        };

        tracing::info!(
            target: "dinostory.story",
            dinosaur = request.subject(),
            style = request.style().key(),
            "Generating story"
        );
        let story = self.stories.request_story(&request).await;

        // A new story replaces whatever was being read.
        self.playback.stop();
        self.apply(|state| state.story_arrived(&story));
        Ok(story)
    }

    /// Start or stop reading the current story.
    ///
    /// The returned future owns what it needs, so a host can spawn it and
    /// toggle again from elsewhere to stop.
    pub fn toggle_reading(&self) -> impl Future<Output = PlaybackOutcome> + Send + 'static {
        let playback = Arc::clone(&self.playback);
        let story = self.state.story.clone();
        async move { playback.toggle_playback(&story).await }
    }

    /// Stop playback and return to an empty first step.
    pub fn restart(&mut self) {
        self.playback.stop();
        self.apply(WizardState::reset);
    }

    /// Diagnostics trail, when audio debugging is enabled.
    pub fn audio_log(&self) -> Option<Vec<String>> {
        self.config
            .audio_debug
            .then(|| self.playback.log().entries())
    }

    fn apply(&mut self, transition: impl FnOnce(WizardState) -> WizardState) {
        let next = transition(std::mem::take(&mut self.state));
        self.commit(next);
    }

    fn commit(&mut self, state: WizardState) {
        self.published.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            *current = state.clone();
            true
        });
        self.state = state;
    }
}
