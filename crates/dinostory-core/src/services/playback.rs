//! Audio playback orchestrator: reads a story aloud through a fallback cascade.
//!
//! # Strategies
//!
//! 1. **Single asset**: request audio for the whole story and hand it to the
//!    [`AudioPlaybackDevice`].
//! 2. **Chunked stream**: split the story into sentences and, one at a time,
//!    fetch binary audio, decode it on the shared [`LowLevelAudioBuffer`] and
//!    play it to the end before fetching the next sentence.
//! 3. **On-device**: hand the whole text to the [`SpeechSynthesizer`]. If the
//!    host has none, playback ends idle.
//!
//! # Session model
//!
//! Every start opens a session with its own id and cancellation token. Stop
//! cancels the token and tears every capability down, so a session that is
//! still awaiting a fetch or a playback future discards the result and
//! returns without touching state. Only one of audio element, buffer source
//! or utterance is active at a time: acquiring a resource of another kind
//! releases the previous one first.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::{SpeechRequest, SpeechResult, StoryLocale};
use crate::ports::{
    AudioContextFactory, AudioPlaybackDevice, LowLevelAudioBuffer, PlaybackError, SpeechError,
    SpeechService, SpeechSynthesizer, UtteranceParams,
};
use crate::services::diagnostics::AudioLog;
use crate::utils::split_into_chunks;

/// Coarse playback state exposed to the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    /// Waiting for audio; nothing audible yet.
    Loading,
    /// A resource is producing sound.
    Playing,
}

/// The three ways of rendering a story as speech, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStrategy {
    SingleAsset,
    ChunkedStream,
    OnDevice,
}

/// The capability resource currently held by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveResource {
    AudioElement,
    BufferSource,
    Utterance,
}

/// How a call to [`PlaybackOrchestrator::toggle_playback`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Audio ran to its natural end.
    Finished(PlaybackStrategy),
    /// Playback was stopped, by this toggle or by a later stop.
    Stopped,
    /// The device failed after playback had started.
    Interrupted(PlaybackError),
    /// Every strategy failed; the orchestrator is idle.
    Exhausted,
    /// The story was empty.
    NothingToPlay,
}

#[derive(Debug, Error)]
enum StrategyFailure {
    #[error(transparent)]
    Speech(#[from] SpeechError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    #[error("no readable text")]
    NothingToRead,
}

enum StrategyEnd {
    Finished,
    Cancelled,
    Interrupted(PlaybackError),
}

struct Session {
    id: u64,
    phase: PlaybackPhase,
    active: Option<ActiveResource>,
    cancel: CancellationToken,
}

/// Capabilities the orchestrator is built from.
pub struct PlaybackDeps {
    pub speech: Arc<dyn SpeechService>,
    pub device: Arc<dyn AudioPlaybackDevice>,
    pub contexts: Arc<dyn AudioContextFactory>,
    /// `None` when the host cannot synthesize speech on device.
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    pub locale: StoryLocale,
}

/// Plays stories through the strategy cascade, one session at a time.
pub struct PlaybackOrchestrator {
    speech: Arc<dyn SpeechService>,
    device: Arc<dyn AudioPlaybackDevice>,
    contexts: Arc<dyn AudioContextFactory>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    params: UtteranceParams,
    /// Shared low-level context, created on first chunked session.
    context: Mutex<Option<Arc<dyn LowLevelAudioBuffer>>>,
    session: Mutex<Session>,
    log: Arc<AudioLog>,
}

impl PlaybackOrchestrator {
    pub fn new(deps: PlaybackDeps) -> Self {
        Self {
            speech: deps.speech,
            device: deps.device,
            contexts: deps.contexts,
            synthesizer: deps.synthesizer,
            params: UtteranceParams::bedtime(deps.locale),
            context: Mutex::new(None),
            session: Mutex::new(Session {
                id: 0,
                phase: PlaybackPhase::Idle,
                active: None,
                cancel: CancellationToken::new(),
            }),
            log: Arc::new(AudioLog::new()),
        }
    }

    /// Share an existing diagnostics log instead of the orchestrator's own.
    #[must_use]
    pub fn with_log(mut self, log: Arc<AudioLog>) -> Self {
        self.log = log;
        self
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.lock_session().phase
    }

    pub fn active_resource(&self) -> Option<ActiveResource> {
        self.lock_session().active
    }

    pub fn is_active(&self) -> bool {
        self.phase() != PlaybackPhase::Idle
    }

    pub const fn log(&self) -> &Arc<AudioLog> {
        &self.log
    }

    /// Start reading `story`, or stop if a session is already running.
    ///
    /// When starting, the returned future runs the whole cascade and resolves
    /// once playback is over. Stopping returns immediately.
    pub async fn toggle_playback(&self, story: &str) -> PlaybackOutcome {
        let (id, token) = {
            let mut session = self.lock_session();
            if session.phase != PlaybackPhase::Idle {
                self.teardown(&mut session);
                tracing::info!(target: "dinostory.playback", session = session.id, "Playback stopped");
                self.log.record("stopped");
                return PlaybackOutcome::Stopped;
            }
            if story.trim().is_empty() {
                return PlaybackOutcome::NothingToPlay;
            }
            session.id += 1;
            session.cancel = CancellationToken::new();
            session.phase = PlaybackPhase::Loading;
            session.active = None;
            (session.id, session.cancel.clone())
        };

        tracing::info!(target: "dinostory.playback", session = id, "Playback loading");
        self.log.record("loading");
        self.run_cascade(id, &token, story).await
    }

    /// Stop any session and release every capability. Safe to call repeatedly.
    pub fn stop(&self) {
        let mut session = self.lock_session();
        self.teardown(&mut session);
    }

    async fn run_cascade(&self, id: u64, token: &CancellationToken, story: &str) -> PlaybackOutcome {
        match self.play_single_asset(id, token, story).await {
            Ok(end) => return self.conclude(id, PlaybackStrategy::SingleAsset, end),
            Err(failure) => self.fall_through(id, PlaybackStrategy::SingleAsset, &failure),
        }

        match self.play_chunked(id, token, story).await {
            Ok(end) => return self.conclude(id, PlaybackStrategy::ChunkedStream, end),
            Err(failure) => self.fall_through(id, PlaybackStrategy::ChunkedStream, &failure),
        }

        match self.speak_on_device(id, token, story).await {
            Ok(end) => self.conclude(id, PlaybackStrategy::OnDevice, end),
            Err(failure) => {
                tracing::warn!(
                    target: "dinostory.playback",
                    session = id,
                    error = %failure,
                    "On-device synthesis failed; playback ends idle"
                );
                self.log.error("On-device synthesis failed", &failure);
                self.finish(id);
                PlaybackOutcome::Exhausted
            }
        }
    }

    async fn play_single_asset(
        &self,
        id: u64,
        token: &CancellationToken,
        story: &str,
    ) -> Result<StrategyEnd, StrategyFailure> {
        let request =
            SpeechRequest::new(story, false).map_err(|_| StrategyFailure::NothingToRead)?;
        let Some(response) = cancellable(token, self.speech.request_speech(&request)).await else {
            return Ok(StrategyEnd::Cancelled);
        };
        let asset = response?.into_asset();

        if !self.acquire(id, ActiveResource::AudioElement) {
            return Ok(StrategyEnd::Cancelled);
        }
        self.log.record("play single asset");

        match cancellable(token, self.device.play_asset(asset)).await {
            None => Ok(StrategyEnd::Cancelled),
            Some(Ok(())) => Ok(StrategyEnd::Finished),
            Some(Err(err @ PlaybackError::Rejected(_))) => Err(err.into()),
            Some(Err(err)) => Ok(StrategyEnd::Interrupted(err)),
        }
    }

    async fn play_chunked(
        &self,
        id: u64,
        token: &CancellationToken,
        story: &str,
    ) -> Result<StrategyEnd, StrategyFailure> {
        if token.is_cancelled() {
            return Ok(StrategyEnd::Cancelled);
        }
        let chunks = split_into_chunks(story);
        if chunks.is_empty() {
            return Err(StrategyFailure::NothingToRead);
        }

        let context = self.audio_context()?;
        match cancellable(token, context.resume()).await {
            None => return Ok(StrategyEnd::Cancelled),
            Some(resumed) => resumed?,
        }

        for (index, chunk) in chunks.iter().enumerate() {
            let request = SpeechRequest::new(chunk.as_str(), true)
                .map_err(|_| StrategyFailure::NothingToRead)?;
            let Some(response) = cancellable(token, self.speech.request_speech(&request)).await
            else {
                return Ok(StrategyEnd::Cancelled);
            };
            let (bytes, mime) = match response? {
                SpeechResult::BinaryStream { bytes, mime }
                | SpeechResult::InlineAudio { bytes, mime } => (bytes, mime),
                SpeechResult::RemoteAudioUrl(_) => {
                    return Err(SpeechError::AudioUnavailable.into());
                }
            };

            let Some(decoded) = cancellable(token, context.decode(bytes, &mime)).await else {
                return Ok(StrategyEnd::Cancelled);
            };
            let buffer = decoded?;

            if !self.acquire(id, ActiveResource::BufferSource) {
                return Ok(StrategyEnd::Cancelled);
            }
            tracing::debug!(
                target: "dinostory.playback",
                session = id,
                chunk = index,
                total = chunks.len(),
                "Playing chunk"
            );
            self.log.record(format_args!("chunk {}/{}", index + 1, chunks.len()));

            match cancellable(token, context.play(buffer)).await {
                None => return Ok(StrategyEnd::Cancelled),
                Some(played) => played?,
            }
        }

        Ok(StrategyEnd::Finished)
    }

    async fn speak_on_device(
        &self,
        id: u64,
        token: &CancellationToken,
        story: &str,
    ) -> Result<StrategyEnd, StrategyFailure> {
        if token.is_cancelled() {
            return Ok(StrategyEnd::Cancelled);
        }
        let Some(synthesizer) = self.synthesizer.as_ref() else {
            return Err(PlaybackError::Unavailable("on-device speech synthesis".to_string()).into());
        };

        if !self.acquire(id, ActiveResource::Utterance) {
            return Ok(StrategyEnd::Cancelled);
        }
        self.log.record("speak on device");

        match cancellable(token, synthesizer.speak(story, &self.params)).await {
            None => Ok(StrategyEnd::Cancelled),
            Some(Ok(())) => Ok(StrategyEnd::Finished),
            Some(Err(err)) => Err(err.into()),
        }
    }

    fn conclude(&self, id: u64, strategy: PlaybackStrategy, end: StrategyEnd) -> PlaybackOutcome {
        match end {
            StrategyEnd::Finished => {
                tracing::info!(target: "dinostory.playback", session = id, ?strategy, "Playback ended");
                self.log.record("ended");
                self.finish(id);
                PlaybackOutcome::Finished(strategy)
            }
            StrategyEnd::Cancelled => PlaybackOutcome::Stopped,
            StrategyEnd::Interrupted(err) => {
                tracing::warn!(target: "dinostory.playback", session = id, ?strategy, error = %err, "Playback interrupted");
                self.log.error("Audio element error", &err);
                self.finish(id);
                PlaybackOutcome::Interrupted(err)
            }
        }
    }

    /// Record a failed strategy and return the session to loading.
    fn fall_through(&self, id: u64, strategy: PlaybackStrategy, failure: &StrategyFailure) {
        tracing::warn!(
            target: "dinostory.playback",
            session = id,
            ?strategy,
            error = %failure,
            "Playback strategy failed; trying next"
        );
        self.log.error(&format!("{strategy:?} failed"), failure);

        let mut session = self.lock_session();
        if session.id != id || session.cancel.is_cancelled() {
            return;
        }
        if let Some(previous) = session.active.take() {
            self.release(previous);
        }
        session.phase = PlaybackPhase::Loading;
    }

    /// Make `resource` the session's only active resource.
    ///
    /// Returns `false` if the session was stopped or superseded.
    fn acquire(&self, id: u64, resource: ActiveResource) -> bool {
        let mut session = self.lock_session();
        if session.id != id || session.cancel.is_cancelled() {
            return false;
        }
        if let Some(previous) = session.active {
            if previous != resource {
                self.release(previous);
            }
        }
        session.active = Some(resource);
        session.phase = PlaybackPhase::Playing;
        true
    }

    fn finish(&self, id: u64) {
        let mut session = self.lock_session();
        if session.id != id || session.cancel.is_cancelled() {
            return;
        }
        if let Some(previous) = session.active.take() {
            self.release(previous);
        }
        session.phase = PlaybackPhase::Idle;
    }

    fn release(&self, resource: ActiveResource) {
        match resource {
            ActiveResource::AudioElement => self.device.stop(),
            ActiveResource::BufferSource => {
                if let Some(context) = self.lock_context().as_ref() {
                    context.stop();
                }
            }
            ActiveResource::Utterance => {
                if let Some(synthesizer) = &self.synthesizer {
                    synthesizer.cancel();
                }
            }
        }
    }

    fn teardown(&self, session: &mut Session) {
        session.cancel.cancel();
        self.device.stop();
        let context = self.lock_context().clone();
        if let Some(context) = &context {
            context.stop();
        }
        if let Some(synthesizer) = &self.synthesizer {
            synthesizer.cancel();
        }
        if let Some(context) = context {
            context.suspend();
        }
        session.active = None;
        session.phase = PlaybackPhase::Idle;
    }

    fn audio_context(&self) -> Result<Arc<dyn LowLevelAudioBuffer>, PlaybackError> {
        let mut slot = self.lock_context();
        if let Some(context) = slot.as_ref() {
            return Ok(Arc::clone(context));
        }
        let context = self.contexts.create()?;
        *slot = Some(Arc::clone(&context));
        Ok(context)
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_context(&self) -> MutexGuard<'_, Option<Arc<dyn LowLevelAudioBuffer>>> {
        self.context.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Await `fut` unless `token` fires first. A cancelled token wins even if
/// `fut` is already complete, so late results are discarded.
async fn cancellable<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        () = token.cancelled() => None,
        output = fut => Some(output),
    }
}
