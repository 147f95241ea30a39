//! Hand-written fakes for the playback capabilities and endpoint services.
//!
//! Every fake appends to a shared [`Journal`] so tests can assert on the
//! order in which the orchestrator touched each capability.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Notify;

use dinostory_core::{
    AudioAsset, AudioContextFactory, AudioFormat, AudioPlaybackDevice, DecodedAudio,
    LowLevelAudioBuffer, PlaybackDeps, PlaybackError, PlaybackOrchestrator, SpeechError,
    SpeechRequest, SpeechResult, SpeechService, SpeechSynthesizer, StoryLocale, StoryRequest,
    StoryResult, StoryService, UtteranceParams,
};

pub const MP3_BYTES: &[u8] = b"ID3\x04\x00fake-mp3";

/// Ordered record of capability calls.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| e.as_str() == event).count()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }
}

/// What a fake capability does when invoked.
#[derive(Debug, Clone)]
pub enum Behavior {
    Finish,
    Fail(PlaybackError),
    /// Signal `started` then never resolve.
    Block,
}

// ============================================================================
// Speech endpoint
// ============================================================================

/// Scripted speech endpoint. JSON and binary requests have separate scripts;
/// when a script runs out its last entry repeats.
pub struct FakeSpeech {
    journal: Journal,
    json: Mutex<VecDeque<Result<SpeechResult, SpeechError>>>,
    binary: Mutex<VecDeque<Result<SpeechResult, SpeechError>>>,
    block_json: bool,
    pub requests: Mutex<Vec<SpeechRequest>>,
    pub started: Notify,
}

impl FakeSpeech {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            json: Mutex::new(VecDeque::from([Ok(mp3_inline())])),
            binary: Mutex::new(VecDeque::from([Ok(mp3_binary())])),
            block_json: false,
            requests: Mutex::new(Vec::new()),
            started: Notify::new(),
        }
    }

    pub fn json(self, script: Vec<Result<SpeechResult, SpeechError>>) -> Self {
        *self.json.lock().unwrap() = script.into();
        self
    }

    pub fn binary(self, script: Vec<Result<SpeechResult, SpeechError>>) -> Self {
        *self.binary.lock().unwrap() = script.into();
        self
    }

    pub fn blocking_json(mut self) -> Self {
        self.block_json = true;
        self
    }

    pub fn binary_texts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.binary())
            .map(|r| r.text().to_string())
            .collect()
    }

    fn next(script: &Mutex<VecDeque<Result<SpeechResult, SpeechError>>>) -> Result<SpeechResult, SpeechError> {
        let mut script = script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap()
        }
    }
}

#[async_trait]
impl SpeechService for FakeSpeech {
    async fn request_speech(&self, request: &SpeechRequest) -> Result<SpeechResult, SpeechError> {
        self.requests.lock().unwrap().push(request.clone());
        if request.binary() {
            self.journal.push("speech binary");
            Self::next(&self.binary)
        } else {
            self.journal.push("speech json");
            if self.block_json {
                self.started.notify_one();
                std::future::pending::<()>().await;
            }
            Self::next(&self.json)
        }
    }
}

pub fn mp3_inline() -> SpeechResult {
    SpeechResult::InlineAudio {
        bytes: Bytes::from_static(MP3_BYTES),
        mime: "audio/mpeg".to_string(),
    }
}

pub fn mp3_binary() -> SpeechResult {
    SpeechResult::BinaryStream {
        bytes: Bytes::from_static(MP3_BYTES),
        mime: "audio/mpeg".to_string(),
    }
}

pub fn bad_gateway() -> SpeechError {
    SpeechError::RequestFailed {
        status: Some(502),
        detail: "{\"error\":\"Bad Gateway\"}".to_string(),
    }
}

// ============================================================================
// Audio element
// ============================================================================

pub struct FakeDevice {
    journal: Journal,
    behavior: Behavior,
    pub assets: Mutex<Vec<AudioAsset>>,
    pub started: Notify,
}

impl FakeDevice {
    pub fn new(journal: &Journal, behavior: Behavior) -> Self {
        Self {
            journal: journal.clone(),
            behavior,
            assets: Mutex::new(Vec::new()),
            started: Notify::new(),
        }
    }
}

#[async_trait]
impl AudioPlaybackDevice for FakeDevice {
    async fn play_asset(&self, asset: AudioAsset) -> Result<(), PlaybackError> {
        self.journal.push("device play");
        self.assets.lock().unwrap().push(asset);
        play(&self.behavior, &self.started).await
    }

    fn stop(&self) {
        self.journal.push("device stop");
    }
}

// ============================================================================
// Low-level buffer and its factory
// ============================================================================

pub struct FakeBuffer {
    journal: Journal,
    behavior: Behavior,
    pub started: Notify,
}

#[async_trait]
impl LowLevelAudioBuffer for FakeBuffer {
    async fn resume(&self) -> Result<(), PlaybackError> {
        self.journal.push("buffer resume");
        Ok(())
    }

    async fn decode(&self, data: Bytes, _mime: &str) -> Result<DecodedAudio, PlaybackError> {
        self.journal.push("buffer decode");
        let format = AudioFormat::sniff(&data)
            .ok_or_else(|| PlaybackError::Decode("unrecognized audio".to_string()))?;
        Ok(DecodedAudio { format, data })
    }

    async fn play(&self, _buffer: DecodedAudio) -> Result<(), PlaybackError> {
        self.journal.push("buffer play");
        play(&self.behavior, &self.started).await
    }

    fn stop(&self) {
        self.journal.push("buffer stop");
    }

    fn suspend(&self) {
        self.journal.push("buffer suspend");
    }
}

pub struct FakeContexts {
    journal: Journal,
    pub buffer: Arc<FakeBuffer>,
}

impl FakeContexts {
    pub fn new(journal: &Journal, behavior: Behavior) -> Self {
        Self {
            journal: journal.clone(),
            buffer: Arc::new(FakeBuffer {
                journal: journal.clone(),
                behavior,
                started: Notify::new(),
            }),
        }
    }
}

impl AudioContextFactory for FakeContexts {
    fn create(&self) -> Result<Arc<dyn LowLevelAudioBuffer>, PlaybackError> {
        self.journal.push("context create");
        let buffer: Arc<dyn LowLevelAudioBuffer> = self.buffer.clone();
        Ok(buffer)
    }
}

// ============================================================================
// On-device synthesis
// ============================================================================

pub struct FakeSynthesizer {
    journal: Journal,
    behavior: Behavior,
    pub spoken: Mutex<Vec<(String, UtteranceParams)>>,
    pub started: Notify,
}

impl FakeSynthesizer {
    pub fn new(journal: &Journal, behavior: Behavior) -> Self {
        Self {
            journal: journal.clone(),
            behavior,
            spoken: Mutex::new(Vec::new()),
            started: Notify::new(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn speak(&self, text: &str, params: &UtteranceParams) -> Result<(), PlaybackError> {
        self.journal.push("synth speak");
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), params.clone()));
        play(&self.behavior, &self.started).await
    }

    fn cancel(&self) {
        self.journal.push("synth cancel");
    }
}

async fn play(behavior: &Behavior, started: &Notify) -> Result<(), PlaybackError> {
    match behavior {
        Behavior::Finish => Ok(()),
        Behavior::Fail(err) => Err(err.clone()),
        Behavior::Block => {
            started.notify_one();
            std::future::pending().await
        }
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
    pub journal: Journal,
    pub speech: Arc<FakeSpeech>,
    pub device: Arc<FakeDevice>,
    pub contexts: Arc<FakeContexts>,
    pub synthesizer: Option<Arc<FakeSynthesizer>>,
    pub orchestrator: Arc<PlaybackOrchestrator>,
}

pub struct HarnessBuilder {
    journal: Journal,
    speech: FakeSpeech,
    device: Behavior,
    buffer: Behavior,
    synthesizer: Option<Behavior>,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        let journal = Journal::default();
        Self {
            speech: FakeSpeech::new(&journal),
            journal,
            device: Behavior::Finish,
            buffer: Behavior::Finish,
            synthesizer: Some(Behavior::Finish),
        }
    }

    pub fn speech(mut self, configure: impl FnOnce(FakeSpeech) -> FakeSpeech) -> Self {
        self.speech = configure(self.speech);
        self
    }

    pub fn device(mut self, behavior: Behavior) -> Self {
        self.device = behavior;
        self
    }

    pub fn buffer(mut self, behavior: Behavior) -> Self {
        self.buffer = behavior;
        self
    }

    pub fn synthesizer(mut self, behavior: Option<Behavior>) -> Self {
        self.synthesizer = behavior;
        self
    }

    pub fn build(self) -> Harness {
        let speech = Arc::new(self.speech);
        let device = Arc::new(FakeDevice::new(&self.journal, self.device));
        let contexts = Arc::new(FakeContexts::new(&self.journal, self.buffer));
        let synthesizer = self
            .synthesizer
            .map(|behavior| Arc::new(FakeSynthesizer::new(&self.journal, behavior)));

        let orchestrator = PlaybackOrchestrator::new(PlaybackDeps {
            speech: speech.clone(),
            device: device.clone(),
            contexts: contexts.clone(),
            synthesizer: synthesizer
                .clone()
                .map(|s| s as Arc<dyn SpeechSynthesizer>),
            locale: StoryLocale::En,
        });

        Harness {
            journal: self.journal,
            speech,
            device,
            contexts,
            synthesizer,
            orchestrator: Arc::new(orchestrator),
        }
    }
}

// ============================================================================
// Story endpoint
// ============================================================================

/// Story service that answers with canned text, or the fallback when `None`.
pub struct FakeStories {
    text: Option<String>,
    hold: bool,
    pub requests: Mutex<Vec<StoryRequest>>,
    pub started: Notify,
    pub release: Notify,
}

impl FakeStories {
    pub fn answering(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            hold: false,
            requests: Mutex::new(Vec::new()),
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            ..Self::answering("")
        }
    }

    /// Signal `started` on each request, then wait for `release`.
    pub fn held(mut self) -> Self {
        self.hold = true;
        self
    }
}

#[async_trait]
impl StoryService for FakeStories {
    async fn request_story(&self, request: &StoryRequest) -> StoryResult {
        self.requests.lock().unwrap().push(request.clone());
        if self.hold {
            self.started.notify_one();
            self.release.notified().await;
        }
        self.text
            .as_deref()
            .and_then(StoryResult::generated)
            .unwrap_or_else(|| request.fallback(StoryLocale::En))
    }
}
