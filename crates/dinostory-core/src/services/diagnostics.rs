//! Bounded audio diagnostics log.
//!
//! Playback failures are mostly swallowed by the strategy cascade, so the
//! orchestrator also writes a short human-readable trail that a UI can show
//! when audio debugging is switched on.

use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

/// Number of entries kept before the oldest are dropped.
pub const AUDIO_LOG_CAPACITY: usize = 60;

/// Ring buffer of playback events, oldest first.
#[derive(Debug)]
pub struct AudioLog {
    started: Instant,
    entries: Mutex<VecDeque<String>>,
}

impl Default for AudioLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioLog {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            entries: Mutex::new(VecDeque::with_capacity(AUDIO_LOG_CAPACITY)),
        }
    }

    /// Append an event.
    pub fn record(&self, message: impl Display) {
        let elapsed = self.started.elapsed().as_secs_f32();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() == AUDIO_LOG_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(format!("+{elapsed:.3}s {message}"));
    }

    /// Append an error entry in the `ERR <title>: <message>` form.
    pub fn error(&self, title: &str, err: impl Display) {
        self.record(format_args!("ERR {title}: {err}"));
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}
