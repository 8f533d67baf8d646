//! Speech backend abstraction
//!
//! Provides a unified interface over the platform text-to-speech engine.
//! The announcer uses this to narrate classification results without
//! knowing which engine, if any, is present.

use crate::Result;
use log::{info, warn};
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// How a single utterance ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechOutcome {
    /// Played to its natural end
    Finished,
    /// Cancelled before finishing, usually by a newer utterance
    Interrupted,
    /// The platform reported a synthesis failure
    Errored,
    /// Accepted by an engine that cannot report completion at all;
    /// whether the utterance finished is unknowable
    Started,
    /// Never handed to the platform (empty text or no speech capability)
    NeverStarted,
}

/// Completion signal for one utterance
///
/// Returned by [`SpeechBackend::speak`]; resolves once the platform
/// reports the utterance finished, was cancelled, or failed. Backends
/// that cannot observe utterance lifecycle resolve immediately.
pub struct Completion(Inner);

enum Inner {
    Ready(SpeechOutcome),
    Pending(Receiver<SpeechOutcome>),
}

impl Completion {
    /// A completion that has already resolved
    pub fn ready(outcome: SpeechOutcome) -> Self {
        Completion(Inner::Ready(outcome))
    }

    /// A completion that resolves when the backend sends the outcome
    pub fn pending(rx: Receiver<SpeechOutcome>) -> Self {
        Completion(Inner::Pending(rx))
    }

    /// Block until the utterance resolves
    ///
    /// A backend dropped mid-utterance counts as an interruption.
    pub fn wait(self) -> SpeechOutcome {
        match self.0 {
            Inner::Ready(outcome) => outcome,
            Inner::Pending(rx) => rx.recv().unwrap_or(SpeechOutcome::Interrupted),
        }
    }

    /// Block until the utterance resolves or the timeout elapses
    pub fn wait_timeout(self, timeout: Duration) -> Option<SpeechOutcome> {
        match self.0 {
            Inner::Ready(outcome) => Some(outcome),
            Inner::Pending(rx) => rx.recv_timeout(timeout).ok(),
        }
    }
}

/// Speech backend trait
///
/// All backends implement this to provide text-to-speech. The announcer
/// treats every failure from these methods as non-fatal: narration
/// problems are logged, never surfaced to the user.
pub trait SpeechBackend: Send {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Select a voice whose language shares the requested primary subtag
    ///
    /// Best effort: returns `Ok(false)` when no voice matches, leaving
    /// the platform default in place. The voice list is re-queried on
    /// every call since platforms may populate it after startup.
    fn select_language(&mut self, tag: &str) -> Result<bool>;

    /// Scale the speaking rate relative to the platform's normal rate
    fn set_rate_scale(&mut self, scale: f32) -> Result<()>;

    /// Queue an utterance, returning its completion signal
    fn speak(&mut self, text: &str) -> Result<Completion>;

    /// Cancel the in-progress utterance, if any
    fn stop(&mut self) -> Result<()>;

    /// Whether an utterance is currently playing
    fn is_speaking(&self) -> bool;
}

/// Create the platform speech backend
///
/// Tries the native engine first. When the platform has no usable speech
/// engine the silent backend takes its place, and narration becomes a
/// logged no-op everywhere instead of an error anywhere.
pub fn create_backend() -> Box<dyn SpeechBackend> {
    use super::backends::native::NativeBackend;
    use super::backends::null::NullBackend;

    match NativeBackend::new() {
        Ok(backend) => {
            info!("Initialized {} speech backend", backend.name());
            Box::new(backend)
        }
        Err(e) => {
            warn!("Speech synthesis unavailable: {}", e);
            Box::new(NullBackend::new())
        }
    }
}
