//! Native TTS backend using the tts crate
//!
//! The `tts` crate provides a unified interface to Speech Dispatcher on
//! Linux, AVFoundation on macOS/iOS and SAPI on Windows. Where the
//! platform reports utterance lifecycle events, they drive the speaking
//! flag and the per-utterance completion signal; engines without them
//! are drained by polling the speaking query off-thread.

use crate::speech::backend::{Completion, SpeechBackend, SpeechOutcome};
use crate::{Result, WastevoxError};
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tts::Tts as TtsCrate;

/// Slot holding the completion sender for the active utterance
///
/// At most one utterance is active at a time, so a single slot suffices;
/// installing a new sender abandons whatever utterance held it before.
type CompletionSlot = Arc<Mutex<Option<Sender<SpeechOutcome>>>>;

/// Poll interval while draining an utterance on engines without
/// lifecycle callbacks
const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Polls to wait for the engine to pick the utterance up before an idle
/// speaking query counts as finished (2 seconds at DRAIN_POLL)
const DRAIN_START_POLLS: usize = 40;

/// Native TTS backend
pub struct NativeBackend {
    /// The tts crate's TTS instance
    tts: TtsCrate,

    /// Set while an utterance is playing, via platform callbacks
    speaking: Arc<AtomicBool>,

    /// Completion sender for the utterance currently in flight
    completion: CompletionSlot,

    /// Whether the platform reports utterance begin/end/stop events
    has_callbacks: bool,

    /// Whether the engine answers is_speaking queries
    has_speaking_query: bool,

    /// Cancel flag for the active drain watcher, when one is running
    drain_cancel: Option<Arc<AtomicBool>>,
}

impl NativeBackend {
    /// Create a new native TTS backend
    ///
    /// Initializes the platform engine and, where supported, registers
    /// the utterance lifecycle callbacks.
    pub fn new() -> Result<Self> {
        debug!("Creating native TTS backend");

        let tts = TtsCrate::default()
            .map_err(|e| WastevoxError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        let speaking = Arc::new(AtomicBool::new(false));
        let completion: CompletionSlot = Arc::new(Mutex::new(None));
        let features = tts.supported_features();
        let has_callbacks = features.utterance_callbacks;
        let has_speaking_query = features.is_speaking;

        if has_callbacks {
            let flag = speaking.clone();
            tts.on_utterance_begin(Some(Box::new(move |_| {
                flag.store(true, Ordering::SeqCst);
            })))
            .map_err(|e| WastevoxError::Speech(format!("Failed to register callback: {}", e)))?;

            let flag = speaking.clone();
            let slot = completion.clone();
            tts.on_utterance_end(Some(Box::new(move |_| {
                flag.store(false, Ordering::SeqCst);
                resolve(&slot, SpeechOutcome::Finished);
            })))
            .map_err(|e| WastevoxError::Speech(format!("Failed to register callback: {}", e)))?;

            let flag = speaking.clone();
            let slot = completion.clone();
            tts.on_utterance_stop(Some(Box::new(move |_| {
                flag.store(false, Ordering::SeqCst);
                resolve(&slot, SpeechOutcome::Interrupted);
            })))
            .map_err(|e| WastevoxError::Speech(format!("Failed to register callback: {}", e)))?;
        } else {
            debug!("Platform does not report utterance events");
        }

        debug!("Native TTS backend created successfully");

        Ok(Self {
            tts,
            speaking,
            completion,
            has_callbacks,
            has_speaking_query,
            drain_cancel: None,
        })
    }

    /// Watch the engine until the queued utterance drains
    ///
    /// Runs off-thread so `speak` stays non-blocking. An utterance that
    /// errors mid-way reads as finished; the speaking query cannot tell
    /// the two apart.
    fn drain_completion(&mut self) -> Completion {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.drain_cancel = Some(cancelled.clone());

        let handle = self.tts.clone();
        let (tx, rx) = channel();
        thread::spawn(move || {
            // Let the engine pick the utterance up before watching for idle
            for _ in 0..DRAIN_START_POLLS {
                if cancelled.load(Ordering::SeqCst) || handle.is_speaking().unwrap_or(false) {
                    break;
                }
                thread::sleep(DRAIN_POLL);
            }

            while !cancelled.load(Ordering::SeqCst) && handle.is_speaking().unwrap_or(false) {
                thread::sleep(DRAIN_POLL);
            }

            let outcome = if cancelled.load(Ordering::SeqCst) {
                SpeechOutcome::Interrupted
            } else {
                SpeechOutcome::Finished
            };
            let _ = tx.send(outcome);
        });

        Completion::pending(rx)
    }
}

/// Send `outcome` to whoever is waiting on the active utterance
fn resolve(slot: &CompletionSlot, outcome: SpeechOutcome) {
    if let Ok(mut guard) = slot.lock() {
        if let Some(tx) = guard.take() {
            let _ = tx.send(outcome);
        }
    }
}

impl SpeechBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn select_language(&mut self, tag: &str) -> Result<bool> {
        let primary = tag.split('-').next().unwrap_or(tag);

        let voices = self
            .tts
            .voices()
            .map_err(|e| WastevoxError::Speech(format!("Failed to get voices: {}", e)))?;

        // Platforms may populate the voice list after startup
        if voices.is_empty() {
            debug!("No voices reported yet; keeping platform default");
            return Ok(false);
        }

        // Voice languages are unic_langid identifiers; the primary
        // subtag is their `language` field
        let matched = voices
            .iter()
            .find(|v| v.language().language.as_str().eq_ignore_ascii_case(primary));

        match matched {
            Some(voice) => {
                debug!("Selecting voice {} for language {}", voice.id(), tag);
                self.tts
                    .set_voice(voice)
                    .map_err(|e| WastevoxError::Speech(format!("Failed to set voice: {}", e)))?;
                Ok(true)
            }
            None => {
                debug!("No voice matches language {}; keeping platform default", tag);
                Ok(false)
            }
        }
    }

    fn set_rate_scale(&mut self, scale: f32) -> Result<()> {
        let features = self.tts.supported_features();
        if !features.rate {
            warn!("Rate control not supported on this platform");
            return Ok(());
        }

        let rate = (self.tts.normal_rate() * scale).clamp(self.tts.min_rate(), self.tts.max_rate());
        debug!("Setting rate to {} (scale {})", rate, scale);
        self.tts
            .set_rate(rate)
            .map_err(|e| WastevoxError::Speech(format!("Failed to set rate: {}", e)))?;

        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<Completion> {
        if text.is_empty() {
            return Ok(Completion::ready(SpeechOutcome::NeverStarted));
        }

        debug!("Speaking {} chars", text.len());

        if !self.has_callbacks {
            self.tts
                .speak(text, false)
                .map_err(|e| WastevoxError::Speech(format!("Speak failed: {}", e)))?;

            if self.has_speaking_query {
                return Ok(self.drain_completion());
            }

            // Neither lifecycle events nor a speaking query: all we know
            // is that the platform accepted the utterance
            return Ok(Completion::ready(SpeechOutcome::Started));
        }

        let (tx, rx) = channel();
        if let Ok(mut slot) = self.completion.lock() {
            *slot = Some(tx);
        }

        if let Err(e) = self.tts.speak(text, false) {
            if let Ok(mut slot) = self.completion.lock() {
                slot.take();
            }
            return Err(WastevoxError::Speech(format!("Speak failed: {}", e)));
        }

        Ok(Completion::pending(rx))
    }

    fn stop(&mut self) -> Result<()> {
        debug!("Canceling speech");
        self.tts
            .stop()
            .map_err(|e| WastevoxError::Speech(format!("Cancel failed: {}", e)))?;

        self.speaking.store(false, Ordering::SeqCst);
        if let Some(flag) = self.drain_cancel.take() {
            flag.store(true, Ordering::SeqCst);
        }
        // The platform's stop callback resolves the pending completion
        // where supported; resolve it here in case it is not
        resolve(&self.completion, SpeechOutcome::Interrupted);

        Ok(())
    }

    fn is_speaking(&self) -> bool {
        if self.has_callbacks {
            return self.speaking.load(Ordering::SeqCst);
        }
        self.tts.is_speaking().unwrap_or(false)
    }
}
