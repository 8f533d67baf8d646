//! Speech announcer
//!
//! Wraps a speech backend with the persisted language preference and the
//! canned narration scripts. At most one utterance is active at a time:
//! starting a new announcement supersedes whatever is in progress.

use crate::prefs::{PrefStore, DEFAULT_LANGUAGE, LANGUAGE_KEY};
use crate::speech::backend::{Completion, SpeechBackend, SpeechOutcome};
use crate::speech::narration::{self, WasteClass, ENGLISH_TAG, TELUGU_TAG};
use log::{debug, error, warn};

/// Speaking rate relative to the platform's normal rate.
/// Slightly slower than normal so the explanation is easy to follow.
const RATE_SCALE: f32 = 0.85;

/// Narrates classification results over a speech backend
///
/// Constructed explicitly by the composition root and injected where
/// needed; holds the backend and the preference store it was given.
pub struct Announcer {
    backend: Box<dyn SpeechBackend>,
    prefs: Box<dyn PrefStore>,
}

impl Announcer {
    pub fn new(backend: Box<dyn SpeechBackend>, prefs: Box<dyn PrefStore>) -> Self {
        Self { backend, prefs }
    }

    /// Store `lang` as the narration language for this and future sessions
    ///
    /// The tag is stored as given; no format validation is performed.
    /// Persistence failures are logged and the session continues.
    pub fn set_language(&mut self, lang: &str) {
        if let Err(e) = self.prefs.set(LANGUAGE_KEY, lang) {
            warn!("Failed to persist language preference: {}", e);
        }
    }

    /// The persisted narration language, or "en-US" when none is set
    pub fn language(&self) -> String {
        self.prefs
            .get(LANGUAGE_KEY)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }

    /// Speak `text`, cancelling any utterance already in progress
    ///
    /// Uses `lang` when given, otherwise the persisted preference. Voice
    /// selection is best effort; synthesis failures are logged and
    /// resolve the completion as [`SpeechOutcome::Errored`], never
    /// raised to the caller.
    pub fn speak(&mut self, text: &str, lang: Option<&str>) -> Completion {
        if let Err(e) = self.backend.stop() {
            warn!("Failed to cancel prior utterance: {}", e);
        }

        if text.is_empty() {
            return Completion::ready(SpeechOutcome::NeverStarted);
        }

        let lang = lang
            .map(str::to_string)
            .unwrap_or_else(|| self.language());

        match self.backend.select_language(&lang) {
            Ok(true) => {}
            Ok(false) => debug!("No {} voice available; using platform default", lang),
            Err(e) => warn!("Voice selection failed: {}", e),
        }

        if let Err(e) = self.backend.set_rate_scale(RATE_SCALE) {
            warn!("Failed to set speech rate: {}", e);
        }

        match self.backend.speak(text) {
            Ok(completion) => completion,
            Err(e) => {
                error!("Speech error: {}", e);
                Completion::ready(SpeechOutcome::Errored)
            }
        }
    }

    /// Cancel any in-progress utterance. Safe to call when idle.
    pub fn stop(&mut self) {
        if let Err(e) = self.backend.stop() {
            warn!("Failed to stop speech: {}", e);
        }
    }

    /// Whether an utterance is currently playing
    pub fn is_speaking(&self) -> bool {
        self.backend.is_speaking()
    }

    /// Narrate a classification result in Telugu
    pub fn announce_result_telugu(&mut self, class: &WasteClass, confidence: f64) -> Completion {
        let script = narration::telugu_script(class, confidence);
        self.speak(&script, Some(TELUGU_TAG))
    }

    /// Narrate a classification result in English
    pub fn announce_result_english(&mut self, class: &WasteClass, confidence: f64) -> Completion {
        let script = narration::english_script(class, confidence);
        self.speak(&script, Some(ENGLISH_TAG))
    }

    /// Narrate a classification result in the persisted language
    ///
    /// A Telugu preference gets the Telugu script; anything else falls
    /// back to English narration.
    pub fn announce_result(&mut self, class: &WasteClass, confidence: f64) -> Completion {
        let telugu = self
            .language()
            .split('-')
            .next()
            .map(|primary| primary.eq_ignore_ascii_case("te"))
            .unwrap_or(false);

        if telugu {
            self.announce_result_telugu(class, confidence)
        } else {
            self.announce_result_english(class, confidence)
        }
    }
}
