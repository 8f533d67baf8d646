//! Silent fallback backend
//!
//! Used when the platform has no speech engine at all. Every operation
//! is a logged no-op, so missing narration never turns into an error
//! elsewhere in the program.

use crate::speech::backend::{Completion, SpeechBackend, SpeechOutcome};
use crate::Result;
use log::warn;

/// Backend that drops all speech on the floor
pub struct NullBackend;

impl NullBackend {
    pub fn new() -> Self {
        NullBackend
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechBackend for NullBackend {
    fn name(&self) -> &'static str {
        "null"
    }

    fn select_language(&mut self, tag: &str) -> Result<bool> {
        warn!("Speech synthesis not supported; ignoring language {}", tag);
        Ok(false)
    }

    fn set_rate_scale(&mut self, _scale: f32) -> Result<()> {
        warn!("Speech synthesis not supported; ignoring rate change");
        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<Completion> {
        warn!(
            "Speech synthesis not supported; dropping {} chars of narration",
            text.len()
        );
        Ok(Completion::ready(SpeechOutcome::NeverStarted))
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_backend_is_inert() {
        let mut backend = NullBackend::new();

        assert!(!backend.is_speaking());
        assert!(backend.stop().is_ok());
        assert_eq!(backend.select_language("te-IN").unwrap(), false);

        let completion = backend.speak("anything").unwrap();
        assert_eq!(completion.wait(), SpeechOutcome::NeverStarted);
        assert!(!backend.is_speaking());
    }
}
