//! Speech announcement system

pub mod announcer;
pub mod backend;
pub mod backends;
pub mod narration;

pub use announcer::Announcer;
pub use backend::{create_backend, Completion, SpeechBackend, SpeechOutcome};
pub use narration::{WasteClass, ENGLISH_TAG, TELUGU_TAG};
