//! Persistent user preferences
//!
//! The announcer stores its narration language here so the choice
//! survives restarts. Storage sits behind a small key-value trait so
//! components can be tested without touching the real file.

pub mod store;

pub use store::{FilePrefs, MemoryPrefs, PrefStore};

/// Key under which the narration language is stored
pub const LANGUAGE_KEY: &str = "language";

/// Language used when no preference has been saved
pub const DEFAULT_LANGUAGE: &str = "en-US";
