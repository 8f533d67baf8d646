//! Wastevox - spoken feedback for waste classification
//!
//! Client-side interaction layer for an image-based waste classification
//! service: accepts a user-supplied image, previews it, submits it to the
//! classification endpoint, and narrates the result with text-to-speech
//! in English or Telugu.

pub mod classify;
pub mod error;
pub mod prefs;
pub mod speech;

pub use error::{Result, WastevoxError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "wastevox";
