//! Error types for wastevox

use std::io;
use thiserror::Error;

/// Main error type for wastevox
#[derive(Error, Debug)]
pub enum WastevoxError {
    #[error("Preference store error: {0}")]
    Prefs(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Upload rejected: {0}")]
    Upload(String),

    #[error("A classification request is already in flight")]
    SubmissionInFlight,

    #[error("Server returned non-JSON response")]
    NonJsonResponse,

    #[error("Classification error: {0}")]
    Classify(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for wastevox operations
pub type Result<T> = std::result::Result<T, WastevoxError>;

impl From<String> for WastevoxError {
    fn from(s: String) -> Self {
        WastevoxError::Other(s)
    }
}

impl From<&str> for WastevoxError {
    fn from(s: &str) -> Self {
        WastevoxError::Other(s.to_string())
    }
}
