//! Upload controller
//!
//! Owns one upload cycle: accept an image, build its preview, submit it
//! for classification, and route on the outcome. Failures of any kind
//! reset back to the idle state so another attempt can start right away.

use crate::classify::client::{ClassificationResult, ClassifyClient, ClassifyOutcome, RESULT_PATH};
use crate::{Result, WastevoxError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Media types declared for common image extensions
///
/// Stands in for the type the host UI would attach to a picked or
/// dropped file; unknown extensions fall through to an opaque type and
/// get rejected by the acceptance policy.
static MEDIA_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
        ("gif", "image/gif"),
        ("webp", "image/webp"),
        ("bmp", "image/bmp"),
    ])
});

/// Declared media type for a file path, by extension
pub fn media_type_for_path(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .and_then(|e| MEDIA_TYPES.get(e.as_str()).copied())
        .unwrap_or("application/octet-stream")
        .to_string()
}

/// Where a file came from
///
/// Both sources apply the same acceptance policy; the distinction only
/// shows up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    DragDrop,
    Picker,
}

/// A user-supplied file with its declared media type
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Read a file from disk, declaring its media type by extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self::new(name, media_type_for_path(path), data))
    }

    /// Whether the declared media type marks this as an image
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Upload cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a file
    Idle,
    /// A file is accepted and its preview is showing
    Previewing,
    /// The classification request is in flight
    Submitting,
    /// Navigation is underway; the upload view is about to unload.
    /// The loading indicator stays up through this phase.
    Departing,
}

/// How one submission resolved from the page's point of view
#[derive(Debug, Clone)]
pub enum Disposition {
    /// Navigate to `target`
    Navigate(String),
    /// Show `message` to the user; the upload view has been reset
    Failed(String),
}

/// Mediates file input, preview, submission and routing
pub struct UploadController {
    client: ClassifyClient,
    phase: Phase,
    file: Option<UploadFile>,
    preview: Option<String>,
    result: Option<ClassificationResult>,
}

impl UploadController {
    pub fn new(client: ClassifyClient) -> Self {
        Self {
            client,
            phase: Phase::Idle,
            file: None,
            preview: None,
            result: None,
        }
    }

    /// Current phase of the upload cycle
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Data-URL preview of the accepted file, once one is accepted
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// The classification result, once a submission succeeds
    pub fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    /// Accept a user-supplied file and build its preview
    ///
    /// Non-image files are rejected from every source; drag-drop and the
    /// picker follow the same policy. A file arriving while a submission
    /// is in flight is refused rather than racing the first request.
    pub fn accept(&mut self, file: UploadFile, source: FileSource) -> Result<()> {
        if self.phase == Phase::Submitting || self.phase == Phase::Departing {
            warn!("Refusing {} while a submission is in flight", file.name);
            return Err(WastevoxError::SubmissionInFlight);
        }

        if !file.is_image() {
            debug!(
                "Ignoring non-image {:?} file {} ({})",
                source, file.name, file.content_type
            );
            return Err(WastevoxError::Upload(format!(
                "{} is not an image",
                file.name
            )));
        }

        info!("Accepted {} from {:?}", file.name, source);
        self.preview = Some(data_url(&file));
        self.file = Some(file);
        self.phase = Phase::Previewing;
        Ok(())
    }

    /// Submit the accepted file for classification
    ///
    /// Exactly one request is issued per accepted file. A redirect
    /// instruction or a success departs the page; every failure resets
    /// the controller and hands the message back for display.
    pub async fn submit(&mut self) -> Disposition {
        let Some(file) = self.file.take() else {
            return Disposition::Failed("No file selected".to_string());
        };

        self.phase = Phase::Submitting;

        match self.client.classify(&file).await {
            Ok(ClassifyOutcome::Redirected(target)) => {
                self.phase = Phase::Departing;
                Disposition::Navigate(target)
            }
            Ok(ClassifyOutcome::Succeeded(result)) => {
                self.result = Some(result);
                self.phase = Phase::Departing;
                Disposition::Navigate(RESULT_PATH.to_string())
            }
            Ok(ClassifyOutcome::Failed(message)) => {
                warn!("Server rejected the submission: {}", message);
                self.reset();
                Disposition::Failed(message)
            }
            Err(e) => {
                warn!("Classification request failed: {}", e);
                self.reset();
                Disposition::Failed(e.to_string())
            }
        }
    }

    /// Clear the selected file and return to the initial upload state
    pub fn reset(&mut self) {
        self.file = None;
        self.preview = None;
        self.result = None;
        self.phase = Phase::Idle;
    }
}

/// Encode the file as a data URL for preview display
fn data_url(file: &UploadFile) -> String {
    format!(
        "data:{};base64,{}",
        file.content_type,
        STANDARD.encode(&file.data)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image() {
        let image = UploadFile::new("photo.png", "image/png", vec![1, 2, 3]);
        assert!(image.is_image());

        let text = UploadFile::new("notes.txt", "text/plain", vec![1, 2, 3]);
        assert!(!text.is_image());
    }

    #[test]
    fn test_media_type_for_path() {
        assert_eq!(media_type_for_path(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("b.png")), "image/png");
        assert_eq!(
            media_type_for_path(Path::new("c.pdf")),
            "application/octet-stream"
        );
        assert_eq!(
            media_type_for_path(Path::new("noext")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_data_url_shape() {
        let file = UploadFile::new("photo.png", "image/png", vec![0, 1, 2]);
        let url = data_url(&file);
        assert!(url.starts_with("data:image/png;base64,"));
    }
}
