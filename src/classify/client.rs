//! HTTP client for the classification endpoint
//!
//! One POST per accepted image. The server answers with JSON: either a
//! classification result, an error message, or a redirect instruction
//! that overrides normal routing.

use crate::classify::upload::UploadFile;
use crate::{Result, WastevoxError};
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::collections::HashMap;

/// Path of the upload classification endpoint
pub const CLASSIFY_PATH: &str = "/api/classify";

/// Path of the camera capture classification endpoint
pub const CAMERA_CLASSIFY_PATH: &str = "/api/classify/camera";

/// Where the page goes after a successful classification
pub const RESULT_PATH: &str = "/result";

/// Disposal guidance attached to a successful classification
#[derive(Debug, Clone, Deserialize)]
pub struct WasteInfo {
    pub description: String,
    pub disposal: String,
    pub examples: String,
    pub environmental_impact: String,
    pub color: String,
}

/// Wire format of the endpoint's JSON response
#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    /// Navigation target that overrides normal routing
    redirect: Option<String>,

    /// Server-reported failure detail
    error: Option<String>,

    #[serde(rename = "class")]
    class_label: Option<String>,
    confidence: Option<f64>,
    all_predictions: Option<HashMap<String, f64>>,
    info: Option<WasteInfo>,
    timestamp: Option<String>,
}

/// A successful classification
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    pub class_label: String,
    pub confidence: f64,
    pub all_predictions: HashMap<String, f64>,
    pub info: Option<WasteInfo>,
    pub timestamp: Option<String>,
}

/// How one submission resolved
#[derive(Debug, Clone)]
pub enum ClassifyOutcome {
    /// Server provided an explicit navigation target
    Redirected(String),
    /// Classification succeeded; the page moves to the result view
    Succeeded(ClassificationResult),
    /// Server reported a failure; the upload view should reset
    Failed(String),
}

/// Client for the classification service
pub struct ClassifyClient {
    base_url: String,
    http: reqwest::Client,
}

impl ClassifyClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Submit an image file as multipart form data
    pub async fn classify(&self, file: &UploadFile) -> Result<ClassifyOutcome> {
        let part = Part::bytes(file.data.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        let url = format!("{}{}", self.base_url, CLASSIFY_PATH);
        debug!("Submitting {} ({} bytes) to {}", file.name, file.data.len(), url);

        let response = self.http.post(&url).multipart(form).send().await?;
        handle_response(response).await
    }

    /// Submit a camera capture as a JSON-wrapped data URL
    pub async fn classify_capture(&self, data_url: &str) -> Result<ClassifyOutcome> {
        let url = format!("{}{}", self.base_url, CAMERA_CLASSIFY_PATH);
        debug!("Submitting camera capture to {}", url);

        let body = serde_json::json!({ "image": data_url });
        let response = self.http.post(&url).json(&body).send().await?;
        handle_response(response).await
    }
}

async fn handle_response(response: reqwest::Response) -> Result<ClassifyOutcome> {
    let status = response.status();

    let declared_json = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);
    if !declared_json {
        return Err(WastevoxError::NonJsonResponse);
    }

    let body: ClassifyResponse = response.json().await?;

    // A redirect instruction wins regardless of HTTP status
    if let Some(target) = body.redirect {
        info!("Server redirected to {}", target);
        return Ok(ClassifyOutcome::Redirected(target));
    }

    if status.is_success() {
        let class_label = body.class_label.ok_or_else(|| {
            WastevoxError::Classify("Response is missing the class label".to_string())
        })?;
        let confidence = body.confidence.unwrap_or(0.0);
        info!("Classified as {} at {}%", class_label, confidence);

        return Ok(ClassifyOutcome::Succeeded(ClassificationResult {
            class_label,
            confidence,
            all_predictions: body.all_predictions.unwrap_or_default(),
            info: body.info,
            timestamp: body.timestamp,
        }));
    }

    Ok(ClassifyOutcome::Failed(
        body.error
            .unwrap_or_else(|| "Classification failed".to_string()),
    ))
}
