//! Upload controller state machine tests
//!
//! One upload cycle per test: acceptance policy, preview, submission
//! routing, and the reset-on-failure discipline.

mod mock_classify_server;

use mock_classify_server::spawn_classify;
use std::sync::atomic::Ordering;
use wastevox::classify::{
    ClassifyClient, Disposition, FileSource, Phase, UploadController, UploadFile,
};
use wastevox::WastevoxError;

/// Nothing listens here; connections fail immediately
const DEAD_SERVER: &str = "http://127.0.0.1:1";

const SUCCESS_BODY: &str = r#"{"class": "Recyclable", "confidence": 97.1}"#;

fn png() -> UploadFile {
    UploadFile::new("bottle.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47])
}

#[test]
fn non_image_is_rejected_from_every_source() {
    let mut controller = UploadController::new(ClassifyClient::new(DEAD_SERVER));
    let text = UploadFile::new("notes.txt", "text/plain", vec![1, 2, 3]);

    for source in [FileSource::DragDrop, FileSource::Picker] {
        match controller.accept(text.clone(), source) {
            Err(WastevoxError::Upload(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.preview().is_none());
    }
}

#[test]
fn accepted_image_builds_preview() {
    let mut controller = UploadController::new(ClassifyClient::new(DEAD_SERVER));

    controller.accept(png(), FileSource::DragDrop).unwrap();
    assert_eq!(controller.phase(), Phase::Previewing);
    assert!(controller
        .preview()
        .unwrap()
        .starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn successful_submission_navigates_to_result() {
    let server = spawn_classify(200, "application/json", SUCCESS_BODY).await;
    let mut controller = UploadController::new(ClassifyClient::new(&server.url));

    controller.accept(png(), FileSource::Picker).unwrap();
    match controller.submit().await {
        Disposition::Navigate(target) => assert_eq!(target, "/result"),
        other => panic!("unexpected disposition: {:?}", other),
    }

    assert_eq!(controller.phase(), Phase::Departing);
    assert_eq!(controller.result().unwrap().class_label, "Recyclable");
}

#[tokio::test]
async fn redirect_instruction_navigates_to_its_target() {
    let server = spawn_classify(200, "application/json", r#"{"redirect": "/error"}"#).await;
    let mut controller = UploadController::new(ClassifyClient::new(&server.url));

    controller.accept(png(), FileSource::Picker).unwrap();
    match controller.submit().await {
        Disposition::Navigate(target) => assert_eq!(target, "/error"),
        other => panic!("unexpected disposition: {:?}", other),
    }
}

#[tokio::test]
async fn server_failure_resets_to_idle() {
    let server = spawn_classify(400, "application/json", r#"{"error": "No file uploaded"}"#).await;
    let mut controller = UploadController::new(ClassifyClient::new(&server.url));

    controller.accept(png(), FileSource::Picker).unwrap();
    match controller.submit().await {
        Disposition::Failed(message) => assert_eq!(message, "No file uploaded"),
        other => panic!("unexpected disposition: {:?}", other),
    }

    assert_eq!(controller.phase(), Phase::Idle);
    assert!(controller.preview().is_none());
    assert!(controller.result().is_none());
}

#[tokio::test]
async fn non_json_response_resets_to_idle() {
    let server = spawn_classify(200, "text/plain", "not json").await;
    let mut controller = UploadController::new(ClassifyClient::new(&server.url));

    controller.accept(png(), FileSource::Picker).unwrap();
    match controller.submit().await {
        Disposition::Failed(message) => {
            assert_eq!(message, "Server returned non-JSON response");
        }
        other => panic!("unexpected disposition: {:?}", other),
    }

    assert_eq!(controller.phase(), Phase::Idle);
}

#[tokio::test]
async fn network_failure_resets_to_idle() {
    let mut controller = UploadController::new(ClassifyClient::new(DEAD_SERVER));

    controller.accept(png(), FileSource::Picker).unwrap();
    match controller.submit().await {
        Disposition::Failed(message) => assert!(!message.is_empty()),
        other => panic!("unexpected disposition: {:?}", other),
    }

    assert_eq!(controller.phase(), Phase::Idle);
}

#[tokio::test]
async fn one_submission_per_accepted_file() {
    let server = spawn_classify(200, "application/json", SUCCESS_BODY).await;
    let mut controller = UploadController::new(ClassifyClient::new(&server.url));

    controller.accept(png(), FileSource::Picker).unwrap();
    controller.submit().await;
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);

    // A second submit without a new acceptance issues no request
    match controller.submit().await {
        Disposition::Failed(message) => assert_eq!(message, "No file selected"),
        other => panic!("unexpected disposition: {:?}", other),
    }
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn files_are_refused_while_departing() {
    let server = spawn_classify(200, "application/json", SUCCESS_BODY).await;
    let mut controller = UploadController::new(ClassifyClient::new(&server.url));

    controller.accept(png(), FileSource::Picker).unwrap();
    controller.submit().await;
    assert_eq!(controller.phase(), Phase::Departing);

    match controller.accept(png(), FileSource::DragDrop) {
        Err(WastevoxError::SubmissionInFlight) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    // reset makes the controller usable again
    controller.reset();
    assert_eq!(controller.phase(), Phase::Idle);
    controller.accept(png(), FileSource::DragDrop).unwrap();
}
