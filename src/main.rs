//! Wastevox entry point
//!
//! Composition root for the upload/classify controller and the speech
//! announcer: accepts an image path, submits it to the classification
//! service, and narrates the outcome in the configured language.

use anyhow::{bail, Context};
use log::{debug, error, info, warn};
use std::path::Path;
use std::process;
use std::time::Duration;
use wastevox::classify::{
    ClassifyClient, Disposition, FileSource, UploadController, UploadFile, RESULT_PATH,
};
use wastevox::prefs::FilePrefs;
use wastevox::speech::narration::format_confidence;
use wastevox::speech::{create_backend, Announcer, SpeechOutcome, WasteClass};

/// Classification service used when --server is not given
const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

/// How long to wait for narration to finish before exiting anyway
const NARRATION_TIMEOUT: Duration = Duration::from_secs(180);

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    env_logger::Builder::from_default_env()
        .filter_level(if debug_mode {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    info!("wastevox version {} starting", wastevox::VERSION);

    if let Err(e) = run(args) {
        error!("Fatal error: {}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Vec<String>) -> anyhow::Result<()> {
    let mut server = DEFAULT_SERVER.to_string();
    let mut lang: Option<String> = None;
    let mut new_language: Option<String> = None;
    let mut image: Option<String> = None;

    let mut iter = args
        .iter()
        .filter(|arg| arg.as_str() != "--debug" && arg.as_str() != "-d");
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--server" => server = iter.next().context("--server needs a URL")?.clone(),
            "--lang" => {
                lang = Some(iter.next().context("--lang needs a language tag")?.clone());
            }
            "--set-language" => {
                new_language = Some(
                    iter.next()
                        .context("--set-language needs a language tag")?
                        .clone(),
                );
            }
            other if other.starts_with('-') => bail!("Unknown option: {}", other),
            other if image.is_none() => image = Some(other.to_string()),
            other => bail!("Unexpected argument: {}", other),
        }
    }

    let prefs = FilePrefs::load()?;
    let mut announcer = Announcer::new(create_backend(), Box::new(prefs));

    if let Some(tag) = &new_language {
        announcer.set_language(tag);
        println!("Narration language set to {}", tag);
    }

    let Some(image) = image else {
        // Changing the persisted language is a valid invocation on its own
        if new_language.is_some() {
            return Ok(());
        }
        eprintln!("Usage: wastevox [--server URL] [--lang TAG] [--set-language TAG] [--debug] IMAGE");
        process::exit(2)
    };

    let path = Path::new(&image);
    let file =
        UploadFile::from_path(path).with_context(|| format!("Failed to read {}", image))?;

    let client = ClassifyClient::new(server);
    let mut controller = UploadController::new(client);
    controller.accept(file, FileSource::Picker)?;
    info!("Image accepted, submitting for classification");

    // The classification POST is the only suspend point
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(controller.submit()) {
        Disposition::Navigate(target) if target == RESULT_PATH => {
            let Some(result) = controller.result() else {
                bail!("Result view reached without a classification result");
            };

            println!(
                "Classified as {} ({} percent confidence)",
                result.class_label,
                format_confidence(result.confidence)
            );
            if let Some(info) = &result.info {
                println!("{} {}", info.description, info.disposal);
            }

            let class = WasteClass::parse(&result.class_label);
            let confidence = result.confidence;
            let completion = match lang.as_deref() {
                Some(tag) if tag.starts_with("te") => {
                    announcer.announce_result_telugu(&class, confidence)
                }
                Some(_) => announcer.announce_result_english(&class, confidence),
                None => announcer.announce_result(&class, confidence),
            };

            match completion.wait_timeout(NARRATION_TIMEOUT) {
                Some(SpeechOutcome::Started) => {
                    warn!("Narration completion cannot be observed on this platform")
                }
                Some(outcome) => debug!("Narration outcome: {:?}", outcome),
                None => warn!("Narration still running at timeout, exiting"),
            }
        }
        Disposition::Navigate(target) => {
            // The server steered the page elsewhere, e.g. to the
            // not-recognisable-waste explanation
            println!("Server redirected to {}", target);
        }
        Disposition::Failed(message) => {
            eprintln!("CLASSIFICATION FAILED: {}", message);
            process::exit(1);
        }
    }

    Ok(())
}
