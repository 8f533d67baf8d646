//! Classification upload pipeline

pub mod client;
pub mod upload;

pub use client::{
    ClassificationResult, ClassifyClient, ClassifyOutcome, WasteInfo, RESULT_PATH,
};
pub use upload::{media_type_for_path, Disposition, FileSource, Phase, UploadController, UploadFile};
