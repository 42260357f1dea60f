//! OCR backends for the image extractor.
//!
//! Exactly one engine is configured per pipeline: the cloud vision service
//! or the local tesseract binary. The pipeline treats short OCR output as
//! unusable and re-routes the image to the vision structuring path.

pub mod tesseract;
pub mod vision;

use crate::errors::ExtractError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

pub use tesseract::TesseractOcr;
pub use vision::CloudVisionOcr;

/// Capability interface for converting image pixels to text.
#[async_trait]
pub trait OcrClient: Send + Sync + Debug + DynClone {
    async fn detect(&self, image: &[u8]) -> Result<String, ExtractError>;
}

dyn_clone::clone_trait_object!(OcrClient);
