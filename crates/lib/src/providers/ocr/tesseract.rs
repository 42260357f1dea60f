use crate::errors::ExtractError;
use crate::providers::ocr::OcrClient;
use async_trait::async_trait;
use std::fmt::Debug;
use tokio::process::Command;
use tracing::debug;

/// OCR via the local `tesseract` binary.
///
/// The image is staged in a temp directory because tesseract reads from a
/// path; stdout carries the recognized text.
#[derive(Clone, Debug, Default)]
pub struct TesseractOcr {
    /// Language hint passed to `-l`; defaults to `eng`.
    language: Option<String>,
}

impl TesseractOcr {
    pub fn new(language: Option<String>) -> Self {
        Self { language }
    }

    /// Checks whether the tesseract binary is on the PATH.
    pub async fn is_available() -> bool {
        Command::new("tesseract")
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl OcrClient for TesseractOcr {
    async fn detect(&self, image: &[u8]) -> Result<String, ExtractError> {
        let temp_dir = tempfile::tempdir()
            .map_err(|e| ExtractError::Ocr(format!("failed to create temp dir: {e}")))?;
        let image_path = temp_dir.path().join("input.png");
        tokio::fs::write(&image_path, image)
            .await
            .map_err(|e| ExtractError::Ocr(format!("failed to stage temp image: {e}")))?;

        let language = self.language.as_deref().unwrap_or("eng");
        let output = Command::new("tesseract")
            .arg(&image_path)
            .arg("stdout")
            .args(["-l", language])
            .output()
            .await
            .map_err(|e| ExtractError::Ocr(format!("failed to run tesseract: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Ocr(format!("tesseract error: {stderr}")));
        }

        let text = String::from_utf8_lossy(&output.stdout).to_string();
        debug!("tesseract recognized {} characters", text.len());
        Ok(text)
    }
}
