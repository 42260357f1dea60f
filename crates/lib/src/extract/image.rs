//! Image raw-content backend: the configured OCR engine behind the
//! [`TextBackend`] capability.
//!
//! The below-threshold routing to the vision-direct path is the pipeline's
//! decision, made from the chain's unusable-but-populated result.

use crate::errors::ExtractError;
use crate::extract::TextBackend;
use crate::providers::ocr::OcrClient;
use async_trait::async_trait;

pub struct OcrBackend {
    client: Box<dyn OcrClient>,
}

impl OcrBackend {
    pub fn new(client: Box<dyn OcrClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextBackend for OcrBackend {
    fn name(&self) -> &'static str {
        "ocr"
    }

    async fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        self.client.detect(data).await
    }
}

/// Maps an image filename to the MIME type sent with the vision request.
pub fn image_mime_type(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(image_mime_type("scan.png"), "image/png");
        assert_eq!(image_mime_type("scan.gif"), "image/gif");
        assert_eq!(image_mime_type("scan.jpg"), "image/jpeg");
        assert_eq!(image_mime_type("scan.jpeg"), "image/jpeg");
    }
}
