//! Pipeline configuration.
//!
//! All credentials and endpoints arrive here already resolved by the caller;
//! the pipeline itself reads no environment and holds no ambient state.

use crate::errors::ExtractError;
use crate::providers::docintel::AzureDocIntelClient;
use serde::Deserialize;
use std::time::Duration;

/// Minimum count of OCR characters considered usable before the image is
/// re-routed to the vision-direct structuring path.
pub const DEFAULT_MIN_OCR_CHARS: usize = 100;

/// Default bound on concurrently processed documents in a batch.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Default timeout applied to each extraction or structuring backend call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Credentials for the managed document-intelligence PDF backend.
///
/// When absent, the PDF chain goes straight to the local text-layer reader.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentIntelligenceConfig {
    pub endpoint: String,
    pub api_key: String,
}

/// OCR tuning for the image extractor.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// OCR output shorter than this is treated as unusable and the raw
    /// image bytes are sent to the vision structuring backend instead.
    #[serde(default = "default_min_ocr_chars")]
    pub min_ocr_chars: usize,
}

fn default_min_ocr_chars() -> usize {
    DEFAULT_MIN_OCR_CHARS
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            min_ocr_chars: DEFAULT_MIN_OCR_CHARS,
        }
    }
}

/// Configuration for one [`crate::pipeline::DocumentPipeline`].
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Premium PDF backend; `None` degrades silently to the local reader.
    #[serde(default)]
    pub document_intelligence: Option<DocumentIntelligenceConfig>,
    #[serde(default)]
    pub ocr: OcrConfig,
    /// Upper bound on documents processed in parallel by `process_batch`.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Per-call timeout for network backends, in seconds on the wire.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            document_intelligence: None,
            ocr: OcrConfig::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl PipelineConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the managed PDF analysis client this configuration names,
    /// using the configured request timeout. `None` when no
    /// document-intelligence credentials were provided.
    pub fn document_intelligence_client(
        &self,
    ) -> Result<Option<AzureDocIntelClient>, ExtractError> {
        self.document_intelligence
            .as_ref()
            .map(|di| AzureDocIntelClient::from_config(di, self.request_timeout()))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = PipelineConfig::default();
        assert!(config.document_intelligence.is_none());
        assert_eq!(config.ocr.min_ocr_chars, 100);
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn deserializes_from_partial_json() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{"document_intelligence": {"endpoint": "https://di.example", "api_key": "k"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.document_intelligence.unwrap().endpoint,
            "https://di.example"
        );
        assert_eq!(config.ocr.min_ocr_chars, 100);
    }

    #[test]
    fn builds_a_docintel_client_only_when_configured() {
        let configured: PipelineConfig = serde_json::from_str(
            r#"{"document_intelligence": {"endpoint": "https://di.example", "api_key": "k"}}"#,
        )
        .unwrap();
        assert!(configured
            .document_intelligence_client()
            .unwrap()
            .is_some());
        assert!(PipelineConfig::default()
            .document_intelligence_client()
            .unwrap()
            .is_none());
    }
}
