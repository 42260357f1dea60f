//! # Pipeline Orchestrator
//!
//! Sequences one document through classification → raw extraction →
//! structuring, with the documented escapes: zero items for genuinely
//! empty content, and a single raw-content item when the structurer
//! produced nothing usable from non-empty content. A batch fans the
//! per-document runs out over a bounded worker pool, preserving source
//! order and isolating per-document failures.

use crate::{
    classify::classify_file,
    config::PipelineConfig,
    errors::ProcessError,
    extract::{
        image::{image_mime_type, OcrBackend},
        pdf::{DocIntelBackend, LocalPdfBackend},
        sheet::SpreadsheetBackend,
        word::DocxBackend,
        FallbackChain,
    },
    patterns::analyze_text_patterns,
    providers::{
        ai::{AiProvider, VisionAiProvider},
        docintel::DocumentAnalysisClient,
        ocr::OcrClient,
    },
    structure::{structure_from_image, structure_from_text},
    types::{DocumentKind, DocumentOutcome, ExtractedItem},
};
use futures::{stream, StreamExt};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// The document-to-items pipeline.
///
/// Built once per process from explicit configuration and capability
/// clients; holds no mutable state, so concurrent per-document runs are
/// safe by construction.
pub struct DocumentPipeline {
    config: PipelineConfig,
    ai_provider: Box<dyn AiProvider>,
    vision_provider: Box<dyn VisionAiProvider>,
    docintel_client: Option<Box<dyn DocumentAnalysisClient>>,
    ocr_client: Box<dyn OcrClient>,
}

impl DocumentPipeline {
    pub fn new(
        config: PipelineConfig,
        ai_provider: Box<dyn AiProvider>,
        vision_provider: Box<dyn VisionAiProvider>,
        docintel_client: Option<Box<dyn DocumentAnalysisClient>>,
        ocr_client: Box<dyn OcrClient>,
    ) -> Self {
        Self {
            config,
            ai_provider,
            vision_provider,
            docintel_client,
            ocr_client,
        }
    }

    /// Builds the fixed-priority backend chain for a document kind.
    fn chain_for(&self, kind: DocumentKind) -> FallbackChain {
        match kind {
            DocumentKind::Pdf => FallbackChain::new(vec![
                Box::new(DocIntelBackend::new(self.docintel_client.clone())),
                Box::new(LocalPdfBackend),
            ]),
            DocumentKind::WordDocument => FallbackChain::new(vec![Box::new(DocxBackend)]),
            DocumentKind::Spreadsheet => FallbackChain::new(vec![Box::new(SpreadsheetBackend)]),
            DocumentKind::Image => {
                let min_chars = self.config.ocr.min_ocr_chars;
                FallbackChain::new(vec![Box::new(OcrBackend::new(self.ocr_client.clone()))])
                    .with_usable(move |text: &str| text.trim().chars().count() >= min_chars)
            }
        }
    }

    /// Processes one document end to end.
    ///
    /// The only error surfaced to the caller is a file that cannot be
    /// read. Backend instability, empty extractions, and malformed
    /// structuring replies are all absorbed into the item list per the
    /// fallback policy.
    #[instrument(skip(self))]
    pub async fn process_document(
        &self,
        file_path: &str,
        kind: DocumentKind,
    ) -> Result<Vec<ExtractedItem>, ProcessError> {
        let file_name = base_name(file_path);
        let data = tokio::fs::read(file_path)
            .await
            .map_err(|source| ProcessError::Io {
                path: file_path.to_string(),
                source,
            })?;

        let extraction = self.chain_for(kind).resolve(&data).await;

        // Images whose OCR output is below the usable threshold are routed
        // as raw bytes to the vision structuring backend instead.
        if kind == DocumentKind::Image && !extraction.usable {
            info!(
                "OCR output for '{file_name}' below threshold ({} chars), using vision path",
                extraction.text.trim().chars().count()
            );
            let outcome = structure_from_image(
                self.vision_provider.as_ref(),
                &data,
                image_mime_type(&file_name),
                &file_name,
            )
            .await;
            if !outcome.items.is_empty() {
                return Ok(outcome.items);
            }
            // No usable OCR text and nothing from vision: only synthesize
            // when OCR recovered at least something to carry.
            if extraction.text.trim().is_empty() {
                return Ok(Vec::new());
            }
            return Ok(vec![raw_content_item(&file_name, &extraction.text)]);
        }

        if !extraction.usable {
            info!("no content extracted from '{file_name}', finishing with zero items");
            return Ok(Vec::new());
        }

        let backend = extraction.backend.as_deref().unwrap_or("unknown");
        debug!(
            "extracted {} characters from '{file_name}' via '{backend}'",
            extraction.text.len()
        );
        let patterns = analyze_text_patterns(&extraction.text);
        if !patterns.is_empty() {
            debug!("detected procurement signals in '{file_name}': {patterns:?}");
        }

        let outcome =
            structure_from_text(self.ai_provider.as_ref(), &extraction.text, &file_name).await;
        if !outcome.items.is_empty() {
            return Ok(outcome.items);
        }

        if !outcome.parsed {
            warn!("structuring reply for '{file_name}' was unusable, falling back to raw content");
        }
        Ok(vec![raw_content_item(&file_name, &extraction.text)])
    }

    /// Processes a batch of file paths for one request.
    ///
    /// Unsupported extensions are excluded up front; the rest run on a
    /// bounded worker pool. Results come back in submission order and one
    /// document's failure never aborts the others.
    pub async fn process_batch(&self, file_paths: &[String]) -> Vec<DocumentOutcome> {
        let accepted: Vec<(String, DocumentKind)> = file_paths
            .iter()
            .filter_map(|path| match classify_file(&base_name(path)) {
                Some(kind) => Some((path.clone(), kind)),
                None => {
                    debug!("skipping '{path}': unsupported extension");
                    None
                }
            })
            .collect();

        stream::iter(accepted)
            .map(|(path, kind)| async move {
                let result = self.process_document(&path, kind).await;
                if let Err(e) = &result {
                    warn!("document '{path}' failed: {e}");
                }
                DocumentOutcome {
                    source: path,
                    result,
                }
            })
            .buffered(self.config.max_concurrency.max(1))
            .collect()
            .await
    }
}

fn base_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// The raw-content fallback item: the full extracted text as one item's
/// description, confidence unset.
fn raw_content_item(file_name: &str, text: &str) -> ExtractedItem {
    info!("falling back to raw content as a single item for '{file_name}'");
    let mut item = ExtractedItem::named(format!("Document Content: {file_name}"));
    item.description = Some(text.to_string());
    item
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_directories() {
        assert_eq!(base_name("/tmp/uploads/quote.pdf"), "quote.pdf");
        assert_eq!(base_name("quote.pdf"), "quote.pdf");
    }

    #[test]
    fn raw_content_item_carries_full_text() {
        let item = raw_content_item("doc.pdf", "line one\nline two");
        assert_eq!(item.name, "Document Content: doc.pdf");
        assert_eq!(item.description.as_deref(), Some("line one\nline two"));
        assert!(item.confidence.is_none());
        assert!(!item.id.is_empty());
    }
}
