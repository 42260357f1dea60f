//! PDF raw-content backends.
//!
//! Primary: the managed document-intelligence service (attempted only when
//! credentials are configured). Fallback: a local text-layer reader built
//! on the `pdf` crate.

use crate::errors::ExtractError;
use crate::extract::TextBackend;
use crate::providers::docintel::{assemble_text, DocumentAnalysisClient};
use async_trait::async_trait;
use pdf::file::FileOptions;

/// Backend wrapping the managed document-intelligence client.
pub struct DocIntelBackend {
    client: Option<Box<dyn DocumentAnalysisClient>>,
}

impl DocIntelBackend {
    /// A `None` client marks the backend as unconfigured; the chain skips
    /// it without treating that as a failure.
    pub fn new(client: Option<Box<dyn DocumentAnalysisClient>>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextBackend for DocIntelBackend {
    fn name(&self) -> &'static str {
        "document_intelligence"
    }

    fn available(&self) -> bool {
        self.client.is_some()
    }

    async fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ExtractError::Request("no document intelligence client".to_string()))?;
        let result = client.analyze(data).await?;
        Ok(assemble_text(&result))
    }
}

/// Local text-layer reader: concatenates the text drawn on each page,
/// pages separated by blank lines. No OCR, so scanned PDFs come back empty.
pub struct LocalPdfBackend;

fn extract_text_layer(pdf_data: &[u8]) -> Result<String, ExtractError> {
    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;
    let resolver = file.resolver();
    let mut full_text = String::new();

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| ExtractError::Parse(e.to_string()))?;
        if let Some(content) = &page.contents {
            let operations = content
                .operations(&resolver)
                .map_err(|e| ExtractError::Parse(e.to_string()))?;
            for op in operations.iter() {
                if let pdf::content::Op::TextDraw { text } = op {
                    full_text.push_str(&text.to_string_lossy());
                }
            }
        }
        full_text.push_str("\n\n");
    }
    Ok(full_text)
}

#[async_trait]
impl TextBackend for LocalPdfBackend {
    fn name(&self) -> &'static str {
        "local_pdf_reader"
    }

    async fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        extract_text_layer(data)
    }
}
