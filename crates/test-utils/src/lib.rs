//! Shared mocks and fixture helpers for `anyrfq` integration tests.
//!
//! The mock providers are programmed with canned replies keyed by a unique
//! substring of the system prompt, and record every call for assertion.

use anyrfq::errors::{ExtractError, PromptError};
use anyrfq::providers::ai::{AiProvider, VisionAiProvider};
use anyrfq::providers::docintel::{AnalyzeResult, DocumentAnalysisClient};
use anyrfq::providers::ocr::OcrClient;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Installs the log subscriber for a test binary.
///
/// `try_init` is used to prevent a panic when another test in the same
/// binary already installed one.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();
}

// --- Mock AI Provider ---

#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the system prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded (system, user) prompt pairs for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if system_prompt.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(PromptError::AiApi(format!(
            "MockAiProvider: No response programmed for system prompt. Got: '{system_prompt}'"
        )))
    }
}

// --- Mock Vision AI Provider ---

#[derive(Clone, Debug, Default)]
pub struct MockVisionProvider {
    response: Arc<Mutex<Option<String>>>,
    /// Byte lengths of the images received, in call order.
    image_calls: Arc<Mutex<Vec<usize>>>,
}

impl MockVisionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, response: &str) {
        *self.response.lock().unwrap() = Some(response.to_string());
    }

    pub fn image_calls(&self) -> Vec<usize> {
        self.image_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionAiProvider for MockVisionProvider {
    async fn generate_with_image(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        image: &[u8],
        _mime_type: &str,
    ) -> Result<String, PromptError> {
        self.image_calls.lock().unwrap().push(image.len());
        self.response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| PromptError::AiApi("MockVisionProvider: no response set".to_string()))
    }
}

// --- Mock Document Analysis Client ---

#[derive(Clone, Debug, Default)]
pub struct MockDocIntelClient {
    result: Arc<Mutex<Option<AnalyzeResult>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockDocIntelClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_result(&self, result: AnalyzeResult) {
        *self.result.lock().unwrap() = Some(result);
    }

    /// Makes every `analyze` call fail, for fallback tests.
    pub fn fail_always(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl DocumentAnalysisClient for MockDocIntelClient {
    async fn analyze(&self, _data: &[u8]) -> Result<AnalyzeResult, ExtractError> {
        if *self.fail.lock().unwrap() {
            return Err(ExtractError::Request(
                "MockDocIntelClient: programmed failure".to_string(),
            ));
        }
        Ok(self.result.lock().unwrap().clone().unwrap_or_default())
    }
}

// --- Mock OCR Client ---

#[derive(Clone, Debug, Default)]
pub struct MockOcrClient {
    text: Arc<Mutex<String>>,
    fail: Arc<Mutex<bool>>,
}

impl MockOcrClient {
    pub fn with_text(text: &str) -> Self {
        let client = Self::default();
        *client.text.lock().unwrap() = text.to_string();
        client
    }

    pub fn fail_always(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl OcrClient for MockOcrClient {
    async fn detect(&self, _image: &[u8]) -> Result<String, ExtractError> {
        if *self.fail.lock().unwrap() {
            return Err(ExtractError::Ocr(
                "MockOcrClient: programmed failure".to_string(),
            ));
        }
        Ok(self.text.lock().unwrap().clone())
    }
}

// --- Fixture Helpers ---

pub mod helpers {
    use anyhow::Result;
    use printpdf::{
        BuiltinFont, Layer, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, TextItem,
        TextMatrix, TextRenderingMode,
    };

    /// Generates a simple, single-page PDF with the given text content,
    /// compatible with printpdf v0.8.2.
    ///
    /// Uses a builtin font so the text layer is stored as plain WinAnsi
    /// strings instead of subset glyph IDs, keeping it recoverable by a
    /// plain text-layer reader.
    pub fn generate_test_pdf(text: &str) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new("Test PDF");
        let mut page = PdfPage::new(Mm(210.0), Mm(297.0), vec![]);
        let layer_def = Layer::new("Layer 1");
        let layer_id = doc.add_layer(&layer_def);

        let ops = vec![
            Op::BeginLayer {
                layer_id: layer_id.clone(),
            },
            Op::SetFontSizeBuiltinFont {
                size: Pt(12.0),
                font: BuiltinFont::Helvetica,
            },
            Op::StartTextSection,
            Op::SetTextMatrix {
                matrix: TextMatrix::Translate(Mm(10.0).into(), Mm(280.0).into()),
            },
            Op::SetTextRenderingMode {
                mode: TextRenderingMode::Fill,
            },
            Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(text.to_string())],
                font: BuiltinFont::Helvetica,
            },
            Op::EndTextSection,
            Op::EndLayer { layer_id },
        ];

        page.ops = ops;
        doc.pages.push(page);

        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            eprintln!("PDF generation warnings: {warnings:?}");
        }

        Ok(bytes)
    }
}
