//! Managed document-intelligence client for structured PDF analysis.
//!
//! The service returns paragraphs, per-page line groups, and extracted
//! tables; [`assemble_text`] flattens that surface into the pipeline's raw
//! text in a fixed preference order. The local text-layer reader in
//! [`crate::extract::pdf`] is the fallback when this backend is missing or
//! erroring.

use crate::config::DocumentIntelligenceConfig;
use crate::errors::ExtractError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use std::fmt::Debug;
use std::time::Duration;

/// The structured analysis payload returned by the service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeResult {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Table {
    /// Row-major cell grid; absent cells render as empty strings.
    #[serde(default)]
    pub grid: Vec<Vec<Option<String>>>,
}

/// Capability interface for the managed PDF analysis backend.
#[async_trait]
pub trait DocumentAnalysisClient: Send + Sync + Debug + DynClone {
    async fn analyze(&self, data: &[u8]) -> Result<AnalyzeResult, ExtractError>;
}

dyn_clone::clone_trait_object!(DocumentAnalysisClient);

/// Flattens an [`AnalyzeResult`] into raw pipeline text.
///
/// Paragraph text is preferred; page lines are the fallback when the
/// service produced no paragraphs. Extracted tables are always appended as
/// a pipe-delimited `TABLES:` section.
pub fn assemble_text(result: &AnalyzeResult) -> String {
    let mut text = result
        .paragraphs
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    if text.is_empty() {
        for page in &result.pages {
            if !page.lines.is_empty() {
                text.push_str(&page.lines.join("\n"));
                text.push_str("\n\n");
            }
        }
    }

    if !result.tables.is_empty() {
        text.push_str("\n\nTABLES:\n");
        for table in &result.tables {
            for row in &table.grid {
                let rendered: Vec<&str> = row
                    .iter()
                    .map(|cell| cell.as_deref().unwrap_or(""))
                    .collect();
                text.push_str(&rendered.join(" | "));
                text.push('\n');
            }
            text.push('\n');
        }
    }

    text
}

/// REST client for an Azure-Document-Intelligence-shaped analysis endpoint.
#[derive(Clone, Debug)]
pub struct AzureDocIntelClient {
    client: ReqwestClient,
    endpoint: String,
    api_key: String,
}

impl AzureDocIntelClient {
    pub fn new(
        endpoint: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, ExtractError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractError::Request(e.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Builds the client from resolved pipeline configuration.
    pub fn from_config(
        config: &DocumentIntelligenceConfig,
        timeout: Duration,
    ) -> Result<Self, ExtractError> {
        Self::new(config.endpoint.clone(), config.api_key.clone(), timeout)
    }
}

#[async_trait]
impl DocumentAnalysisClient for AzureDocIntelClient {
    async fn analyze(&self, data: &[u8]) -> Result<AnalyzeResult, ExtractError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(data.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Request(format!(
                "document analysis request failed with status {status}: {body}"
            )));
        }

        let result: AnalyzeResult = response
            .json()
            .await
            .map_err(|e| ExtractError::Parse(e.to_string()))?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_paragraphs_over_page_lines() {
        let result = AnalyzeResult {
            paragraphs: vec![
                Paragraph {
                    text: "First paragraph".to_string(),
                },
                Paragraph {
                    text: "Second paragraph".to_string(),
                },
            ],
            pages: vec![Page {
                lines: vec!["ignored line".to_string()],
            }],
            tables: vec![],
        };
        let text = assemble_text(&result);
        assert_eq!(text, "First paragraph\n\nSecond paragraph");
    }

    #[test]
    fn falls_back_to_page_lines() {
        let result = AnalyzeResult {
            paragraphs: vec![],
            pages: vec![Page {
                lines: vec!["line one".to_string(), "line two".to_string()],
            }],
            tables: vec![],
        };
        assert_eq!(assemble_text(&result), "line one\nline two\n\n");
    }

    #[test]
    fn appends_tables_as_pipe_grid() {
        let result = AnalyzeResult {
            paragraphs: vec![Paragraph {
                text: "Body".to_string(),
            }],
            pages: vec![],
            tables: vec![Table {
                grid: vec![
                    vec![Some("Item".to_string()), Some("Qty".to_string())],
                    vec![Some("Widget".to_string()), None],
                ],
            }],
        };
        let text = assemble_text(&result);
        assert!(text.starts_with("Body"));
        assert!(text.contains("TABLES:\nItem | Qty\nWidget | \n"));
    }

    #[test]
    fn empty_result_assembles_to_empty_text() {
        assert_eq!(assemble_text(&AnalyzeResult::default()), "");
    }
}
