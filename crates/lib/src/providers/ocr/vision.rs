use crate::errors::ExtractError;
use crate::providers::ocr::OcrClient;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use serde_json::json;
use std::fmt::Debug;
use std::time::Duration;

// --- Vision API response structures ---

#[derive(Deserialize, Debug)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Deserialize, Debug, Default)]
struct ImageResponse {
    #[serde(rename = "textAnnotations", default)]
    text_annotations: Vec<TextAnnotation>,
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
struct TextAnnotation {
    #[serde(default)]
    description: String,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    #[serde(default)]
    message: String,
}

/// OCR via a cloud vision `images:annotate` endpoint.
///
/// The first text annotation is the full-image transcription; the rest are
/// per-word boxes the pipeline has no use for.
#[derive(Clone, Debug)]
pub struct CloudVisionOcr {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
}

impl CloudVisionOcr {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Result<Self, ExtractError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractError::Request(e.to_string()))?;
        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }
}

#[async_trait]
impl OcrClient for CloudVisionOcr {
    async fn detect(&self, image: &[u8]) -> Result<String, ExtractError> {
        let request_body = json!({
            "requests": [{
                "image": { "content": general_purpose::STANDARD.encode(image) },
                "features": [{ "type": "TEXT_DETECTION" }]
            }]
        });

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Ocr(format!(
                "vision request failed with status {status}: {body}"
            )));
        }

        let annotate: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::Parse(e.to_string()))?;

        let image_response = annotate.responses.into_iter().next().unwrap_or_default();
        if let Some(error) = image_response.error {
            return Err(ExtractError::Ocr(format!(
                "vision API error: {}",
                error.message
            )));
        }

        Ok(image_response
            .text_annotations
            .into_iter()
            .next()
            .map(|a| a.description)
            .unwrap_or_default())
    }
}
