use crate::{
    errors::PromptError,
    providers::ai::{AiProvider, VisionAiProvider},
};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

// --- Gemini-specific request and response structures ---

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

#[derive(Serialize)]
struct Blob {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Deserialize, Debug)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: ContentResponse,
}

#[derive(Deserialize, Debug)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize, Debug)]
struct PartResponse {
    text: String,
}

// --- Gemini Provider implementation ---

/// A provider for interacting with the Google Gemini API, for both text
/// and image-attached generation.
#[derive(Clone, Debug)]
pub struct GeminiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider`.
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Result<Self, PromptError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }

    async fn send(&self, system_prompt: &str, parts: Vec<Part>) -> Result<String, PromptError> {
        let request_body = GeminiRequest {
            contents: vec![Content { parts }],
            system_instruction: Content {
                parts: vec![Part::Text {
                    text: system_prompt.to_string(),
                }],
            },
            generation_config: GenerationConfig { temperature: 0.1 },
        };

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi(error_text));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;

        let raw_response = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .unwrap_or_default();

        Ok(raw_response)
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let parts = vec![Part::Text {
            text: user_prompt.to_string(),
        }];
        self.send(system_prompt, parts).await
    }
}

#[async_trait]
impl VisionAiProvider for GeminiProvider {
    async fn generate_with_image(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, PromptError> {
        let parts = vec![
            Part::Text {
                text: user_prompt.to_string(),
            },
            Part::InlineData {
                inline_data: Blob {
                    mime_type: mime_type.to_string(),
                    data: general_purpose::STANDARD.encode(image),
                },
            },
        ];
        self.send(system_prompt, parts).await
    }
}
