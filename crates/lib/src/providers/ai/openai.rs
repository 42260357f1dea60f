use crate::{
    errors::PromptError,
    providers::ai::{AiProvider, VisionAiProvider},
};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::Debug;
use std::time::Duration;

// Near-deterministic: consistency over creativity for field extraction.
const STRUCTURING_TEMPERATURE: f32 = 0.1;
const MAX_COMPLETION_TOKENS: i32 = 2000;

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    temperature: f32,
    max_tokens: i32,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: Value,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ChatResponseMessage {
    content: String,
}

// --- OpenAI Provider implementation ---

/// A provider for the OpenAI chat completions API, or any compatible
/// endpoint. Handles both the plain-text and the vision structuring calls.
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProvider` with the given resolved endpoint and
    /// credentials.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PromptError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, PromptError> {
        let request_body = ChatRequest {
            messages,
            model: self.model.as_deref(),
            temperature: STRUCTURING_TEMPERATURE,
            max_tokens: MAX_COMPLETION_TOKENS,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let mut request_builder = self.client.post(&self.api_url);
        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi(error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(PromptError::AiDeserialization)?;

        let raw_response = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(raw_response)
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: Value::String(system_prompt.to_string()),
            },
            ChatMessage {
                role: "user".to_string(),
                content: Value::String(user_prompt.to_string()),
            },
        ];
        self.complete(messages).await
    }
}

#[async_trait]
impl VisionAiProvider for OpenAiProvider {
    async fn generate_with_image(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, PromptError> {
        let base64_image = general_purpose::STANDARD.encode(image);
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: Value::String(system_prompt.to_string()),
            },
            ChatMessage {
                role: "user".to_string(),
                content: json!([
                    { "type": "text", "text": user_prompt },
                    {
                        "type": "image_url",
                        "image_url": {
                            "url": format!("data:{mime_type};base64,{base64_image}")
                        }
                    }
                ]),
            },
        ];
        self.complete(messages).await
    }
}
