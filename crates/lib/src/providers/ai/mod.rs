pub mod gemini;
pub mod openai;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a generative AI provider over text.
///
/// This defines the common interface the structuring service uses to turn
/// extracted document text into a JSON item payload, independent of the
/// concrete model behind it.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);

/// A trait for vision-capable generative AI providers.
///
/// Used on the image-direct path, where raw image bytes bypass plain-text
/// structuring entirely.
#[async_trait]
pub trait VisionAiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a system prompt, a user prompt, and an
    /// attached image.
    async fn generate_with_image(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(VisionAiProvider);
