//! # Structured Extraction Service
//!
//! Sends raw document text (or image bytes, on the vision-direct path) to a
//! generative AI backend with a fixed instruction template and parses the
//! JSON reply into [`ExtractedItem`]s. Backend and parse failures are
//! absorbed here: the caller sees an empty outcome with `parsed: false` and
//! resolves it through the raw-content fallback.

use crate::{
    prompts::{
        IMAGE_EXTRACTION_SYSTEM_PROMPT, IMAGE_EXTRACTION_USER_PROMPT,
        ITEM_EXTRACTION_SYSTEM_PROMPT, ITEM_EXTRACTION_USER_TEMPLATE,
    },
    providers::ai::{AiProvider, VisionAiProvider},
    types::ExtractedItem,
};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// Confidence assigned to items whose score the model omitted.
///
/// Flagged open question: observed defaults vary across the system's own
/// revisions; this constant is the single place to change the policy.
pub const DEFAULT_CONFIDENCE: f32 = 0.7;

/// What the structuring call produced. `parsed` is false when the backend
/// call failed or its reply was not a valid item payload; the orchestrator
/// uses that flag to trigger the raw-content fallback.
#[derive(Debug, Default)]
pub struct StructuredOutcome {
    pub items: Vec<ExtractedItem>,
    pub parsed: bool,
}

// --- Wire contract for the model reply ---

#[derive(Deserialize, Debug)]
struct ItemsPayload {
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct RawItem {
    name: Option<String>,
    // Accept fractional quantities from sloppy model output.
    quantity: Option<f64>,
    brand: Option<String>,
    model: Option<String>,
    size: Option<String>,
    #[serde(rename = "type")]
    item_type: Option<String>,
    description: Option<String>,
    #[serde(alias = "confidence")]
    extracted_confidence: Option<f32>,
}

impl RawItem {
    fn into_item(self, source_name: &str) -> ExtractedItem {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Item from {source_name}"));
        let confidence = self
            .extracted_confidence
            .unwrap_or(DEFAULT_CONFIDENCE)
            .clamp(0.0, 1.0);
        ExtractedItem {
            id: Uuid::new_v4().to_string(),
            name,
            quantity: Some(self.quantity.map(|q| q.max(0.0) as u32).unwrap_or(1)),
            brand: self.brand,
            model: self.model,
            size: self.size,
            item_type: self.item_type,
            description: self.description,
            confidence: Some(confidence),
        }
    }
}

/// Strips a markdown code fence if the model wrapped its JSON in one.
fn strip_code_fence(reply: &str) -> String {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = FENCE.get_or_init(|| Regex::new(r"```(?:json)?\n?([\s\S]*?)```").ok());
    re.as_ref()
        .and_then(|re| re.captures(reply))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| reply.trim().to_string())
}

/// Parses a model reply into items; `parsed: false` on any malformed payload.
fn parse_reply(reply: &str, source_name: &str) -> StructuredOutcome {
    let cleaned = strip_code_fence(reply);
    match serde_json::from_str::<ItemsPayload>(&cleaned) {
        Ok(payload) => {
            debug!(
                "structuring backend identified {} items in '{source_name}'",
                payload.items.len()
            );
            StructuredOutcome {
                items: payload
                    .items
                    .into_iter()
                    .map(|raw| raw.into_item(source_name))
                    .collect(),
                parsed: true,
            }
        }
        Err(e) => {
            warn!("failed to parse structuring reply for '{source_name}': {e}");
            StructuredOutcome::default()
        }
    }
}

/// Structures raw document text into items via the text AI backend.
pub async fn structure_from_text(
    ai_provider: &dyn AiProvider,
    text: &str,
    source_name: &str,
) -> StructuredOutcome {
    let user_prompt = ITEM_EXTRACTION_USER_TEMPLATE.replace("{document_text}", text);
    match ai_provider
        .generate(ITEM_EXTRACTION_SYSTEM_PROMPT, &user_prompt)
        .await
    {
        Ok(reply) => parse_reply(&reply, source_name),
        Err(e) => {
            warn!("structuring backend call failed for '{source_name}': {e}");
            StructuredOutcome::default()
        }
    }
}

/// Structures an image directly into items via the vision AI backend,
/// bypassing plain-text structuring entirely.
pub async fn structure_from_image(
    vision_provider: &dyn VisionAiProvider,
    image: &[u8],
    mime_type: &str,
    source_name: &str,
) -> StructuredOutcome {
    match vision_provider
        .generate_with_image(
            IMAGE_EXTRACTION_SYSTEM_PROMPT,
            IMAGE_EXTRACTION_USER_PROMPT,
            image,
            mime_type,
        )
        .await
    {
        Ok(reply) => parse_reply(&reply, source_name),
        Err(e) => {
            warn!("vision structuring call failed for '{source_name}': {e}");
            StructuredOutcome::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_with_extracted_confidence() {
        let reply = r#"{"items":[{"name":"Widget A","quantity":5,"extracted_confidence":0.9}]}"#;
        let outcome = parse_reply(reply, "doc.pdf");
        assert!(outcome.parsed);
        assert_eq!(outcome.items.len(), 1);
        let item = &outcome.items[0];
        assert_eq!(item.name, "Widget A");
        assert_eq!(item.quantity, Some(5));
        assert_eq!(item.confidence, Some(0.9));
        assert!(!item.id.is_empty());
    }

    #[test]
    fn accepts_confidence_as_a_synonym() {
        let reply = r#"{"items":[{"name":"Bolt","confidence":0.4}]}"#;
        let outcome = parse_reply(reply, "doc.pdf");
        assert_eq!(outcome.items[0].confidence, Some(0.4));
    }

    #[test]
    fn missing_confidence_gets_the_default() {
        let reply = r#"{"items":[{"name":"Bolt"}]}"#;
        let outcome = parse_reply(reply, "doc.pdf");
        assert_eq!(outcome.items[0].confidence, Some(DEFAULT_CONFIDENCE));
    }

    #[test]
    fn out_of_range_confidence_is_clamped() {
        let reply = r#"{"items":[{"name":"A","confidence":1.7},{"name":"B","confidence":-0.2}]}"#;
        let outcome = parse_reply(reply, "doc.pdf");
        assert_eq!(outcome.items[0].confidence, Some(1.0));
        assert_eq!(outcome.items[1].confidence, Some(0.0));
    }

    #[test]
    fn missing_name_falls_back_to_source_placeholder() {
        let reply = r#"{"items":[{"quantity":2}]}"#;
        let outcome = parse_reply(reply, "scan.png");
        assert_eq!(outcome.items[0].name, "Item from scan.png");
        assert_eq!(outcome.items[0].quantity, Some(2));
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let reply = r#"{"items":[{"name":"Cable"}]}"#;
        let outcome = parse_reply(reply, "doc.pdf");
        assert_eq!(outcome.items[0].quantity, Some(1));
    }

    #[test]
    fn code_fenced_reply_is_unwrapped() {
        let reply = "```json\n{\"items\":[{\"name\":\"Fenced\"}]}\n```";
        let outcome = parse_reply(reply, "doc.pdf");
        assert!(outcome.parsed);
        assert_eq!(outcome.items[0].name, "Fenced");
    }

    #[test]
    fn malformed_reply_is_flagged_not_fatal() {
        let outcome = parse_reply("I could not find any items, sorry!", "doc.pdf");
        assert!(!outcome.parsed);
        assert!(outcome.items.is_empty());
    }

    #[test]
    fn payload_without_items_key_parses_to_zero_items() {
        let outcome = parse_reply("{}", "doc.pdf");
        assert!(outcome.parsed);
        assert!(outcome.items.is_empty());
    }
}
