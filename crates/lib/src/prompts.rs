//! # Default Prompt Templates
//!
//! Fixed instruction templates sent to the structuring backends. Keeping
//! them as constants makes the AI contract reviewable in one place and lets
//! tests key mock responses off unique substrings.

/// System persona for the text structuring call.
pub const ITEM_EXTRACTION_SYSTEM_PROMPT: &str =
    "You are an AI assistant specializing in procurement document analysis. \
     You identify the line items a buyer is requesting and reply with JSON only.";

/// User instruction for the text structuring call.
///
/// Placeholder: `{document_text}`.
pub const ITEM_EXTRACTION_USER_TEMPLATE: &str = r#"Extract structured information from the following procurement request document text.
Identify the items being requested, including their names, quantities, brands, models, sizes, and types if available.
Format the response as a JSON object with a single "items" array, each element with the following properties:
- name: The name of the item
- quantity: The quantity requested (if available)
- brand: The brand name (if available)
- model: The model number or name (if available)
- size: The size specification (if available)
- type: The type of item (if available)
- description: Any additional description
- extracted_confidence: Your confidence in this item, between 0.0 and 1.0

Document text:
{document_text}"#;

/// System persona for the image-direct structuring call.
pub const IMAGE_EXTRACTION_SYSTEM_PROMPT: &str =
    "You are an AI assistant specializing in procurement document analysis. \
     Extract product details directly from images and reply with JSON only.";

/// User instruction accompanying the image bytes on the vision-direct path.
pub const IMAGE_EXTRACTION_USER_PROMPT: &str =
    "Extract all product information from this image. Look for product name, model number, \
     brand, size, quantity, and any other specifications. Format the response as a JSON \
     object with a single \"items\" array using the keys name, quantity, brand, model, \
     size, type, description and extracted_confidence.";
