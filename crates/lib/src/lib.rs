//! # anyrfq
//!
//! Turns heterogeneous procurement documents (PDF, Word, spreadsheet,
//! image) into a normalized list of requested line items. The pipeline
//! chains format-specific raw-content extractors behind an ordered backend
//! fallback, then asks a generative AI backend to structure the text into
//! items with confidence scores, falling back to a single raw-content item
//! when structuring fails.
//!
//! Callers own storage, routing, and credential resolution; this crate is
//! invoked with a file path and a [`types::DocumentKind`] and returns items
//! or a per-document error.

pub mod classify;
pub mod config;
pub mod errors;
pub mod extract;
pub mod patterns;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod structure;
pub mod types;

pub use classify::classify_file;
pub use config::PipelineConfig;
pub use errors::{ExtractError, ProcessError, PromptError};
pub use pipeline::DocumentPipeline;
pub use types::{DocumentKind, DocumentOutcome, ExtractedItem};
