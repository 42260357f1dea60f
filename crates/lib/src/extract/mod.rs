//! Raw content extraction and the backend fallback controller.
//!
//! Each document kind owns an ordered chain of [`TextBackend`]s. The chain
//! tries backends in priority order, skips the ones whose credentials are
//! missing, and adopts the first result its usability predicate accepts.
//! Partial results from two backends are never mixed. Backend errors stay
//! inside the chain; the worst case is an unusable, empty [`Extraction`].

pub mod image;
pub mod pdf;
pub mod sheet;
pub mod word;

use crate::errors::ExtractError;
use async_trait::async_trait;
use tracing::{debug, warn};

/// The explicit result of one extraction pass: the content, the backend
/// that produced it, and whether the controller deemed it usable.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub text: String,
    /// Name of the backend the content was adopted from; `None` when every
    /// backend failed or produced unusable output.
    pub backend: Option<String>,
    pub usable: bool,
}

impl Extraction {
    fn unusable() -> Self {
        Self {
            text: String::new(),
            backend: None,
            usable: false,
        }
    }
}

/// One raw-content extraction backend for a document kind.
#[async_trait]
pub trait TextBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the backend is configured well enough to attempt. An
    /// unavailable backend is skipped without counting as a failure.
    fn available(&self) -> bool {
        true
    }

    async fn extract(&self, data: &[u8]) -> Result<String, ExtractError>;
}

/// Ordered list of backends plus the predicate that decides whether an
/// attempt's output is worth adopting.
pub struct FallbackChain {
    backends: Vec<Box<dyn TextBackend>>,
    usable: Box<dyn Fn(&str) -> bool + Send + Sync>,
}

/// Default usability predicate: any non-blank text.
pub fn non_blank(text: &str) -> bool {
    !text.trim().is_empty()
}

impl FallbackChain {
    pub fn new(backends: Vec<Box<dyn TextBackend>>) -> Self {
        Self {
            backends,
            usable: Box::new(non_blank),
        }
    }

    pub fn with_usable(mut self, usable: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.usable = Box::new(usable);
        self
    }

    /// Runs the chain: one attempt per configured backend, first usable
    /// result wins. Returns the last attempt's text (flagged unusable)
    /// when no backend satisfies the predicate, so callers can still see
    /// what was produced.
    pub async fn resolve(&self, data: &[u8]) -> Extraction {
        let mut last = Extraction::unusable();
        for backend in &self.backends {
            if !backend.available() {
                debug!("extraction backend '{}' not configured, skipping", backend.name());
                continue;
            }
            match backend.extract(data).await {
                Ok(text) => {
                    let usable = (self.usable)(&text);
                    let extraction = Extraction {
                        text,
                        backend: Some(backend.name().to_string()),
                        usable,
                    };
                    if usable {
                        debug!("adopted content from backend '{}'", backend.name());
                        return extraction;
                    }
                    debug!(
                        "backend '{}' produced unusable content, trying next",
                        backend.name()
                    );
                    last = extraction;
                }
                Err(e) => {
                    warn!("extraction backend '{}' failed: {e}", backend.name());
                }
            }
        }
        last.usable = false;
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBackend {
        name: &'static str,
        available: bool,
        result: Result<&'static str, &'static str>,
    }

    #[async_trait]
    impl TextBackend for FixedBackend {
        fn name(&self) -> &'static str {
            self.name
        }

        fn available(&self) -> bool {
            self.available
        }

        async fn extract(&self, _data: &[u8]) -> Result<String, ExtractError> {
            self.result
                .map(String::from)
                .map_err(|e| ExtractError::Request(e.to_string()))
        }
    }

    fn ok(name: &'static str, text: &'static str) -> Box<dyn TextBackend> {
        Box::new(FixedBackend {
            name,
            available: true,
            result: Ok(text),
        })
    }

    fn failing(name: &'static str) -> Box<dyn TextBackend> {
        Box::new(FixedBackend {
            name,
            available: true,
            result: Err("boom"),
        })
    }

    fn unconfigured(name: &'static str) -> Box<dyn TextBackend> {
        Box::new(FixedBackend {
            name,
            available: false,
            result: Ok("should never run"),
        })
    }

    #[tokio::test]
    async fn adopts_first_usable_result() {
        let chain = FallbackChain::new(vec![ok("primary", "primary text"), ok("secondary", "x")]);
        let extraction = chain.resolve(b"").await;
        assert!(extraction.usable);
        assert_eq!(extraction.text, "primary text");
        assert_eq!(extraction.backend.as_deref(), Some("primary"));
    }

    #[tokio::test]
    async fn erroring_primary_falls_back() {
        let chain = FallbackChain::new(vec![failing("primary"), ok("secondary", "recovered")]);
        let extraction = chain.resolve(b"").await;
        assert!(extraction.usable);
        assert_eq!(extraction.backend.as_deref(), Some("secondary"));
        assert_eq!(extraction.text, "recovered");
    }

    #[tokio::test]
    async fn unconfigured_primary_is_skipped_silently() {
        let chain = FallbackChain::new(vec![unconfigured("primary"), ok("secondary", "local")]);
        let extraction = chain.resolve(b"").await;
        assert_eq!(extraction.backend.as_deref(), Some("secondary"));
    }

    #[tokio::test]
    async fn empty_output_triggers_next_backend() {
        let chain = FallbackChain::new(vec![ok("primary", "   "), ok("secondary", "content")]);
        let extraction = chain.resolve(b"").await;
        assert_eq!(extraction.backend.as_deref(), Some("secondary"));
    }

    #[tokio::test]
    async fn total_failure_is_unusable_not_an_error() {
        let chain = FallbackChain::new(vec![failing("primary"), failing("secondary")]);
        let extraction = chain.resolve(b"").await;
        assert!(!extraction.usable);
        assert!(extraction.text.is_empty());
        assert!(extraction.backend.is_none());
    }

    #[tokio::test]
    async fn threshold_predicate_rejects_short_output() {
        let chain = FallbackChain::new(vec![ok("ocr", "short")])
            .with_usable(|text: &str| text.trim().len() >= 10);
        let extraction = chain.resolve(b"").await;
        assert!(!extraction.usable);
        // The short text is still reported for the caller's routing decision.
        assert_eq!(extraction.text, "short");
    }
}
