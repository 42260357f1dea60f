//! Local PDF text-layer reader tests against generated fixtures.

use anyhow::Result;
use anyrfq::extract::{pdf::LocalPdfBackend, FallbackChain};
use anyrfq_test_utils::{helpers::generate_test_pdf, init_tracing};

#[tokio::test]
async fn text_layer_is_recovered_from_a_generated_pdf() -> Result<()> {
    init_tracing();
    let pdf_data = generate_test_pdf("Quotation for 3 industrial fans")?;
    let chain = FallbackChain::new(vec![Box::new(LocalPdfBackend)]);
    let extraction = chain.resolve(&pdf_data).await;
    assert!(extraction.usable);
    assert_eq!(extraction.backend.as_deref(), Some("local_pdf_reader"));
    assert!(extraction.text.contains("Quotation for 3 industrial fans"));
    Ok(())
}

#[tokio::test]
async fn unparseable_bytes_resolve_to_an_unusable_extraction() {
    init_tracing();
    let chain = FallbackChain::new(vec![Box::new(LocalPdfBackend)]);
    let extraction = chain.resolve(b"definitely not a pdf").await;
    assert!(!extraction.usable);
    assert!(extraction.text.is_empty());
    assert!(extraction.backend.is_none());
}
