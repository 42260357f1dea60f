//! Lightweight procurement-signal heuristics.
//!
//! Run over freshly extracted text before structuring, purely for
//! diagnostics: the detected signal names end up in the debug log and help
//! explain why a document produced (or failed to produce) items.

/// Names the procurement signals present in the text.
///
/// Returns an empty list for text too short to analyze.
pub fn analyze_text_patterns(text: &str) -> Vec<&'static str> {
    if text.len() < 10 {
        return Vec::new();
    }
    let lower = text.to_lowercase();
    let contains_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    let mut patterns = Vec::new();
    if contains_any(&["qty", "quantity", "pcs", "units"]) {
        patterns.push("Quantity indicators");
    }
    if contains_any(&["$", "usd", "eur", "price", "cost", "rate"]) {
        patterns.push("Price/cost indicators");
    }
    if contains_any(&["spec", "specification", "dimension", "size", "weight"]) {
        patterns.push("Specifications");
    }
    if contains_any(&["model", "part", "no.", "number", "sku", "code"]) {
        patterns.push("Part/model numbers");
    }
    if contains_any(&["brand", "manufacturer", "vendor", "supplier"]) {
        patterns.push("Brand/vendor references");
    }
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_quantity_and_price_signals() {
        let patterns = analyze_text_patterns("Need 5 pcs of widget, price USD 30 each");
        assert!(patterns.contains(&"Quantity indicators"));
        assert!(patterns.contains(&"Price/cost indicators"));
    }

    #[test]
    fn short_text_yields_nothing() {
        assert!(analyze_text_patterns("qty 5").is_empty());
    }

    #[test]
    fn plain_prose_yields_nothing() {
        assert!(analyze_text_patterns("hello there, how are you today?").is_empty());
    }
}
