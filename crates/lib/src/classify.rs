//! Maps filenames to a [`DocumentKind`] by extension.
//!
//! Unsupported extensions classify to `None` and are silently excluded at
//! the batch-collection stage; no item and no error is produced for them.

use crate::types::DocumentKind;

/// Classifies a filename into one of the supported document kinds.
///
/// The mapping is fixed: `pdf`, `doc`/`docx`, `xls`/`xlsx`, and the common
/// image extensions. Matching is case-insensitive.
pub fn classify_file(filename: &str) -> Option<DocumentKind> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "pdf" => Some(DocumentKind::Pdf),
        "doc" | "docx" => Some(DocumentKind::WordDocument),
        "xls" | "xlsx" => Some(DocumentKind::Spreadsheet),
        "jpg" | "jpeg" | "png" | "gif" => Some(DocumentKind::Image),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions_map_to_their_kind() {
        assert_eq!(classify_file("quote.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(classify_file("req.doc"), Some(DocumentKind::WordDocument));
        assert_eq!(classify_file("req.docx"), Some(DocumentKind::WordDocument));
        assert_eq!(classify_file("items.xls"), Some(DocumentKind::Spreadsheet));
        assert_eq!(classify_file("items.xlsx"), Some(DocumentKind::Spreadsheet));
        assert_eq!(classify_file("scan.jpg"), Some(DocumentKind::Image));
        assert_eq!(classify_file("scan.jpeg"), Some(DocumentKind::Image));
        assert_eq!(classify_file("scan.png"), Some(DocumentKind::Image));
        assert_eq!(classify_file("scan.gif"), Some(DocumentKind::Image));
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify_file("QUOTE.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(classify_file("Items.XlSx"), Some(DocumentKind::Spreadsheet));
    }

    #[test]
    fn unsupported_extensions_are_rejected() {
        assert_eq!(classify_file("notes.txt"), None);
        assert_eq!(classify_file("archive.zip"), None);
        assert_eq!(classify_file("slides.pptx"), None);
        assert_eq!(classify_file("no_extension"), None);
        assert_eq!(classify_file(""), None);
    }

    #[test]
    fn only_the_last_extension_counts() {
        assert_eq!(classify_file("backup.pdf.zip"), None);
        assert_eq!(classify_file("report.zip.pdf"), Some(DocumentKind::Pdf));
    }
}
