//! Word-document raw-content backend.
//!
//! Paragraph text in document order, then table cell text row by row with
//! cells joined by ` | `. Single backend, no fallback.

use crate::errors::ExtractError;
use crate::extract::TextBackend;
use async_trait::async_trait;
use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, TableCellContent, TableChild,
    TableRowChild,
};

pub struct DocxBackend;

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(data).map_err(|e| ExtractError::Parse(e.to_string()))?;

    let mut text = String::new();
    let mut tables = Vec::new();

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => {
                text.push_str(&paragraph_text(p));
                text.push('\n');
            }
            DocumentChild::Table(t) => tables.push(t),
            _ => {}
        }
    }

    for table in tables {
        for row in &table.rows {
            let TableChild::TableRow(row) = row;
            let mut cells = Vec::new();
            for cell in &row.cells {
                let TableRowChild::TableCell(cell) = cell;
                let mut cell_text = String::new();
                for content in &cell.children {
                    if let TableCellContent::Paragraph(p) = content {
                        cell_text.push_str(&paragraph_text(p));
                    }
                }
                cells.push(cell_text);
            }
            text.push_str(&cells.join(" | "));
            text.push('\n');
        }
    }

    Ok(text)
}

#[async_trait]
impl TextBackend for DocxBackend {
    fn name(&self) -> &'static str {
        "docx_reader"
    }

    async fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        extract_docx_text(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run, Table, TableCell, TableRow};

    fn build_docx(docx: Docx) -> Vec<u8> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn paragraphs_come_out_in_order() {
        let data = build_docx(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Request for parts")))
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Deliver by June"))),
        );
        let text = extract_docx_text(&data).unwrap();
        assert_eq!(text, "Request for parts\nDeliver by June\n");
    }

    #[test]
    fn table_cells_are_pipe_joined_after_paragraphs() {
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Widget"))),
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("5"))),
        ])]);
        let data = build_docx(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Items:")))
                .add_table(table),
        );
        let text = extract_docx_text(&data).unwrap();
        assert!(text.starts_with("Items:\n"));
        assert!(text.contains("Widget | 5\n"));
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        assert!(matches!(
            extract_docx_text(b"not a docx"),
            Err(ExtractError::Parse(_))
        ));
    }
}
