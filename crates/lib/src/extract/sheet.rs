//! Spreadsheet raw-content backend.
//!
//! Reads every sheet in file order; each sheet renders as a `Sheet: {name}`
//! header followed by its rows with cells joined by ` | `. Single backend.

use crate::errors::ExtractError;
use crate::extract::TextBackend;
use async_trait::async_trait;
use calamine::{Data, Reader};

pub struct SpreadsheetBackend;

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        _ => String::new(),
    }
}

/// Renders one sheet's rows under its header line. Rows with no content at
/// all are dropped.
fn render_sheet(sheet_name: &str, rows: &[Vec<String>]) -> String {
    let mut content = format!("Sheet: {sheet_name}\n");
    for row in rows {
        if row.iter().all(|s| s.is_empty()) {
            continue;
        }
        content.push_str(&row.join(" | "));
        content.push('\n');
    }
    content
}

fn extract_workbook_text(data: &[u8]) -> Result<String, ExtractError> {
    let cursor = std::io::Cursor::new(data.to_vec());
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;

    let mut text = String::new();
    for sheet_name in workbook.sheet_names().to_vec() {
        if let Ok(range) = workbook.worksheet_range(&sheet_name) {
            let rows: Vec<Vec<String>> = range
                .rows()
                .map(|row| row.iter().map(cell_to_string).collect())
                .collect();
            text.push_str(&render_sheet(&sheet_name, &rows));
            text.push('\n');
        }
    }
    Ok(text)
}

#[async_trait]
impl TextBackend for SpreadsheetBackend {
    fn name(&self) -> &'static str {
        "spreadsheet_reader"
    }

    async fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        extract_workbook_text(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_renders_header_then_pipe_joined_rows() {
        let rows = vec![
            vec!["Item".to_string(), "Qty".to_string()],
            vec!["Widget A".to_string(), "5".to_string()],
        ];
        let rendered = render_sheet("Orders", &rows);
        assert_eq!(rendered, "Sheet: Orders\nItem | Qty\nWidget A | 5\n");
    }

    #[test]
    fn fully_empty_rows_are_dropped() {
        let rows = vec![
            vec!["Item".to_string()],
            vec![String::new(), String::new()],
            vec!["Bolt".to_string()],
        ];
        let rendered = render_sheet("S1", &rows);
        assert_eq!(rendered, "Sheet: S1\nItem\nBolt\n");
    }

    #[test]
    fn numeric_and_bool_cells_render_as_text() {
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        assert!(matches!(
            extract_workbook_text(b"not a workbook"),
            Err(ExtractError::Parse(_))
        ));
    }
}
