//! DOCX (Microsoft Word) text extraction using docx-lite.
//!
//! Body paragraphs come first, in document order, then every table row. Table
//! rows are flattened to `cell | cell | cell` so that lease terms laid out as
//! tables survive as readable lines.

use crate::core::io::read_file_sync;
use crate::{AgreewiseError, Result};
use docx_lite::{Paragraph, Table};
use std::io::Cursor;
use std::path::Path;

/// Separator placed between the cells of a flattened table row.
pub const CELL_SEPARATOR: &str = " | ";

/// Extract ordered text blocks from a DOCX file, joined with a blank line.
///
/// # Errors
///
/// Returns `AgreewiseError::Io` if the file can't be read and
/// `AgreewiseError::Parsing` if it is not a valid DOCX document.
pub fn extract_docx(path: impl AsRef<Path>) -> Result<String> {
    extract_docx_bytes(&read_file_sync(path)?)
}

/// Same as [`extract_docx`] for in-memory content.
pub fn extract_docx_bytes(bytes: &[u8]) -> Result<String> {
    let doc = docx_lite::parse_document(Cursor::new(bytes))
        .map_err(|e| AgreewiseError::parsing(format!("DOCX parsing failed: {}", e)))?;

    let blocks = collect_blocks(&doc.paragraphs, &doc.tables);
    tracing::debug!(
        "DOCX produced {} blocks ({} paragraphs, {} tables)",
        blocks.len(),
        doc.paragraphs.len(),
        doc.tables.len()
    );

    Ok(blocks.join("\n\n"))
}

/// Non-blank paragraphs verbatim, followed by one block per non-empty table row.
pub fn collect_blocks(paragraphs: &[Paragraph], tables: &[Table]) -> Vec<String> {
    let mut blocks: Vec<String> = paragraphs
        .iter()
        .map(|para| para.to_text())
        .filter(|text| !text.trim().is_empty())
        .collect();

    for table in tables {
        for row in &table.rows {
            let cells: Vec<String> = row
                .cells
                .iter()
                .map(|cell| {
                    cell.paragraphs
                        .iter()
                        .map(|para| para.to_text())
                        .collect::<Vec<_>>()
                        .join("\n")
                        .trim()
                        .to_string()
                })
                .filter(|text| !text.is_empty())
                .collect();

            if !cells.is_empty() {
                blocks.push(cells.join(CELL_SEPARATOR));
            }
        }
    }

    blocks
}
