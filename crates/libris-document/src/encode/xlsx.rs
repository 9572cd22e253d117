// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// XLSX workbooks via `rust_xlsxwriter`: one worksheet named after the
// listing, bold header row, columns sized to their content.

use libris_core::ExportFormat;
use libris_core::error::{LibrisError, Result};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::{debug, instrument};

use super::{FileEncoder, FlatTable};

/// Excel's worksheet name limit.
const MAX_SHEET_NAME: usize = 31;

/// Upper bound for auto-sized column widths, in characters.
const MAX_COLUMN_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxEncoder;

impl FileEncoder for XlsxEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    #[instrument(skip(self, table), fields(title = %table.title, rows = table.len()))]
    fn encode(&self, table: &FlatTable) -> Result<Vec<u8>> {
        let bytes = build_workbook(table).map_err(|e| LibrisError::XlsxEncoding(e.to_string()))?;
        debug!(bytes = bytes.len(), "workbook encoded");
        Ok(bytes)
    }
}

fn build_workbook(table: &FlatTable) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name(&table.title))?;

    for (col, title) in table.headers.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, title.as_str(), &header)?;

        let widest = table
            .rows
            .iter()
            .filter_map(|row| row.get(col as usize))
            .map(|cell| cell.chars().count())
            .chain(std::iter::once(title.chars().count()))
            .max()
            .unwrap_or(8)
            .min(MAX_COLUMN_WIDTH);
        sheet.set_column_width(col, (widest + 2) as f64)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            if !cell.is_empty() {
                sheet.write_string(row_num, col as u16, cell.as_str())?;
            }
        }
    }

    workbook.save_to_buffer()
}

/// A valid worksheet name: no `[]:*?/\`, at most 31 characters, not empty.
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => ' ',
            other => other,
        })
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}
