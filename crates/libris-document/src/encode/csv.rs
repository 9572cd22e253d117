// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// RFC 4180 CSV with a UTF-8 byte-order mark so spreadsheet applications pick
// the right encoding for names and the rupee sign.

use libris_core::ExportFormat;
use libris_core::error::Result;
use tracing::{debug, instrument};

use super::{FileEncoder, FlatTable};

const BOM: &str = "\u{feff}";

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvEncoder;

impl FileEncoder for CsvEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    #[instrument(skip(self, table), fields(title = %table.title, rows = table.len()))]
    fn encode(&self, table: &FlatTable) -> Result<Vec<u8>> {
        let mut out = String::from(BOM);
        push_record(&mut out, &table.headers);
        for row in &table.rows {
            push_record(&mut out, row);
        }
        debug!(bytes = out.len(), "CSV encoded");
        Ok(out.into_bytes())
    }
}

fn push_record(out: &mut String, cells: &[String]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, cell);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_only_when_needed() {
        let mut table = FlatTable::new("Fines", vec!["Student".into(), "Remarks".into()]);
        table.push_row(vec!["Asha".into(), "paid, partly".into()]);
        table.push_row(vec!["Ravi".into(), "said \"later\"\nsigned".into()]);
        let bytes = CsvEncoder.encode(&table).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let text = text.strip_prefix(BOM).unwrap();
        assert_eq!(
            text,
            "Student,Remarks\r\nAsha,\"paid, partly\"\r\nRavi,\"said \"\"later\"\"\nsigned\"\r\n"
        );
    }

    #[test]
    fn header_only_table_is_still_valid() {
        let table = FlatTable::new("Empty", vec!["A".into()]);
        let text = String::from_utf8(CsvEncoder.encode(&table).unwrap()).unwrap();
        assert_eq!(text, format!("{BOM}A\r\n"));
    }
}
