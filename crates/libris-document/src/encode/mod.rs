// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File encoders for exports: flat tables in, downloadable files out.

pub mod csv;
pub mod pdf;
pub mod xlsx;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use libris_core::error::Result;
use libris_core::{ColumnSpec, ExportFormat, Record};
use serde_json::Value;
use tracing::info;

pub use self::csv::CsvEncoder;
pub use self::pdf::PdfEncoder;
pub use self::xlsx::XlsxEncoder;

/// A titled grid of display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl FlatTable {
    pub fn new(title: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded, long rows truncated, so every
    /// row has one cell per header.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column specs keyed by header, for the HTML table formatter.
    pub fn columns(&self) -> Vec<ColumnSpec> {
        self.headers
            .iter()
            .map(|h| ColumnSpec::new(h.clone(), h.clone()))
            .collect()
    }

    /// Rows as records keyed by header, for the HTML table formatter.
    pub fn records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .zip(row)
                    .map(|(h, cell)| (h.clone(), Value::String(cell.clone())))
                    .collect()
            })
            .collect()
    }
}

/// A downloadable export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its file name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "export written");
        Ok(path)
    }
}

/// Encodes a flat table into one downloadable format.
pub trait FileEncoder: Send + Sync {
    fn format(&self) -> ExportFormat;

    fn encode(&self, table: &FlatTable) -> Result<Vec<u8>>;
}

/// `<slug>_<YYYY-MM-DD>.<ext>`, e.g. `fines_report_2024-06-01.csv`.
pub fn file_name(title: &str, extension: &str, on: NaiveDate) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('_') && !slug.is_empty() {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    let slug = if slug.is_empty() { "export" } else { slug };
    format!("{slug}_{}.{extension}", on.format("%Y-%m-%d"))
}
