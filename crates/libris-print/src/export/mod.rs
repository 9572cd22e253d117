// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export orchestration: scope resolution, flattening, and dispatch to the
// document assembler or a file encoder.
//
// Empty exports are refused before anything is generated. The operator gets
// a blocking notice through the host bridge and the caller gets the error.

pub mod entities;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Local;
use libris_bridge::PlatformBridge;
use libris_core::error::{LibrisError, Result};
use libris_core::human_errors::humanize_error;
use libris_core::{Clock, ExportFormat, ExportScope, PrintJob, SystemClock};
use libris_document::encode::file_name;
use libris_document::{
    CsvEncoder, DocumentAssembler, ExportArtifact, FileEncoder, FlatTable, PdfEncoder, XlsxEncoder,
};
use tracing::{debug, info, instrument, warn};

/// One exported column: a header and how to read it from a record.
pub struct FieldSpec<T> {
    pub label: &'static str,
    pub value: fn(&T) -> String,
}

impl<T> FieldSpec<T> {
    pub const fn new(label: &'static str, value: fn(&T) -> String) -> Self {
        Self { label, value }
    }
}

impl<T> Clone for FieldSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSpec<T> {}

impl<T> std::fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec").field("label", &self.label).finish_non_exhaustive()
    }
}

/// A record type that can be exported.
pub trait Exportable {
    /// Document title, also used for the file name.
    const TITLE: &'static str;

    /// Identifier matched against the operator's selection.
    fn export_id(&self) -> String;

    /// Exported columns, in order.
    fn fields() -> Vec<FieldSpec<Self>>
    where
        Self: Sized;
}

/// The in-memory data an export can draw from.
#[derive(Debug)]
pub struct ExportView<'a, T> {
    /// Every loaded record.
    pub all: &'a [T],
    /// The records visible under the current filters.
    pub filtered: &'a [T],
    /// Export ids of the ticked records.
    pub selection: &'a HashSet<String>,
}

impl<'a, T: Exportable> ExportView<'a, T> {
    pub fn new(all: &'a [T], filtered: &'a [T], selection: &'a HashSet<String>) -> Self {
        Self {
            all,
            filtered,
            selection,
        }
    }

    /// Records for `scope`, or an error when there is nothing to export.
    pub fn resolve(&self, scope: ExportScope) -> Result<Vec<&'a T>> {
        let rows: Vec<&'a T> = match scope {
            ExportScope::All => self.all.iter().collect(),
            ExportScope::Filtered => self.filtered.iter().collect(),
            ExportScope::Selected => {
                if self.selection.is_empty() {
                    return Err(LibrisError::EmptySelection);
                }
                self.all
                    .iter()
                    .filter(|row| self.selection.contains(&row.export_id()))
                    .collect()
            }
        };
        if rows.is_empty() {
            return Err(LibrisError::EmptyExport(T::TITLE.to_string()));
        }
        Ok(rows)
    }
}

/// What the operator asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRequest {
    pub scope: ExportScope,
    pub format: ExportFormat,
}

impl ExportRequest {
    pub fn new(scope: ExportScope, format: ExportFormat) -> Self {
        Self { scope, format }
    }
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    /// A document for the preview surface.
    Print(PrintJob),
    /// A downloadable file.
    File(ExportArtifact),
}

/// Flatten records into display strings using their field list.
pub fn flatten<T: Exportable>(rows: &[&T]) -> FlatTable {
    let fields = T::fields();
    let mut table = FlatTable::new(
        T::TITLE,
        fields.iter().map(|f| f.label.to_string()).collect(),
    );
    for row in rows {
        table.push_row(fields.iter().map(|f| (f.value)(row)).collect());
    }
    table
}

/// Runs exports for every entity screen.
pub struct ExportOrchestrator {
    assembler: DocumentAssembler,
    bridge: Arc<dyn PlatformBridge>,
    encoders: Vec<Box<dyn FileEncoder>>,
    clock: Arc<dyn Clock>,
}

impl ExportOrchestrator {
    /// An orchestrator with the XLSX, CSV and PDF encoders. PDFs are laid out
    /// on the configured listing paper size.
    pub fn new(assembler: DocumentAssembler, bridge: Arc<dyn PlatformBridge>) -> Self {
        let paper = assembler.settings().listing_paper_size();
        Self {
            assembler,
            bridge,
            encoders: vec![
                Box::new(XlsxEncoder),
                Box::new(CsvEncoder),
                Box::new(PdfEncoder::new(paper)),
            ],
            clock: Arc::new(SystemClock),
        }
    }

    /// Register `encoder`, replacing any encoder for the same format.
    pub fn with_encoder(mut self, encoder: Box<dyn FileEncoder>) -> Self {
        let format = encoder.format();
        self.encoders.retain(|e| e.format() != format);
        self.encoders.push(encoder);
        self
    }

    /// Replace the clock used to date file names.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn assembler(&self) -> &DocumentAssembler {
        &self.assembler
    }

    /// Export `view` as requested.
    #[instrument(
        skip(self, view),
        fields(entity = T::TITLE, scope = ?request.scope, format = ?request.format)
    )]
    pub fn export<T: Exportable>(
        &self,
        view: &ExportView<'_, T>,
        request: ExportRequest,
    ) -> Result<ExportOutcome> {
        let result = view
            .resolve(request.scope)
            .and_then(|rows| self.render(&rows, request.format));
        if let Err(e) = &result {
            warn!(error = %e, "export refused");
            self.bridge.alert(&humanize_error(e));
        }
        result
    }

    fn render<T: Exportable>(&self, rows: &[&T], format: ExportFormat) -> Result<ExportOutcome> {
        let table = flatten(rows);
        debug!(rows = table.len(), columns = table.headers.len(), "rows flattened");

        if format == ExportFormat::Print {
            let job = self
                .assembler
                .assemble(&table.title, &table.records(), &table.columns());
            info!(job = %job.id(), "export handed to print preview");
            return Ok(ExportOutcome::Print(job));
        }

        let encoder = self
            .encoders
            .iter()
            .find(|e| e.format() == format)
            .ok_or_else(|| LibrisError::Bridge(format!("no encoder registered for {format:?}")))?;
        let bytes = encoder.encode(&table)?;
        let extension = format.extension().unwrap_or("bin");
        let today = self.clock.now().with_timezone(&Local).date_naive();
        let artifact = ExportArtifact {
            file_name: file_name(&table.title, extension, today),
            mime_type: format.mime_type(),
            bytes,
        };
        info!(file = %artifact.file_name, bytes = artifact.bytes.len(), "export encoded");
        Ok(ExportOutcome::File(artifact))
    }
}

impl std::fmt::Debug for ExportOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportOrchestrator")
            .field("assembler", &self.assembler)
            .field(
                "formats",
                &self.encoders.iter().map(|e| e.format()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{DateTime, TimeZone, Utc};
    use libris_bridge::HeadlessBridge;
    use libris_core::library::Book;
    use libris_core::{AppSettings, FixedClock};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    struct CountingEncoder {
        format: ExportFormat,
        calls: Arc<AtomicUsize>,
    }

    impl FileEncoder for CountingEncoder {
        fn format(&self) -> ExportFormat {
            self.format
        }

        fn encode(&self, table: &FlatTable) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(table.title.as_bytes().to_vec())
        }
    }

    /// Counts assembler invocations through its clock reads.
    struct CountingClock(Arc<AtomicUsize>);

    impl Clock for CountingClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.fetch_add(1, Ordering::SeqCst);
            at()
        }
    }

    fn book(id: &str, title: &str) -> Book {
        Book {
            id: id.into(),
            title: title.into(),
            total_copies: 2,
            available_copies: 1,
            ..Book::default()
        }
    }

    struct Harness {
        bridge: HeadlessBridge,
        orchestrator: ExportOrchestrator,
        assembled: Arc<AtomicUsize>,
        encoded: Arc<AtomicUsize>,
    }

    fn harness() -> Harness {
        let bridge = HeadlessBridge::new();
        let assembled = Arc::new(AtomicUsize::new(0));
        let encoded = Arc::new(AtomicUsize::new(0));
        let assembler = DocumentAssembler::new(AppSettings::default(), "Central Library")
            .with_clock(Arc::new(CountingClock(Arc::clone(&assembled))));
        let mut orchestrator = ExportOrchestrator::new(assembler, Arc::new(bridge.clone()))
            .with_clock(Arc::new(FixedClock(at())));
        for format in [ExportFormat::Xlsx, ExportFormat::Csv, ExportFormat::Pdf] {
            orchestrator = orchestrator.with_encoder(Box::new(CountingEncoder {
                format,
                calls: Arc::clone(&encoded),
            }));
        }
        Harness {
            bridge,
            orchestrator,
            assembled,
            encoded,
        }
    }

    #[test]
    fn empty_selection_is_refused_before_generation() {
        let h = harness();
        let books = vec![book("1", "Dune"), book("2", "Emma")];
        let selection = HashSet::new();
        let view = ExportView::new(&books, &books, &selection);

        let formats = [
            ExportFormat::Print,
            ExportFormat::Xlsx,
            ExportFormat::Csv,
            ExportFormat::Pdf,
        ];
        for format in formats {
            let result = h
                .orchestrator
                .export(&view, ExportRequest::new(ExportScope::Selected, format));
            assert!(matches!(result, Err(LibrisError::EmptySelection)));
        }
        assert_eq!(h.assembled.load(Ordering::SeqCst), 0);
        assert_eq!(h.encoded.load(Ordering::SeqCst), 0);
        let alerts = h.bridge.alerts();
        assert_eq!(alerts.len(), 4);
        assert!(alerts.iter().all(|a| a.blocking));
    }

    #[test]
    fn empty_filtered_view_is_refused() {
        let h = harness();
        let books = vec![book("1", "Dune")];
        let selection = HashSet::new();
        let view = ExportView::new(&books, &[], &selection);
        let result = h
            .orchestrator
            .export(&view, ExportRequest::new(ExportScope::Filtered, ExportFormat::Csv));
        assert!(matches!(result, Err(LibrisError::EmptyExport(_))));
        assert_eq!(h.encoded.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stale_selection_is_refused() {
        let h = harness();
        let books = vec![book("1", "Dune")];
        let selection: HashSet<String> = ["99".to_string()].into();
        let view = ExportView::new(&books, &books, &selection);
        let result = h
            .orchestrator
            .export(&view, ExportRequest::new(ExportScope::Selected, ExportFormat::Print));
        assert!(matches!(result, Err(LibrisError::EmptyExport(_))));
        assert_eq!(h.assembled.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn scopes_resolve_to_the_expected_rows() {
        let books = vec![book("1", "Dune"), book("2", "Emma"), book("3", "Ulysses")];
        let filtered = vec![book("2", "Emma")];
        let selection: HashSet<String> = ["1".to_string(), "3".to_string()].into();
        let view = ExportView::new(&books, &filtered, &selection);

        assert_eq!(view.resolve(ExportScope::All).unwrap().len(), 3);
        let f = view.resolve(ExportScope::Filtered).unwrap();
        assert_eq!(f[0].title, "Emma");
        let s: Vec<_> = view
            .resolve(ExportScope::Selected)
            .unwrap()
            .iter()
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(s, vec!["Dune", "Ulysses"]);
    }

    #[test]
    fn file_exports_are_named_and_typed() {
        let h = harness();
        let books = vec![book("1", "Dune")];
        let selection = HashSet::new();
        let view = ExportView::new(&books, &books, &selection);
        let outcome = h
            .orchestrator
            .export(&view, ExportRequest::new(ExportScope::All, ExportFormat::Csv))
            .unwrap();
        let ExportOutcome::File(artifact) = outcome else {
            panic!("expected a file");
        };
        assert_eq!(artifact.file_name, "books_report_2024-06-01.csv");
        assert_eq!(artifact.mime_type, "text/csv");
        assert_eq!(h.encoded.load(Ordering::SeqCst), 1);
        assert!(h.bridge.alerts().is_empty());
    }

    #[test]
    fn print_export_assembles_a_listing() {
        let h = harness();
        let books = vec![book("1", "Dune"), book("2", "Emma")];
        let selection: HashSet<String> = ["2".to_string()].into();
        let view = ExportView::new(&books, &books, &selection);
        let outcome = h
            .orchestrator
            .export(&view, ExportRequest::new(ExportScope::Selected, ExportFormat::Print))
            .unwrap();
        let ExportOutcome::Print(job) = outcome else {
            panic!("expected a print job");
        };
        assert!(job.html().contains("Emma"));
        assert!(!job.html().contains("Dune"));
        assert!(job.html().contains("Total records: 1"));
        assert_eq!(h.encoded.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn flatten_follows_the_field_list() {
        let books = vec![book("1", "Dune")];
        let refs: Vec<&Book> = books.iter().collect();
        let table = flatten(&refs);
        assert_eq!(table.title, Book::TITLE);
        assert_eq!(table.headers.len(), Book::fields().len());
        assert_eq!(table.rows[0][0], "Dune");
    }
}
