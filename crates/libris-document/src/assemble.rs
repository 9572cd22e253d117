// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembly: wraps formatted content and its stylesheet into a
// print job tagged with the paper size it was laid out for.
//
// Listings become complete HTML documents; receipts stay fragments because
// they are usually hosted inside another preview chrome. Assembly is pure:
// the only outside input is the injected clock.

use std::sync::Arc;

use chrono::Local;
use libris_core::{
    AppSettings, Clock, ColumnSpec, PaperSize, PrintJob, ReceiptRecord, Record, SystemClock,
};
use tracing::{debug, instrument};

use crate::html::escape;
use crate::receipt::{ReceiptContext, format_receipt};
use crate::style::stylesheet;
use crate::table::format_table;

/// Organization name used when neither settings nor config provide one.
pub const DEFAULT_ORGANIZATION: &str = "Library";

/// Builds print jobs from listings and receipts.
#[derive(Clone)]
pub struct DocumentAssembler {
    settings: AppSettings,
    organization: String,
    clock: Arc<dyn Clock>,
}

impl DocumentAssembler {
    /// Create an assembler reading paper sizes from `settings`.
    ///
    /// The organization printed in headers is the backend's institution name,
    /// or `fallback_organization` when the backend has none.
    pub fn new(settings: AppSettings, fallback_organization: impl Into<String>) -> Self {
        let fallback = fallback_organization.into();
        let organization = settings
            .info
            .name
            .clone()
            .or_else(|| (!fallback.trim().is_empty()).then_some(fallback))
            .unwrap_or_else(|| DEFAULT_ORGANIZATION.to_string());
        Self {
            settings,
            organization,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Assemble a listing on the configured paper size (A4 when unset).
    pub fn assemble(&self, title: &str, rows: &[Record], columns: &[ColumnSpec]) -> PrintJob {
        self.assemble_on(title, rows, columns, self.settings.listing_paper_size())
    }

    /// Assemble a listing on an explicit paper size.
    #[instrument(skip(self, rows, columns), fields(rows = rows.len(), paper = %paper))]
    pub fn assemble_on(
        &self,
        title: &str,
        rows: &[Record],
        columns: &[ColumnSpec],
        paper: PaperSize,
    ) -> PrintJob {
        let generated_at = self.clock.now();
        let stamp = generated_at
            .with_timezone(&Local)
            .format("%d/%m/%Y %H:%M")
            .to_string();
        let title_text = escape(title);
        let org = escape(&self.organization);

        let mut html = String::with_capacity(4096);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{title_text}</title>\n<style>\n"));
        html.push_str(&stylesheet(paper));
        html.push_str("</style>\n</head>\n<body>\n");
        html.push_str(&format!(
            "<div class=\"header\">\n<h1>{org}</h1>\n\
             <p class=\"meta\"><strong>{title_text}</strong></p>\n\
             <p class=\"meta\">Generated on: {stamp}</p>\n\
             <p class=\"meta\">Total records: {}</p>\n</div>\n",
            rows.len()
        ));
        html.push_str(&format_table(rows, columns));
        html.push_str(&format!(
            "\n<div class=\"footer\">{org} &middot; {title_text}</div>\n</body>\n</html>\n"
        ));

        debug!(bytes = html.len(), "listing assembled");
        PrintJob::new(title, html, paper, generated_at)
    }

    /// Assemble a receipt on the configured paper size (80 mm when unset).
    pub fn assemble_receipt(&self, record: &ReceiptRecord) -> PrintJob {
        self.assemble_receipt_on(record, self.settings.receipt_paper_size())
    }

    /// Assemble a receipt on an explicit paper size.
    #[instrument(skip(self, record), fields(receipt = %record.id, paper = %paper))]
    pub fn assemble_receipt_on(&self, record: &ReceiptRecord, paper: PaperSize) -> PrintJob {
        let generated_at = self.clock.now();
        let ctx = ReceiptContext {
            organization: self.organization.clone(),
            today: generated_at.with_timezone(&Local).date_naive(),
        };
        let html = format_receipt(record, paper, &ctx);
        debug!(bytes = html.len(), "receipt assembled");
        PrintJob::new(format!("Receipt {}", record.id), html, paper, generated_at)
    }
}

impl std::fmt::Debug for DocumentAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentAssembler")
            .field("settings", &self.settings)
            .field("organization", &self.organization)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use libris_core::{FixedClock, LineItem};
    use serde_json::json;

    fn assembler(settings: AppSettings) -> DocumentAssembler {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        DocumentAssembler::new(settings, "Central Library").with_clock(Arc::new(FixedClock(at)))
    }

    fn books() -> Vec<Record> {
        [
            json!({"title": "Dune", "isbn": "9780441013593"}),
            json!({"title": "Emma"}),
            json!({"title": "Ulysses", "isbn": "9780394743127"}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect()
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![ColumnSpec::new("title", "Title"), ColumnSpec::new("isbn", "ISBN")]
    }

    #[test]
    fn listing_defaults_to_a4_full_document() {
        let job = assembler(AppSettings::default()).assemble("Books", &books(), &columns());
        assert_eq!(job.paper_size(), PaperSize::A4);
        let html = job.html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Books</title>"));
        assert!(html.contains("<tr><th>Title</th><th>ISBN</th></tr>"));
        assert_eq!(html.matches("<tr><td>").count(), 3);
        assert!(html.contains("<tr><td>Emma</td><td>-</td></tr>"));
        assert!(html.contains("<tr><td>Dune</td><td>9780441013593</td></tr>"));
        assert!(html.contains("Total records: 3"));
    }

    #[test]
    fn receipt_defaults_to_80mm_fragment() {
        let record = ReceiptRecord {
            id: "9".into(),
            items: vec![LineItem::new("Late Fee", 12.5)],
            total: Some(12.5),
            payment_method: "Cash".into(),
            ..Default::default()
        };
        let job = assembler(AppSettings::default()).assemble_receipt(&record);
        assert_eq!(job.paper_size(), PaperSize::Thermal80);
        assert!(!job.html().contains("<!DOCTYPE"));
        assert!(job.html().starts_with("<style>"));
        assert_eq!(job.title(), "Receipt 9");
    }

    #[test]
    fn configured_paper_size_wins() {
        let settings =
            AppSettings::from_json(r#"{"app_hardware": {"paperSize": "58mm"}}"#).unwrap();
        let job = assembler(settings).assemble("Books", &books(), &columns());
        assert_eq!(job.paper_size(), PaperSize::Thermal58);
        assert!(job.html().contains("width: 58mm"));
    }

    #[test]
    fn assembly_is_deterministic_under_a_fixed_clock() {
        let asm = assembler(AppSettings::default());
        let a = asm.assemble("Books", &books(), &columns());
        let b = asm.assemble("Books", &books(), &columns());
        assert_eq!(a.html(), b.html());
        assert_eq!(a.content_digest(), b.content_digest());
        assert_eq!(a.generated_at(), b.generated_at());
    }

    #[test]
    fn institution_name_from_settings_beats_fallback() {
        let settings = AppSettings::from_json(r#"{"app_info": {"name": "Annex"}}"#).unwrap();
        assert_eq!(assembler(settings).organization(), "Annex");
        assert_eq!(assembler(AppSettings::default()).organization(), "Central Library");
        let blank = DocumentAssembler::new(AppSettings::default(), " ");
        assert_eq!(blank.organization(), DEFAULT_ORGANIZATION);
    }

    #[test]
    fn empty_listing_has_placeholder_not_table() {
        let job = assembler(AppSettings::default()).assemble("Books", &[], &columns());
        assert!(job.html().contains("No Data Available"));
        assert!(!job.html().contains("<table"));
    }
}
