// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Libris print engine.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Unique identifier for a generated print job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical output medium.
///
/// Parsed leniently from the backend's `"58mm"` / `"80mm"` / `"A4"` strings;
/// anything unrecognised is treated as A4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum PaperSize {
    /// 58 mm thermal receipt roll.
    Thermal58,
    /// 80 mm thermal receipt roll.
    Thermal80,
    /// ISO A4 sheet.
    #[default]
    A4,
}

impl PaperSize {
    /// The fixed option set offered by the preview surface.
    pub const ALL: [PaperSize; 3] = [Self::Thermal58, Self::Thermal80, Self::A4];

    /// Parse a settings value. Unknown values fall back to A4.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "58mm" | "58" => Self::Thermal58,
            "80mm" | "80" => Self::Thermal80,
            "a4" => Self::A4,
            other => {
                tracing::debug!(value = other, "unrecognised paper size, using A4");
                Self::A4
            }
        }
    }

    /// The settings keyword for this size.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thermal58 => "58mm",
            Self::Thermal80 => "80mm",
            Self::A4 => "A4",
        }
    }

    /// Whether this is a thermal roll (monospace, low-ink layout).
    pub fn is_thermal(&self) -> bool {
        matches!(self, Self::Thermal58 | Self::Thermal80)
    }

    /// Physical roll width in millimetres, for thermal media only.
    pub fn roll_width_mm(&self) -> Option<u32> {
        match self {
            Self::Thermal58 => Some(58),
            Self::Thermal80 => Some(80),
            Self::A4 => None,
        }
    }

    /// Page dimensions in millimetres (width, height).
    ///
    /// Rolls have no natural page length; 297 mm segments are used when
    /// paginating fixed-layout output onto them.
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::Thermal58 => (58, 297),
            Self::Thermal80 => (80, 297),
            Self::A4 => (210, 297),
        }
    }
}

impl From<String> for PaperSize {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PaperSize> for &'static str {
    fn from(value: PaperSize) -> Self {
        value.as_str()
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the preview surface hands a document to the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum PrintMode {
    /// Open the system print dialog.
    #[default]
    System,
    /// Print straight to the configured printer through the host capability.
    Silent,
}

impl PrintMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Silent => "silent",
        }
    }
}

impl From<String> for PrintMode {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "silent" => Self::Silent,
            _ => Self::System,
        }
    }
}

impl From<PrintMode> for &'static str {
    fn from(value: PrintMode) -> Self {
        value.as_str()
    }
}

/// Which subset of in-memory records an export acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    /// Every record currently loaded.
    #[default]
    All,
    /// The records visible under the current filters.
    Filtered,
    /// The records the operator ticked.
    Selected,
}

impl ExportScope {
    /// Whether this scope can be offered given the current selection size.
    pub fn available(&self, selection_count: usize) -> bool {
        match self {
            Self::Selected => selection_count > 0,
            Self::All | Self::Filtered => true,
        }
    }
}

/// Requested output of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Pdf,
    /// Hand off to the document assembler and preview surface.
    Print,
}

impl ExportFormat {
    /// File extension for downloadable formats.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Xlsx => Some("xlsx"),
            Self::Csv => Some("csv"),
            Self::Pdf => Some("pdf"),
            Self::Print => None,
        }
    }

    /// MIME type for downloadable formats.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv",
            Self::Pdf => "application/pdf",
            Self::Print => "text/html",
        }
    }
}

/// A generated, printable document.
///
/// Immutable once created: changing the paper size or the source data
/// produces a new job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintJob {
    id: JobId,
    title: String,
    html: String,
    paper_size: PaperSize,
    generated_at: DateTime<Utc>,
}

impl PrintJob {
    pub fn new(
        title: impl Into<String>,
        html: String,
        paper_size: PaperSize,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: JobId::new(),
            title: title.into(),
            html,
            paper_size,
            generated_at,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The document markup handed to the render surface.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn paper_size(&self) -> PaperSize {
        self.paper_size
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// SHA-256 over the paper size and markup, hex encoded.
    ///
    /// Two jobs regenerated from the same inputs share a digest even though
    /// their ids differ.
    pub fn content_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.paper_size.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(self.html.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// A flat row handed to the table formatter.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Custom cell renderer for a column.
pub type CellRenderer = Arc<dyn Fn(&Record) -> String + Send + Sync>;

/// Maps a logical field to a displayed table column.
#[derive(Clone)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    pub render: Option<CellRenderer>,
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            render: None,
        }
    }

    /// Attach a renderer that replaces the plain field lookup.
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }
}

impl From<&str> for ColumnSpec {
    fn from(key: &str) -> Self {
        Self::new(key, key)
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// One charged line on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub amount: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, amount: f64) -> Self {
        Self {
            description: description.into(),
            amount,
        }
    }
}

/// Point-in-time snapshot of a payment, as printed on a receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRecord {
    /// Receipt number.
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub id: String,
    /// Payment date; today when absent.
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub roll_number: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Amount paid; the sum of `items` when absent.
    #[serde(default)]
    pub total: Option<f64>,
    /// Single amount used when `items` is empty.
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub payment_method: String,
}

impl ReceiptRecord {
    /// Build a receipt for settling a fine.
    pub fn for_fine_payment(
        fine: &crate::library::Fine,
        payment_method: impl Into<String>,
        paid_on: Option<NaiveDate>,
    ) -> Self {
        let description = match fine.book_title.as_deref() {
            Some(title) if !title.is_empty() => format!("{} ({title})", fine.reason),
            _ => fine.reason.clone(),
        };
        Self {
            id: fine.id.clone(),
            date: paid_on,
            student_name: fine.student_name.clone(),
            roll_number: fine.roll_number.clone(),
            items: vec![LineItem::new(description, fine.amount)],
            total: Some(fine.amount),
            amount: Some(fine.amount),
            payment_method: payment_method.into(),
        }
    }
}

/// Deserializers that accept the loosely-typed shapes the backend emits.
pub(crate) mod lenient {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_date))
    }

    /// Accepts RFC 3339 timestamps, `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`
    /// and `DD/MM/YYYY`.
    pub fn parse_date(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Some(dt.date());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(d);
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
            return Some(d);
        }
        tracing::warn!(value = raw, "unparseable date, ignoring");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_size_parses_settings_keywords() {
        assert_eq!(PaperSize::parse("58mm"), PaperSize::Thermal58);
        assert_eq!(PaperSize::parse(" 80MM "), PaperSize::Thermal80);
        assert_eq!(PaperSize::parse("A4"), PaperSize::A4);
        assert_eq!(PaperSize::parse("letter"), PaperSize::A4);
        assert_eq!(PaperSize::parse(""), PaperSize::A4);
    }

    #[test]
    fn paper_size_serde_uses_keywords() {
        let json = serde_json::to_string(&PaperSize::Thermal58).unwrap();
        assert_eq!(json, "\"58mm\"");
        let back: PaperSize = serde_json::from_str("\"80mm\"").unwrap();
        assert_eq!(back, PaperSize::Thermal80);
        let unknown: PaperSize = serde_json::from_str("\"B5\"").unwrap();
        assert_eq!(unknown, PaperSize::A4);
    }

    #[test]
    fn only_thermal_sizes_have_roll_width() {
        assert_eq!(PaperSize::Thermal58.roll_width_mm(), Some(58));
        assert_eq!(PaperSize::Thermal80.roll_width_mm(), Some(80));
        assert_eq!(PaperSize::A4.roll_width_mm(), None);
        assert!(!PaperSize::A4.is_thermal());
    }

    #[test]
    fn print_mode_defaults_to_system() {
        let silent: PrintMode = serde_json::from_str("\"silent\"").unwrap();
        assert_eq!(silent, PrintMode::Silent);
        let other: PrintMode = serde_json::from_str("\"kiosk\"").unwrap();
        assert_eq!(other, PrintMode::System);
    }

    #[test]
    fn selected_scope_needs_a_selection() {
        assert!(!ExportScope::Selected.available(0));
        assert!(ExportScope::Selected.available(2));
        assert!(ExportScope::All.available(0));
        assert!(ExportScope::Filtered.available(0));
    }

    #[test]
    fn digest_ignores_job_id() {
        let at = Utc::now();
        let a = PrintJob::new("Books", "<p>x</p>".into(), PaperSize::A4, at);
        let b = PrintJob::new("Books", "<p>x</p>".into(), PaperSize::A4, at);
        let c = PrintJob::new("Books", "<p>x</p>".into(), PaperSize::Thermal80, at);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.content_digest(), b.content_digest());
        assert_ne!(a.content_digest(), c.content_digest());
    }

    #[test]
    fn receipt_record_accepts_backend_shapes() {
        let json = r#"{
            "id": 1042,
            "date": "2024-03-05T10:15:00Z",
            "studentName": "Asha Rao",
            "rollNumber": "CS21-014",
            "items": [{"description": "Late Fee", "amount": 12.5}],
            "total": 12.5,
            "paymentMethod": "Cash"
        }"#;
        let record: ReceiptRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1042");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.amount, None);
    }

    #[test]
    fn lenient_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 1);
        assert_eq!(lenient::parse_date("2024-12-01"), d);
        assert_eq!(lenient::parse_date("01/12/2024"), d);
        assert_eq!(lenient::parse_date("2024-12-01 08:00:00"), d);
        assert_eq!(lenient::parse_date("soon"), None);
    }

    #[test]
    fn fine_payment_receipt_names_the_book() {
        let fine = crate::library::Fine {
            id: "7".into(),
            student_name: "Ravi K".into(),
            roll_number: "ME22-003".into(),
            book_title: Some("Dune".into()),
            amount: 40.0,
            reason: "Late Fee".into(),
            ..Default::default()
        };
        let paid_on = NaiveDate::from_ymd_opt(2024, 6, 1);
        let receipt = ReceiptRecord::for_fine_payment(&fine, "UPI", paid_on);
        assert_eq!(receipt.id, "7");
        assert_eq!(receipt.items, vec![LineItem::new("Late Fee (Dune)", 40.0)]);
        assert_eq!(receipt.total, Some(40.0));
        assert_eq!(receipt.payment_method, "UPI");
    }
}
