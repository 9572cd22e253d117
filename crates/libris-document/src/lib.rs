// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// libris-document: Printable document generation for the Libris print engine.
//
// Builds paper-size aware HTML (stylesheets, listing tables, payment
// receipts), assembles them into print jobs, and encodes flat tables as
// CSV, XLSX, or PDF for download.

pub mod assemble;
pub mod encode;
pub mod html;
pub mod receipt;
pub mod style;
pub mod table;

pub use assemble::DocumentAssembler;
pub use encode::{CsvEncoder, ExportArtifact, FileEncoder, FlatTable, PdfEncoder, XlsxEncoder};
pub use receipt::{ReceiptContext, format_receipt};
pub use style::stylesheet;
pub use table::format_table;
