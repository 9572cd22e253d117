// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Libris Print: settings providers, the paper-size aware preview surface,
// and the per-entity export orchestrators. This crate ties the documents
// built by `libris-document` to the host capabilities in `libris-bridge`.

pub mod export;
pub mod preview;
pub mod settings;

pub use export::{
    ExportOrchestrator, ExportOutcome, ExportRequest, ExportView, Exportable, FieldSpec,
};
pub use preview::{PreviewState, PreviewSurface, Regenerate};
pub use settings::{HttpSettings, SettingsProvider, StaticSettings};
