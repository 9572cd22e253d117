// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Libris.

use thiserror::Error;

/// Top-level error type for all Libris operations.
#[derive(Debug, Error)]
pub enum LibrisError {
    // -- Settings --
    #[error("settings unavailable: {0}")]
    SettingsUnavailable(String),

    // -- Preview / print --
    #[error("could not create print preview surface: {0}")]
    SurfaceUnavailable(String),

    #[error("print preview is not open")]
    PreviewClosed,

    #[error("system print dialog failed: {0}")]
    PrintDialog(String),

    #[error("silent print failed: {0}")]
    SilentPrint(String),

    #[error("document regeneration failed: {0}")]
    Regeneration(String),

    // -- Export --
    #[error("no records selected for export")]
    EmptySelection,

    #[error("nothing to export: {0} has no records")]
    EmptyExport(String),

    // -- Encoding --
    #[error("PDF encoding failed: {0}")]
    PdfEncoding(String),

    #[error("spreadsheet encoding failed: {0}")]
    XlsxEncoding(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LibrisError>;
