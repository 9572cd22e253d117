// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-language notices for library staff at the circulation desk.
//
// Each error the print engine surfaces is mapped to a short message and a
// concrete suggestion. The severity decides whether the UI blocks with an
// alert or just shows a toast.

use crate::error::LibrisError;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational; the operation fell back and carried on.
    Info,
    /// The operator must do something before trying again.
    ActionRequired,
    /// Nothing the operator can do from this screen.
    Permanent,
}

/// A notice shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorNotice {
    /// Short summary (shown as the alert heading).
    pub message: String,
    /// What to try next.
    pub suggestion: String,
    /// Whether the UI must block until acknowledged.
    pub blocking: bool,
    pub severity: Severity,
}

impl OperatorNotice {
    /// Message and suggestion joined for single-line alert boxes.
    pub fn alert_text(&self) -> String {
        if self.suggestion.is_empty() {
            self.message.clone()
        } else {
            format!("{} {}", self.message, self.suggestion)
        }
    }
}

/// Convert a `LibrisError` into an `OperatorNotice`.
pub fn humanize_error(err: &LibrisError) -> OperatorNotice {
    match err {
        LibrisError::SettingsUnavailable(_) => OperatorNotice {
            message: "Printer settings could not be loaded.".into(),
            suggestion: "Default paper sizes will be used for now.".into(),
            blocking: false,
            severity: Severity::Info,
        },

        LibrisError::SurfaceUnavailable(_) => OperatorNotice {
            message: "The print preview could not be opened.".into(),
            suggestion: "Allow pop-ups for this site, then try printing again.".into(),
            blocking: true,
            severity: Severity::ActionRequired,
        },

        LibrisError::PreviewClosed => OperatorNotice {
            message: "The print preview is closed.".into(),
            suggestion: "Open the preview again before printing.".into(),
            blocking: false,
            severity: Severity::ActionRequired,
        },

        LibrisError::PrintDialog(_) => OperatorNotice {
            message: "The print dialog could not be shown.".into(),
            suggestion: "Check that a printer is installed, then try again.".into(),
            blocking: true,
            severity: Severity::ActionRequired,
        },

        LibrisError::SilentPrint(_) => OperatorNotice {
            message: "Direct printing did not work.".into(),
            suggestion: "The normal print dialog was opened instead.".into(),
            blocking: false,
            severity: Severity::Info,
        },

        LibrisError::Regeneration(_) => OperatorNotice {
            message: "The document could not be rebuilt for that paper size.".into(),
            suggestion: "Close the preview and try again.".into(),
            blocking: true,
            severity: Severity::Permanent,
        },

        LibrisError::EmptySelection => OperatorNotice {
            message: "No records are selected.".into(),
            suggestion: "Tick at least one row, or choose All or Filtered.".into(),
            blocking: true,
            severity: Severity::ActionRequired,
        },

        LibrisError::EmptyExport(what) => OperatorNotice {
            message: format!("There is nothing to export in {what}."),
            suggestion: "Change the filters or the scope and try again.".into(),
            blocking: true,
            severity: Severity::ActionRequired,
        },

        LibrisError::PdfEncoding(_) | LibrisError::XlsxEncoding(_) => OperatorNotice {
            message: "The export file could not be created.".into(),
            suggestion: "Try a different format, such as CSV.".into(),
            blocking: true,
            severity: Severity::Permanent,
        },

        LibrisError::Io(io_err) if io_err.kind() == std::io::ErrorKind::PermissionDenied => {
            OperatorNotice {
                message: "The file could not be saved.".into(),
                suggestion: "Choose a folder you are allowed to write to.".into(),
                blocking: true,
                severity: Severity::ActionRequired,
            }
        }

        LibrisError::Io(_) => OperatorNotice {
            message: "There was a problem reading or writing a file.".into(),
            suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
            blocking: true,
            severity: Severity::Permanent,
        },

        LibrisError::Serialization(_) => OperatorNotice {
            message: "The server sent data that could not be read.".into(),
            suggestion: "Reload the page. If this keeps happening, please report it.".into(),
            blocking: true,
            severity: Severity::Permanent,
        },

        LibrisError::Bridge(_) => OperatorNotice {
            message: "The printing service on this computer had a problem.".into(),
            suggestion: "Restart the application and try again.".into(),
            blocking: true,
            severity: Severity::Permanent,
        },

        LibrisError::PlatformUnavailable => OperatorNotice {
            message: "Printing is not available here.".into(),
            suggestion: "Use a computer with a printer attached, or export to PDF.".into(),
            blocking: true,
            severity: Severity::Permanent,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_blocked_is_blocking() {
        let notice = humanize_error(&LibrisError::SurfaceUnavailable("popup blocked".into()));
        assert!(notice.blocking);
        assert_eq!(notice.severity, Severity::ActionRequired);
        assert!(notice.alert_text().contains("pop-ups"));
    }

    #[test]
    fn silent_print_failure_is_not_blocking() {
        let notice = humanize_error(&LibrisError::SilentPrint("spooler offline".into()));
        assert!(!notice.blocking);
        assert_eq!(notice.severity, Severity::Info);
    }

    #[test]
    fn settings_failure_is_informational() {
        let notice = humanize_error(&LibrisError::SettingsUnavailable("timeout".into()));
        assert!(!notice.blocking);
    }

    #[test]
    fn empty_export_names_the_listing() {
        let notice = humanize_error(&LibrisError::EmptyExport("Fines Report".into()));
        assert!(notice.blocking);
        assert!(notice.message.contains("Fines Report"));
    }
}
