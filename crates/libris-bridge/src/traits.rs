// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for host capabilities.

use libris_core::error::Result;
use libris_core::human_errors::OperatorNotice;

/// Everything the print engine needs from its host.
pub trait PlatformBridge: SurfaceHost + OperatorAlert + Send + Sync {
    /// Human-readable platform name (e.g. "Electron 29", "Headless").
    fn platform_name(&self) -> &str;

    /// The silent-print capability, when the host offers one.
    fn silent_printer(&self) -> Option<&dyn SilentPrint>;
}

/// Creates isolated rendering contexts.
///
/// A surface must not share styles with the host page in either direction:
/// an inert sandboxed frame, a separate window or an off-screen renderer all
/// qualify.
pub trait SurfaceHost {
    /// Create a new, empty surface. Fails when the host refuses (for example
    /// a blocked pop-up window).
    fn create_surface(&self, title: &str) -> Result<Box<dyn RenderSurface>>;
}

/// One isolated document context.
pub trait RenderSurface: Send {
    /// Replace the surface's document with `html`.
    fn load(&mut self, html: &str) -> Result<()>;

    /// Focus the surface and open its native print dialog.
    ///
    /// Fire-and-forget: `Ok(())` means the dialog was requested, not that
    /// anything was printed.
    fn print(&mut self) -> Result<()>;

    /// Tear the surface down. Further calls are no-ops.
    fn close(&mut self);
}

/// Print without a dialog, straight to a named printer.
pub trait SilentPrint {
    /// Send `html` to `printer`, or to the host default when `None`.
    fn print_html(&self, html: &str, printer: Option<&str>) -> Result<()>;
}

/// Blocking operator notifications.
pub trait OperatorAlert {
    /// Show `notice` and return once the operator has acknowledged it.
    fn alert(&self, notice: &OperatorNotice);
}
