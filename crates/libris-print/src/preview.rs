// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview surface: shows a print job in an isolated render surface, lets
// the operator switch paper size, and prints.
//
//   Closed ──open──▶ Loaded ──print──▶ Printing
//     ▲                ▲                  │
//     │                └─select_paper_size┘
//     └──────────────── close ◀───────────┘
//
// Switching paper size regenerates the document through a caller-supplied
// callback, so the preview never reaches into assembler internals.

use std::sync::Arc;

use libris_bridge::{PlatformBridge, RenderSurface};
use libris_core::error::{LibrisError, Result};
use libris_core::human_errors::humanize_error;
use libris_core::{
    ColumnSpec, HardwareSettings, PaperSize, PrintJob, PrintMode, ReceiptRecord, Record,
};
use libris_document::DocumentAssembler;
use tracing::{debug, info, instrument, warn};

/// Rebuilds the previewed document for a paper size.
pub type Regenerate = Box<dyn FnMut(PaperSize) -> Result<PrintJob> + Send>;

/// Where the preview is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    Closed,
    /// A job is loaded into the surface.
    Loaded,
    /// Printing was requested for the loaded job.
    Printing,
}

/// One preview window and its render surface.
pub struct PreviewSurface {
    bridge: Arc<dyn PlatformBridge>,
    hardware: HardwareSettings,
    regenerate: Regenerate,
    surface: Option<Box<dyn RenderSurface>>,
    job: Option<PrintJob>,
    state: PreviewState,
}

impl PreviewSurface {
    pub fn new(
        bridge: Arc<dyn PlatformBridge>,
        hardware: HardwareSettings,
        regenerate: Regenerate,
    ) -> Self {
        Self {
            bridge,
            hardware,
            regenerate,
            surface: None,
            job: None,
            state: PreviewState::Closed,
        }
    }

    /// A preview whose paper switch re-assembles a listing.
    pub fn for_listing(
        bridge: Arc<dyn PlatformBridge>,
        assembler: DocumentAssembler,
        title: impl Into<String>,
        rows: Vec<Record>,
        columns: Vec<ColumnSpec>,
    ) -> Self {
        let hardware = assembler.settings().hardware.clone();
        let title = title.into();
        Self::new(
            bridge,
            hardware,
            Box::new(move |paper| Ok(assembler.assemble_on(&title, &rows, &columns, paper))),
        )
    }

    /// A preview whose paper switch re-assembles a receipt.
    pub fn for_receipt(
        bridge: Arc<dyn PlatformBridge>,
        assembler: DocumentAssembler,
        record: ReceiptRecord,
    ) -> Self {
        let hardware = assembler.settings().hardware.clone();
        Self::new(
            bridge,
            hardware,
            Box::new(move |paper| Ok(assembler.assemble_receipt_on(&record, paper))),
        )
    }

    /// The paper sizes offered by the selector.
    pub fn paper_options() -> [PaperSize; 3] {
        PaperSize::ALL
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    /// The job currently shown, if any.
    pub fn job(&self) -> Option<&PrintJob> {
        self.job.as_ref()
    }

    /// Paper size of the job currently shown.
    pub fn paper_size(&self) -> Option<PaperSize> {
        self.job.as_ref().map(PrintJob::paper_size)
    }

    /// Show `job` in a fresh isolated surface.
    ///
    /// When the host refuses the surface or the document does not load, the
    /// operator is alerted and the preview stays closed.
    #[instrument(skip(self, job), fields(job = %job.id(), paper = %job.paper_size()))]
    pub fn open(&mut self, job: PrintJob) -> Result<()> {
        self.close();

        let mut surface = match self.bridge.create_surface(job.title()) {
            Ok(surface) => surface,
            Err(e) => {
                warn!(error = %e, "render surface unavailable");
                self.bridge.alert(&humanize_error(&e));
                return Err(e);
            }
        };
        if let Err(e) = surface.load(job.html()) {
            warn!(error = %e, "document failed to load");
            surface.close();
            self.bridge.alert(&humanize_error(&e));
            return Err(e);
        }

        info!(platform = self.bridge.platform_name(), "preview opened");
        self.surface = Some(surface);
        self.job = Some(job);
        self.state = PreviewState::Loaded;
        Ok(())
    }

    /// Regenerate the document for `paper` and reload the surface.
    #[instrument(skip(self))]
    pub fn select_paper_size(&mut self, paper: PaperSize) -> Result<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Err(LibrisError::PreviewClosed);
        };

        let job = (self.regenerate)(paper).map_err(|e| match e {
            LibrisError::Regeneration(_) => e,
            other => LibrisError::Regeneration(other.to_string()),
        })?;
        surface.load(job.html())?;

        debug!(job = %job.id(), "preview regenerated");
        self.job = Some(job);
        self.state = PreviewState::Loaded;
        Ok(())
    }

    /// Print the loaded job according to the configured print mode.
    ///
    /// Silent mode hands the document to the host's silent printer and falls
    /// back to the system dialog when that capability is missing or fails.
    #[instrument(skip(self), fields(mode = self.hardware.print_mode.as_str()))]
    pub fn print(&mut self) -> Result<()> {
        let (Some(surface), Some(job)) = (self.surface.as_mut(), self.job.as_ref()) else {
            return Err(LibrisError::PreviewClosed);
        };
        self.state = PreviewState::Printing;

        if self.hardware.print_mode == PrintMode::Silent {
            match self.bridge.silent_printer() {
                Some(printer) => {
                    match printer.print_html(job.html(), self.hardware.default_printer.as_deref()) {
                        Ok(()) => {
                            info!(printer = ?self.hardware.default_printer, "printed silently");
                            return Ok(());
                        }
                        Err(e) => {
                            warn!(error = %e, "silent print failed, falling back to print dialog");
                        }
                    }
                }
                None => warn!("silent print not available on this host, using print dialog"),
            }
        }

        if let Err(e) = surface.print() {
            warn!(error = %e, "print dialog failed");
            self.state = PreviewState::Loaded;
            self.bridge.alert(&humanize_error(&e));
            return Err(e);
        }
        debug!("print dialog requested");
        Ok(())
    }

    /// Tear down the surface. Idempotent.
    pub fn close(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.close();
            debug!("preview closed");
        }
        self.job = None;
        self.state = PreviewState::Closed;
    }
}

impl Drop for PreviewSurface {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for PreviewSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewSurface")
            .field("platform", &self.bridge.platform_name())
            .field("hardware", &self.hardware)
            .field("job", &self.job.as_ref().map(PrintJob::id))
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
