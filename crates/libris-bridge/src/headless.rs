// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Headless bridge: off-screen render surfaces held in memory.
//
// Each surface owns its own document string, so nothing leaks between the
// host and the printed document. "Printing" records the event and, when a
// spool directory is configured, writes the document there as an HTML file
// for a print daemon or an operator to pick up. Every call is journalled so
// embedding code and tests can inspect what happened.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use libris_core::error::{LibrisError, Result};
use libris_core::human_errors::OperatorNotice;
use libris_core::PrintConfig;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::traits::*;

/// Something that happened on the headless host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Created { surface: Uuid, title: String },
    Loaded { surface: Uuid, html: String },
    DialogPrinted { surface: Uuid, html: String },
    SilentPrinted { html: String, printer: Option<String> },
    Closed { surface: Uuid },
    Alerted(OperatorNotice),
}

/// How the optional silent-print capability behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SilentCapability {
    /// The host has no silent printing.
    Absent,
    /// Silent printing succeeds.
    Available,
    /// Silent printing is offered but every attempt fails with this reason.
    Failing(String),
}

#[derive(Debug, Default)]
struct Journal {
    events: Vec<SurfaceEvent>,
    open: usize,
}

/// In-memory host.
#[derive(Clone)]
pub struct HeadlessBridge {
    journal: Arc<Mutex<Journal>>,
    silent: SilentCapability,
    refuse_surfaces: Option<String>,
    refuse_loads: Option<String>,
    refuse_dialog: Option<String>,
    spool_dir: Option<PathBuf>,
    silent_printer: Arc<HeadlessSilentPrinter>,
}

impl HeadlessBridge {
    pub fn new() -> Self {
        let journal = Arc::new(Mutex::new(Journal::default()));
        Self {
            silent_printer: Arc::new(HeadlessSilentPrinter {
                journal: Arc::clone(&journal),
                failure: None,
                spool_dir: None,
            }),
            journal,
            silent: SilentCapability::Absent,
            refuse_surfaces: None,
            refuse_loads: None,
            refuse_dialog: None,
            spool_dir: None,
        }
    }

    /// A headless host spooling into the configured directory, if any.
    pub fn from_config(config: &PrintConfig) -> Self {
        match &config.spool_dir {
            Some(dir) => Self::new().with_spool_dir(dir),
            None => Self::new(),
        }
    }

    /// Configure the silent-print capability.
    pub fn with_silent(mut self, silent: SilentCapability) -> Self {
        self.silent = silent;
        self.rebuild_silent_printer();
        self
    }

    /// Make every surface creation fail with `reason`, as a blocked pop-up
    /// would.
    pub fn refusing_surfaces(mut self, reason: impl Into<String>) -> Self {
        self.refuse_surfaces = Some(reason.into());
        self
    }

    /// Make every document load fail with `reason`.
    pub fn refusing_loads(mut self, reason: impl Into<String>) -> Self {
        self.refuse_loads = Some(reason.into());
        self
    }

    /// Make the print dialog fail with `reason`, as a host without any
    /// installed printer would.
    pub fn refusing_dialog(mut self, reason: impl Into<String>) -> Self {
        self.refuse_dialog = Some(reason.into());
        self
    }

    /// Spool printed documents into `dir`.
    pub fn with_spool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spool_dir = Some(dir.into());
        self.rebuild_silent_printer();
        self
    }

    fn rebuild_silent_printer(&mut self) {
        let failure = match &self.silent {
            SilentCapability::Failing(reason) => Some(reason.clone()),
            _ => None,
        };
        self.silent_printer = Arc::new(HeadlessSilentPrinter {
            journal: Arc::clone(&self.journal),
            failure,
            spool_dir: self.spool_dir.clone(),
        });
    }

    /// Everything recorded so far, oldest first.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        lock(&self.journal).events.clone()
    }

    /// Alerts shown to the operator.
    pub fn alerts(&self) -> Vec<OperatorNotice> {
        lock(&self.journal)
            .events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Alerted(notice) => Some(notice.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of surfaces created and not yet closed.
    pub fn open_surfaces(&self) -> usize {
        lock(&self.journal).open
    }
}

impl Default for HeadlessBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for HeadlessBridge {
    fn platform_name(&self) -> &str {
        "Headless"
    }

    fn silent_printer(&self) -> Option<&dyn SilentPrint> {
        match self.silent {
            SilentCapability::Absent => None,
            SilentCapability::Available | SilentCapability::Failing(_) => {
                Some(self.silent_printer.as_ref())
            }
        }
    }
}

impl SurfaceHost for HeadlessBridge {
    fn create_surface(&self, title: &str) -> Result<Box<dyn RenderSurface>> {
        if let Some(reason) = &self.refuse_surfaces {
            warn!(reason = %reason, "headless host refused surface");
            return Err(LibrisError::SurfaceUnavailable(reason.clone()));
        }
        let id = Uuid::new_v4();
        {
            let mut journal = lock(&self.journal);
            journal.open += 1;
            journal.events.push(SurfaceEvent::Created {
                surface: id,
                title: title.to_string(),
            });
        }
        debug!(surface = %id, title, "headless surface created");
        Ok(Box::new(HeadlessSurface {
            id,
            document: String::new(),
            closed: false,
            journal: Arc::clone(&self.journal),
            spool_dir: self.spool_dir.clone(),
            load_failure: self.refuse_loads.clone(),
            dialog_failure: self.refuse_dialog.clone(),
        }))
    }
}

impl OperatorAlert for HeadlessBridge {
    fn alert(&self, notice: &OperatorNotice) {
        warn!(message = %notice.message, "operator alert");
        lock(&self.journal)
            .events
            .push(SurfaceEvent::Alerted(notice.clone()));
    }
}

/// An off-screen document.
struct HeadlessSurface {
    id: Uuid,
    document: String,
    closed: bool,
    journal: Arc<Mutex<Journal>>,
    spool_dir: Option<PathBuf>,
    load_failure: Option<String>,
    dialog_failure: Option<String>,
}

impl RenderSurface for HeadlessSurface {
    fn load(&mut self, html: &str) -> Result<()> {
        if self.closed {
            return Err(LibrisError::Bridge("surface already closed".into()));
        }
        if let Some(reason) = &self.load_failure {
            return Err(LibrisError::Bridge(reason.clone()));
        }
        self.document = html.to_string();
        lock(&self.journal).events.push(SurfaceEvent::Loaded {
            surface: self.id,
            html: self.document.clone(),
        });
        Ok(())
    }

    fn print(&mut self) -> Result<()> {
        if self.closed {
            return Err(LibrisError::Bridge("surface already closed".into()));
        }
        if let Some(reason) = &self.dialog_failure {
            return Err(LibrisError::PrintDialog(reason.clone()));
        }
        if let Some(dir) = &self.spool_dir {
            spool(dir, &self.id.to_string(), &self.document)?;
        }
        lock(&self.journal).events.push(SurfaceEvent::DialogPrinted {
            surface: self.id,
            html: self.document.clone(),
        });
        info!(surface = %self.id, "headless print dialog");
        Ok(())
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.document.clear();
        let mut journal = lock(&self.journal);
        journal.open = journal.open.saturating_sub(1);
        journal.events.push(SurfaceEvent::Closed { surface: self.id });
    }
}

impl Drop for HeadlessSurface {
    fn drop(&mut self) {
        self.close();
    }
}

/// Silent printing on the headless host.
struct HeadlessSilentPrinter {
    journal: Arc<Mutex<Journal>>,
    failure: Option<String>,
    spool_dir: Option<PathBuf>,
}

impl SilentPrint for HeadlessSilentPrinter {
    fn print_html(&self, html: &str, printer: Option<&str>) -> Result<()> {
        if let Some(reason) = &self.failure {
            return Err(LibrisError::SilentPrint(reason.clone()));
        }
        if let Some(dir) = &self.spool_dir {
            let stem = format!("silent-{}", Uuid::new_v4());
            spool(dir, &stem, html)?;
        }
        lock(&self.journal).events.push(SurfaceEvent::SilentPrinted {
            html: html.to_string(),
            printer: printer.map(str::to_string),
        });
        info!(printer = printer.unwrap_or("default"), "headless silent print");
        Ok(())
    }
}

fn spool(dir: &std::path::Path, stem: &str, html: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{stem}.html"));
    std::fs::write(&path, html)?;
    debug!(path = %path.display(), "document spooled");
    Ok(())
}

fn lock(journal: &Mutex<Journal>) -> MutexGuard<'_, Journal> {
    journal.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
