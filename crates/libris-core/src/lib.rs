// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Libris: Core types, settings, and error definitions shared across all crates.

pub mod clock;
pub mod config;
pub mod error;
pub mod human_errors;
pub mod library;
pub mod settings;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::PrintConfig;
pub use error::LibrisError;
pub use settings::{AppSettings, HardwareSettings};
pub use types::*;
