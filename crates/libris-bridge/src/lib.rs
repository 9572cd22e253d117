// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Libris: Host capability bridges.
//
// The print engine never touches a browser or OS print API directly. It asks
// the host, through the traits in `traits`, for an isolated render surface,
// an optional silent-print capability, and a way to alert the operator.

pub mod headless;
pub mod traits;

pub use headless::{HeadlessBridge, SurfaceEvent};
pub use traits::{OperatorAlert, PlatformBridge, RenderSurface, SilentPrint, SurfaceHost};
