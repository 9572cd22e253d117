// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local print-engine configuration, persisted as JSON in the data directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// File name of the persisted configuration inside the data directory.
pub const CONFIG_FILE: &str = "libris-print.json";

/// Settings that belong to this installation rather than to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Base URL of the library backend (no trailing slash needed).
    pub api_base_url: String,
    /// Organization name used when the backend does not provide one.
    pub organization_name: String,
    /// Where printed documents are spooled, if anywhere.
    pub spool_dir: Option<PathBuf>,
    /// Timeout for the settings request.
    pub request_timeout_secs: u64,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".into(),
            organization_name: "Library".into(),
            spool_dir: None,
            request_timeout_secs: 5,
        }
    }
}

impl PrintConfig {
    /// Load the config from `dir`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no print config, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid print config, using defaults");
                Self::default()
            }
        }
    }

    /// Write the config to `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(dir.join(CONFIG_FILE), json)?;
        Ok(())
    }

    /// The settings endpoint derived from `api_base_url`.
    pub fn settings_url(&self) -> String {
        format!("{}/api/settings/app", self.api_base_url.trim_end_matches('/'))
    }
}
