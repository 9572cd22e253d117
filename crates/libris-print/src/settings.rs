// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings providers.
//
// Document generation reads settings synchronously through
// `SettingsProvider::current()`. The HTTP provider refreshes its snapshot
// from the backend asynchronously; an unreachable or malformed endpoint is
// logged and leaves the built-in defaults in place, so printing never blocks
// on the network.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use libris_core::error::{LibrisError, Result};
use libris_core::{AppSettings, PrintConfig};
use tracing::{debug, info, instrument, warn};

/// Source of the current application settings.
pub trait SettingsProvider: Send + Sync {
    fn current(&self) -> AppSettings;
}

/// Fixed settings, for tests and offline installs.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings(pub AppSettings);

impl SettingsProvider for StaticSettings {
    fn current(&self) -> AppSettings {
        self.0.clone()
    }
}

/// Settings fetched from `GET {api_base_url}/api/settings/app`.
#[derive(Debug)]
pub struct HttpSettings {
    client: reqwest::Client,
    url: String,
    snapshot: RwLock<AppSettings>,
}

impl HttpSettings {
    /// Build a provider from the local config. Starts with default settings
    /// until the first `refresh()`.
    pub fn new(config: &PrintConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()
            .map_err(|e| LibrisError::SettingsUnavailable(e.to_string()))?;
        Ok(Self {
            client,
            url: config.settings_url(),
            snapshot: RwLock::new(AppSettings::default()),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the settings once.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<AppSettings> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LibrisError::SettingsUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LibrisError::SettingsUnavailable(format!(
                "settings endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LibrisError::SettingsUnavailable(e.to_string()))?;
        let settings = AppSettings::from_json(&body)?;
        debug!(
            paper = ?settings.hardware.paper_size,
            mode = %settings.hardware.print_mode.as_str(),
            "settings fetched"
        );
        Ok(settings)
    }

    /// Fetch the settings and replace the snapshot.
    ///
    /// Any failure is logged and the snapshot reverts to defaults.
    pub async fn refresh(&self) -> AppSettings {
        let settings = match self.fetch().await {
            Ok(settings) => {
                info!("printer settings loaded");
                settings
            }
            Err(e) => {
                warn!(error = %e, "printer settings unavailable, using defaults");
                AppSettings::default()
            }
        };
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = settings.clone();
        settings
    }
}

impl SettingsProvider for HttpSettings {
    fn current(&self) -> AppSettings {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
