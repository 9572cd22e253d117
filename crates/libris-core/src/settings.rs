// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application settings served by the backend at `/api/settings/app`.
//
// The backend stores each settings group under its own key; depending on the
// deployment a group arrives either as a JSON object or as a JSON-encoded
// string. Both shapes are accepted and every field is optional, so a partial
// or stale payload still produces usable settings.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::types::{PaperSize, PrintMode};

/// Paper size used for tabular listings when none is configured.
pub const DEFAULT_LISTING_PAPER: PaperSize = PaperSize::A4;

/// Paper size used for receipts when none is configured. Receipts are almost
/// always printed on thermal rolls.
pub const DEFAULT_RECEIPT_PAPER: PaperSize = PaperSize::Thermal80;

/// The subset of backend settings the print engine reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(rename = "app_hardware", default, deserialize_with = "object_or_encoded")]
    pub hardware: HardwareSettings,
    #[serde(rename = "app_info", default, deserialize_with = "object_or_encoded")]
    pub info: InstitutionInfo,
}

/// Printer hardware configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareSettings {
    #[serde(default, deserialize_with = "optional_paper")]
    pub paper_size: Option<PaperSize>,
    #[serde(default)]
    pub print_mode: PrintMode,
    #[serde(default, deserialize_with = "non_empty")]
    pub default_printer: Option<String>,
}

/// Institution details printed in document headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionInfo {
    #[serde(default, deserialize_with = "non_empty")]
    pub name: Option<String>,
}

impl AppSettings {
    /// Parse a settings payload.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Paper size for tabular listings.
    pub fn listing_paper_size(&self) -> PaperSize {
        self.hardware.paper_size.unwrap_or(DEFAULT_LISTING_PAPER)
    }

    /// Paper size for receipts.
    pub fn receipt_paper_size(&self) -> PaperSize {
        self.hardware.paper_size.unwrap_or(DEFAULT_RECEIPT_PAPER)
    }
}

fn object_or_encoded<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    use serde::de::Error;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(T::default()),
        Value::String(encoded) if encoded.trim().is_empty() => Ok(T::default()),
        Value::String(encoded) => serde_json::from_str(&encoded).map_err(D::Error::custom),
        other => serde_json::from_value(other).map_err(D::Error::custom),
    }
}

fn non_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// A blank paper size means "not configured", not A4.
fn optional_paper<'de, D>(deserializer: D) -> std::result::Result<Option<PaperSize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_empty(deserializer)?.map(|s| PaperSize::parse(&s)))
}
