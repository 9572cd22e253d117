// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTML table rendering for listings.

use libris_core::{ColumnSpec, Record};
use serde_json::Value;

use crate::html::escape;

/// Placeholder emitted instead of an empty table.
pub const NO_DATA: &str = "<p class=\"no-data\">No Data Available</p>";

/// Text shown for missing values.
pub const MISSING: &str = "-";

/// Render `rows` as an HTML table, one column per `ColumnSpec`.
///
/// Header labels and cell values are escaped; cell values come from
/// user-editable fields such as remarks.
pub fn format_table(rows: &[Record], columns: &[ColumnSpec]) -> String {
    if rows.is_empty() {
        return NO_DATA.to_string();
    }

    let mut html = String::with_capacity(64 * rows.len() * columns.len().max(1));
    html.push_str("<table>\n<thead>\n<tr>");
    for column in columns {
        html.push_str("<th>");
        html.push_str(&escape(&column.label));
        html.push_str("</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        html.push_str("<tr>");
        for column in columns {
            html.push_str("<td>");
            html.push_str(&escape(&cell_text(row, column)));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

/// The display text of one cell.
pub fn cell_text(row: &Record, column: &ColumnSpec) -> String {
    let text = match &column.render {
        Some(render) => render(row),
        None => row.get(&column.key).map(value_text).unwrap_or_default(),
    };
    if text.trim().is_empty() {
        MISSING.to_string()
    } else {
        text
    }
}

/// Plain text of a JSON value as it appears in a cell.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "Yes".into(),
        Value::Bool(false) => "No".into(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
