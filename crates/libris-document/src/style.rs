// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stylesheets tuned to the physical output medium.
//
// Thermal rolls get a monospace face, dashed low-ink rules and a body pinned
// to the roll width. A4 gets a proportional face, solid rules and page
// margins set through `@page`.

use std::fmt::Write;

use libris_core::PaperSize;

/// Font stack for thermal rolls.
pub const THERMAL_FONT: &str = "'Courier New', Courier, monospace";

/// Font stack for A4 sheets.
pub const SHEET_FONT: &str = "Arial, Helvetica, sans-serif";

/// Font family for a paper size.
pub fn font_family(paper: PaperSize) -> &'static str {
    if paper.is_thermal() {
        THERMAL_FONT
    } else {
        SHEET_FONT
    }
}

/// CSS for a listing printed on `paper`.
pub fn stylesheet(paper: PaperSize) -> String {
    let mut css = match paper.roll_width_mm() {
        Some(width) => thermal_rules(width),
        None => sheet_rules(),
    };
    css.push_str(PRINT_MEDIA_RULES);
    css
}

/// Hides interactive chrome when the document is printed.
const PRINT_MEDIA_RULES: &str = "\
@media print {
  .no-print, button, .print-controls { display: none !important; }
  body { -webkit-print-color-adjust: exact; print-color-adjust: exact; }
}
";

fn thermal_rules(width_mm: u32) -> String {
    // Narrower rolls need smaller type to keep columns readable.
    let font_px = if width_mm <= 58 { 10 } else { 12 };
    let mut css = String::with_capacity(1024);

    let _ = write!(
        css,
        "@page {{ size: {width_mm}mm auto; margin: 0; }}
* {{ box-sizing: border-box; }}
body {{ font-family: {THERMAL_FONT}; font-size: {font_px}px; width: {width_mm}mm; margin: 0; padding: 2mm; color: #000; }}
"
    );
    let _ = write!(
        css,
        "h1 {{ font-size: {}px; text-align: center; margin: 0 0 1mm; }}
.header {{ text-align: center; border-bottom: 1px dashed #000; padding-bottom: 1mm; margin-bottom: 2mm; }}
.meta {{ font-size: {}px; margin: 0; }}
",
        font_px + 2,
        font_px - 1
    );
    css.push_str(
        "table { width: 100%; border-collapse: collapse; table-layout: fixed; }
th, td { border-bottom: 1px dashed #000; padding: 1mm 0; text-align: left; vertical-align: top; word-wrap: break-word; }
th { font-weight: bold; }
.no-data { text-align: center; font-style: italic; margin: 4mm 0; }
.footer { text-align: center; border-top: 1px dashed #000; margin-top: 2mm; padding-top: 1mm; }
",
    );
    css
}

fn sheet_rules() -> String {
    let mut css = String::with_capacity(1024);
    let _ = write!(
        css,
        "@page {{ size: A4; margin: 15mm; }}
* {{ box-sizing: border-box; }}
body {{ font-family: {SHEET_FONT}; font-size: 12px; margin: 0; color: #222; }}
"
    );
    css.push_str(
        "h1 { font-size: 20px; margin: 0 0 4px; }
.header { text-align: center; border-bottom: 2px solid #333; padding-bottom: 8px; margin-bottom: 16px; }
.meta { font-size: 11px; color: #555; margin: 2px 0; }
table { width: 100%; border-collapse: collapse; }
thead { display: table-header-group; }
tr { page-break-inside: avoid; }
th, td { border: 1px solid #444; padding: 6px 8px; text-align: left; vertical-align: top; }
th { background: #f0f0f0; font-weight: bold; }
tbody tr:nth-child(even) td { background: #fafafa; }
.no-data { text-align: center; font-style: italic; color: #666; margin: 24px 0; }
.footer { margin-top: 16px; font-size: 10px; color: #666; text-align: right; }
",
    );
    css
}
