// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Payment receipts.
//
// A receipt is a self-contained fragment (inline style block + markup) so it
// can be dropped into any preview chrome. Layout follows the paper size the
// same way listings do: thermal rolls get a monospace body pinned to the roll
// width, A4 a proportional face at full width.

use std::borrow::Cow;
use std::fmt::Write;

use chrono::NaiveDate;
use libris_core::{LineItem, PaperSize, ReceiptRecord};

use crate::html::{date, escape, money};
use crate::style::font_family;

/// Caption printed under the organization name.
pub const CAPTION: &str = "PAYMENT RECEIPT";

/// Description of the line synthesized for receipts without items.
pub const FALLBACK_ITEM: &str = "Fine Payment";

/// Values a receipt needs that are not part of the record itself.
#[derive(Debug, Clone)]
pub struct ReceiptContext {
    /// Printed in the receipt header.
    pub organization: String,
    /// Used when the record carries no date.
    pub today: NaiveDate,
}

/// Render `record` as a receipt fragment for `paper`.
pub fn format_receipt(record: &ReceiptRecord, paper: PaperSize, ctx: &ReceiptContext) -> String {
    let items = line_items(record);
    let total = record
        .total
        .unwrap_or_else(|| items.iter().map(|item| item.amount).sum());
    let printed_on = record.date.unwrap_or(ctx.today);

    let mut html = String::with_capacity(2048);
    html.push_str(&receipt_style(paper));
    html.push_str("<div class=\"receipt\">\n");

    let _ = writeln!(
        html,
        "<div class=\"center org\">{}</div>\n\
         <div class=\"center caption\">{CAPTION}</div>\n<div class=\"sep\"></div>",
        escape(&ctx.organization)
    );

    push_row(&mut html, "row", "Receipt No:", &record.id);
    push_row(&mut html, "row", "Date:", &date(printed_on));
    push_row(&mut html, "row", "Student:", &record.student_name);
    push_row(&mut html, "row", "Reg. No:", &record.roll_number);
    html.push_str("<div class=\"sep\"></div>\n");

    for item in items.iter() {
        push_row(&mut html, "row item", &item.description, &money(item.amount));
    }

    html.push_str("<div class=\"sep\"></div>\n");
    push_row(&mut html, "row total", "TOTAL PAID:", &money(total));
    push_row(&mut html, "row", "Payment Method:", &record.payment_method);
    html.push_str("<div class=\"sep\"></div>\n");
    html.push_str(
        "<div class=\"center footer\">Thank you!<br>This is a computer generated receipt.</div>\n",
    );
    html.push_str("</div>\n");
    html
}

/// The record's items, or a single fallback line built from `amount`.
fn line_items(record: &ReceiptRecord) -> Cow<'_, [LineItem]> {
    if record.items.is_empty() {
        Cow::Owned(vec![LineItem::new(
            FALLBACK_ITEM,
            record.amount.unwrap_or(0.0),
        )])
    } else {
        Cow::Borrowed(&record.items)
    }
}

fn push_row(html: &mut String, class: &str, label: &str, value: &str) {
    let value = if value.trim().is_empty() { "-" } else { value };
    let _ = writeln!(
        html,
        "<div class=\"{class}\"><span>{}</span><span>{}</span></div>",
        escape(label),
        escape(value)
    );
}

fn receipt_style(paper: PaperSize) -> String {
    let (width, font_px, page_rule) = match paper.roll_width_mm() {
        Some(mm) => (
            format!("{mm}mm"),
            if mm <= 58 { 10 } else { 12 },
            format!("size: {mm}mm auto; margin: 0;"),
        ),
        None => ("100%".to_string(), 13, "size: A4; margin: 15mm;".to_string()),
    };
    let rule = if paper.is_thermal() { "dashed" } else { "solid" };

    format!(
        "<style>
.receipt {{ font-family: {font}; font-size: {font_px}px; width: {width}; margin: 0 auto; padding: 2mm; color: #000; box-sizing: border-box; }}
.receipt .center {{ text-align: center; }}
.receipt .org {{ font-size: {org_px}px; font-weight: bold; }}
.receipt .caption {{ font-weight: bold; letter-spacing: 1px; margin-top: 1mm; }}
.receipt .row {{ display: flex; justify-content: space-between; gap: 2mm; margin: 0.5mm 0; }}
.receipt .row span:last-child {{ text-align: right; }}
.receipt .sep {{ border-top: 1px {rule} #000; margin: 1.5mm 0; }}
.receipt .total {{ font-weight: bold; }}
.receipt .footer {{ font-size: {foot_px}px; margin-top: 1mm; }}
@media print {{ .no-print {{ display: none !important; }} @page {{ {page_rule} }} }}
</style>
",
        font = font_family(paper),
        org_px = font_px + 3,
        foot_px = font_px - 1,
    )
}
