// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF listings via `printpdf` 0.8.
//
// Tables are laid out as fixed-pitch text in the built-in Courier face, so
// column alignment only needs character counts. printpdf 0.8 builds pages
// from `Op` lists and serialises them with `PdfDocument::save()`.

use libris_core::error::Result;
use libris_core::{ExportFormat, PaperSize};
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, TextItem,
};
use tracing::{debug, info, instrument};

use super::{FileEncoder, FlatTable};

/// Courier advance width as a fraction of the font size.
const COURIER_ADVANCE: f32 = 0.6;

/// Millimetres per point.
const MM_PER_PT: f32 = 0.3528;

/// Narrowest a column is squeezed to when the table is too wide.
const MIN_COLUMN_CHARS: usize = 3;

const COLUMN_GAP: &str = " | ";

/// Encodes listings as PDF on a given paper size.
#[derive(Debug, Clone, Copy)]
pub struct PdfEncoder {
    paper_size: PaperSize,
}

impl PdfEncoder {
    pub fn new(paper_size: PaperSize) -> Self {
        Self { paper_size }
    }

    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    pub fn paper_size(&self) -> PaperSize {
        self.paper_size
    }

    fn font_size_pt(&self) -> f32 {
        if self.paper_size.is_thermal() { 7.0 } else { 9.0 }
    }

    fn margin_mm(&self) -> f32 {
        if self.paper_size.is_thermal() { 3.0 } else { 15.0 }
    }

    /// Characters that fit on one line.
    fn line_capacity(&self) -> usize {
        let (w_mm, _) = self.paper_size.dimensions_mm();
        let usable_mm = w_mm as f32 - 2.0 * self.margin_mm();
        let char_mm = COURIER_ADVANCE * self.font_size_pt() * MM_PER_PT;
        (usable_mm / char_mm).max(1.0) as usize
    }
}

impl Default for PdfEncoder {
    fn default() -> Self {
        Self::a4()
    }
}

impl FileEncoder for PdfEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    #[instrument(
        skip(self, table),
        fields(title = %table.title, rows = table.len(), paper = %self.paper_size)
    )]
    fn encode(&self, table: &FlatTable) -> Result<Vec<u8>> {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        let (page_w, page_h) = (Mm(w_mm as f32), Mm(h_mm as f32));
        let font_size = self.font_size_pt();
        let line_height = font_size * 1.35;
        let margin_pt = Mm(self.margin_mm()).into_pt().0;
        let page_h_pt = page_h.into_pt().0;
        let lines_per_page = (((page_h_pt - 2.0 * margin_pt) / line_height) as usize).max(4);

        let capacity = self.line_capacity();
        let widths = column_widths(table, capacity);
        let gaps = COLUMN_GAP.len() * widths.len().saturating_sub(1);
        let header_lines = vec![
            format_row(&table.headers, &widths),
            "-".repeat(widths.iter().sum::<usize>() + gaps),
        ];
        let preamble = vec![
            truncate(&table.title, capacity),
            format!("Total records: {}", table.len()),
            String::new(),
        ];
        let body: Vec<String> = table.rows.iter().map(|row| format_row(row, &widths)).collect();

        info!(capacity, lines_per_page, "laying out PDF listing");

        let mut pages: Vec<PdfPage> = Vec::new();
        let mut body_iter = body.iter().peekable();
        let mut first = true;
        loop {
            let mut lines: Vec<&str> = Vec::with_capacity(lines_per_page);
            if first {
                lines.extend(preamble.iter().map(String::as_str));
            }
            lines.extend(header_lines.iter().map(String::as_str));
            while lines.len() < lines_per_page {
                match body_iter.next() {
                    Some(line) => lines.push(line),
                    None => break,
                }
            }
            pages.push(PdfPage::new(
                page_w,
                page_h,
                text_ops(&lines, margin_pt, page_h_pt, font_size, line_height),
            ));
            first = false;
            if body_iter.peek().is_none() {
                break;
            }
        }

        let mut doc = PdfDocument::new(&table.title);
        doc.with_pages(pages);
        debug!(pages = doc.pages.len(), "PDF layout complete");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
    }
}

fn text_ops(
    lines: &[&str],
    margin_pt: f32,
    page_h_pt: f32,
    font_size: f32,
    line_height: f32,
) -> Vec<Op> {
    let mut ops = Vec::with_capacity(lines.len() * 5);
    for (idx, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y_pt = page_h_pt - margin_pt - font_size - idx as f32 * line_height;
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(margin_pt),
                y: Pt(y_pt),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(font_size),
            font: BuiltinFont::Courier,
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(pdf_text(line))],
            font: BuiltinFont::Courier,
        });
        ops.push(Op::EndTextSection);
    }
    ops
}

/// Natural column widths, scaled down to fit `capacity` characters.
fn column_widths(table: &FlatTable, capacity: usize) -> Vec<usize> {
    let natural: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .max(MIN_COLUMN_CHARS)
        })
        .collect();

    let gaps = COLUMN_GAP.len() * natural.len().saturating_sub(1);
    let total: usize = natural.iter().sum();
    if total + gaps <= capacity {
        return natural;
    }

    let budget = capacity.saturating_sub(gaps).max(natural.len() * MIN_COLUMN_CHARS);
    natural
        .iter()
        .map(|w| (w * budget / total).max(MIN_COLUMN_CHARS))
        .collect()
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(col, &width)| {
            let cell = cells.get(col).map(String::as_str).unwrap_or("");
            let cell = if cell.is_empty() { "-" } else { cell };
            format!("{:<width$}", truncate(cell, width))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('.');
    out
}

/// Built-in fonts only cover Latin-1; substitute everything else.
fn pdf_text(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '\u{20b9}' => out.push_str("Rs."),
            c if (c as u32) < 0x100 => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
