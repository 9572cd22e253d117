// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for document assembly. Listings are regenerated on
// every paper-size switch in the preview, so assembly of a realistic listing
// should stay well under a frame.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

use libris_core::{AppSettings, ColumnSpec, LineItem, PaperSize, ReceiptRecord, Record};
use libris_document::DocumentAssembler;

fn listing(rows: usize) -> Vec<Record> {
    (0..rows)
        .filter_map(|i| {
            json!({
                "title": format!("Book title number {i}"),
                "author": "Some Author",
                "isbn": format!("978{i:010}"),
                "available": i % 3,
            })
            .as_object()
            .cloned()
        })
        .collect()
}

/// Assemble a 500-row listing on each paper size.
fn bench_listing(c: &mut Criterion) {
    let assembler = DocumentAssembler::new(AppSettings::default(), "Bench Library");
    let rows = listing(500);
    let columns = vec![
        ColumnSpec::new("title", "Title"),
        ColumnSpec::new("author", "Author"),
        ColumnSpec::new("isbn", "ISBN"),
        ColumnSpec::new("available", "Available"),
    ];

    for paper in PaperSize::ALL {
        c.bench_function(&format!("assemble listing 500 rows ({paper})"), |b| {
            b.iter(|| {
                let job = assembler.assemble_on("Books", black_box(&rows), &columns, paper);
                black_box(job);
            });
        });
    }
}

fn bench_receipt(c: &mut Criterion) {
    let assembler = DocumentAssembler::new(AppSettings::default(), "Bench Library");
    let record = ReceiptRecord {
        id: "R-1".into(),
        student_name: "Asha Rao".into(),
        roll_number: "CS21-014".into(),
        items: vec![LineItem::new("Late Fee", 12.5), LineItem::new("Damage", 30.0)],
        payment_method: "Cash".into(),
        ..Default::default()
    };

    c.bench_function("assemble receipt (80mm)", |b| {
        b.iter(|| black_box(assembler.assemble_receipt(black_box(&record))));
    });
}

criterion_group!(benches, bench_listing, bench_receipt);
criterion_main!(benches);
