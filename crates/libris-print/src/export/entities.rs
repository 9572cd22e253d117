// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export field lists for the circulation screens.

use chrono::NaiveDate;
use libris_core::library::{Book, Fine, Student, Transaction};
use libris_document::html::{date, money};

use super::{Exportable, FieldSpec};

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn day(value: Option<NaiveDate>) -> String {
    value.map(date).unwrap_or_default()
}

impl Exportable for Book {
    const TITLE: &'static str = "Books Report";

    fn export_id(&self) -> String {
        self.id.clone()
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        type Field = FieldSpec<Book>;
        vec![
            Field::new("Title", |b| b.title.clone()),
            Field::new("Author", |b| text(&b.author)),
            Field::new("ISBN", |b| text(&b.isbn)),
            Field::new("Category", |b| text(&b.category)),
            Field::new("Department", |b| text(&b.department)),
            Field::new("Publisher", |b| text(&b.publisher)),
            Field::new("Total Copies", |b| b.total_copies.to_string()),
            Field::new("Available", |b| b.available_copies.to_string()),
            Field::new("Shelf", |b| text(&b.shelf_location)),
        ]
    }
}

impl Exportable for Student {
    const TITLE: &'static str = "Students Report";

    fn export_id(&self) -> String {
        self.id.clone()
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        type Field = FieldSpec<Student>;
        vec![
            Field::new("Name", |s| s.name.clone()),
            Field::new("Roll Number", |s| s.roll_number.clone()),
            Field::new("Email", |s| text(&s.email)),
            Field::new("Phone", |s| text(&s.phone)),
            Field::new("Department", |s| text(&s.department)),
            Field::new("Year", |s| text(&s.year)),
            Field::new("Status", |s| text(&s.status)),
        ]
    }
}

impl Exportable for Fine {
    const TITLE: &'static str = "Fines Report";

    fn export_id(&self) -> String {
        self.id.clone()
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        type Field = FieldSpec<Fine>;
        vec![
            Field::new("Student", |f| f.student_name.clone()),
            Field::new("Roll Number", |f| f.roll_number.clone()),
            Field::new("Book", |f| text(&f.book_title)),
            Field::new("Reason", |f| f.reason.clone()),
            Field::new("Amount", |f| money(f.amount)),
            Field::new("Status", |f| f.status.label().to_string()),
            Field::new("Created", |f| day(f.created_at)),
            Field::new("Paid On", |f| day(f.paid_at)),
            Field::new("Remarks", |f| text(&f.remarks)),
        ]
    }
}

impl Exportable for Transaction {
    const TITLE: &'static str = "Transactions Report";

    fn export_id(&self) -> String {
        self.id.clone()
    }

    fn fields() -> Vec<FieldSpec<Self>> {
        type Field = FieldSpec<Transaction>;
        vec![
            Field::new("Book", |t| t.book_title.clone()),
            Field::new("ISBN", |t| text(&t.isbn)),
            Field::new("Student", |t| t.student_name.clone()),
            Field::new("Roll Number", |t| t.roll_number.clone()),
            Field::new("Issue Date", |t| day(t.issue_date)),
            Field::new("Due Date", |t| day(t.due_date)),
            Field::new("Return Date", |t| day(t.return_date)),
            Field::new("Status", |t| t.status.label().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::flatten;
    use libris_core::library::{FineStatus, TransactionStatus};

    #[test]
    fn fine_rows_use_receipt_formatting() {
        let fine = Fine {
            id: "7".into(),
            student_name: "Ravi K".into(),
            roll_number: "ME22-003".into(),
            amount: 40.0,
            reason: "Lost card".into(),
            status: FineStatus::Paid,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 9),
            ..Fine::default()
        };
        let table = flatten(&[&fine]);
        assert_eq!(table.title, "Fines Report");
        assert_eq!(
            table.rows[0],
            vec![
                "Ravi K",
                "ME22-003",
                "",
                "Lost card",
                "\u{20b9}40.00",
                "Paid",
                "09/01/2024",
                "",
                ""
            ]
        );
    }

    #[test]
    fn transaction_dates_are_day_first() {
        let tx = Transaction {
            id: "t1".into(),
            book_title: "Dune".into(),
            student_name: "Asha Rao".into(),
            roll_number: "CS21-014".into(),
            issue_date: NaiveDate::from_ymd_opt(2024, 5, 2),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 16),
            status: TransactionStatus::Overdue,
            ..Transaction::default()
        };
        let table = flatten(&[&tx]);
        assert_eq!(table.rows[0][4], "02/05/2024");
        assert_eq!(table.rows[0][5], "16/05/2024");
        assert_eq!(table.rows[0][7], "Overdue");
    }

    #[test]
    fn every_entity_has_a_distinct_title_and_columns() {
        let titles = [Book::TITLE, Student::TITLE, Fine::TITLE, Transaction::TITLE];
        let unique: std::collections::HashSet<_> = titles.iter().collect();
        assert_eq!(unique.len(), 4);
        assert!(!Book::fields().is_empty());
        assert!(!Student::fields().is_empty());
        assert!(!Fine::fields().is_empty());
        assert!(!Transaction::fields().is_empty());
    }
}
