// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Library circulation records as returned by the backend listing endpoints.
// Only the fields that appear on printed listings and exports are modelled;
// everything else in the payload is ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::lenient;

/// A catalogue entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub total_copies: u32,
    #[serde(default)]
    pub available_copies: u32,
    #[serde(default)]
    pub shelf_location: Option<String>,
}

/// A registered borrower.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub id: String,
    pub name: String,
    pub roll_number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Settlement state of a fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FineStatus {
    #[default]
    Pending,
    Paid,
    Waived,
    #[serde(other)]
    Unknown,
}

impl FineStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Waived => "Waived",
            Self::Unknown => "Unknown",
        }
    }
}

/// A charge against a student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fine {
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub id: String,
    pub student_name: String,
    pub roll_number: String,
    #[serde(default)]
    pub book_title: Option<String>,
    pub amount: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: FineStatus,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub created_at: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub paid_at: Option<NaiveDate>,
    /// Free text entered by staff.
    #[serde(default)]
    pub remarks: Option<String>,
}

/// State of a circulation transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Issued,
    Returned,
    Overdue,
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Issued => "Issued",
            Self::Returned => "Returned",
            Self::Overdue => "Overdue",
            Self::Unknown => "Unknown",
        }
    }
}

/// A book issue/return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub id: String,
    pub book_title: String,
    #[serde(default)]
    pub isbn: Option<String>,
    pub student_name: String,
    pub roll_number: String,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TransactionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fine_from_backend_payload() {
        let json = r#"{
            "id": 7,
            "student_name": "Ravi K",
            "roll_number": "ME22-003",
            "book_title": null,
            "amount": 40,
            "reason": "Lost card",
            "status": "paid",
            "created_at": "2024-01-09",
            "extra_column": true
        }"#;
        let fine: Fine = serde_json::from_str(json).unwrap();
        assert_eq!(fine.id, "7");
        assert_eq!(fine.status, FineStatus::Paid);
        assert_eq!(fine.amount, 40.0);
        assert_eq!(fine.created_at, NaiveDate::from_ymd_opt(2024, 1, 9));
        assert!(fine.paid_at.is_none());
    }

    #[test]
    fn unknown_transaction_status_is_tolerated() {
        let json = r#"{
            "id": "t-1",
            "book_title": "Dune",
            "student_name": "Meera",
            "roll_number": "EE20-101",
            "status": "reserved"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.status, TransactionStatus::Unknown);
        assert!(tx.issue_date.is_none());
    }
}
