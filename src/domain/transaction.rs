use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    category::Category,
    common::{format_money, round_currency, Displayable},
};
use crate::errors::TrackerError;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Accepts exactly `income` or `expense`, ignoring ASCII case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

/// A single income or expense entry owned by one user.
///
/// `id` and `timestamp` are fixed at creation; `amount`, `category` and `note`
/// may be edited in place. The JSON layout (`id`, `ts` in epoch milliseconds,
/// `type`, `amount`, `category`, `note`) is the record store format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "ts", with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: Category,
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// Builds a transaction after rounding `amount` to currency units.
    ///
    /// Fails when the rounded amount is not strictly positive.
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        category: Category,
        note: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, TrackerError> {
        Ok(Self {
            id: Uuid::new_v4(),
            timestamp,
            kind,
            amount: validated_amount(amount)?,
            category,
            note: note.into().trim().to_string(),
        })
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Applies an edit; on error the transaction is left untouched.
    pub fn apply(&mut self, edit: TransactionEdit) -> Result<(), TrackerError> {
        match edit {
            TransactionEdit::Amount(amount) => self.amount = validated_amount(amount)?,
            TransactionEdit::Category(category) => self.category = category,
            TransactionEdit::Note(note) => self.note = note.trim().to_string(),
        }
        Ok(())
    }
}

/// Largest amount a single transaction may carry.
///
/// Keeps any realistic ledger summable inside `Decimal`'s 96-bit range.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Rounds to currency units and enforces `0 < amount <= MAX_AMOUNT`.
pub fn validated_amount(amount: Decimal) -> Result<Decimal, TrackerError> {
    let rounded = round_currency(amount);
    if rounded <= Decimal::ZERO {
        return Err(TrackerError::validation(
            "Enter a valid amount greater than 0.",
        ));
    }
    if rounded > Decimal::from(MAX_AMOUNT) {
        return Err(TrackerError::validation(format!(
            "Amounts above {} are not supported.",
            format_money(Decimal::from(MAX_AMOUNT))
        )));
    }
    Ok(rounded)
}

/// The mutable fields of a [`Transaction`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionEdit {
    Amount(Decimal),
    Category(Category),
    Note(String),
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let sign = if self.is_income() { "+" } else { "-" };
        if self.note.is_empty() {
            format!("{sign}{} {}", format_money(self.amount), self.category)
        } else {
            format!(
                "{sign}{} {} ({})",
                format_money(self.amount),
                self.category,
                self.note
            )
        }
    }
}
