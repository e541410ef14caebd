//! Tolerant bulk import of transactions from arbitrary JSON.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::core::time::Clock;
use crate::domain::{transaction::validated_amount, Category, Transaction, TransactionKind};
use crate::errors::{Result, TrackerError};

/// Sanitized records accepted from an import payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub transactions: Vec<Transaction>,
    pub accepted: usize,
    pub skipped: usize,
}

pub struct ImportService;

impl ImportService {
    /// Parses `raw` as JSON and validates it with [`ImportService::import_value`].
    pub fn import_str(raw: &str, clock: &dyn Clock) -> Result<ImportReport> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|_| TrackerError::Format("Invalid JSON. Paste a valid array.".into()))?;
        Self::import_value(&value, clock)
    }

    /// Accepts every array element that is an object with `type` exactly
    /// `"income"` or `"expense"` and an `amount` that coerces to a positive
    /// decimal. Anything else is skipped without an individual error.
    ///
    /// Unknown categories become [`Category::Other`], a missing numeric `ts`
    /// becomes the clock's current time and a missing note becomes empty.
    pub fn import_value(value: &Value, clock: &dyn Clock) -> Result<ImportReport> {
        let items = value.as_array().ok_or_else(|| {
            TrackerError::Format("JSON must be an array of transactions.".into())
        })?;

        let transactions: Vec<Transaction> = items
            .iter()
            .filter_map(|item| sanitize(item, clock))
            .collect();
        let accepted = transactions.len();
        let skipped = items.len() - accepted;
        info!(accepted, skipped, "validated import payload");

        Ok(ImportReport {
            transactions,
            accepted,
            skipped,
        })
    }
}

fn sanitize(item: &Value, clock: &dyn Clock) -> Option<Transaction> {
    let record = item.as_object()?;
    let kind = match record.get("type").and_then(Value::as_str)? {
        "income" => TransactionKind::Income,
        "expense" => TransactionKind::Expense,
        _ => return None,
    };
    let amount = validated_amount(coerce_amount(record.get("amount")?)?).ok()?;

    Some(Transaction {
        id: Uuid::new_v4(),
        timestamp: timestamp(record).unwrap_or_else(|| clock.now()),
        kind,
        amount,
        category: Category::coerce(record.get("category").and_then(Value::as_str)),
        note: note(record),
    })
}

/// Numbers and numeric strings; everything else (including non-finite values) is rejected.
fn coerce_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(Decimal::from(int))
            } else {
                number.as_f64().and_then(Decimal::from_f64)
            }
        }
        Value::String(text) => {
            let trimmed = text.trim();
            Decimal::from_str(trimmed)
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(Decimal::from_f64))
        }
        _ => None,
    }
}

fn timestamp(record: &Map<String, Value>) -> Option<DateTime<Utc>> {
    let millis = match record.get("ts")? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|ms| ms.trunc() as i64))?,
        _ => return None,
    };
    DateTime::<Utc>::from_timestamp_millis(millis)
}

fn note(record: &Map<String, Value>) -> String {
    match record.get("note") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(other) => other.to_string(),
    }
}
