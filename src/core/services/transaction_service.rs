//! Business logic helpers for a user's transaction list.
//!
//! Lists are kept newest first: new entries go to the front.

use chrono::Duration;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::time::Clock;
use crate::domain::{Category, Transaction, TransactionEdit, TransactionKind};
use crate::errors::{Result, TrackerError};

/// Provides validated CRUD helpers for transaction lists.
pub struct TransactionService;

impl TransactionService {
    /// Validates and prepends a new transaction stamped with the clock's time.
    pub fn add(
        transactions: &mut Vec<Transaction>,
        clock: &dyn Clock,
        kind: TransactionKind,
        amount: Decimal,
        category: Category,
        note: &str,
    ) -> Result<Uuid> {
        let txn = Transaction::new(kind, amount, category, note, clock.now())?;
        let id = txn.id;
        transactions.insert(0, txn);
        Ok(id)
    }

    /// Applies `edit` to the transaction identified by `id`.
    pub fn edit(transactions: &mut [Transaction], id: Uuid, edit: TransactionEdit) -> Result<()> {
        let txn = transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or(TrackerError::TransactionNotFound(id))?;
        txn.apply(edit)
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove(transactions: &mut Vec<Transaction>, id: Uuid) -> Result<Transaction> {
        let idx = transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(TrackerError::TransactionNotFound(id))?;
        Ok(transactions.remove(idx))
    }

    /// Resolves a full id or a unique leading fragment of one.
    pub fn resolve_id(transactions: &[Transaction], fragment: &str) -> Result<Uuid> {
        let needle = fragment.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(TrackerError::validation("Transaction id is required."));
        }
        let mut matches = transactions
            .iter()
            .filter(|txn| txn.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn.id),
            (Some(_), Some(_)) => Err(TrackerError::validation(format!(
                "Transaction id '{fragment}' is ambiguous."
            ))),
            (None, _) => Err(TrackerError::validation(format!(
                "No transaction matches '{fragment}'."
            ))),
        }
    }

    /// Places imported records in front, each as if it had been added in input order.
    pub fn merge_imported(transactions: &mut Vec<Transaction>, imported: Vec<Transaction>) {
        let mut merged: Vec<Transaction> = imported.into_iter().rev().collect();
        merged.append(transactions);
        *transactions = merged;
    }

    /// Empties the list, returning how many records were dropped.
    pub fn clear(transactions: &mut Vec<Transaction>) -> usize {
        let removed = transactions.len();
        transactions.clear();
        removed
    }

    /// Adds the demo records in front of the existing ones.
    pub fn seed_examples(transactions: &mut Vec<Transaction>, clock: &dyn Clock) -> Result<usize> {
        let samples = Self::example_transactions(clock)?;
        let added = samples.len();
        Self::merge_imported(transactions, samples);
        Ok(added)
    }

    /// Demo data: one paycheck and five typical expenses over the last three days.
    pub fn example_transactions(clock: &dyn Clock) -> Result<Vec<Transaction>> {
        let now = clock.now();
        let days_ago = |days: i64| now - Duration::days(days);
        let samples = [
            (2, TransactionKind::Income, Decimal::new(900, 0), Category::Other, "Paycheck"),
            (2, TransactionKind::Expense, Decimal::new(220, 0), Category::Necessities, "Groceries"),
            (1, TransactionKind::Expense, Decimal::new(455, 1), Category::FoodAndDrinks, "Takeout"),
            (1, TransactionKind::Expense, Decimal::new(1799, 2), Category::Subscriptions, "Streaming"),
            (0, TransactionKind::Expense, Decimal::new(65, 0), Category::HealthAndFitness, "Gym"),
            (0, TransactionKind::Expense, Decimal::new(38, 0), Category::Unnecessary, "Impulse buy"),
        ];
        samples
            .into_iter()
            .map(|(days, kind, amount, category, note)| {
                Transaction::new(kind, amount, category, note, days_ago(days))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap())
    }

    fn add(list: &mut Vec<Transaction>, amount: i64) -> Uuid {
        TransactionService::add(
            list,
            &clock(),
            TransactionKind::Expense,
            Decimal::new(amount, 0),
            Category::Transport,
            "",
        )
        .unwrap()
    }

    #[test]
    fn add_prepends_newest_first() {
        let mut list = Vec::new();
        add(&mut list, 1);
        let second = add(&mut list, 2);
        assert_eq!(list[0].id, second);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn invalid_add_leaves_list_untouched() {
        let mut list = Vec::new();
        let err = TransactionService::add(
            &mut list,
            &clock(),
            TransactionKind::Income,
            Decimal::ZERO,
            Category::Other,
            "",
        )
        .expect_err("zero amount is invalid");
        assert!(matches!(err, TrackerError::Validation(_)));
        assert!(list.is_empty());
    }

    #[test]
    fn edit_and_remove_fail_for_missing_transaction() {
        let mut list = Vec::new();
        add(&mut list, 5);
        let missing = Uuid::new_v4();
        assert!(matches!(
            TransactionService::edit(&mut list, missing, TransactionEdit::Note("x".into())),
            Err(TrackerError::TransactionNotFound(id)) if id == missing
        ));
        assert!(TransactionService::remove(&mut list, missing).is_err());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_returns_deleted_transaction() {
        let mut list = Vec::new();
        let id = add(&mut list, 5);
        let removed = TransactionService::remove(&mut list, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(list.is_empty());
    }

    #[test]
    fn resolve_id_accepts_unique_prefixes() {
        let mut list = Vec::new();
        let id = add(&mut list, 5);
        let prefix = &id.to_string()[..8];
        assert_eq!(TransactionService::resolve_id(&list, prefix).unwrap(), id);
        assert!(TransactionService::resolve_id(&list, "zzzz").is_err());
        assert!(TransactionService::resolve_id(&list, " ").is_err());
    }

    #[test]
    fn merge_puts_last_imported_first() {
        let mut list = Vec::new();
        add(&mut list, 1);
        let imported = TransactionService::example_transactions(&clock()).unwrap();
        let first_note = imported[0].note.clone();
        let last_note = imported[5].note.clone();
        TransactionService::merge_imported(&mut list, imported);
        assert_eq!(list.len(), 7);
        assert_eq!(list[0].note, last_note);
        assert_eq!(list[5].note, first_note);
        assert_eq!(list[6].amount, Decimal::new(1, 0));
    }

    #[test]
    fn clear_and_seed_report_counts() {
        let mut list = Vec::new();
        add(&mut list, 3);
        assert_eq!(TransactionService::seed_examples(&mut list, &clock()).unwrap(), 6);
        assert_eq!(list.len(), 7);
        assert_eq!(TransactionService::clear(&mut list), 7);
        assert!(list.is_empty());
    }

    #[test]
    fn example_data_is_valid() {
        let samples = TransactionService::example_transactions(&clock()).unwrap();
        assert_eq!(samples.len(), 6);
        assert_eq!(samples.iter().filter(|txn| txn.is_income()).count(), 1);
        assert!(samples.iter().all(|txn| txn.timestamp <= clock().now()));
    }
}
