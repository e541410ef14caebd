//! Month filtering, period totals and the month-over-month comparison table.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::{
    round_currency, Category, MonthKey, MonthlyComparison, PeriodSummary, Transaction,
    TransactionKind,
};

/// Number of months shown by the comparison table when none is configured.
pub const DEFAULT_COMPARISON_MONTHS: usize = 4;

/// Widest comparison window, ten years.
pub const MAX_COMPARISON_MONTHS: usize = 120;

pub struct SummaryService;

impl SummaryService {
    /// Transactions whose local-calendar month equals `month`, in input order.
    pub fn filter_by_month<'a, I>(transactions: I, month: MonthKey) -> Vec<Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .filter(|txn| month.contains(txn.timestamp))
            .cloned()
            .collect()
    }

    /// Single pass over `transactions`.
    ///
    /// Every known category is pre-seeded with zero so reports always show the
    /// full set. Rounding happens once on the final totals; individual amounts
    /// are already rounded when they enter the ledger.
    pub fn summarize<'a, I>(transactions: I) -> PeriodSummary
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        let mut by_category: BTreeMap<Category, Decimal> = Category::ALL
            .into_iter()
            .map(|category| (category, Decimal::ZERO))
            .collect();
        let mut transaction_count = 0;

        for txn in transactions {
            transaction_count += 1;
            match txn.kind {
                TransactionKind::Income => income += txn.amount,
                TransactionKind::Expense => {
                    expense += txn.amount;
                    *by_category.entry(txn.category).or_insert(Decimal::ZERO) += txn.amount;
                }
            }
        }

        let income = round_currency(income);
        let expense = round_currency(expense);
        for total in by_category.values_mut() {
            *total = round_currency(*total);
        }

        PeriodSummary {
            income,
            expense,
            net: income - expense,
            by_category,
            transaction_count,
        }
    }

    /// Convenience for `summarize(filter_by_month(..))`.
    pub fn summarize_month(transactions: &[Transaction], month: MonthKey) -> PeriodSummary {
        Self::summarize(transactions.iter().filter(|txn| month.contains(txn.timestamp)))
    }

    /// Totals for `current` and the `months_back - 1` months before it, newest first.
    ///
    /// Each month is computed independently. The window is clamped to
    /// `1..=MAX_COMPARISON_MONTHS`.
    pub fn monthly_comparison(
        transactions: &[Transaction],
        current: MonthKey,
        months_back: usize,
    ) -> Vec<MonthlyComparison> {
        let window = months_back.clamp(1, MAX_COMPARISON_MONTHS);
        let mut rows = Vec::with_capacity(window);
        let mut month = current;
        for _ in 0..window {
            let summary = Self::summarize_month(transactions, month);
            rows.push(MonthlyComparison {
                month,
                income: summary.income,
                expense: summary.expense,
                net: summary.net,
            });
            month = month.previous();
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use std::str::FromStr;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn txn(kind: TransactionKind, amount: &str, category: Category, ts: DateTime<Utc>) -> Transaction {
        Transaction::new(kind, dec(amount), category, "", ts).unwrap()
    }

    fn month(raw: &str) -> MonthKey {
        raw.parse().unwrap()
    }

    #[test]
    fn empty_summary_is_zeroed_and_fully_seeded() {
        let summary = SummaryService::summarize(&[] as &[Transaction]);
        assert!(summary.is_empty());
        assert_eq!(summary.net, Decimal::ZERO);
        assert_eq!(summary.by_category.len(), Category::ALL.len());
        assert!(summary.by_category.values().all(|value| value.is_zero()));
    }

    #[test]
    fn summarize_splits_income_and_expense() {
        let ts = at(2024, 5, 10);
        let txns = vec![
            txn(TransactionKind::Income, "900", Category::Other, ts),
            txn(TransactionKind::Expense, "220", Category::Necessities, ts),
            txn(TransactionKind::Expense, "45.50", Category::FoodAndDrinks, ts),
            txn(TransactionKind::Expense, "17.99", Category::Subscriptions, ts),
        ];
        let summary = SummaryService::summarize(&txns);
        assert_eq!(summary.income, dec("900"));
        assert_eq!(summary.expense, dec("283.49"));
        assert_eq!(summary.net, dec("616.51"));
        assert_eq!(summary.spent_in(Category::FoodAndDrinks), dec("45.50"));
        assert_eq!(summary.spent_in(Category::Other), Decimal::ZERO);
        assert_eq!(summary.transaction_count, 4);
    }

    #[test]
    fn category_totals_add_up_to_expense() {
        let ts = at(2024, 5, 10);
        let txns: Vec<_> = (0..30)
            .map(|idx| {
                let category = Category::ALL[idx % Category::ALL.len()];
                txn(TransactionKind::Expense, "0.10", category, ts)
            })
            .collect();
        let summary = SummaryService::summarize(&txns);
        let total: Decimal = summary.by_category.values().copied().sum();
        assert_eq!(summary.expense, dec("3.00"));
        assert!((total - summary.expense).abs() <= dec("0.01"));
        assert_eq!(summary.net, summary.income - summary.expense);
    }

    #[test]
    fn filter_by_month_preserves_order_and_is_idempotent() {
        let march = month("2024-03");
        let txns = vec![
            txn(TransactionKind::Expense, "1", Category::Other, at(2024, 3, 31)),
            txn(TransactionKind::Expense, "2", Category::Other, at(2024, 4, 1)),
            txn(TransactionKind::Income, "3", Category::Other, at(2024, 3, 1)),
            txn(TransactionKind::Expense, "4", Category::Other, at(2023, 3, 15)),
        ];
        let once = SummaryService::filter_by_month(&txns, march);
        assert_eq!(once.len(), 2);
        assert_eq!(once[0].amount, dec("1"));
        assert_eq!(once[1].amount, dec("3"));

        let twice = SummaryService::filter_by_month(&once, march);
        assert_eq!(once, twice);
    }

    #[test]
    fn monthly_comparison_is_newest_first_across_year_boundary() {
        let txns = vec![
            txn(TransactionKind::Income, "100", Category::Other, at(2025, 1, 5)),
            txn(TransactionKind::Expense, "40", Category::Transport, at(2024, 12, 20)),
            txn(TransactionKind::Expense, "10", Category::Transport, at(2024, 10, 2)),
            txn(TransactionKind::Expense, "99", Category::Transport, at(2024, 9, 2)),
        ];
        let rows = SummaryService::monthly_comparison(&txns, month("2025-01"), 4);
        let keys: Vec<_> = rows.iter().map(|row| row.month.to_string()).collect();
        assert_eq!(keys, vec!["2025-01", "2024-12", "2024-11", "2024-10"]);
        assert_eq!(rows[0].net, dec("100"));
        assert_eq!(rows[1].expense, dec("40"));
        assert_eq!(rows[2].net, Decimal::ZERO);
        assert_eq!(rows[3].net, dec("-10"));
    }

    #[test]
    fn oversized_window_is_clamped() {
        let rows = SummaryService::monthly_comparison(&[], month("2024-06"), usize::MAX);
        assert_eq!(rows.len(), MAX_COMPARISON_MONTHS);
        assert_eq!(rows[0].month, month("2024-06"));
        assert_eq!(rows[MAX_COMPARISON_MONTHS - 1].month, month("2014-07"));
    }

    #[test]
    fn zero_month_window_yields_current_month_only() {
        let rows = SummaryService::monthly_comparison(&[], month("2024-06"), 0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, month("2024-06"));
    }
}
