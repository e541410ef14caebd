use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::services::{
    BudgetReport, BudgetService, ImportReport, ImportService, Leaderboard, LeaderboardService,
    SummaryService, TipService, TransactionService,
};
use crate::core::time::Clock;
use crate::domain::{
    Category, LimitsMap, MonthKey, MonthlyComparison, PeriodSummary, Tip, TipMode, Transaction,
    TransactionEdit, TransactionKind, Username,
};
use crate::errors::Result;
use crate::storage::RecordStore;

/// One user's records bound to a store and a clock.
///
/// Mutations run against a working copy; the copy replaces the in-memory
/// state only after the store accepted the full list.
pub struct Session {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    username: Username,
    transactions: Vec<Transaction>,
    limits: LimitsMap,
}

impl Session {
    /// Registers `username` with the store and loads its records.
    pub fn open(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
        username: Username,
    ) -> Result<Self> {
        store.register_user(username.as_str())?;
        let transactions = store.load_transactions(username.as_str())?;
        let limits = store.load_limits(username.as_str())?;
        info!(
            user = %username,
            transactions = transactions.len(),
            limits = limits.len(),
            "session opened"
        );
        Ok(Self {
            store,
            clock,
            username,
            transactions,
            limits,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    /// All records, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn limits(&self) -> &LimitsMap {
        &self.limits
    }

    pub fn current_month(&self) -> MonthKey {
        MonthKey::of(self.clock.now())
    }

    pub fn add(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        category: Category,
        note: &str,
    ) -> Result<Uuid> {
        let clock = Arc::clone(&self.clock);
        self.mutate_transactions(|txns| {
            TransactionService::add(txns, clock.as_ref(), kind, amount, category, note)
        })
    }

    pub fn edit(&mut self, id: Uuid, edit: TransactionEdit) -> Result<()> {
        self.mutate_transactions(|txns| TransactionService::edit(txns, id, edit))
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Transaction> {
        self.mutate_transactions(|txns| TransactionService::remove(txns, id))
    }

    /// Looks up a full id or a unique prefix of one.
    pub fn resolve_id(&self, fragment: &str) -> Result<Uuid> {
        TransactionService::resolve_id(&self.transactions, fragment)
    }

    pub fn clear(&mut self) -> Result<usize> {
        self.mutate_transactions(|txns| Ok(TransactionService::clear(txns)))
    }

    pub fn seed_examples(&mut self) -> Result<usize> {
        let clock = Arc::clone(&self.clock);
        self.mutate_transactions(|txns| TransactionService::seed_examples(txns, clock.as_ref()))
    }

    /// Validates `raw` and merges the accepted records. Nothing is written
    /// when no record was accepted.
    pub fn import_str(&mut self, raw: &str) -> Result<ImportReport> {
        let report = ImportService::import_str(raw, self.clock.as_ref())?;
        if report.accepted > 0 {
            let imported = report.transactions.clone();
            self.mutate_transactions(|txns| {
                TransactionService::merge_imported(txns, imported);
                Ok(())
            })?;
        }
        Ok(report)
    }

    pub fn set_limit(&mut self, category: Category, amount: Decimal) -> Result<Decimal> {
        self.mutate_limits(|limits| limits.set(category, amount))
    }

    pub fn clear_limit(&mut self, category: Category) -> Result<Option<Decimal>> {
        self.mutate_limits(|limits| Ok(limits.clear(category)))
    }

    pub fn clear_limits(&mut self) -> Result<()> {
        self.mutate_limits(|limits| {
            limits.clear_all();
            Ok(())
        })
    }

    pub fn summary(&self, month: MonthKey) -> PeriodSummary {
        SummaryService::summarize_month(&self.transactions, month)
    }

    pub fn current_summary(&self) -> PeriodSummary {
        self.summary(self.current_month())
    }

    /// Tips for the current month.
    pub fn tips(&self, mode: TipMode, symbol: &str) -> Vec<Tip> {
        TipService::generate_with_symbol(&self.current_summary(), &self.limits, mode, symbol)
    }

    pub fn comparison(&self, months_back: usize) -> Vec<MonthlyComparison> {
        SummaryService::monthly_comparison(&self.transactions, self.current_month(), months_back)
    }

    pub fn budget(&self, total: Decimal) -> Result<BudgetReport> {
        BudgetService::report(total, &self.current_summary(), self.clock.today())
    }

    pub fn leaderboard(&self, month: MonthKey) -> Result<Leaderboard> {
        LeaderboardService::build(self.store.as_ref(), month)
    }

    fn mutate_transactions<T>(
        &mut self,
        op: impl FnOnce(&mut Vec<Transaction>) -> Result<T>,
    ) -> Result<T> {
        let mut working = self.transactions.clone();
        let outcome = op(&mut working)?;
        self.store
            .save_transactions(self.username.as_str(), &working)?;
        info!(user = %self.username, count = working.len(), "transactions updated");
        self.transactions = working;
        Ok(outcome)
    }

    fn mutate_limits<T>(&mut self, op: impl FnOnce(&mut LimitsMap) -> Result<T>) -> Result<T> {
        let mut working = self.limits.clone();
        let outcome = op(&mut working)?;
        self.store.save_limits(self.username.as_str(), &working)?;
        debug!(user = %self.username, count = working.len(), "limits updated");
        self.limits = working;
        Ok(outcome)
    }
}
