//! Ranks users by their monthly savings.

use std::{cmp::Ordering, collections::BTreeMap, thread};

use tracing::{debug, warn};

use crate::core::services::SummaryService;
use crate::domain::{LeaderboardEntry, MonthKey, PeriodSummary};
use crate::storage::RecordStore;

/// Ranked rows plus the users that could not be loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    pub month: Option<MonthKey>,
    pub entries: Vec<LeaderboardEntry>,
    pub skipped: Vec<String>,
}

pub struct LeaderboardService;

impl LeaderboardService {
    /// Orders users by net (desc), income (desc), expense (asc), then username (asc).
    ///
    /// Ranks are positional and always distinct.
    pub fn rank(summaries: &BTreeMap<String, PeriodSummary>) -> Vec<LeaderboardEntry> {
        let mut rows: Vec<(&String, &PeriodSummary)> = summaries.iter().collect();
        rows.sort_by(|(a_name, a), (b_name, b)| compare(a_name, a, b_name, b));
        rows.into_iter()
            .enumerate()
            .map(|(idx, (username, summary))| LeaderboardEntry {
                rank: idx + 1,
                username: username.clone(),
                income: summary.income,
                expense: summary.expense,
                net: summary.net,
            })
            .collect()
    }

    /// Loads every known user's transactions in parallel, summarizes `month`
    /// for each, and ranks the result once all fetches have finished.
    ///
    /// A user whose records cannot be loaded is left out and listed in
    /// [`Leaderboard::skipped`]; the remaining users are still ranked. Only a
    /// failure to enumerate users fails the whole call.
    pub fn build(store: &dyn RecordStore, month: MonthKey) -> crate::errors::Result<Leaderboard> {
        let usernames = store.list_known_usernames()?;
        debug!(users = usernames.len(), %month, "building leaderboard");

        let results: Vec<(String, Option<crate::errors::Result<PeriodSummary>>)> =
            thread::scope(|scope| {
                let handles: Vec<_> = usernames
                    .into_iter()
                    .map(|username| {
                        let fetch_as = username.clone();
                        let handle = scope.spawn(move || {
                            store
                                .load_transactions(&fetch_as)
                                .map(|txns| SummaryService::summarize_month(&txns, month))
                        });
                        (username, handle)
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|(username, handle)| (username, handle.join().ok()))
                    .collect()
            });

        let mut summaries = BTreeMap::new();
        let mut skipped = Vec::new();
        for (username, result) in results {
            match result {
                Some(Ok(summary)) => {
                    summaries.insert(username, summary);
                }
                Some(Err(err)) => {
                    warn!(user = %username, error = %err, "excluding user from leaderboard");
                    skipped.push(username);
                }
                None => {
                    warn!(user = %username, "leaderboard fetch panicked, excluding user");
                    skipped.push(username);
                }
            }
        }
        skipped.sort();

        Ok(Leaderboard {
            month: Some(month),
            entries: Self::rank(&summaries),
            skipped,
        })
    }
}

fn compare(a_name: &str, a: &PeriodSummary, b_name: &str, b: &PeriodSummary) -> Ordering {
    b.net
        .cmp(&a.net)
        .then_with(|| b.income.cmp(&a.income))
        .then_with(|| a.expense.cmp(&b.expense))
        .then_with(|| a_name.cmp(b_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, LimitsMap, Transaction, TransactionKind};
    use crate::storage::MemoryStorage;
    use chrono::{Local, TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::collections::BTreeSet;

    /// Delegates to a memory store but panics when loading one user.
    struct PanicsOn {
        inner: MemoryStorage,
        user: &'static str,
    }

    impl RecordStore for PanicsOn {
        fn load_transactions(&self, username: &str) -> crate::errors::Result<Vec<Transaction>> {
            if username == self.user {
                panic!("decoding records for {username} blew up");
            }
            self.inner.load_transactions(username)
        }
        fn save_transactions(&self, username: &str, txns: &[Transaction]) -> crate::errors::Result<()> {
            self.inner.save_transactions(username, txns)
        }
        fn load_limits(&self, username: &str) -> crate::errors::Result<LimitsMap> {
            self.inner.load_limits(username)
        }
        fn save_limits(&self, username: &str, limits: &LimitsMap) -> crate::errors::Result<()> {
            self.inner.save_limits(username, limits)
        }
        fn list_known_usernames(&self) -> crate::errors::Result<BTreeSet<String>> {
            self.inner.list_known_usernames()
        }
        fn register_user(&self, username: &str) -> crate::errors::Result<()> {
            self.inner.register_user(username)
        }
    }

    fn summary(income: i64, expense: i64) -> PeriodSummary {
        PeriodSummary {
            income: Decimal::new(income, 0),
            expense: Decimal::new(expense, 0),
            net: Decimal::new(income - expense, 0),
            by_category: BTreeMap::new(),
            transaction_count: 1,
        }
    }

    fn order(entries: &[LeaderboardEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.username.as_str()).collect()
    }

    #[test]
    fn net_ties_break_on_income() {
        let summaries = BTreeMap::from([
            ("C".to_string(), summary(900, 850)),
            ("B".to_string(), summary(300, 200)),
            ("A".to_string(), summary(500, 400)),
        ]);
        let ranked = LeaderboardService::rank(&summaries);
        assert_eq!(order(&ranked), vec!["A", "B", "C"]);
        assert_eq!(
            ranked.iter().map(|entry| entry.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn full_ties_fall_back_to_username() {
        let summaries = BTreeMap::from([
            ("zoe".to_string(), summary(100, 50)),
            ("amir".to_string(), summary(100, 50)),
        ]);
        let ranked = LeaderboardService::rank(&summaries);
        assert_eq!(order(&ranked), vec!["amir", "zoe"]);
        assert_eq!(ranked[1].rank, 2);
    }

    #[test]
    fn lower_expense_wins_when_net_and_income_tie() {
        // Equal net and income imply equal expense, so build the tie by hand.
        let mut cheap = summary(100, 10);
        cheap.net = Decimal::new(50, 0);
        let mut pricey = summary(100, 40);
        pricey.net = Decimal::new(50, 0);
        let summaries =
            BTreeMap::from([("a".to_string(), pricey), ("b".to_string(), cheap)]);
        assert_eq!(order(&LeaderboardService::rank(&summaries)), vec!["b", "a"]);
    }

    #[test]
    fn empty_input_ranks_nobody() {
        assert!(LeaderboardService::rank(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn panicking_fetch_lands_in_skipped() {
        let at = Local
            .with_ymd_and_hms(2024, 6, 10, 12, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc);
        let store = PanicsOn {
            inner: MemoryStorage::new(),
            user: "big",
        };
        store.register_user("big").unwrap();
        store.register_user("small").unwrap();
        let income =
            Transaction::new(TransactionKind::Income, Decimal::new(40, 0), Category::Other, "", at)
                .unwrap();
        store.save_transactions("small", &[income]).unwrap();

        let board = LeaderboardService::build(&store, MonthKey::of(at)).unwrap();
        assert_eq!(order(&board.entries), vec!["small"]);
        assert_eq!(board.skipped, vec!["big".to_string()]);
    }

    #[test]
    fn unavailable_users_are_skipped_not_fatal() {
        let store = MemoryStorage::new();
        store.register_user("ann").unwrap();
        store.register_user("bo").unwrap();
        store.mark_unavailable("bo").unwrap();

        let month: MonthKey = "2024-06".parse().unwrap();
        let board = LeaderboardService::build(&store, month).unwrap();
        assert_eq!(order(&board.entries), vec!["ann"]);
        assert_eq!(board.skipped, vec!["bo".to_string()]);
    }
}
