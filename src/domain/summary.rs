//! Derived reporting values. None of these are persisted.

use std::{collections::BTreeMap, fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{category::Category, period::MonthKey};
use crate::errors::TrackerError;

/// Totals for a set of transactions, typically one month.
///
/// `net == income - expense` and `expense` equals the sum of `by_category`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub by_category: BTreeMap<Category, Decimal>,
    pub transaction_count: usize,
}

impl PeriodSummary {
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    pub fn spent_in(&self, category: Category) -> Decimal {
        self.by_category
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// One row of the month-over-month comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyComparison {
    pub month: MonthKey,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Positioned leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub username: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipSeverity {
    Good,
    Warn,
    Bad,
}

impl fmt::Display for TipSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TipSeverity::Good => "good",
            TipSeverity::Warn => "warn",
            TipSeverity::Bad => "bad",
        };
        f.write_str(label)
    }
}

/// Advisory message produced by the tip rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tip {
    pub title: String,
    pub text: String,
    pub severity: TipSeverity,
}

impl Tip {
    pub fn new(severity: TipSeverity, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            severity,
        }
    }
}

/// Selects the threshold table and phrasing used for tips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipMode {
    #[default]
    Live,
    Strict,
    Comfort,
}

impl TipMode {
    pub const ALL: [TipMode; 3] = [TipMode::Live, TipMode::Strict, TipMode::Comfort];
}

impl fmt::Display for TipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TipMode::Live => "live",
            TipMode::Strict => "strict",
            TipMode::Comfort => "comfort",
        };
        f.write_str(label)
    }
}

impl FromStr for TipMode {
    type Err = TrackerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        TipMode::ALL
            .into_iter()
            .find(|mode| mode.to_string().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| {
                TrackerError::validation(format!(
                    "unknown tip mode '{raw}', expected live, strict or comfort"
                ))
            })
    }
}
