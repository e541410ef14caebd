//! Rule-based advisory tips.
//!
//! Rules run in a fixed order and every applicable rule contributes a tip,
//! except that an empty period short-circuits with a single warning and only
//! the first exceeded category limit is reported.

use rust_decimal::Decimal;

use crate::domain::{
    common::percent_of, format_money_with, Category, LimitsMap, PeriodSummary, Tip, TipMode,
    TipSeverity,
};

/// Share of total expense above which a category triggers a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipThresholds {
    pub unnecessary: Decimal,
    pub subscriptions: Decimal,
    pub food: Decimal,
}

impl TipThresholds {
    /// Threshold table keyed by mode. Strict warns sooner, comfort later.
    pub fn for_mode(mode: TipMode) -> Self {
        match mode {
            TipMode::Live => Self::percents(25, 12, 30),
            TipMode::Strict => Self::percents(18, 10, 25),
            TipMode::Comfort => Self::percents(30, 16, 35),
        }
    }

    fn percents(unnecessary: i64, subscriptions: i64, food: i64) -> Self {
        Self {
            unnecessary: Decimal::new(unnecessary, 2),
            subscriptions: Decimal::new(subscriptions, 2),
            food: Decimal::new(food, 2),
        }
    }
}

pub struct TipService;

impl TipService {
    pub fn generate(summary: &PeriodSummary, limits: &LimitsMap, mode: TipMode) -> Vec<Tip> {
        Self::generate_with_symbol(summary, limits, mode, "$")
    }

    /// Same as [`TipService::generate`] with amounts rendered using `symbol`.
    pub fn generate_with_symbol(
        summary: &PeriodSummary,
        limits: &LimitsMap,
        mode: TipMode,
        symbol: &str,
    ) -> Vec<Tip> {
        let money = |amount: Decimal| format_money_with(amount, symbol);

        if summary.is_empty() {
            return vec![Tip::new(
                TipSeverity::Warn,
                "No data yet",
                "Add a few transactions to unlock recommendations and analytics.",
            )];
        }

        let mut tips = Vec::new();
        tips.push(net_tip(summary.net, mode, &money(summary.net)));

        let total = summary.expense;
        if total > Decimal::ZERO {
            let thresholds = TipThresholds::for_mode(mode);

            let unnecessary = summary.spent_in(Category::Unnecessary);
            if unnecessary / total > thresholds.unnecessary {
                tips.push(Tip::new(
                    TipSeverity::Warn,
                    "Unnecessary spending is high",
                    format!(
                        "Unnecessary is {} ({}%). Try a 48-hour rule before buying.",
                        money(unnecessary),
                        percent_of(unnecessary, total)
                    ),
                ));
            }

            let subscriptions = summary.spent_in(Category::Subscriptions);
            if subscriptions / total > thresholds.subscriptions {
                tips.push(Tip::new(
                    TipSeverity::Warn,
                    "Subscriptions are rising",
                    format!(
                        "Subscriptions are {}. Cancel or rotate services you don't use weekly.",
                        money(subscriptions)
                    ),
                ));
            }

            let food = summary.spent_in(Category::FoodAndDrinks);
            if food / total > thresholds.food {
                tips.push(Tip::new(
                    TipSeverity::Warn,
                    "Food & Drinks is a big chunk",
                    format!(
                        "Food & Drinks is {}. Meal-prep 3 days a week or cap takeout.",
                        money(food)
                    ),
                ));
            }
        }

        if let Some((category, limit, spent)) = first_exceeded_limit(summary, limits) {
            tips.push(Tip::new(
                TipSeverity::Bad,
                "Category limit exceeded",
                format!(
                    "{category} limit: {} • spent: {}. Pause spending here until next month.",
                    money(limit),
                    money(spent)
                ),
            ));
        }

        tips
    }
}

fn net_tip(net: Decimal, mode: TipMode, formatted: &str) -> Tip {
    if net < Decimal::ZERO {
        let advice = match mode {
            TipMode::Strict => "Cut non-essentials aggressively this week.",
            TipMode::Live | TipMode::Comfort => "Trim Unnecessary and Subscriptions this week.",
        };
        Tip::new(
            TipSeverity::Bad,
            "Spending exceeds income",
            format!("Net is {formatted}. {advice}"),
        )
    } else {
        let advice = match mode {
            TipMode::Comfort => "Enjoy a bit, but stay within limits.",
            TipMode::Live | TipMode::Strict => {
                "Consider auto-moving a portion into Savings/Investing."
            }
        };
        Tip::new(
            TipSeverity::Good,
            "Net positive",
            format!("Net is {formatted}. {advice}"),
        )
    }
}

/// First limit, in category order, whose spending is strictly above the ceiling.
fn first_exceeded_limit(
    summary: &PeriodSummary,
    limits: &LimitsMap,
) -> Option<(Category, Decimal, Decimal)> {
    limits
        .iter()
        .filter(|(_, limit)| *limit > Decimal::ZERO)
        .map(|(category, limit)| (category, limit, summary.spent_in(category)))
        .find(|(_, limit, spent)| spent > limit)
}
