//! Monthly budget arithmetic.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::domain::{period::days_in_month, round_currency, PeriodSummary};
use crate::errors::{Result, TrackerError};

/// What is left of a monthly budget and how much may be spent per remaining day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetReport {
    pub total: Decimal,
    pub remaining: Decimal,
    pub days_left: u32,
    pub daily_allowance: Decimal,
}

pub struct BudgetService;

impl BudgetService {
    /// `total_budget - current_expense`. Negative when overspent.
    pub fn remaining(total_budget: Decimal, current_expense: Decimal) -> Decimal {
        total_budget - current_expense
    }

    /// Days from `day_of_month` through month end, inclusive, never below one.
    pub fn days_left(day_of_month: u32, days_in_month: u32) -> u32 {
        (i64::from(days_in_month) - i64::from(day_of_month) + 1).max(1) as u32
    }

    /// Remaining budget spread evenly over the days left, today included.
    pub fn daily_allowance_for(
        total_budget: Decimal,
        current_expense: Decimal,
        day_of_month: u32,
        days_in_month: u32,
    ) -> Decimal {
        let days_left = Self::days_left(day_of_month, days_in_month);
        Self::remaining(total_budget, current_expense) / Decimal::from(days_left)
    }

    /// [`BudgetService::daily_allowance_for`] with the month length taken from `today`.
    pub fn daily_allowance(
        total_budget: Decimal,
        current_expense: Decimal,
        today: NaiveDate,
    ) -> Decimal {
        Self::daily_allowance_for(
            total_budget,
            current_expense,
            today.day(),
            days_in_month(today.year(), today.month()),
        )
    }

    /// Validates the budget and computes both figures against this month's summary.
    pub fn report(
        total_budget: Decimal,
        summary: &PeriodSummary,
        today: NaiveDate,
    ) -> Result<BudgetReport> {
        if total_budget <= Decimal::ZERO {
            return Err(TrackerError::validation(
                "Enter a total monthly budget greater than 0.",
            ));
        }
        let days_left = Self::days_left(today.day(), days_in_month(today.year(), today.month()));
        Ok(BudgetReport {
            total: total_budget,
            remaining: Self::remaining(total_budget, summary.expense),
            days_left,
            daily_allowance: round_currency(Self::daily_allowance(
                total_budget,
                summary.expense,
                today,
            )),
        })
    }
}
