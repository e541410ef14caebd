use rust_decimal::Decimal;

use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::{
    services::{LeaderboardService, MAX_COMPARISON_MONTHS},
    Clock,
};
use crate::domain::{common::percent_of, format_money_with, MonthKey, TipMode};

use super::{parse_amount, parse_month, usage_error};

const COMPARE_USAGE: &str = "compare [months 1-120]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Income, expense and category totals for a month",
            "summary [YYYY-MM]",
            cmd_summary,
        ),
        CommandEntry::new(
            "tips",
            "Spending advice for the current month",
            "tips [live|strict|comfort]",
            cmd_tips,
        ),
        CommandEntry::new(
            "mode",
            "Show or change the default tip mode",
            "mode [live|strict|comfort]",
            cmd_mode,
        ),
        CommandEntry::new(
            "compare",
            "Month-over-month totals, newest first",
            COMPARE_USAGE,
            cmd_compare,
        ),
        CommandEntry::new(
            "budget",
            "Remaining budget and daily allowance for this month",
            "budget [total]",
            cmd_budget,
        ),
        CommandEntry::new(
            "leaderboard",
            "Rank every user by net savings for a month",
            "leaderboard [YYYY-MM]",
            cmd_leaderboard,
        ),
    ]
}

fn signed_money(amount: Decimal, symbol: &str) -> String {
    output::signed(format_money_with(amount, symbol), amount.is_sign_negative())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let session = context.session()?;
    let month = parse_month(args.first(), session.current_month())?;
    let summary = session.summary(month);
    let symbol = context.symbol();

    output::section(format!("Summary for {month}"));
    output::info(format!("  Income : {}", format_money_with(summary.income, symbol)));
    output::info(format!("  Expense: {}", format_money_with(summary.expense, symbol)));
    output::info(format!("  Net    : {}", signed_money(summary.net, symbol)));
    if summary.expense.is_zero() {
        output::info("No expenses recorded.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Spent"),
        TableColumn::right("Share"),
        TableColumn::right("Limit"),
    ]);
    for (category, spent) in &summary.by_category {
        if spent.is_zero() {
            continue;
        }
        let limit = session
            .limits()
            .get(*category)
            .map(|limit| format_money_with(limit, symbol))
            .unwrap_or_else(|| "-".into());
        table.push(vec![
            category.to_string(),
            format_money_with(*spent, symbol),
            format!("{}%", percent_of(*spent, summary.expense)),
            limit,
        ]);
    }
    output::info(table.render());
    Ok(())
}

fn cmd_tips(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mode = match args.first() {
        Some(raw) => raw.parse::<TipMode>()?,
        None => context.config.tip_mode,
    };
    let session = context.session()?;
    output::section(format!("Tips ({mode} mode)"));
    for tip in session.tips(mode, context.symbol()) {
        output::info(output::tip_line(tip.severity, &tip.title, &tip.text));
    }
    Ok(())
}

fn cmd_mode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        output::info(format!("Tip mode: {}", context.config.tip_mode));
        return Ok(());
    };
    context.config.tip_mode = raw.parse()?;
    context.save_config()?;
    output::success(format!("Tip mode set to {}.", context.config.tip_mode));
    Ok(())
}

fn cmd_compare(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let months = match args.first() {
        Some(raw) => raw
            .parse::<usize>()
            .ok()
            .filter(|months| (1..=MAX_COMPARISON_MONTHS).contains(months))
            .ok_or_else(|| usage_error(COMPARE_USAGE))?,
        None => context.config.comparison_months,
    };
    let session = context.session()?;
    let symbol = context.symbol();

    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::right("Income"),
        TableColumn::right("Expense"),
        TableColumn::right("Net"),
    ]);
    for row in session.comparison(months) {
        table.push(vec![
            row.month.to_string(),
            format_money_with(row.income, symbol),
            format_money_with(row.expense, symbol),
            format_money_with(row.net, symbol),
        ]);
    }
    output::section("Monthly comparison");
    output::info(table.render());
    Ok(())
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let total = match args.first() {
        Some(raw) => {
            let total = parse_amount(raw)?;
            // Validate before remembering it.
            context.session()?.budget(total)?;
            context.config.monthly_budget = Some(total);
            context.save_config()?;
            total
        }
        None => context
            .config
            .monthly_budget
            .ok_or_else(|| usage_error("budget <total> (no saved budget yet)"))?,
    };

    let report = context.session()?.budget(total)?;
    let symbol = context.symbol();
    output::section(format!("Budget for {}", context.session()?.current_month()));
    output::info(format!("  Budget         : {}", format_money_with(report.total, symbol)));
    output::info(format!(
        "  Remaining      : {}",
        signed_money(report.remaining, symbol)
    ));
    output::info(format!("  Days left      : {}", report.days_left));
    output::info(format!(
        "  Daily allowance: {}",
        signed_money(report.daily_allowance, symbol)
    ));
    Ok(())
}

fn cmd_leaderboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let current = MonthKey::of(context.clock.now());
    let month = parse_month(args.first(), current)?;
    let board = LeaderboardService::build(context.store.as_ref(), month)?;
    let symbol = context.symbol();

    output::section(format!("Leaderboard for {month}"));
    if board.entries.is_empty() {
        output::info("No users to rank.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::right("#"),
            TableColumn::left("User").truncated(24),
            TableColumn::right("Income"),
            TableColumn::right("Expense"),
            TableColumn::right("Net"),
        ]);
        for entry in &board.entries {
            table.push(vec![
                entry.rank.to_string(),
                entry.username.clone(),
                format_money_with(entry.income, symbol),
                format_money_with(entry.expense, symbol),
                format_money_with(entry.net, symbol),
            ]);
        }
        output::info(table.render());
    }
    for name in &board.skipped {
        output::warning(format!("Skipped `{name}`: records could not be loaded."));
    }
    Ok(())
}
