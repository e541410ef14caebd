use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::domain::format_money_with;

use super::{parse_amount, parse_category, usage_error};

const LIMIT_USAGE: &str = "limit set <category> <amount> | limit clear <category> | limit clear-all";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "limit",
            "Set or clear a monthly category spending limit",
            LIMIT_USAGE,
            cmd_limit,
        ),
        CommandEntry::new(
            "limits",
            "Show category limits against this month's spending",
            "limits",
            cmd_limits,
        ),
    ]
}

fn cmd_limit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let symbol = context.symbol().to_string();
    let session = context.session_mut()?;
    match args {
        ["set", category, amount] => {
            let category = parse_category(category)?;
            let stored = session.set_limit(category, parse_amount(amount)?)?;
            output::success(format!(
                "{category} limit set to {}.",
                format_money_with(stored, &symbol)
            ));
        }
        ["clear", category] => {
            let category = parse_category(category)?;
            match session.clear_limit(category)? {
                Some(_) => output::success(format!("{category} limit cleared.")),
                None => output::info(format!("{category} had no limit.")),
            }
        }
        ["clear-all"] => {
            session.clear_limits()?;
            output::success("All limits cleared.");
        }
        _ => return Err(usage_error(LIMIT_USAGE)),
    }
    Ok(())
}

fn cmd_limits(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session()?;
    let symbol = context.symbol();
    if session.limits().is_empty() {
        output::info("No limits set.");
        return Ok(());
    }

    let summary = session.current_summary();
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Limit"),
        TableColumn::right("Spent"),
        TableColumn::left("Status"),
    ]);
    for (category, limit) in session.limits().iter() {
        let spent = summary.spent_in(category);
        let status = if spent > limit { "over" } else { "ok" };
        table.push(vec![
            category.to_string(),
            format_money_with(limit, symbol),
            format_money_with(spent, symbol),
            status.to_string(),
        ]);
    }
    output::section(format!("Limits for {}", session.current_month()));
    output::info(table.render());
    Ok(())
}
