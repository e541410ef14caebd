use std::fs;

use chrono::Local;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::SummaryService;
use crate::domain::{
    format_money_with, Category, Displayable, Transaction, TransactionEdit, TransactionKind,
};

use super::{parse_amount, parse_category, parse_month, usage_error};

const ADD_USAGE: &str = "add <income|expense> <amount> [category] [note...]";
const EDIT_USAGE: &str = "edit <id> <amount|category|note> <value...>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "list",
            "List transactions for a month, or all of them",
            "list [YYYY-MM|all]",
            cmd_list,
        ),
        CommandEntry::new("edit", "Change one field of a transaction", EDIT_USAGE, cmd_edit),
        CommandEntry::new("remove", "Delete a transaction", "remove <id>", cmd_remove),
        CommandEntry::new("seed", "Add six example transactions", "seed", cmd_seed),
        CommandEntry::new("reset", "Delete all of your transactions", "reset", cmd_reset),
        CommandEntry::new(
            "import",
            "Import transactions from a JSON array file",
            "import <file>",
            cmd_import,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (kind, amount) = match args {
        [kind, amount, ..] => (
            TransactionKind::parse(kind).ok_or_else(|| usage_error(ADD_USAGE))?,
            parse_amount(amount)?,
        ),
        _ => return Err(usage_error(ADD_USAGE)),
    };
    let category = match args.get(2) {
        Some(raw) => parse_category(raw)?,
        None => Category::Other,
    };
    let note = args.get(3..).map(|rest| rest.join(" ")).unwrap_or_default();

    let symbol = context.symbol().to_string();
    let session = context.session_mut()?;
    let id = session.add(kind, amount, category, &note)?;
    output::success(format!(
        "Added {kind} {} in {category} ({}).",
        format_money_with(amount, &symbol),
        short_id(&id.to_string())
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let session = context.session()?;
    let (title, rows): (String, Vec<Transaction>) = match args.first() {
        Some(&"all") => ("All transactions".into(), session.transactions().to_vec()),
        other => {
            let month = parse_month(other, session.current_month())?;
            (
                format!("Transactions for {month}"),
                SummaryService::filter_by_month(session.transactions(), month),
            )
        }
    };

    output::section(title);
    if rows.is_empty() {
        output::info("No transactions.");
        return Ok(());
    }
    output::info(transaction_table(&rows, context.symbol()).render());
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [fragment, field, value @ ..] = args else {
        return Err(usage_error(EDIT_USAGE));
    };
    let value = value.join(" ");
    let edit = match field.to_ascii_lowercase().as_str() {
        "amount" => TransactionEdit::Amount(parse_amount(&value)?),
        "category" => TransactionEdit::Category(parse_category(&value)?),
        "note" => TransactionEdit::Note(value),
        _ => return Err(usage_error(EDIT_USAGE)),
    };

    let session = context.session_mut()?;
    let id = session.resolve_id(fragment)?;
    session.edit(id, edit)?;
    output::success(format!("Updated transaction {}.", short_id(&id.to_string())));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [fragment] = args else {
        return Err(usage_error("remove <id>"));
    };
    let session = context.session_mut()?;
    let id = session.resolve_id(fragment)?;
    let removed = session.remove(id)?;
    output::success(format!("Removed {}.", removed.display_label()));
    Ok(())
}

fn cmd_seed(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let added = context.session_mut()?.seed_examples()?;
    output::success(format!("Added {added} example transactions."));
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = context.session()?;
    let prompt = format!(
        "Delete all {} transactions for {}?",
        session.transactions().len(),
        session.username()
    );
    if !context.confirm(&prompt)? {
        output::info("Reset cancelled.");
        return Ok(());
    }
    let removed = context.session_mut()?.clear()?;
    output::success(format!("Deleted {removed} transactions."));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [path] = args else {
        return Err(usage_error("import <file>"));
    };
    let session = context.session_mut()?;
    let raw = fs::read_to_string(path).map_err(|err| {
        CommandError::InvalidArguments(format!("cannot read `{path}`: {err}"))
    })?;
    let report = session.import_str(&raw)?;
    if report.accepted == 0 {
        output::warning(format!(
            "No valid transactions found ({} skipped).",
            report.skipped
        ));
    } else {
        output::success(format!(
            "Imported {} transactions ({} skipped).",
            report.accepted, report.skipped
        ));
    }
    Ok(())
}

fn transaction_table(rows: &[Transaction], symbol: &str) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Type"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::left("Note").truncated(32),
    ]);
    for txn in rows {
        table.push(vec![
            short_id(&txn.id.to_string()),
            txn.timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d")
                .to_string(),
            txn.kind.to_string(),
            txn.category.to_string(),
            format_money_with(txn.amount, symbol),
            txn.note.clone(),
        ]);
    }
    table
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
