use std::str::FromStr;

use rust_decimal::Decimal;

pub mod limit;
pub mod report;
pub mod system;
pub mod transaction;
pub mod user;

use crate::cli::context::CommandError;
use crate::cli::registry::CommandEntry;
use crate::domain::{Category, MonthKey};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(user::definitions());
    commands.extend(transaction::definitions());
    commands.extend(report::definitions());
    commands.extend(limit::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, CommandError> {
    Decimal::from_str(raw.trim().trim_start_matches('$'))
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid amount")))
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, CommandError> {
    Category::from_label(raw).ok_or_else(|| {
        let labels: Vec<&str> = Category::ALL.iter().map(|category| category.label()).collect();
        CommandError::InvalidArguments(format!(
            "unknown category `{raw}` (choose one of: {})",
            labels.join(", ")
        ))
    })
}

/// Parses an optional `YYYY-MM` argument, defaulting to `current`.
pub(crate) fn parse_month(raw: Option<&&str>, current: MonthKey) -> Result<MonthKey, CommandError> {
    match raw {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_a_leading_symbol() {
        assert_eq!(parse_amount("$12.5").unwrap(), Decimal::new(125, 1));
        assert!(parse_amount("twelve").is_err());
    }

    #[test]
    fn unknown_category_lists_choices() {
        let err = parse_category("Rent").expect_err("not a category");
        assert!(err.to_string().contains("Necessities"));
        assert_eq!(parse_category("food & drinks").unwrap(), Category::FoodAndDrinks);
    }

    #[test]
    fn every_command_name_is_unique() {
        let definitions = all_definitions();
        let mut names: Vec<_> = definitions.iter().map(|entry| entry.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), definitions.len());
    }
}
