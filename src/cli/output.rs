use colored::Colorize;
use std::fmt;

use crate::domain::TipSeverity;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

/// Disables ANSI styling, used when stdout is driven by a script.
pub fn disable_colors() {
    colored::control::set_override(false);
}

fn icon(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Success => "[ok]",
        MessageKind::Warning => "[!]",
        MessageKind::Error => "[x]",
        MessageKind::Hint => "hint:",
        MessageKind::Info | MessageKind::Section => "",
    }
}

pub(crate) fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Info => text,
        _ => format!("{} {}", icon(kind), text),
    };

    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Hint => base.dimmed().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Colors a signed amount: green when positive, red when negative.
pub fn signed(text: String, negative: bool) -> String {
    if negative {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

/// Renders a tip as a severity-tagged headline followed by its text.
pub fn tip_line(severity: TipSeverity, title: &str, text: &str) -> String {
    let tag = format!("[{severity}]");
    let tag = match severity {
        TipSeverity::Good => tag.bright_green(),
        TipSeverity::Warn => tag.bright_yellow(),
        TipSeverity::Bad => tag.bright_red(),
    };
    format!("{tag} {} - {text}", title.bold())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_styles_carry_icons() {
        disable_colors();
        assert_eq!(apply_style(MessageKind::Error, "boom"), "[x] boom");
        assert_eq!(apply_style(MessageKind::Section, " Summary "), "=== Summary ===");
        assert_eq!(apply_style(MessageKind::Info, "plain"), "plain");
        assert_eq!(
            tip_line(TipSeverity::Warn, "No data yet", "Add a transaction"),
            "[warn] No data yet - Add a transaction"
        );
    }
}
