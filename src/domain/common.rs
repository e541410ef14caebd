use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

/// Number of fraction digits kept for currency amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Rounds to currency minor units, half away from zero (19.999 -> 20.00).
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders an amount as `$1,234.50` or `-$12.00` using the supplied symbol.
pub fn format_money_with(amount: Decimal, symbol: &str) -> String {
    let rounded = round_currency(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}{symbol}{}.{fraction}", group_thousands(whole))
}

/// Renders an amount with the default `$` symbol.
pub fn format_money(amount: Decimal) -> String {
    format_money_with(amount, "$")
}

/// Whole-number percentage of `part` in `total`, rounded half away from zero.
pub fn percent_of(part: Decimal, total: Decimal) -> i64 {
    if total.is_zero() {
        return 0;
    }
    (part / total * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
