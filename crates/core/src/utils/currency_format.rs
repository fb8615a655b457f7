use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Currency symbol used in user-facing messages.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Formats an amount with the rupee symbol and Indian digit grouping
/// (`₹9,99,005`, `₹1,23,456.5`). Trailing zero decimals are dropped.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let grouped = group_indian(int_part);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{CURRENCY_SYMBOL}{grouped}.{frac}"),
        None => format!("{sign}{CURRENCY_SYMBOL}{grouped}"),
    }
}

// Last three digits form one group, everything before is grouped in pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut pairs: Vec<&str> = head
        .as_bytes()
        .rchunks(2)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect();
    pairs.reverse();
    format!("{},{}", pairs.join(","), tail)
}
