// Money parsing and display
//
// Amounts are decimals at cents resolution. User input never reaches balance
// arithmetic without going through `parse_amount`.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{BankError, Result};

/// Largest number of fractional digits accepted from user input
pub const MAX_FRACTION_DIGITS: u32 = 2;

/// Parse an amount typed by the user.
///
/// Accepts surrounding whitespace and an optional leading currency symbol
/// (`"$ 12.50"`, `"12.5"`, `"100"`). Sign is preserved so callers can report
/// a negative amount as such instead of as garbage.
pub fn parse_amount(input: &str, currency_symbol: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    let unprefixed = if currency_symbol.is_empty() {
        trimmed
    } else {
        trimmed
            .strip_prefix(currency_symbol)
            .map(str::trim_start)
            .unwrap_or(trimmed)
    };

    if unprefixed.is_empty() {
        return Err(BankError::MalformedAmount(input.trim().to_string()));
    }

    let amount = Decimal::from_str(unprefixed)
        .map_err(|_| BankError::MalformedAmount(input.trim().to_string()))?
        .normalize();

    if amount.scale() > MAX_FRACTION_DIGITS {
        return Err(BankError::MalformedAmount(input.trim().to_string()));
    }

    Ok(amount)
}

/// Render an amount with its currency symbol and exactly two decimals
///
/// Example: `format_amount("$", 150)` → `"$150.00"`
pub fn format_amount(currency_symbol: &str, amount: Decimal) -> String {
    // Precision formatting pads with zeros, which also works at Decimal::MAX
    // where there is no room to rescale
    let display = amount.round_dp(MAX_FRACTION_DIGITS);
    format!(
        "{}{:.prec$}",
        currency_symbol,
        display,
        prec = MAX_FRACTION_DIGITS as usize
    )
}
