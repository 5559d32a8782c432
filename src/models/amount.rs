use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;

/// Amounts are currency values with at most this many decimal places.
pub const AMOUNT_SCALE: u32 = 2;

/// Exclusive upper bound on a single amount. Below it a two-decimal value has
/// at most 14 significant digits, which an SQLite `REAL` stores exactly.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Parse a positive currency amount typed by the user.
///
/// A leading currency symbol and thousands separators are accepted
/// (`"₹1,250.50"`). `field` names the input in error messages.
pub fn parse_amount(field: &'static str, input: &str) -> Result<Decimal, ValidationError> {
    let cleaned: String = input
        .trim()
        .trim_start_matches(['₹', '$'])
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Err(ValidationError::MissingAmount { field });
    }

    let amount = Decimal::from_str(cleaned.trim()).map_err(|_| ValidationError::InvalidAmount {
        field,
        input: input.trim().to_string(),
    })?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositive { field });
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(ValidationError::TooPrecise { field });
    }
    if amount >= MAX_AMOUNT {
        return Err(ValidationError::TooLarge { field });
    }
    Ok(amount)
}
