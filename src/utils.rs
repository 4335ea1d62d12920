use crate::error::{IncomeStatementError, Result};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest single amount or inventory value accepted: 1,000,000,000,000,000.
///
/// Sums of values under this ceiling stay far inside `Decimal`'s range for any
/// transaction list that fits in memory.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, ISO_DATE_FORMAT).map_err(|e| {
        IncomeStatementError::Parse {
            input: input.to_string(),
            details: format!("expected YYYY-MM-DD ({})", e),
        }
    })
}

/// Checks `0 <= value <= MAX_AMOUNT` for an amount or inventory figure.
pub fn validate_amount(field: &str, value: Decimal) -> Result<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(IncomeStatementError::validation(
            field,
            format!("{} is negative; must be >= 0", value),
        ));
    }
    if value > MAX_AMOUNT {
        return Err(IncomeStatementError::validation(
            field,
            format!("{} exceeds the maximum of {}", value, MAX_AMOUNT),
        ));
    }
    Ok(value)
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// `2025-01-01 to 2025-01-31`
pub fn format_period(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} to {}", format_iso_date(start), format_iso_date(end))
}

/// Rounds to cents the way the statement displays them.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as `$#,##0.00`, with negatives rendered `-$1,500.00`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_currency(value);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}${}.{}", sign, grouped, cents)
}
