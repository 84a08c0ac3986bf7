use super::error::FiscalError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Largest magnitude accepted for an input amount.
///
/// Sums of any realistic number of such amounts stay far inside the range
/// of `Decimal`.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000000);

/// Check an input amount lies within `-MAX_AMOUNT..=MAX_AMOUNT`.
pub fn ensure_amount(field: &str, amount: Decimal) -> Result<Decimal, FiscalError> {
    if amount.abs() > MAX_AMOUNT {
        return Err(FiscalError::validation(
            field,
            format!("{amount} exceeds the maximum amount {MAX_AMOUNT}"),
        ));
    }
    Ok(amount)
}

pub(crate) fn overflow(field: &str) -> FiscalError {
    FiscalError::validation(field, "arithmetic overflow")
}

/// Sum amounts, failing instead of overflowing.
pub fn checked_sum<I>(field: &str, amounts: I) -> Result<Decimal, FiscalError>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).ok_or_else(|| overflow(field))
    })
}

/// Check a rate lies within `0..=1`.
pub fn ensure_rate(field: &str, rate: Decimal) -> Result<Decimal, FiscalError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(FiscalError::Configuration(format!(
            "{field} must be between 0 and 1, got {rate}"
        )));
    }
    Ok(rate)
}

/// Format an amount with two decimal places and thousands separators.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}.{frac_part}")
    } else {
        format!("{grouped}.{frac_part}")
    }
}

/// Format a rate as a percentage (0.032 -> "3.2%").
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
