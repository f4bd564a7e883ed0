//! Shared arithmetic and display helpers for the PAYE engine.
//!
//! Monetary values are carried as [`Decimal`] throughout, so the only places
//! that lose precision are the explicit roundings performed here.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of months used to derive monthly figures from annual ones.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Rounds a decimal value to exactly two decimal places (kobo) using half-up
/// rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(416666.666)), dec!(416666.67));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two decimal values.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Clamps a value to be non-negative.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// Splits an annual amount into a monthly one, rounded to kobo.
pub fn to_monthly(annual: Decimal) -> Decimal {
    round_half_up(annual / Decimal::from(MONTHS_PER_YEAR))
}

/// Formats a value with comma thousands separators and a fixed number of
/// decimal places (half-up).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::format_grouped;
///
/// assert_eq!(format_grouped(dec!(2200000), 0), "2,200,000");
/// assert_eq!(format_grouped(dec!(358833.333), 2), "358,833.33");
/// assert_eq!(format_grouped(dec!(-1234.5), 2), "-1,234.50");
/// ```
pub fn format_grouped(
    value: Decimal,
    decimal_places: u32,
) -> String {
    let rounded =
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimal_places as usize, rounded.abs());
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + whole.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Formats a bracket boundary: whole amounts without decimals, fractional
/// amounts with two.
pub fn format_boundary(value: Decimal) -> String {
    let places = if value.fract().is_zero() { 0 } else { 2 };
    format_grouped(value, places)
}
