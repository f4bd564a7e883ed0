//! Display formatting for naira amounts and rates.

use paye_core::NAIRA;
use paye_core::calculations::common::format_grouped;
use rust_decimal::Decimal;

/// Formats an amount as `₦1,234,567.89`: two decimal places, half-up, with
/// comma grouping. Negative amounts carry a leading `-`.
pub fn format_currency(amount: Decimal) -> String {
    let grouped = format_grouped(amount.abs(), 2);
    if amount.is_sign_negative() && grouped != "0.00" {
        format!("-{NAIRA}{grouped}")
    } else {
        format!("{NAIRA}{grouped}")
    }
}

/// Formats a fractional rate as a whole percentage (`0.15` -> `15%`).
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", format_grouped(rate * Decimal::ONE_HUNDRED, 0))
}
