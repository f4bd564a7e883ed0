//! Raw user input: sanitizing, annualizing and validating the figures typed
//! into the form before they reach the engine.

use std::fmt;
use std::sync::LazyLock;

use clap::ValueEnum;
use paye_core::calculations::common::format_grouped;
use paye_core::{DeductionSet, PayeInput};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Largest annual gross income accepted (one quadrillion naira).
pub const MAX_ANNUAL_GROSS: Decimal = Decimal::from_parts(2764472320, 232830, 0, false, 0);

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("static pattern is valid"));

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*(\.\d*)?").expect("static pattern is valid"));

/// Errors raised while turning form input into engine input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a valid {period} gross salary.")]
    NonPositiveGross { period: Period },

    #[error("annual gross income exceeds the supported maximum of {max}")]
    GrossTooLarge { max: String },

    #[error("annual {field} deduction exceeds the supported maximum of {max}")]
    DeductionTooLarge { field: &'static str, max: String },
}

/// Period the figures were entered for. The engine always works on annual
/// amounts; monthly input is multiplied by twelve.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Monthly,
    Annual,
}

impl Period {
    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::Monthly => Decimal::from(12),
            Self::Annual => Decimal::ONE,
        }
    }

    /// Converts `amount` to an annual figure; `None` when it overflows.
    pub fn annualize(
        &self,
        amount: Decimal,
    ) -> Option<Decimal> {
        amount.checked_mul(self.multiplier())
    }

    /// Abbreviation used in summary rows ("Mo" / "Yr").
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Monthly => "Mo",
            Self::Annual => "Yr",
        }
    }

    pub fn is_monthly(&self) -> bool {
        matches!(self, Self::Monthly)
    }
}

impl fmt::Display for Period {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        })
    }
}

/// Parses a naira amount the way the form fields do.
///
/// Every character other than digits and `.` is dropped (so `"₦1,250,000"`
/// reads as 1250000), then the longest leading number is taken. Anything that
/// does not yield a number is treated as zero.
pub fn parse_naira_input(value: &str) -> Decimal {
    let sanitized = NON_NUMERIC.replace_all(value, "");
    let number = LEADING_NUMBER
        .find(&sanitized)
        .map(|m| m.as_str().trim_end_matches('.'))
        .unwrap_or_default();

    if number.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = if number.starts_with('.') {
        format!("0{number}")
    } else {
        number.to_string()
    };

    match normalized.parse::<Decimal>() {
        Ok(amount) => {
            if sanitized != value {
                debug!(input = %value, %amount, "sanitized naira input");
            }
            amount
        }
        Err(error) => {
            warn!(input = %value, %error, "unparseable naira input, using zero");
            Decimal::ZERO
        }
    }
}

/// The form as typed: every field is raw text in the chosen period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayeForm {
    pub gross: String,
    pub pension: String,
    pub nhf: String,
    pub nhis: String,
    pub insurance: String,
    pub rent: String,
}

impl PayeForm {
    pub fn with_gross(gross: impl Into<String>) -> Self {
        Self {
            gross: gross.into(),
            ..Default::default()
        }
    }

    /// Parses and annualizes the form.
    ///
    /// # Errors
    ///
    /// * [`InputError::NonPositiveGross`] when gross does not parse to a
    ///   positive amount.
    /// * [`InputError::GrossTooLarge`] when the annualized gross exceeds
    ///   [`MAX_ANNUAL_GROSS`].
    /// * [`InputError::DeductionTooLarge`] when an annualized deduction
    ///   exceeds [`MAX_ANNUAL_GROSS`].
    pub fn validate(
        &self,
        period: Period,
    ) -> Result<PayeInput, InputError> {
        let gross = parse_naira_input(&self.gross);
        if gross <= Decimal::ZERO {
            return Err(InputError::NonPositiveGross { period });
        }

        let annual_gross = bounded_annual(gross, period).ok_or_else(|| {
            warn!(input = %self.gross, %period, "gross income over the supported maximum");
            InputError::GrossTooLarge {
                max: max_annual_label(),
            }
        })?;

        let deductions = DeductionSet {
            pension: annual_deduction(&self.pension, "pension", period)?,
            nhf: annual_deduction(&self.nhf, "NHF", period)?,
            nhis: annual_deduction(&self.nhis, "NHIS", period)?,
            life_insurance: annual_deduction(&self.insurance, "life insurance", period)?,
            rent: annual_deduction(&self.rent, "rent", period)?,
        };

        Ok(PayeInput {
            gross_annual_income: annual_gross,
            deductions,
        })
    }
}

/// Annualizes `amount`, or `None` when the result would exceed
/// [`MAX_ANNUAL_GROSS`].
fn bounded_annual(
    amount: Decimal,
    period: Period,
) -> Option<Decimal> {
    period
        .annualize(amount)
        .filter(|annual| *annual <= MAX_ANNUAL_GROSS)
}

fn annual_deduction(
    value: &str,
    field: &'static str,
    period: Period,
) -> Result<Decimal, InputError> {
    bounded_annual(parse_naira_input(value), period).ok_or_else(|| {
        warn!(input = %value, field, %period, "deduction over the supported maximum");
        InputError::DeductionTooLarge {
            field,
            max: max_annual_label(),
        }
    })
}

fn max_annual_label() -> String {
    format!("₦{}", format_grouped(MAX_ANNUAL_GROSS, 0))
}
