use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DeductionSet, SegmentLabel};

/// One row of the progressive tax breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketResultLine {
    pub label: SegmentLabel,
    /// Income that fell inside this segment.
    pub taxable_amount: Decimal,
    pub rate: Decimal,
    /// Always `taxable_amount * rate`.
    pub tax: Decimal,
}

impl BracketResultLine {
    pub fn new(
        label: SegmentLabel,
        taxable_amount: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            label,
            taxable_amount,
            rate,
            tax: taxable_amount * rate,
        }
    }
}

/// Exemptions that were applied, in one shape for both schedule variants.
///
/// Flat-threshold schedules leave the named deductions at zero and report the
/// threshold; deduction-based schedules report the deductions, a zero
/// threshold and the informational consolidated relief.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    pub pension: Decimal,
    pub nhf: Decimal,
    pub nhis: Decimal,
    pub life_insurance: Decimal,
    pub rent: Decimal,
    /// Sum of the five named deductions.
    pub total: Decimal,
    pub tax_free_threshold: Decimal,
    /// Consolidated relief allowance. Reported only, never subtracted.
    pub consolidated_relief: Decimal,
}

impl DeductionBreakdown {
    pub fn from_deductions(
        deductions: &DeductionSet,
        tax_free_threshold: Decimal,
        consolidated_relief: Decimal,
    ) -> Self {
        Self {
            pension: deductions.pension,
            nhf: deductions.nhf,
            nhis: deductions.nhis,
            life_insurance: deductions.life_insurance,
            rent: deductions.rent,
            total: deductions.total(),
            tax_free_threshold,
            consolidated_relief,
        }
    }
}

/// Output of a single PAYE calculation. Annual figures are exact; monthly
/// figures are rounded to kobo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub monthly_gross: Decimal,
    pub annual_gross: Decimal,
    /// Gross income less the exemption, floored at zero.
    pub taxable_income: Decimal,
    pub annual_tax: Decimal,
    /// `annual_tax / 12`, rounded half-up to kobo, so it can differ from the
    /// exact quotient by up to half a kobo.
    pub monthly_tax: Decimal,
    /// `monthly_gross - monthly_tax`.
    pub monthly_take_home: Decimal,
    pub deductions: DeductionBreakdown,
    pub breakdown: Vec<BracketResultLine>,
}

impl TaxCalculationResult {
    pub fn annual_take_home(&self) -> Decimal {
        self.annual_gross - self.annual_tax
    }

    /// Income that passed through the taxed segments. Equals
    /// `taxable_income` for any valid schedule.
    pub fn taxed_amount(&self) -> Decimal {
        self.breakdown
            .iter()
            .filter(|line| !line.label.is_tax_free())
            .map(|line| line.taxable_amount)
            .sum()
    }

    /// True when no segment produced any tax.
    pub fn is_tax_free(&self) -> bool {
        self.breakdown.iter().all(|line| line.tax.is_zero())
    }

    /// Annual tax as a fraction of annual gross; zero when gross is zero.
    pub fn effective_rate(&self) -> Decimal {
        if self.annual_gross.is_zero() {
            Decimal::ZERO
        } else {
            self.annual_tax / self.annual_gross
        }
    }
}
