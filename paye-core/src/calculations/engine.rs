//! Progressive PAYE calculation.
//!
//! The engine turns an annual gross income and a set of deductions into a
//! per-bracket breakdown using a caller-supplied [`BracketSchedule`].
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Exemption: the flat threshold, or the sum of the five deductions |
//! | 2    | Taxable income = gross - exemption, floored at zero |
//! | 3    | Flat-threshold schedules emit a "Tax-Free Threshold" row first |
//! | 4    | Walk the segments, each taking `min(remaining, width)` |
//! | 5    | Stop as soon as nothing is left to tax |
//! | 6    | Annual tax = sum of row taxes; monthly figures = annual / 12 |
//! | 7    | Deduction schedules also report the consolidated relief |
//!
//! The engine is a pure function of its inputs: no I/O, no logging, no
//! shared state.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::{BracketSchedule, DeductionSet, SchedulePreset, compute_tax};
//!
//! let schedule = BracketSchedule::preset(SchedulePreset::Nta2025);
//! let result = compute_tax(dec!(5000000), &DeductionSet::default(), &schedule);
//!
//! assert_eq!(result.taxable_income, dec!(4200000));
//! assert_eq!(result.annual_tax, dec!(690000));
//! assert_eq!(result.monthly_tax, dec!(57500.00));
//! assert_eq!(result.monthly_take_home, dec!(359166.67));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, non_negative, to_monthly};
use crate::schedule::{BracketSchedule, ExemptionPolicy};
use crate::{
    BracketResultLine, BracketSegment, DeductionBreakdown, DeductionSet, SegmentLabel,
    TaxCalculationResult,
};

/// Annualized input for one calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeInput {
    /// Gross income for the year. Callers annualize monthly figures first.
    pub gross_annual_income: Decimal,
    /// Annual deductions. Ignored by flat-threshold schedules.
    pub deductions: DeductionSet,
}

/// Calculator bound to a single schedule.
#[derive(Debug, Clone, Copy)]
pub struct PayeCalculator<'a> {
    schedule: &'a BracketSchedule,
}

/// Computes PAYE for `gross_annual_income` under `schedule`.
///
/// Negative gross income and negative deduction fields are treated as zero.
pub fn compute_tax(
    gross_annual_income: Decimal,
    deductions: &DeductionSet,
    schedule: &BracketSchedule,
) -> TaxCalculationResult {
    PayeCalculator::new(schedule).calculate(&PayeInput {
        gross_annual_income,
        deductions: *deductions,
    })
}

impl<'a> PayeCalculator<'a> {
    pub fn new(schedule: &'a BracketSchedule) -> Self {
        Self { schedule }
    }

    /// Runs the full calculation. Always succeeds for a validated schedule.
    pub fn calculate(
        &self,
        input: &PayeInput,
    ) -> TaxCalculationResult {
        let gross = non_negative(input.gross_annual_income);
        let deductions = self.applied_deductions(&input.deductions);

        let exemption = self.exemption(&deductions);
        let taxable_income = self.taxable_income(gross, exemption);

        let mut breakdown = Vec::with_capacity(self.schedule.segments().len() + 1);
        if let Some(threshold) = self.schedule.tax_free_threshold() {
            breakdown.push(self.tax_free_line(gross, threshold));
        }
        breakdown.extend(self.bracket_lines(taxable_income));

        let annual_tax: Decimal = breakdown.iter().map(|line| line.tax).sum();
        let monthly_gross = to_monthly(gross);
        let monthly_tax = to_monthly(annual_tax);

        TaxCalculationResult {
            monthly_gross,
            annual_gross: gross,
            taxable_income,
            annual_tax,
            monthly_tax,
            monthly_take_home: monthly_gross - monthly_tax,
            deductions: DeductionBreakdown::from_deductions(
                &deductions,
                self.schedule.tax_free_threshold().unwrap_or(Decimal::ZERO),
                self.consolidated_relief(gross),
            ),
            breakdown,
        }
    }

    /// Deductions that count under this schedule, with negatives clamped.
    fn applied_deductions(
        &self,
        deductions: &DeductionSet,
    ) -> DeductionSet {
        if self.schedule.applies_deductions() {
            deductions.clamped()
        } else {
            DeductionSet::default()
        }
    }

    fn exemption(
        &self,
        deductions: &DeductionSet,
    ) -> Decimal {
        match self.schedule.exemption() {
            ExemptionPolicy::FlatThreshold { amount } => *amount,
            ExemptionPolicy::Deductions { .. } => deductions.total(),
        }
    }

    fn taxable_income(
        &self,
        gross: Decimal,
        exemption: Decimal,
    ) -> Decimal {
        max(gross - exemption, Decimal::ZERO)
    }

    /// The exempt band is always reported, even when gross falls short of it.
    fn tax_free_line(
        &self,
        gross: Decimal,
        threshold: Decimal,
    ) -> BracketResultLine {
        BracketResultLine::new(
            SegmentLabel::TaxFree { threshold },
            gross.min(threshold),
            Decimal::ZERO,
        )
    }

    /// Walks the segments in order until the taxable income is used up.
    fn bracket_lines(
        &self,
        taxable_income: Decimal,
    ) -> Vec<BracketResultLine> {
        let mut lines = Vec::new();
        let mut remaining = taxable_income;
        let mut lower_bound = Decimal::ZERO;

        for (index, segment) in self.schedule.segments().iter().enumerate() {
            if remaining <= Decimal::ZERO {
                break;
            }

            let amount = segment.consume(remaining);
            remaining -= amount;
            lines.push(BracketResultLine::new(
                self.label(index, segment, lower_bound),
                amount,
                segment.rate,
            ));

            if let Some(width) = segment.width {
                lower_bound += width;
            }
        }

        lines
    }

    fn label(
        &self,
        index: usize,
        segment: &BracketSegment,
        lower_bound: Decimal,
    ) -> SegmentLabel {
        match (segment.width, self.schedule.exemption()) {
            (None, ExemptionPolicy::FlatThreshold { .. }) => SegmentLabel::RemainingBalance,
            (None, ExemptionPolicy::Deductions { .. }) => SegmentLabel::Above { lower_bound },
            (Some(width), _) if index == 0 => SegmentLabel::First { width },
            (Some(width), _) => SegmentLabel::Next { width },
        }
    }

    fn consolidated_relief(
        &self,
        gross: Decimal,
    ) -> Decimal {
        self.schedule
            .consolidated_relief()
            .map_or(Decimal::ZERO, |relief| relief.amount(gross))
    }
}
