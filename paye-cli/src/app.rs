//! Wires the form, the schedule and the renderer together for one run.

use std::io::Write;

use anyhow::{Context, Result};
use paye_core::{BracketSchedule, PayeCalculator, TaxCalculationResult};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::input::PayeForm;
use crate::report::{self, ReportContext};

/// Validates `form`, computes PAYE under the configured schedule and writes
/// the report to `out`. Returns the result so callers can inspect it.
///
/// # Errors
///
/// Fails when the form does not validate or the report cannot be written.
pub fn run<W: Write>(
    settings: &Settings,
    form: &PayeForm,
    out: W,
) -> Result<TaxCalculationResult> {
    let schedule = BracketSchedule::preset(settings.schedule);
    let input = form.validate(settings.period)?;

    if !schedule.applies_deductions() && !input.deductions.is_empty() {
        warn!(
            schedule = %settings.schedule,
            deductions = %input.deductions.total(),
            "schedule uses a flat tax-free threshold; deductions are not applied"
        );
    }

    info!(
        schedule = %settings.schedule,
        period = %settings.period,
        annual_gross = %input.gross_annual_income,
        "computing PAYE"
    );
    let result = PayeCalculator::new(&schedule).calculate(&input);
    debug!(
        taxable_income = %result.taxable_income,
        annual_tax = %result.annual_tax,
        rows = result.breakdown.len(),
        "calculation complete"
    );

    let context = ReportContext {
        schedule: settings.schedule,
        period: settings.period,
    };
    report::render(&result, &context, settings.format, out).context("failed to write report")?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use paye_core::SchedulePreset;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::input::{InputError, Period};
    use crate::report::OutputFormat;

    #[test]
    fn run_returns_result_and_writes_report() {
        let settings = Settings {
            period: Period::Annual,
            format: OutputFormat::Csv,
            ..Settings::default()
        };
        let mut out = Vec::new();

        let result = run(&settings, &PayeForm::with_gross("5,000,000"), &mut out).unwrap();

        assert_eq!(result.annual_tax, dec!(690000));
        assert!(String::from_utf8(out).unwrap().starts_with("label,taxable_amount,rate,tax\n"));
    }

    #[test]
    fn run_rejects_missing_gross_without_writing() {
        let mut out = Vec::new();

        let err = run(&Settings::default(), &PayeForm::default(), &mut out).unwrap_err();

        assert_eq!(
            err.downcast_ref::<InputError>(),
            Some(&InputError::NonPositiveGross {
                period: Period::Monthly
            })
        );
        assert!(out.is_empty());
    }

    #[test]
    fn run_applies_deductions_under_pita() {
        let settings = Settings {
            schedule: SchedulePreset::Pita2011,
            period: Period::Monthly,
            ..Settings::default()
        };
        let form = PayeForm {
            gross: "416,666.67".into(),
            pension: "33,333.33".into(),
            ..Default::default()
        };

        let result = run(&settings, &form, std::io::sink()).unwrap();

        assert_eq!(result.annual_gross, dec!(5000000.04));
        assert_eq!(result.deductions.pension, dec!(399999.96));
        assert_eq!(result.taxable_income, dec!(4600000.08));
    }
}
