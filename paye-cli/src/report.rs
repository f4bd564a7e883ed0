//! Rendering of a [`TaxCalculationResult`] for the terminal, as CSV, or as
//! JSON.

use std::io::Write;

use clap::ValueEnum;
use paye_core::{SchedulePreset, TaxCalculationResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::{format_currency, format_rate};
use crate::input::Period;

const LABEL_WIDTH: usize = 34;
const AMOUNT_WIDTH: usize = 20;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary and breakdown table.
    #[default]
    Text,
    /// One row per breakdown line.
    Csv,
    /// The full result with schedule and period.
    Json,
}

/// How the figures were entered, which decides the headline and the rows
/// that are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportContext {
    pub schedule: SchedulePreset,
    pub period: Period,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    schedule: SchedulePreset,
    period: Period,
    result: &'a TaxCalculationResult,
}

#[derive(Serialize)]
struct CsvLine {
    label: String,
    taxable_amount: Decimal,
    rate: Decimal,
    tax: Decimal,
}

/// Writes `result` to `out` in the requested format.
///
/// # Errors
///
/// Returns [`ReportError`] when the writer fails or serialization fails.
pub fn render<W: Write>(
    result: &TaxCalculationResult,
    context: &ReportContext,
    format: OutputFormat,
    out: W,
) -> Result<(), ReportError> {
    match format {
        OutputFormat::Text => render_text(result, context, out),
        OutputFormat::Csv => render_csv(result, out),
        OutputFormat::Json => render_json(result, context, out),
    }
}

fn render_json<W: Write>(
    result: &TaxCalculationResult,
    context: &ReportContext,
    mut out: W,
) -> Result<(), ReportError> {
    let report = JsonReport {
        schedule: context.schedule,
        period: context.period,
        result,
    };
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn render_csv<W: Write>(
    result: &TaxCalculationResult,
    out: W,
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(out);
    for line in &result.breakdown {
        writer.serialize(CsvLine {
            label: line.label.to_string(),
            taxable_amount: line.taxable_amount,
            rate: line.rate,
            tax: line.tax,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn render_text<W: Write>(
    result: &TaxCalculationResult,
    context: &ReportContext,
    mut out: W,
) -> Result<(), ReportError> {
    let period = context.period;
    let monthly = period.is_monthly();
    let short = period.short_label();

    let (headline, net) = if monthly {
        ("Net Monthly Salary", result.monthly_take_home)
    } else {
        ("Net Annual Salary", result.annual_take_home())
    };
    let gross = if monthly {
        result.monthly_gross
    } else {
        result.annual_gross
    };

    writeln!(out, "{headline}: {}", format_currency(net))?;
    writeln!(out, "Schedule: {}", context.schedule)?;
    writeln!(out)?;

    writeln!(out, "TAX SUMMARY")?;
    row(&mut out, &format!("Gross Income ({short})"), &format_currency(gross))?;
    row(
        &mut out,
        "Total Annual PAYE",
        &format_currency(-result.annual_tax),
    )?;
    if monthly {
        row(
            &mut out,
            "Monthly PAYE (Derived)",
            &format_currency(-result.monthly_tax),
        )?;
    }
    row(&mut out, &format!("Net Pay ({short})"), &format_currency(net))?;
    writeln!(out)?;

    let deductions = &result.deductions;
    writeln!(out, "RELIEFS & DEDUCTIONS (ANNUALIZED)")?;
    if !deductions.consolidated_relief.is_zero() {
        row(
            &mut out,
            "Consolidated Relief (CRA)*",
            &format_currency(deductions.consolidated_relief),
        )?;
    }
    if !deductions.tax_free_threshold.is_zero() {
        row(
            &mut out,
            "Tax-Free Threshold",
            &format_currency(deductions.tax_free_threshold),
        )?;
    }
    for (label, amount) in [
        ("Pension", deductions.pension),
        ("NHF", deductions.nhf),
        ("NHIS", deductions.nhis),
        ("Life Insurance", deductions.life_insurance),
        ("Rent", deductions.rent),
        ("Total Annual Deductions", deductions.total),
    ] {
        row(&mut out, label, &format_currency(amount))?;
    }
    if !deductions.consolidated_relief.is_zero() {
        writeln!(out, "  * Informational only; not deducted from taxable income.")?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "TAXABLE INCOME BREAKDOWN (ANNUAL)    Annual Taxable Income: {}",
        format_currency(result.taxable_income)
    )?;
    writeln!(
        out,
        "  {:<w$}{:>a$}{:>6}{:>a$}",
        "Bracket Segment",
        "Amount In Bracket",
        "Rate",
        "Tax Due (Annual)",
        w = LABEL_WIDTH - 2,
        a = AMOUNT_WIDTH,
    )?;
    for line in &result.breakdown {
        writeln!(
            out,
            "  {:<w$}{:>a$}{:>6}{:>a$}",
            line.label.to_string(),
            format_currency(line.taxable_amount),
            format_rate(line.rate),
            format_currency(line.tax),
            w = LABEL_WIDTH - 2,
            a = AMOUNT_WIDTH,
        )?;
    }
    if result.is_tax_free() {
        writeln!(
            out,
            "  Income is fully covered by reliefs and deductions. No tax due."
        )?;
    }
    row(
        &mut out,
        "Total Annual PAYE",
        &format_currency(result.annual_tax),
    )?;
    if monthly {
        row(
            &mut out,
            "Monthly PAYE (Derived)",
            &format_currency(result.monthly_tax),
        )?;
        writeln!(out, "  Monthly PAYE is calculated by dividing annual PAYE by 12.")?;
    }

    Ok(())
}

fn row<W: Write>(
    out: &mut W,
    label: &str,
    value: &str,
) -> std::io::Result<()> {
    writeln!(
        out,
        "  {label:<w$}{value:>a$}",
        w = LABEL_WIDTH - 2,
        a = AMOUNT_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use paye_core::{BracketSchedule, DeductionSet, compute_tax};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn nta_result(gross: Decimal) -> TaxCalculationResult {
        let schedule = BracketSchedule::preset(SchedulePreset::Nta2025);
        compute_tax(gross, &DeductionSet::default(), &schedule)
    }

    fn render_to_string(
        result: &TaxCalculationResult,
        period: Period,
        format: OutputFormat,
    ) -> String {
        let context = ReportContext {
            schedule: SchedulePreset::Nta2025,
            period,
        };
        let mut buffer = Vec::new();
        render(result, &context, format, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn text_headline_uses_monthly_take_home() {
        let text = render_to_string(&nta_result(dec!(5000000)), Period::Monthly, OutputFormat::Text);

        assert!(text.starts_with("Net Monthly Salary: ₦359,166.67\n"));
        assert!(text.contains("Monthly PAYE (Derived)"));
        assert!(!text.contains("Remaining Balance"));
        assert!(text.contains("Next ₦9,000,000"));
    }

    #[test]
    fn text_annual_mode_hides_monthly_rows() {
        let text = render_to_string(&nta_result(dec!(5000000)), Period::Annual, OutputFormat::Text);

        assert!(text.starts_with("Net Annual Salary: ₦4,310,000.00\n"));
        assert!(!text.contains("Monthly PAYE"));
        assert!(text.contains("Gross Income (Yr)"));
    }

    #[test]
    fn text_notes_when_no_tax_is_due() {
        let text = render_to_string(&nta_result(dec!(600000)), Period::Annual, OutputFormat::Text);

        assert!(text.contains("No tax due."));
    }

    #[test]
    fn csv_has_one_row_per_breakdown_line() {
        let csv = render_to_string(&nta_result(dec!(5000000)), Period::Monthly, OutputFormat::Csv);

        assert_eq!(
            csv,
            "label,taxable_amount,rate,tax\n\
             Tax-Free Threshold,800000,0,0\n\
             \"First ₦2,200,000\",2200000,0.15,330000.00\n\
             \"Next ₦9,000,000\",2000000,0.18,360000.00\n"
        );
    }

    #[test]
    fn json_wraps_result_with_context() {
        let json = render_to_string(&nta_result(dec!(5000000)), Period::Monthly, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["schedule"], "nta2025");
        assert_eq!(value["period"], "monthly");
        assert_eq!(value["result"]["annual_tax"], "690000.00");
        assert_eq!(value["result"]["breakdown"][1]["label"]["kind"], "first");
    }
}
