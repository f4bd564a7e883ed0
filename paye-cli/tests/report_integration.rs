//! End-to-end runs through `app::run` using config files on disk.
//!
//! These complement the unit tests in each module by exercising the full
//! config -> form -> engine -> renderer path.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use paye_cli::config::ConfigError;
use paye_cli::{
    CliOverrides, ConfigFile, InputError, OutputFormat, PayeForm, Period, Settings, app,
};
use paye_core::SchedulePreset;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn settings_from(
    name: &str,
    cli: CliOverrides,
) -> Settings {
    let file = ConfigFile::discover(Some(&fixture(name)), Path::new("."))
        .expect("fixture config should load");
    Settings::resolve(cli, file)
}

fn run_to_string(
    settings: &Settings,
    form: &PayeForm,
) -> String {
    let mut out = Vec::new();
    app::run(settings, form, &mut out).expect("run should succeed");
    String::from_utf8(out).expect("report is UTF-8")
}

#[test]
fn fixture_config_selects_schedule_period_and_format() {
    let settings = settings_from("pita_annual.toml", CliOverrides::default());

    assert_eq!(settings.schedule, SchedulePreset::Pita2011);
    assert_eq!(settings.period, Period::Annual);
    assert_eq!(settings.format, OutputFormat::Json);
}

#[test]
fn json_report_for_deduction_exhaustion() {
    let settings = settings_from("pita_annual.toml", CliOverrides::default());
    let form = PayeForm {
        gross: "1,000,000".into(),
        pension: "600,000".into(),
        rent: "600,000".into(),
        ..Default::default()
    };

    let json = run_to_string(&settings, &form);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["schedule"], "pita2011");
    assert_eq!(value["result"]["taxable_income"], "0");
    assert_eq!(value["result"]["annual_tax"], "0");
    assert_eq!(value["result"]["deductions"]["total"], "1200000");
    assert_eq!(value["result"]["deductions"]["consolidated_relief"], "400000.00");
    assert_eq!(value["result"]["breakdown"].as_array().map(Vec::len), Some(0));
}

#[test]
fn command_line_format_overrides_fixture() {
    let settings = settings_from(
        "pita_annual.toml",
        CliOverrides {
            format: Some(OutputFormat::Text),
            ..Default::default()
        },
    );

    let text = run_to_string(&settings, &PayeForm::with_gross("5000000"));

    assert!(text.starts_with("Net Annual Salary: ₦4,008,000.00\n"));
    assert!(text.contains("Schedule: pita2011"));
    assert!(text.contains("Consolidated Relief (CRA)*"));
    assert!(text.contains("Above ₦3,200,000"));
    assert!(!text.contains("Tax-Free Threshold"));
}

#[test]
fn monthly_text_report_matches_worked_example() {
    let settings = Settings::default();

    let text = run_to_string(&settings, &PayeForm::with_gross("₦416,666.67"));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Net Monthly Salary: ₦359,166.67");
    assert!(text.contains("Tax-Free Threshold"));
    assert!(text.contains("First ₦2,200,000"));
    assert!(text.contains("₦57,500.00"));
}

#[test]
fn monthly_input_is_annualized_before_the_engine() {
    let mut out = Vec::new();

    let result = app::run(
        &Settings::default(),
        &PayeForm::with_gross("100000"),
        &mut out,
    )
    .unwrap();

    assert_eq!(result.annual_gross, dec!(1200000));
    assert_eq!(result.taxable_income, dec!(400000));
    assert_eq!(result.annual_tax, dec!(60000));
    assert_eq!(result.monthly_tax, dec!(5000.00));
    assert_eq!(result.monthly_take_home, dec!(95000.00));
}

#[test]
fn oversized_deductions_fail_before_the_engine() {
    let settings = settings_from("pita_annual.toml", CliOverrides::default());
    let form = PayeForm {
        gross: "5000000".into(),
        pension: "70000000000000000000000000000".into(),
        nhf: "70000000000000000000000000000".into(),
        ..Default::default()
    };
    let mut out = Vec::new();

    let err = app::run(&settings, &form, &mut out).unwrap_err();

    assert_eq!(
        err.downcast_ref::<InputError>(),
        Some(&InputError::DeductionTooLarge {
            field: "pension",
            max: "₦1,000,000,000,000,000".to_string(),
        })
    );
    assert!(out.is_empty());
}

#[test]
fn invalid_fixture_is_rejected() {
    let err = ConfigFile::load(&fixture("invalid.toml")).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("invalid.toml"));
}
