use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use paye_core::SchedulePreset;
use paye_cli::{CliOverrides, ConfigFile, OutputFormat, PayeForm, Period, Settings, app, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Nigerian PAYE estimator.
///
/// Computes annual and monthly PAYE, take-home pay and a per-bracket
/// breakdown from a gross salary and optional deductions. Amounts may be
/// typed with separators or a currency symbol (`₦1,250,000`).
#[derive(Debug, Parser)]
#[command(name = "paye", version, about)]
struct Cli {
    /// Gross salary for the chosen period.
    #[arg(long, value_name = "AMOUNT")]
    gross: String,

    /// Period the amounts are entered for [default: monthly].
    #[arg(long, value_enum)]
    period: Option<Period>,

    /// Pension contribution for the period.
    #[arg(long, value_name = "AMOUNT", default_value = "")]
    pension: String,

    /// National Housing Fund contribution for the period.
    #[arg(long, value_name = "AMOUNT", default_value = "")]
    nhf: String,

    /// National Health Insurance contribution for the period.
    #[arg(long, value_name = "AMOUNT", default_value = "")]
    nhis: String,

    /// Life insurance premium for the period.
    #[arg(long, value_name = "AMOUNT", default_value = "")]
    insurance: String,

    /// Rent relief for the period.
    #[arg(long, value_name = "AMOUNT", default_value = "")]
    rent: String,

    /// Bracket schedule: nta2025 or pita2011 [default: nta2025].
    #[arg(long)]
    schedule: Option<SchedulePreset>,

    /// Output format [default: text].
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Config file. Defaults to `paye.toml` in the working directory if present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `paye_cli=trace`. Overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let file = ConfigFile::discover(cli.config.as_deref(), &cwd)?;
    let settings = Settings::resolve(
        CliOverrides {
            schedule: cli.schedule,
            period: cli.period,
            format: cli.format,
            log_level: cli.log_level,
            log_file: cli.log_file,
        },
        file,
    );

    logging::init_logging(settings.log_level.as_deref(), settings.log_file.as_deref())?;

    let form = PayeForm {
        gross: cli.gross,
        pension: cli.pension,
        nhf: cli.nhf,
        nhis: cli.nhis,
        insurance: cli.insurance,
        rent: cli.rent,
    };

    app::run(&settings, &form, io::stdout().lock())?;
    Ok(())
}
