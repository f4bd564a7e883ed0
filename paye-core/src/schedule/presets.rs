//! Bundled Nigerian PAYE schedules.
//!
//! | Preset     | Exemption                         | Segments (width @ rate) |
//! |------------|-----------------------------------|-------------------------|
//! | `nta2025`  | flat ₦800,000                     | 2.2M @ 15%, 9M @ 18%, 13M @ 21%, 25M @ 23%, rest @ 25% |
//! | `pita2011` | deductions, CRA reported          | 300k @ 7%, 300k @ 11%, 500k @ 15%, 500k @ 19%, 1.6M @ 21%, rest @ 24% |

use std::fmt;
use std::str::FromStr;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BracketSchedule, ConsolidatedRelief, ExemptionPolicy};
use crate::BracketSegment;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown schedule '{0}'; expected one of: nta2025, pita2011")]
pub struct UnknownPresetError(String);

/// Identifies one of the built-in schedules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulePreset {
    /// Nigeria Tax Act 2025 rates with a flat tax-free band.
    #[default]
    Nta2025,
    /// Personal Income Tax Act (2011 amendment) rates with deductions and CRA.
    Pita2011,
}

impl SchedulePreset {
    pub fn all() -> &'static [SchedulePreset] {
        &[SchedulePreset::Nta2025, SchedulePreset::Pita2011]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nta2025 => "nta2025",
            Self::Pita2011 => "pita2011",
        }
    }

    pub fn schedule(&self) -> BracketSchedule {
        match self {
            Self::Nta2025 => nta2025(),
            Self::Pita2011 => pita2011(),
        }
    }
}

impl fmt::Display for SchedulePreset {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulePreset {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPresetError(s.to_string()))
    }
}

fn nta2025() -> BracketSchedule {
    BracketSchedule::from_parts(
        vec![
            BracketSegment::bounded(dec!(2200000), dec!(0.15)),
            BracketSegment::bounded(dec!(9000000), dec!(0.18)),
            BracketSegment::bounded(dec!(13000000), dec!(0.21)),
            BracketSegment::bounded(dec!(25000000), dec!(0.23)),
            BracketSegment::unbounded(dec!(0.25)),
        ],
        ExemptionPolicy::FlatThreshold {
            amount: dec!(800000),
        },
    )
}

fn pita2011() -> BracketSchedule {
    BracketSchedule::from_parts(
        vec![
            BracketSegment::bounded(dec!(300000), dec!(0.07)),
            BracketSegment::bounded(dec!(300000), dec!(0.11)),
            BracketSegment::bounded(dec!(500000), dec!(0.15)),
            BracketSegment::bounded(dec!(500000), dec!(0.19)),
            BracketSegment::bounded(dec!(1600000), dec!(0.21)),
            BracketSegment::unbounded(dec!(0.24)),
        ],
        ExemptionPolicy::Deductions {
            relief: Some(ConsolidatedRelief {
                floor: dec!(200000),
                floor_rate: dec!(0.01),
                gross_rate: dec!(0.20),
            }),
        },
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn every_preset_passes_validation() {
        for preset in SchedulePreset::all() {
            let schedule = preset.schedule();
            let rebuilt =
                BracketSchedule::new(schedule.segments().to_vec(), *schedule.exemption());

            assert_eq!(rebuilt, Ok(schedule), "preset {preset} failed validation");
        }
    }

    #[test]
    fn nta2025_has_800k_threshold_and_25_percent_top_rate() {
        let schedule = SchedulePreset::Nta2025.schedule();

        assert_eq!(schedule.tax_free_threshold(), Some(dec!(800000)));
        assert_eq!(schedule.segments().last().map(|s| s.rate), Some(dec!(0.25)));
        assert!(!schedule.applies_deductions());
    }

    #[test]
    fn pita2011_finite_widths_sum_to_3_2_million() {
        let schedule = SchedulePreset::Pita2011.schedule();
        let finite: rust_decimal::Decimal =
            schedule.segments().iter().filter_map(|s| s.width).sum();

        assert_eq!(finite, dec!(3200000));
        assert!(schedule.consolidated_relief().is_some());
    }

    #[test]
    fn preset_parses_case_insensitively() {
        assert_eq!("NTA2025".parse::<SchedulePreset>(), Ok(SchedulePreset::Nta2025));
        assert_eq!(" pita2011 ".parse::<SchedulePreset>(), Ok(SchedulePreset::Pita2011));
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let err = "flat".parse::<SchedulePreset>().unwrap_err();

        assert_eq!(err.to_string(), "unknown schedule 'flat'; expected one of: nta2025, pita2011");
    }
}
