//! Progressive bracket schedules.
//!
//! A [`BracketSchedule`] is plain, validated configuration: the ordered
//! segments plus the [`ExemptionPolicy`] that decides what is subtracted from
//! gross income before the segments are walked. Schedules are handed to the
//! engine by reference, so a different tax year or policy is just a
//! different value.

mod presets;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::BracketSegment;
use crate::calculations::common::max;

pub use presets::{SchedulePreset, UnknownPresetError};

/// Configuration errors detected while building a schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule has no segments")]
    Empty,

    #[error("segment {index} has rate {rate}, expected a fraction between 0 and 1")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("segment {index} has a non-positive width")]
    NonPositiveWidth { index: usize },

    #[error("segment {index} is unbounded but is not the last segment")]
    UnboundedNotLast { index: usize },

    #[error("schedule has no unbounded top segment")]
    MissingTopSegment,

    #[error("tax-free threshold {0} is negative")]
    NegativeThreshold(Decimal),

    #[error("consolidated relief parameters must be non-negative")]
    InvalidRelief,
}

/// Informational consolidated relief allowance:
/// `max(floor, floor_rate * gross) + gross_rate * gross`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedRelief {
    pub floor: Decimal,
    pub floor_rate: Decimal,
    pub gross_rate: Decimal,
}

impl ConsolidatedRelief {
    /// Relief for `gross` annual income; zero when there is no income.
    pub fn amount(
        &self,
        gross: Decimal,
    ) -> Decimal {
        if gross <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        max(self.floor, self.floor_rate * gross) + self.gross_rate * gross
    }

    fn is_valid(&self) -> bool {
        self.floor >= Decimal::ZERO
            && self.floor_rate >= Decimal::ZERO
            && self.gross_rate >= Decimal::ZERO
    }
}

/// How gross income is reduced before bracket traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExemptionPolicy {
    /// A flat amount of income is exempt; deductions are not applied.
    FlatThreshold { amount: Decimal },
    /// The sum of the taxpayer's deductions is exempt.
    Deductions { relief: Option<ConsolidatedRelief> },
}

/// An ordered, validated set of bracket segments with its exemption policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSchedule {
    segments: Vec<BracketSegment>,
    exemption: ExemptionPolicy,
}

impl BracketSchedule {
    /// Builds a schedule, checking that segments are well formed, that the
    /// only unbounded segment is the last one, and that exemption amounts are
    /// non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScheduleError`] found.
    pub fn new(
        segments: Vec<BracketSegment>,
        exemption: ExemptionPolicy,
    ) -> Result<Self, ScheduleError> {
        validate_segments(&segments)?;
        validate_exemption(&exemption)?;

        debug!(
            segments = segments.len(),
            ?exemption,
            "validated bracket schedule"
        );

        Ok(Self {
            segments,
            exemption,
        })
    }

    /// Builds one of the bundled schedules.
    pub fn preset(preset: SchedulePreset) -> Self {
        preset.schedule()
    }

    /// Used by presets whose tables are checked by tests instead of at
    /// runtime.
    pub(crate) fn from_parts(
        segments: Vec<BracketSegment>,
        exemption: ExemptionPolicy,
    ) -> Self {
        Self {
            segments,
            exemption,
        }
    }

    pub fn segments(&self) -> &[BracketSegment] {
        &self.segments
    }

    pub fn exemption(&self) -> &ExemptionPolicy {
        &self.exemption
    }

    /// The flat exempt amount, if this is a flat-threshold schedule.
    pub fn tax_free_threshold(&self) -> Option<Decimal> {
        match self.exemption {
            ExemptionPolicy::FlatThreshold { amount } => Some(amount),
            ExemptionPolicy::Deductions { .. } => None,
        }
    }

    /// Whether taxpayer deductions reduce taxable income under this schedule.
    pub fn applies_deductions(&self) -> bool {
        matches!(self.exemption, ExemptionPolicy::Deductions { .. })
    }

    /// The relief reported alongside results, if any.
    pub fn consolidated_relief(&self) -> Option<&ConsolidatedRelief> {
        match &self.exemption {
            ExemptionPolicy::Deductions { relief } => relief.as_ref(),
            ExemptionPolicy::FlatThreshold { .. } => None,
        }
    }
}

fn validate_segments(segments: &[BracketSegment]) -> Result<(), ScheduleError> {
    if segments.is_empty() {
        return Err(ScheduleError::Empty);
    }

    let last = segments.len() - 1;
    for (index, segment) in segments.iter().enumerate() {
        if segment.rate < Decimal::ZERO || segment.rate > Decimal::ONE {
            return Err(ScheduleError::InvalidRate {
                index,
                rate: segment.rate,
            });
        }
        match segment.width {
            Some(width) if width <= Decimal::ZERO => {
                return Err(ScheduleError::NonPositiveWidth { index });
            }
            None if index != last => return Err(ScheduleError::UnboundedNotLast { index }),
            _ => {}
        }
    }

    if !segments[last].is_unbounded() {
        return Err(ScheduleError::MissingTopSegment);
    }
    Ok(())
}

fn validate_exemption(exemption: &ExemptionPolicy) -> Result<(), ScheduleError> {
    match exemption {
        ExemptionPolicy::FlatThreshold { amount } if *amount < Decimal::ZERO => {
            Err(ScheduleError::NegativeThreshold(*amount))
        }
        ExemptionPolicy::Deductions {
            relief: Some(relief),
        } if !relief.is_valid() => Err(ScheduleError::InvalidRelief),
        _ => Ok(()),
    }
}
