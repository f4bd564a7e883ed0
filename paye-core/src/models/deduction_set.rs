use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::non_negative;

/// Annual deductible amounts claimed by the taxpayer.
///
/// Every field defaults to zero. Only deduction-based schedules subtract
/// these from gross income; flat-threshold schedules ignore them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionSet {
    /// Contributory pension.
    pub pension: Decimal,
    /// National Housing Fund contribution.
    pub nhf: Decimal,
    /// National Health Insurance Scheme contribution.
    pub nhis: Decimal,
    /// Life insurance premium.
    pub life_insurance: Decimal,
    /// Rent relief.
    pub rent: Decimal,
}

impl DeductionSet {
    /// Sum of the five named deductions, saturating at the bounds of
    /// [`Decimal`].
    pub fn total(&self) -> Decimal {
        [self.nhf, self.nhis, self.life_insurance, self.rent]
            .into_iter()
            .fold(self.pension, Decimal::saturating_add)
    }

    /// Copy of this set with every negative field raised to zero.
    pub fn clamped(&self) -> Self {
        Self {
            pension: non_negative(self.pension),
            nhf: non_negative(self.nhf),
            nhis: non_negative(self.nhis),
            life_insurance: non_negative(self.life_insurance),
            rent: non_negative(self.rent),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total().is_zero()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample() -> DeductionSet {
        DeductionSet {
            pension: dec!(400000),
            nhf: dec!(100000),
            nhis: dec!(50000),
            life_insurance: dec!(150000),
            rent: dec!(500000),
        }
    }

    #[test]
    fn total_sums_all_five_fields() {
        assert_eq!(sample().total(), dec!(1200000));
    }

    #[test]
    fn default_is_empty() {
        assert!(DeductionSet::default().is_empty());
        assert_eq!(DeductionSet::default().total(), Decimal::ZERO);
    }

    #[test]
    fn clamped_zeroes_negative_fields_only() {
        let set = DeductionSet {
            pension: dec!(-1000),
            ..sample()
        };

        let clamped = set.clamped();

        assert_eq!(clamped.pension, Decimal::ZERO);
        assert_eq!(clamped.rent, dec!(500000));
        assert_eq!(clamped.total(), dec!(800000));
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let set = DeductionSet {
            pension: Decimal::MAX,
            nhf: Decimal::MAX,
            rent: dec!(1),
            ..Default::default()
        };

        assert_eq!(set.total(), Decimal::MAX);
    }

    #[test]
    fn missing_fields_deserialize_as_zero() {
        let set: DeductionSet = serde_json::from_str(r#"{"pension":"5000"}"#).unwrap();

        assert_eq!(set.pension, dec!(5000));
        assert_eq!(set.rent, Decimal::ZERO);
    }
}
