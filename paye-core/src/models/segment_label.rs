use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::format_boundary;

/// Currency symbol used when rendering bracket boundaries.
pub const NAIRA: &str = "₦";

/// Human-readable description of a breakdown row.
///
/// The structured form is kept so renderers can restyle labels; `Display`
/// yields the conventional wording ("First ₦300,000", "Next ₦9,000,000", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentLabel {
    TaxFree { threshold: Decimal },
    First { width: Decimal },
    Next { width: Decimal },
    RemainingBalance,
    Above { lower_bound: Decimal },
}

impl SegmentLabel {
    pub fn is_tax_free(&self) -> bool {
        matches!(self, Self::TaxFree { .. })
    }
}

impl fmt::Display for SegmentLabel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::TaxFree { .. } => f.write_str("Tax-Free Threshold"),
            Self::First { width } => write!(f, "First {NAIRA}{}", format_boundary(*width)),
            Self::Next { width } => write!(f, "Next {NAIRA}{}", format_boundary(*width)),
            Self::RemainingBalance => f.write_str("Remaining Balance"),
            Self::Above { lower_bound } => {
                write!(f, "Above {NAIRA}{}", format_boundary(*lower_bound))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn labels_render_with_grouped_naira_amounts() {
        assert_eq!(
            SegmentLabel::First { width: dec!(300000) }.to_string(),
            "First ₦300,000"
        );
        assert_eq!(
            SegmentLabel::Next { width: dec!(9000000) }.to_string(),
            "Next ₦9,000,000"
        );
        assert_eq!(
            SegmentLabel::Above { lower_bound: dec!(3200000) }.to_string(),
            "Above ₦3,200,000"
        );
    }

    #[test]
    fn fixed_labels_render_verbatim() {
        assert_eq!(SegmentLabel::RemainingBalance.to_string(), "Remaining Balance");
        assert_eq!(
            SegmentLabel::TaxFree { threshold: dec!(800000) }.to_string(),
            "Tax-Free Threshold"
        );
    }

    #[test]
    fn label_serializes_with_kind_tag() {
        let json = serde_json::to_value(SegmentLabel::Next { width: dec!(9000000) }).unwrap();

        assert_eq!(json["kind"], "next");
        assert_eq!(json["width"], "9000000");
    }
}
