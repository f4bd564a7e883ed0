use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of a progressive schedule.
///
/// `width` is the span of income the segment covers; `None` marks the
/// top-open segment that absorbs whatever income is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSegment {
    pub width: Option<Decimal>,
    pub rate: Decimal,
}

impl BracketSegment {
    pub const fn bounded(
        width: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            width: Some(width),
            rate,
        }
    }

    pub const fn unbounded(rate: Decimal) -> Self {
        Self { width: None, rate }
    }

    pub fn is_unbounded(&self) -> bool {
        self.width.is_none()
    }

    /// Portion of `remaining` income that falls inside this segment.
    pub fn consume(
        &self,
        remaining: Decimal,
    ) -> Decimal {
        match self.width {
            Some(width) => remaining.min(width),
            None => remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn bounded_segment_consumes_at_most_its_width() {
        let segment = BracketSegment::bounded(dec!(2200000), dec!(0.15));

        assert_eq!(segment.consume(dec!(4200000)), dec!(2200000));
        assert_eq!(segment.consume(dec!(1)), dec!(1));
    }

    #[test]
    fn unbounded_segment_consumes_everything() {
        let segment = BracketSegment::unbounded(dec!(0.25));

        assert!(segment.is_unbounded());
        assert_eq!(segment.consume(dec!(75000000)), dec!(75000000));
    }
}
