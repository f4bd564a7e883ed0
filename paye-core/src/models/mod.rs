mod bracket_segment;
mod deduction_set;
mod segment_label;
mod tax_result;

pub use bracket_segment::BracketSegment;
pub use deduction_set::DeductionSet;
pub use segment_label::{NAIRA, SegmentLabel};
pub use tax_result::{BracketResultLine, DeductionBreakdown, TaxCalculationResult};
