//! PAYE calculation logic.
//!
//! [`engine`] holds the bracket traversal; [`common`] holds rounding and
//! formatting helpers shared with callers.

pub mod common;
pub mod engine;

pub use engine::{PayeCalculator, PayeInput, compute_tax};
