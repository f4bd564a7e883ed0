pub mod calculations;
pub mod models;
pub mod schedule;

pub use calculations::{PayeCalculator, PayeInput, compute_tax};
pub use models::*;
pub use schedule::{BracketSchedule, ConsolidatedRelief, ExemptionPolicy, ScheduleError, SchedulePreset};
