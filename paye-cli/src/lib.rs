pub mod app;
pub mod config;
pub mod format;
pub mod input;
pub mod logging;
pub mod report;

pub use app::run;
pub use config::{CliOverrides, ConfigFile, Settings};
pub use input::{InputError, PayeForm, Period};
pub use report::OutputFormat;
