//! Layered settings: built-in defaults, then an optional `paye.toml`, then
//! command-line flags.
//!
//! ```toml
//! schedule  = "pita2011"   # nta2025 | pita2011
//! period    = "annual"     # monthly | annual
//! format    = "text"       # text | csv | json
//! log_level = "debug"      # any EnvFilter directive
//! log_file  = "paye.log"
//! ```

use std::path::{Path, PathBuf};

use paye_core::SchedulePreset;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::input::Period;
use crate::report::OutputFormat;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "paye.toml";

/// Log filter used when neither the command line, the config file nor
/// `RUST_LOG` sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of a config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub schedule: Option<SchedulePreset>,
    pub period: Option<Period>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFile {
    pub fn from_toml_str(
        contents: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Loads `explicit` if given (it must exist), otherwise
    /// [`DEFAULT_CONFIG_FILE`] from `dir` if present, otherwise an empty
    /// config.
    pub fn discover(
        explicit: Option<&Path>,
        dir: &Path,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config file");
            return Self::load(path);
        }

        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            debug!(path = %fallback.display(), "loading config file");
            Self::load(&fallback)
        } else {
            Ok(Self::default())
        }
    }
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub schedule: Option<SchedulePreset>,
    pub period: Option<Period>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub schedule: SchedulePreset,
    pub period: Period,
    pub format: OutputFormat,
    /// `None` defers to `RUST_LOG`, then [`DEFAULT_LOG_LEVEL`].
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(CliOverrides::default(), ConfigFile::default())
    }
}

impl Settings {
    /// Command-line values win over the file, the file wins over defaults.
    pub fn resolve(
        cli: CliOverrides,
        file: ConfigFile,
    ) -> Self {
        Self {
            schedule: cli.schedule.or(file.schedule).unwrap_or_default(),
            period: cli.period.or(file.period).unwrap_or_default(),
            format: cli.format.or(file.format).unwrap_or_default(),
            log_level: cli.log_level.or(file.log_level),
            log_file: cli.log_file.or(file.log_file),
        }
    }
}
