use crate::error::{CliError, CliResult};
use crate::report::Level;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional YAML configuration (`--config`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyConfig {
    /// Where diagnostics are logged
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Overwrite the log on every run, or append to it
    #[serde(default)]
    pub log_mode: LogMode,

    /// Least severe level written to the log file
    #[serde(default = "default_log_level")]
    pub log_level: Level,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    #[default]
    Overwrite,
    Append,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            log_mode: LogMode::default(),
            log_level: default_log_level(),
        }
    }
}

impl TallyConfig {
    /// Defaults when `path` is `None`, otherwise the parsed file
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let config = match path {
            Some(path) => Self::from_yaml(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> CliResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn validate(&self) -> CliResult<()> {
        if self.log_file.as_os_str().is_empty() {
            return Err(CliError::InvalidConfig(
                "log_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tally.log")
}

fn default_log_level() -> Level {
    Level::Info
}
