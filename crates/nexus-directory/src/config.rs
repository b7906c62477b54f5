//! Console configuration loading (`nexus.toml`).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use smol_str::SmolStr;

use crate::error::DirectoryError;

pub const DEFAULT_CONFIG_FILE: &str = "nexus.toml";
pub const DEFAULT_DATA_FILE: &str = "profiles.json";
pub const DEFAULT_TICK_MS: u64 = 100;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NexusConfig {
    pub data_path: PathBuf,
    pub tick_ms: u64,
    pub log_level: SmolStr,
    pub log_file: Option<PathBuf>,
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            tick_ms: DEFAULT_TICK_MS,
            log_level: SmolStr::new(DEFAULT_LOG_LEVEL),
            log_file: None,
        }
    }
}

impl NexusConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            DirectoryError::InvalidConfig(format!("{}: {err}", path.display()).into())
        })?;
        parse_config_text(&text, &path.display().to_string())
    }

    /// Load `path` when given, otherwise `nexus.toml` in the working
    /// directory if present, otherwise defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, DirectoryError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Self::load(fallback);
        }
        Ok(Self::default())
    }
}

fn parse_config_text(text: &str, file_name: &str) -> Result<NexusConfig, DirectoryError> {
    let raw: NexusToml = toml::from_str(text)
        .map_err(|err| DirectoryError::InvalidConfig(format!("{file_name}: {err}").into()))?;
    raw.into_config().map_err(|err| match err {
        DirectoryError::InvalidConfig(message) => {
            DirectoryError::InvalidConfig(format!("{file_name}: {message}").into())
        }
        other => other,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NexusToml {
    data: Option<DataSection>,
    console: Option<ConsoleSection>,
    log: Option<LogSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DataSection {
    path: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConsoleSection {
    tick_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LogSection {
    level: Option<String>,
    file: Option<String>,
}

impl NexusToml {
    fn into_config(self) -> Result<NexusConfig, DirectoryError> {
        let defaults = NexusConfig::default();
        let data_path = match self.data {
            Some(data) => {
                if data.path.trim().is_empty() {
                    return Err(DirectoryError::InvalidConfig(
                        "data.path must not be empty".into(),
                    ));
                }
                PathBuf::from(data.path)
            }
            None => defaults.data_path,
        };
        let tick_ms = self
            .console
            .and_then(|console| console.tick_ms)
            .unwrap_or(defaults.tick_ms);
        if tick_ms == 0 {
            return Err(DirectoryError::InvalidConfig(
                "console.tick_ms must be >= 1".into(),
            ));
        }
        let (log_level, log_file) = match self.log {
            Some(log) => (log.level, log.file),
            None => (None, None),
        };
        let log_level = match log_level {
            Some(level) if level.trim().is_empty() => {
                return Err(DirectoryError::InvalidConfig(
                    "log.level must not be empty".into(),
                ));
            }
            Some(level) => SmolStr::new(level.trim()),
            None => defaults.log_level,
        };
        Ok(NexusConfig {
            data_path,
            tick_ms,
            log_level,
            log_file: log_file.map(PathBuf::from),
        })
    }
}
