//! Runtime configuration for stores and logging.
//!
//! # Responsibility
//! - Describe where snapshots live and how they are formatted.
//! - Describe logging level and directory.
//! - Load both from an optional JSON file plus `STOCKROOM_*` overrides.
//!
//! # Invariants
//! - A config returned by `from_env`/`with_overrides` has passed `validate`.
//! - Unknown keys in the config file are rejected.

use crate::logging::{default_log_level, normalize_level};
use crate::store::CodecOptions;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable naming an optional JSON config file.
pub const ENV_CONFIG_FILE: &str = "STOCKROOM_CONFIG";
pub const ENV_STORE_PATH: &str = "STOCKROOM_STORE_PATH";
pub const ENV_PRETTY: &str = "STOCKROOM_PRETTY";
pub const ENV_LOG_LEVEL: &str = "STOCKROOM_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "STOCKROOM_LOG_DIR";

const DEFAULT_STORE_FILE: &str = "inventory.json";

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value `{value}` for `{key}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Where and how a snapshot store writes its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Snapshot file path.
    pub path: PathBuf,
    /// Indent snapshot JSON.
    pub pretty: bool,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            pretty: self.pretty,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_FILE)
    }
}

/// Logging settings. Logging stays off when `log_dir` is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error` (case-insensitive).
    pub level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StockroomConfig {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

impl StockroomConfig {
    /// Parses a JSON config document; missing sections use defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(ConfigError::Parse)
    }

    /// Reads and parses a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Builds the process configuration from the environment.
    ///
    /// Starts from `STOCKROOM_CONFIG` when set, otherwise defaults, then
    /// applies the individual `STOCKROOM_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match lookup(ENV_CONFIG_FILE) {
            Some(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };
        base.with_overrides(lookup)
    }

    /// Applies `STOCKROOM_*` overrides from `lookup`, then validates.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = non_empty(lookup(ENV_STORE_PATH)) {
            self.store.path = PathBuf::from(path);
        }
        if let Some(flag) = non_empty(lookup(ENV_PRETTY)) {
            self.store.pretty = parse_flag(ENV_PRETTY, &flag)?;
        }
        if let Some(level) = non_empty(lookup(ENV_LOG_LEVEL)) {
            self.logging.level = level;
        }
        if let Some(dir) = non_empty(lookup(ENV_LOG_DIR)) {
            self.logging.log_dir = Some(PathBuf::from(dir));
        }

        self.validate()?;
        Ok(self)
    }

    /// Checks cross-field constraints and normalizes the log level.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "store.path",
                value: String::new(),
                reason: "store path cannot be empty".to_string(),
            });
        }

        self.logging.level = normalize_level(&self.logging.level)
            .map_err(|reason| ConfigError::InvalidValue {
                key: "logging.level",
                value: self.logging.level.clone(),
                reason,
            })?
            .to_string();

        if let Some(dir) = &self.logging.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    key: "logging.log_dir",
                    value: dir.display().to_string(),
                    reason: "log directory must be an absolute path".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected true|false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_flag, ConfigError, StockroomConfig, ENV_LOG_LEVEL, ENV_PRETTY};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_pass_validation() {
        let config = StockroomConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.store.path, PathBuf::from("inventory.json"));
        assert!(config.store.pretty);
        assert!(config.logging.log_dir.is_none());
    }

    #[test]
    fn overrides_replace_file_values_and_normalize_level() {
        let config = StockroomConfig::from_json_str(r#"{ "store": { "path": "a.json" } }"#)
            .unwrap()
            .with_overrides(lookup_from(&[
                ("STOCKROOM_STORE_PATH", "b.json"),
                (ENV_PRETTY, "off"),
                (ENV_LOG_LEVEL, " WARNING "),
            ]))
            .unwrap();

        assert_eq!(config.store.path, PathBuf::from("b.json"));
        assert!(!config.store.pretty);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = StockroomConfig::from_lookup(lookup_from(&[("STOCKROOM_LOG_DIR", "logs")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "logging.log_dir",
                ..
            }
        ));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        let err = StockroomConfig::from_json_str(r#"{ "store": { "compress": true } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn parse_flag_rejects_garbage() {
        assert!(parse_flag(ENV_PRETTY, "maybe").is_err());
        assert!(parse_flag(ENV_PRETTY, "TRUE").unwrap());
    }
}
