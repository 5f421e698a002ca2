//! Back-office configuration
//!
//! Loaded from a TOML file; every field has a default so partial files
//! work. A missing file yields the defaults.
//!
//! ```toml
//! deployed_by = "Admin User"
//! uploaded_by = "Current User"
//! upload_parse_delay_ms = 2000
//! export_dir = "."
//! history_path = "state/menudeck.json"
//!
//! [delays]
//! package_ms = 1000
//! distribute_ms = 800
//! configure_ms = 700
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

use crate::error::ConfigError;
use menudeck_deploy::{RunnerConfig, StepDelays};
use menudeck_model::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(ParseEnumError::new("log format", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackOfficeConfig {
    /// Operator recorded on deployments
    pub deployed_by: String,
    /// Operator recorded on upload history
    pub uploaded_by: String,
    /// Simulated parse time for bulk uploads
    pub upload_parse_delay_ms: u64,
    /// Upload history file; in-memory when unset
    pub history_path: Option<PathBuf>,
    /// Where error workbooks and templates are written
    pub export_dir: PathBuf,
    pub delays: StepDelays,
    pub logging: LoggingConfig,
}

impl Default for BackOfficeConfig {
    fn default() -> Self {
        let runner = RunnerConfig::default();
        Self {
            deployed_by: runner.deployed_by,
            uploaded_by: "Current User".to_string(),
            upload_parse_delay_ms: 2000,
            history_path: None,
            export_dir: PathBuf::from("."),
            delays: runner.delays,
            logging: LoggingConfig::default(),
        }
    }
}

impl BackOfficeConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML file; a missing file gives the defaults
    ///
    /// # Errors
    /// - `ConfigError::Read` if the file exists but cannot be read
    /// - `ConfigError::Parse` if it is not valid config TOML
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml(&content)?;
                tracing::info!("loaded config from {:?}", path);
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// # Errors
    /// Returns `ConfigError::Parse` for invalid TOML or field types
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// # Errors
    /// Returns `ConfigError::Render` if serialization fails
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    #[inline]
    #[must_use]
    pub fn with_deployed_by(mut self, operator: impl Into<String>) -> Self {
        self.deployed_by = operator.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_uploaded_by(mut self, operator: impl Into<String>) -> Self {
        self.uploaded_by = operator.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_delays(mut self, delays: StepDelays) -> Self {
        self.delays = delays;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_upload_parse_delay(mut self, delay: Duration) -> Self {
        self.upload_parse_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// No simulated waits anywhere
    #[must_use]
    pub fn instant(self) -> Self {
        self.with_delays(StepDelays::none())
            .with_upload_parse_delay(Duration::ZERO)
    }

    #[must_use]
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig::new()
            .with_deployed_by(self.deployed_by.clone())
            .with_delays(self.delays)
    }

    #[must_use]
    pub fn upload_parse_delay(&self) -> Duration {
        Duration::from_millis(self.upload_parse_delay_ms)
    }
}
