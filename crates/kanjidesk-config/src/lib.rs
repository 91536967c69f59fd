use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::log::LogConfig;
use self::startup::StartupConfig;
use self::ui::UiConfig;
use self::worker::WorkerConfig;

pub mod log;
pub mod startup;
pub mod ui;
pub mod worker;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub worker: WorkerConfig,
    pub startup: StartupConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Read a JSON config file; missing fields take their defaults and the
    /// environment still overrides what the file says.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.apply_env();
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    fn apply_env(&mut self) {
        if let Ok(command) = env::var("KANJIDESK_WORKER") {
            self.worker.command = command;
        }

        if let Some(idle_ms) = env::var("KANJIDESK_IDLE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.startup.idle_ms = idle_ms;
        }

        if let Some(timeout) = env::var("KANJIDESK_IDLE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.startup.idle_timeout_ms = timeout;
        }

        if let Ok(filter) = env::var("KANJIDESK_LOG") {
            self.log.filter = filter;
        }
    }
}
