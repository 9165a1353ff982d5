// Engine settings, loaded from an optional JSON file and environment overrides.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::EngineError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Spend export loaded at startup and when a LoadDataset request leaves the path empty.
    pub data_path: Option<PathBuf>,
    pub diagnostic_sample_size: usize,
    /// Calendar year query dates are validated against; defaults to the dataset's own year.
    pub reference_year: Option<i32>,
    pub top_patients: usize,
    pub top_departments: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 50051,
            data_path: None,
            diagnostic_sample_size: 10,
            reference_year: None,
            top_patients: 20,
            top_departments: 10,
        }
    }
}

impl EngineSettings {
    pub const CONFIG_ENV: &'static str = "ENGINE_CONFIG";

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read '{}': {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, EngineError> {
        serde_json::from_str(content).map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))
    }

    /// Settings file named by `ENGINE_CONFIG` (defaults when unset), then
    /// `ENGINE_HOST`, `ENGINE_PORT` and `ENGINE_DATA_PATH` overrides.
    pub fn from_env() -> Result<Self, EngineError> {
        let settings = match std::env::var_os(Self::CONFIG_ENV) {
            Some(path) => Self::load_from_path(PathBuf::from(path))?,
            None => Self::default(),
        };
        settings.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ENGINE_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("ENGINE_PORT") {
            self.port = port
                .parse()
                .map_err(|_| EngineError::ConfigError(format!("ENGINE_PORT is not a valid port: '{}'", port)))?;
        }
        if let Some(path) = lookup("ENGINE_DATA_PATH") {
            self.data_path = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
