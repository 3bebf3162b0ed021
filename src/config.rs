// config.rs
// Purpose: Process-wide logging settings shared by the file and remote facades

use crate::errors::{LogError, LogResult};
use crate::formatter::FieldOptions;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_FILE: &str = "./log.log";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8100";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Events below this severity only reach the console.
    pub threshold: Severity,
    pub fields: FieldOptions,
    pub default_file: PathBuf,
    pub compact: bool,
    pub remote: RemoteConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            threshold: Severity::Debug,
            fields: FieldOptions::all(),
            default_file: PathBuf::from(DEFAULT_FILE),
            compact: false,
            remote: RemoteConfig::default(),
        }
    }
}

impl LoggerConfig {
    /// Rejects settings no call could work with.
    pub fn validate(&self) -> LogResult<()> {
        if self.default_file.as_os_str().is_empty() {
            return Err(LogError::config("default_file cannot be empty"));
        }
        self.remote.validate()
    }
}

/// Where and as whom remote events are posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub token: String,
    pub app_id: String,
    /// Request timeout in milliseconds. `None` keeps the HTTP client's own behaviour.
    pub timeout_ms: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: String::new(),
            app_id: String::new(),
            timeout_ms: None,
        }
    }
}

impl RemoteConfig {
    pub fn validate(&self) -> LogResult<()> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(LogError::config(format!(
                "remote endpoint must be an http(s) URL, got {:?}",
                self.endpoint
            )));
        }
        Ok(())
    }
}
