// global.rs
// Purpose: Process-wide default facades for code that does not carry its own instance

use crate::config::LoggerConfig;
use crate::config_loader::load_config;
use crate::logger::{Configurable, FileLogger, RemoteLogger};
use lazy_static::lazy_static;
use std::path::Path;
use std::sync::Arc;

lazy_static! {
    static ref FILE_LOGGER: Arc<FileLogger> = Arc::new(FileLogger::new(LoggerConfig::default()));
    static ref REMOTE_LOGGER: Arc<RemoteLogger> =
        Arc::new(RemoteLogger::new(LoggerConfig::default()));
}

/// The process-wide file facade, writing to `./log.log` until reconfigured.
pub fn file() -> Arc<FileLogger> {
    Arc::clone(&FILE_LOGGER)
}

/// The process-wide remote facade, posting to `http://localhost:8100` until reconfigured.
pub fn remote() -> Arc<RemoteLogger> {
    Arc::clone(&REMOTE_LOGGER)
}

/// Applies `config` to both default facades.
///
/// Meant for single-threaded startup. Calls already in flight keep the snapshot they took.
pub fn apply(config: &LoggerConfig) {
    FILE_LOGGER.configure(|cfg| *cfg = config.clone());
    REMOTE_LOGGER.configure(|cfg| *cfg = config.clone());
}

/// Loads configuration (see [`load_config`]) and applies it to both default facades.
pub fn init(path: Option<&Path>) -> Result<LoggerConfig, figment::Error> {
    let config = load_config(path)?;
    apply(&config);
    tracing::debug!(target: "relaylog", threshold = %config.threshold, "default facades configured");
    Ok(config)
}
