//! Library root for the `relaylog` crate
//! Severity-filtered logging to the console, an append-only file, and a remote collector

// Core error handling
pub mod errors;

// Levels and line formatting
pub mod formatter;
pub mod severity;

// Sinks
pub mod console;
pub mod file_sink;
pub mod remote_sink;

// Facades
pub mod event;
pub mod global;
pub mod log_bridge;
pub mod logger;

// Configuration & CLI
pub mod cli;
pub mod config;
pub mod config_loader;

#[cfg(test)]
mod tests {
    pub mod config_loader;
    pub mod file_logger;
    pub mod remote_logger;
}

pub use config::{LoggerConfig, RemoteConfig};
pub use console::{Console, MemoryConsole, StdConsole, TracingConsole};
pub use errors::{LogError, LogResult};
pub use event::LogOptions;
pub use formatter::{Field, FieldOptions};
pub use log_bridge::LogBridge;
pub use logger::{Configurable, FileLogger, RemoteLogger};
pub use severity::Severity;
