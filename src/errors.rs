//! Error types for the sinks and for configuration loading.
//!
//! The logging calls themselves never surface these to callers. Each sink returns a
//! [`LogResult`] and the facade turns every failure into a console report.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("I/O operation failed: {operation} on {} - {source}", .path.display())]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {context} - {source}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Detail payload must be a JSON object, got {kind}")]
    InvalidDetail { kind: String },

    #[error("Network operation failed: {operation} - {source}")]
    Network {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Log collector answered {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("Remote delivery worker panicked: {message}")]
    DeliveryWorker { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type LogResult<T> = Result<T, LogError>;

impl LogError {
    pub fn io(operation: impl Into<String>, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    pub fn network(operation: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            operation: operation.into(),
            source,
        }
    }

    pub fn delivery_worker(message: impl Into<String>) -> Self {
        Self::DeliveryWorker {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::serialization("json_operation", err)
    }
}

impl From<reqwest::Error> for LogError {
    fn from(err: reqwest::Error) -> Self {
        LogError::network("http_request", err)
    }
}

impl From<figment::Error> for LogError {
    fn from(err: figment::Error) -> Self {
        LogError::config(err.to_string())
    }
}
