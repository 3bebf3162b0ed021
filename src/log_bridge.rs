//! Routes records from the `log` crate through a [`FileLogger`].

use crate::event::LogOptions;
use crate::logger::FileLogger;
use crate::severity::Severity;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LogBridge {
    logger: Arc<FileLogger>,
}

impl LogBridge {
    pub fn new(logger: Arc<FileLogger>) -> Self {
        Self { logger }
    }

    /// Installs the bridge as the process's `log` logger.
    ///
    /// Every level is let through, since console echo ignores the threshold.
    pub fn install(logger: Arc<FileLogger>) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(Self::new(logger)))?;
        log::set_max_level(LevelFilter::Trace);
        Ok(())
    }
}

impl Log for LogBridge {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let message = format!("{}: {}", record.target(), record.args());
        self.logger
            .log(Severity::from(record.level()), &message, &LogOptions::default());
    }

    fn flush(&self) {
        self.logger.console().flush();
    }
}
