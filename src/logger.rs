//! The logging facades application code calls.
//!
//! Every call follows the same path:
//! 1. echo to the console, whatever the threshold
//! 2. stop if the severity is below the configured threshold
//! 3. otherwise hand the event to the file or remote sink, reporting any sink failure
//!    back to the console
//! 4. return the correlation id so later calls can reuse it
//!
//! `terminal` runs the same path and then aborts the process.

use crate::config::{LoggerConfig, RemoteConfig};
use crate::console::{Console, StdConsole};
use crate::event::{resolve_event_id, LogOptions};
use crate::file_sink;
use crate::formatter::{render_line, render_prefix, FieldOptions};
use crate::errors::LogResult;
use crate::remote_sink::{deliver, to_detail, Detail};
use crate::severity::Severity;
use chrono::Local;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Console text used when a terminal event's detail could not be rendered.
pub const UNRENDERABLE_FATAL: &str =
    "Unspecified fatal error. Additionally the detail payload failed to render as JSON.";

/// Configuration owned by one facade.
///
/// Each logging call reads a single snapshot at entry. Changes made while a call is in
/// flight are seen by the next call, not the current one.
#[derive(Debug, Default)]
pub struct SharedConfig(RwLock<LoggerConfig>);

impl SharedConfig {
    pub fn new(config: LoggerConfig) -> Self {
        Self(RwLock::new(config))
    }

    pub fn snapshot(&self) -> LoggerConfig {
        match self.0.read() {
            Ok(cfg) => cfg.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut LoggerConfig)) {
        match self.0.write() {
            Ok(mut cfg) => f(&mut cfg),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

/// Configuration surface shared by both facades.
pub trait Configurable {
    fn shared_config(&self) -> &SharedConfig;

    fn config(&self) -> LoggerConfig {
        self.shared_config().snapshot()
    }

    fn configure(&self, f: impl FnOnce(&mut LoggerConfig)) {
        self.shared_config().update(f)
    }

    fn set_threshold(&self, threshold: Severity) {
        self.configure(|cfg| cfg.threshold = threshold)
    }

    fn set_fields(&self, fields: FieldOptions) {
        self.configure(|cfg| cfg.fields = fields)
    }

    fn set_default_file(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.configure(|cfg| cfg.default_file = path)
    }

    fn set_compact(&self, compact: bool) {
        self.configure(|cfg| cfg.compact = compact)
    }

    fn set_remote(&self, remote: RemoteConfig) {
        self.configure(|cfg| cfg.remote = remote)
    }
}

fn die(console: &dyn Console) -> ! {
    console.flush();
    std::process::abort()
}

/// Logs to the console and appends to a log file.
#[derive(Debug)]
pub struct FileLogger {
    config: SharedConfig,
    console: Arc<dyn Console>,
}

impl FileLogger {
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_console(config, Arc::new(StdConsole::new()))
    }

    pub fn with_console(config: LoggerConfig, console: Arc<dyn Console>) -> Self {
        Self {
            config: SharedConfig::new(config),
            console,
        }
    }

    pub fn console(&self) -> &Arc<dyn Console> {
        &self.console
    }

    /// Logs `message` at `severity` and returns the correlation id used.
    ///
    /// `Terminal` never returns; it takes the abort path of [`FileLogger::terminal_with`].
    pub fn log(&self, severity: Severity, message: &str, opts: &LogOptions) -> String {
        if severity == Severity::Terminal {
            self.terminal_with(message, opts)
        }
        self.record(severity, message, opts)
    }

    fn record(&self, severity: Severity, message: &str, opts: &LogOptions) -> String {
        let cfg = self.config.snapshot();
        let event_id = resolve_event_id(opts.event_id.as_deref());
        let compact = opts.compact.unwrap_or(cfg.compact);

        self.console.echo(severity, message, compact);
        if !severity.meets(cfg.threshold) {
            return event_id;
        }

        let fields = opts.fields.unwrap_or(cfg.fields);
        let prefix = render_prefix(severity, Some(event_id.as_str()), &Local::now(), &fields, compact);
        let line = render_line(&prefix, message);
        let path = file_sink::resolve_path(opts.file.as_deref(), &cfg.default_file);

        if let Err(err) = file_sink::append(&path, &line) {
            tracing::warn!(target: "relaylog", error = %err, "file sink failed");
            self.console.echo(Severity::Critical, &err.to_string(), compact);
        }
        event_id
    }

    /// Logs at `Terminal`, then aborts the process whether or not the file write worked.
    pub fn terminal(&self, message: &str) -> ! {
        self.terminal_with(message, &LogOptions::default())
    }

    pub fn terminal_with(&self, message: &str, opts: &LogOptions) -> ! {
        self.record(Severity::Terminal, message, opts);
        die(self.console.as_ref())
    }
}

macro_rules! file_levels {
    ($($name:ident, $with:ident => $severity:expr;)*) => {
        impl FileLogger {
            $(
                pub fn $name(&self, message: &str) -> String {
                    self.record($severity, message, &LogOptions::default())
                }

                pub fn $with(&self, message: &str, opts: &LogOptions) -> String {
                    self.record($severity, message, opts)
                }
            )*
        }
    };
}

file_levels! {
    debug, debug_with => Severity::Debug;
    info, info_with => Severity::Info;
    warning, warning_with => Severity::Warning;
    error, error_with => Severity::Error;
    critical, critical_with => Severity::Critical;
}

impl Configurable for FileLogger {
    fn shared_config(&self) -> &SharedConfig {
        &self.config
    }
}

/// Logs to the console and posts structured detail to a log collector.
#[derive(Debug)]
pub struct RemoteLogger {
    config: SharedConfig,
    console: Arc<dyn Console>,
}

/// Result of the shared remote path, before the terminal decision.
struct Recorded {
    event_id: String,
    rendered: bool,
}

impl RemoteLogger {
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_console(config, Arc::new(StdConsole::new()))
    }

    pub fn with_console(config: LoggerConfig, console: Arc<dyn Console>) -> Self {
        Self {
            config: SharedConfig::new(config),
            console,
        }
    }

    pub fn console(&self) -> &Arc<dyn Console> {
        &self.console
    }

    /// Logs `detail` at `severity` and returns the correlation id used.
    ///
    /// `detail` must serialize to a JSON object. `Terminal` never returns.
    pub fn log<T: Serialize + ?Sized>(&self, severity: Severity, detail: &T, opts: &LogOptions) -> String {
        if severity == Severity::Terminal {
            self.terminal_with(detail, opts)
        }
        self.record(severity, detail, opts).event_id
    }

    fn record<T: Serialize + ?Sized>(&self, severity: Severity, payload: &T, opts: &LogOptions) -> Recorded {
        let cfg = self.config.snapshot();
        let event_id = resolve_event_id(opts.event_id.as_deref());
        let compact = opts.compact.unwrap_or(cfg.compact);

        let (detail, rendered) = match encode(payload) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(target: "relaylog", error = %err, "detail payload rejected");
                self.console.echo(Severity::Error, &err.to_string(), compact);
                return Recorded {
                    event_id,
                    rendered: false,
                };
            }
        };

        self.console.echo(severity, &rendered, compact);
        if severity.meets(cfg.threshold) {
            if let Err(err) = deliver(&cfg.remote, severity, &event_id, &detail) {
                tracing::warn!(target: "relaylog", error = %err, "remote sink failed");
                self.console.echo(Severity::Error, &err.to_string(), compact);
            }
        }

        Recorded {
            event_id,
            rendered: true,
        }
    }

    /// Logs at `Terminal`, then aborts the process whether or not delivery worked.
    pub fn terminal<T: Serialize + ?Sized>(&self, detail: &T) -> ! {
        self.terminal_with(detail, &LogOptions::default())
    }

    pub fn terminal_with<T: Serialize + ?Sized>(&self, detail: &T, opts: &LogOptions) -> ! {
        let recorded = self.record(Severity::Terminal, detail, opts);
        if !recorded.rendered {
            self.console.emit(Severity::Terminal, UNRENDERABLE_FATAL);
        }
        die(self.console.as_ref())
    }
}

fn encode<T: Serialize + ?Sized>(payload: &T) -> LogResult<(Detail, String)> {
    let detail = to_detail(payload)?;
    let rendered = serde_json::to_string(&detail)?;
    Ok((detail, rendered))
}

macro_rules! remote_levels {
    ($($name:ident, $with:ident => $severity:expr;)*) => {
        impl RemoteLogger {
            $(
                pub fn $name<T: Serialize + ?Sized>(&self, detail: &T) -> String {
                    self.record($severity, detail, &LogOptions::default()).event_id
                }

                pub fn $with<T: Serialize + ?Sized>(&self, detail: &T, opts: &LogOptions) -> String {
                    self.record($severity, detail, opts).event_id
                }
            )*
        }
    };
}

remote_levels! {
    debug, debug_with => Severity::Debug;
    info, info_with => Severity::Info;
    warning, warning_with => Severity::Warning;
    error, error_with => Severity::Error;
    critical, critical_with => Severity::Critical;
}

impl Configurable for RemoteLogger {
    fn shared_config(&self) -> &SharedConfig {
        &self.config
    }
}
