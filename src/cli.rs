use crate::config::LoggerConfig;
use crate::config_loader::load_config;
use crate::event::LogOptions;
use crate::logger::{Configurable, FileLogger, RemoteLogger};
use crate::severity::Severity;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI interface for relaylog
#[derive(Parser, Debug)]
#[command(
    name = "relaylog",
    version,
    about = "Emit log events to the console, a log file, or a remote log collector"
)]
pub struct Cli {
    /// TOML configuration file (defaults to ./relaylog.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Internal diagnostics verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a text message to the console and the log file
    Emit {
        #[arg(short, long)]
        level: Severity,
        #[arg(short, long)]
        message: String,
        /// Log file for this event only
        #[arg(long)]
        file: Option<PathBuf>,
        /// Correlation id to reuse
        #[arg(long)]
        event_id: Option<String>,
        /// Pad priority tags to a fixed width
        #[arg(long, overrides_with = "no_compact")]
        compact: bool,
        /// Full-width priority tags, even when the config asks for compact
        #[arg(long, overrides_with = "compact")]
        no_compact: bool,
        /// Override the configured threshold
        #[arg(long)]
        threshold: Option<Severity>,
    },

    /// Send a JSON detail object to the remote log collector
    Remote {
        #[arg(short, long)]
        level: Severity,
        /// JSON object, e.g. '{"user":"u1"}'
        #[arg(short, long)]
        detail: String,
        #[arg(long)]
        event_id: Option<String>,
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        app_id: Option<String>,
        #[arg(long)]
        threshold: Option<Severity>,
    },

    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    pub fn diagnostics_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Absent unless one of `--compact` / `--no-compact` was given; the last one wins.
fn compact_override(compact: bool, no_compact: bool) -> Option<bool> {
    match (compact, no_compact) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn options(event_id: Option<String>) -> LogOptions {
    LogOptions {
        event_id,
        ..LogOptions::default()
    }
}

/// Runs one command. Prints the correlation id of logged events to stdout.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config: LoggerConfig =
        load_config(cli.config.as_deref()).context("Failed to load relaylog configuration")?;

    match cli.command {
        Commands::Emit {
            level,
            message,
            file,
            event_id,
            compact,
            no_compact,
            threshold,
        } => {
            let logger = FileLogger::new(config);
            if let Some(threshold) = threshold {
                logger.set_threshold(threshold);
            }
            let mut opts = options(event_id);
            opts.file = file;
            opts.compact = compact_override(compact, no_compact);
            let id = logger.log(level, &message, &opts);
            println!("{id}");
        }
        Commands::Remote {
            level,
            detail,
            event_id,
            endpoint,
            token,
            app_id,
            threshold,
        } => {
            let detail: serde_json::Value =
                serde_json::from_str(&detail).context("--detail must be valid JSON")?;
            let logger = RemoteLogger::new(config);
            logger.configure(|cfg| {
                if let Some(endpoint) = endpoint {
                    cfg.remote.endpoint = endpoint;
                }
                if let Some(token) = token {
                    cfg.remote.token = token;
                }
                if let Some(app_id) = app_id {
                    cfg.remote.app_id = app_id;
                }
                if let Some(threshold) = threshold {
                    cfg.threshold = threshold;
                }
            });
            logger
                .config()
                .validate()
                .context("Invalid remote settings")?;
            let id = logger.log(level, &detail, &options(event_id));
            println!("{id}");
        }
        Commands::Config => {
            let rendered =
                toml::to_string_pretty(&config).context("Failed to render configuration")?;
            print!("{rendered}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_emit_arguments() {
        let cli = Cli::try_parse_from([
            "relaylog", "emit", "--level", "warn", "--message", "disk low", "--event-id", "E9",
            "--compact",
        ])
        .unwrap();
        match cli.command {
            Commands::Emit {
                level,
                message,
                event_id,
                compact,
                ..
            } => {
                assert_eq!(level, Severity::Warning);
                assert_eq!(message, "disk low");
                assert_eq!(event_id.as_deref(), Some("E9"));
                assert!(compact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    fn emit_compact(args: &[&str]) -> Option<bool> {
        let base = ["relaylog", "emit", "--level", "info", "--message", "x"];
        let cli = Cli::try_parse_from(base.iter().chain(args).copied()).unwrap();
        match cli.command {
            Commands::Emit {
                compact, no_compact, ..
            } => compact_override(compact, no_compact),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn compact_flags_resolve_to_an_override() {
        assert_eq!(emit_compact(&[]), None);
        assert_eq!(emit_compact(&["--compact"]), Some(true));
        assert_eq!(emit_compact(&["--no-compact"]), Some(false));
        assert_eq!(emit_compact(&["--compact", "--no-compact"]), Some(false));
        assert_eq!(emit_compact(&["--no-compact", "--compact"]), Some(true));
    }

    #[test]
    fn no_compact_beats_configured_compact() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "relaylog.toml",
                r#"
                    compact = true
                    fields = ["priority"]
                    default_file = "app.log"
                "#,
            )?;

            let emit = |flag: &str| {
                let cli = Cli::try_parse_from([
                    "relaylog", "emit", "--level", "warn", "--message", "disk low", flag,
                ])
                .unwrap();
                run(cli).unwrap();
            };
            emit("--no-compact");
            emit("--compact");

            let content = std::fs::read_to_string("app.log").unwrap();
            assert_eq!(content, "[WARNING] disk low\n[WARN]  disk low\n");
            Ok(())
        });
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(Cli::try_parse_from(["relaylog", "emit", "--level", "loud", "--message", "x"]).is_err());
    }

    #[test]
    fn verbosity_raises_diagnostics() {
        let cli = Cli::try_parse_from(["relaylog", "-vv", "config"]).unwrap();
        assert_eq!(cli.diagnostics_level(), tracing::Level::TRACE);
    }
}
