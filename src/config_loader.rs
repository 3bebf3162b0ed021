use crate::config::LoggerConfig;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub const CONFIG_FILE: &str = "relaylog.toml";
pub const ENV_PREFIX: &str = "RELAYLOG_";

/// Layers defaults, the TOML file and `RELAYLOG_*` variables, later layers winning.
///
/// Nested keys use `__` in the environment, e.g. `RELAYLOG_REMOTE__TOKEN`.
/// A missing TOML file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<LoggerConfig, figment::Error> {
    let figment = Figment::from(Serialized::defaults(LoggerConfig::default()))
        .merge(Toml::file(path.unwrap_or_else(|| Path::new(CONFIG_FILE))))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: LoggerConfig = figment.extract()?;

    if let Err(e) = config.validate() {
        return Err(figment::Error::from(e.to_string()));
    }

    Ok(config)
}
