// tests/config_loader.rs
use crate::config_loader::load_config;
use crate::formatter::{Field, FieldOptions};
use crate::severity::Severity;
use figment::Jail;
use std::path::{Path, PathBuf};

#[test]
fn defaults_without_file_or_env() {
    Jail::expect_with(|_jail| {
        let cfg = load_config(None)?;
        assert_eq!(cfg.threshold, Severity::Debug);
        assert_eq!(cfg.default_file, PathBuf::from("./log.log"));
        assert_eq!(cfg.fields, FieldOptions::all());
        Ok(())
    });
}

#[test]
fn toml_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "relaylog.toml",
            r#"
                threshold = "warning"
                fields = ["priority", "timestamp"]
                default_file = "/var/log/app.log"
                compact = true

                [remote]
                endpoint = "https://logs.example.com"
                token = "tok"
                app_id = "app"
            "#,
        )?;

        let cfg = load_config(None)?;
        assert_eq!(cfg.threshold, Severity::Warning);
        assert_eq!(cfg.fields, FieldOptions::all().without(Field::CorrelationId));
        assert_eq!(cfg.default_file, PathBuf::from("/var/log/app.log"));
        assert!(cfg.compact);
        assert_eq!(cfg.remote.endpoint, "https://logs.example.com");
        assert_eq!(cfg.remote.token, "tok");
        Ok(())
    });
}

#[test]
fn environment_wins_over_file() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", r#"threshold = "info""#)?;
        jail.set_env("RELAYLOG_THRESHOLD", "critical");
        jail.set_env("RELAYLOG_REMOTE__APP_ID", "from-env");
        jail.set_env("RELAYLOG_REMOTE__TIMEOUT_MS", "250");

        let cfg = load_config(Some(Path::new("custom.toml")))?;
        assert_eq!(cfg.threshold, Severity::Critical);
        assert_eq!(cfg.remote.app_id, "from-env");
        assert_eq!(cfg.remote.timeout_ms, Some(250));
        Ok(())
    });
}

#[test]
fn invalid_endpoint_fails_fast() {
    Jail::expect_with(|jail| {
        jail.set_env("RELAYLOG_REMOTE__ENDPOINT", "localhost:8100");

        let err = load_config(None).unwrap_err();
        assert!(err.to_string().contains("endpoint"));
        Ok(())
    });
}

#[test]
fn unknown_threshold_fails() {
    Jail::expect_with(|jail| {
        jail.set_env("RELAYLOG_THRESHOLD", "loud");
        assert!(load_config(None).is_err());
        Ok(())
    });
}
