// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;
use xr_core::test_support::config_path;

const SETTINGS: &str = r#"
[controller]
poll_attempts = 4
poll_delay_ms = 1500

[job_control]
endpoint = "http://127.0.0.1:9000"
auth = false

[managed]
"projects/acme-finance/locations/us/transferConfigs/69657df0-0000-22f1-a447" = 3
"projects/acme-finance/locations/eu/transferConfigs/nightly" = 1
"#;

fn write_settings(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_settings_file() {
    let file = write_settings(SETTINGS);

    let settings = Settings::load(file.path()).unwrap();

    assert_eq!(settings.controller.poll_attempts, 4);
    assert_eq!(settings.controller.poll_delay_ms, 1500);
    assert_eq!(settings.controller.history_page_size, 20);
    assert_eq!(settings.job_control.endpoint, "http://127.0.0.1:9000");
    assert_eq!(settings.job_control.request_timeout_ms, 30_000);
    assert!(!settings.job_control.auth);
    assert_eq!(settings.managed.len(), 2);
}

#[test]
fn empty_file_uses_defaults() {
    let settings = Settings::parse("").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.job_control.endpoint, DEFAULT_ENDPOINT);
    assert!(settings.job_control.auth);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = Settings::load(&path).unwrap_err();

    assert!(matches!(err, LifecycleError::Read { .. }), "{err}");
    assert!(err.to_string().contains("absent.toml"));
}

#[yare::parameterized(
    unknown_section = { "[controler]\npoll_attempts = 1" },
    unknown_key     = { "[job_control]\nendpont = \"x\"" },
    negative_limit  = { "[managed]\n\"projects/p/locations/l/transferConfigs/c\" = -1" },
    not_toml        = { "managed = [" },
)]
fn rejects_malformed(content: &str) {
    assert!(matches!(
        Settings::parse(content),
        Err(LifecycleError::Parse(_))
    ));
}

#[test]
fn overrides_replace_file_values() {
    let mut settings = Settings::parse(SETTINGS).unwrap();

    settings.apply(&Overrides {
        poll_attempts: Some(2),
        poll_delay_ms: None,
        history_page_size: Some(50),
        endpoint: Some("http://emulator:8085".to_string()),
    });

    assert_eq!(settings.controller.poll_attempts, 2);
    assert_eq!(settings.controller.poll_delay_ms, 1500);
    assert_eq!(settings.controller.history_page_size, 50);
    assert_eq!(settings.job_control.endpoint, "http://emulator:8085");
}

#[test]
fn builds_config() {
    let settings = Settings::parse(SETTINGS).unwrap();

    let config = Config::from_settings(PathBuf::from("x.toml"), settings, 8080).unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.managed.max_retries(&config_path()), Some(3));
    assert_eq!(config.job_control.request_timeout, Duration::from_secs(30));
    assert!(!config.job_control.auth);
    assert_eq!(config.controller.poll_delay(), Duration::from_millis(1500));
}

#[test]
fn invalid_managed_path_is_rejected() {
    let settings = Settings::parse("[managed]\n\"transferConfigs/abc\" = 3").unwrap();

    let err = Config::from_settings(PathBuf::from("x.toml"), settings, 8080).unwrap_err();

    assert!(matches!(err, LifecycleError::Managed(_)), "{err}");
}

#[test]
fn invalid_controller_setting_is_rejected() {
    let mut settings = Settings::parse(SETTINGS).unwrap();
    settings.apply(&Overrides {
        poll_attempts: Some(0),
        ..Overrides::default()
    });

    let err = Config::from_settings(PathBuf::from("x.toml"), settings, 8080).unwrap_err();

    assert!(err.to_string().contains("poll_attempts"), "{err}");
}

#[test]
fn zero_request_timeout_is_rejected() {
    let settings = Settings::parse("[job_control]\nrequest_timeout_ms = 0").unwrap();

    let err = Config::from_settings(PathBuf::from("x.toml"), settings, 8080).unwrap_err();

    assert!(
        matches!(err, LifecycleError::InvalidSetting { field: "job_control.request_timeout_ms", .. }),
        "{err}"
    );
}

#[test]
fn one_millisecond_request_timeout_is_accepted() {
    let settings = Settings::parse("[job_control]\nrequest_timeout_ms = 1").unwrap();

    let config = Config::from_settings(PathBuf::from("x.toml"), settings, 8080).unwrap();

    assert_eq!(config.job_control.request_timeout, Duration::from_millis(1));
}

#[yare::parameterized(
    json       = { "json", LogFormat::Json },
    json_upper = { "JSON", LogFormat::Json },
    pretty     = { "pretty", LogFormat::Pretty },
    unknown    = { "compact", LogFormat::Pretty },
)]
fn parses_log_format(value: &str, expected: LogFormat) {
    assert_eq!(LogFormat::parse(value), expected);
}

#[tokio::test]
async fn startup_binds_and_builds_controller() {
    let settings = Settings::parse(SETTINGS).unwrap();
    let config = Config::from_settings(PathBuf::from("x.toml"), settings, 0).unwrap();

    let started = startup(&config).await.unwrap();

    assert_ne!(started.listener.local_addr().unwrap().port(), 0);
    assert_eq!(started.controller.managed().len(), 2);
    assert_eq!(started.controller.config().poll_attempts, 4);
}
