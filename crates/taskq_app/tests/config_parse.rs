use std::fs;
use std::time::Duration;

use taskq_app::config::{Overrides, PollModeSetting, Settings};
use taskq_engine::PollMode;
use tempfile::TempDir;

#[test]
fn parse_example_config() {
    let raw = include_str!("../taskq.example.ron");
    let settings: Settings = ron::from_str(raw).expect("parse RON");
    assert_eq!(settings, Settings::default());
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("taskq.ron");
    fs::write(&file, "(base_url: \"http://queue:9000\", poll_mode: fixed_rate)").unwrap();

    let settings = Settings::load(&file).unwrap();
    assert_eq!(settings.base_url, "http://queue:9000");
    assert_eq!(settings.poll_mode, PollModeSetting::FixedRate);
    assert_eq!(settings.interval_ms, 2000);
}

#[test]
fn overrides_win_over_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("taskq.ron");
    fs::write(&file, "(base_url: \"http://queue:9000\", interval_ms: 5000)").unwrap();

    let overrides = Overrides {
        interval_ms: Some(250),
        poll_mode: Some(PollModeSetting::FixedRate),
        ..Overrides::default()
    };
    let settings = Settings::resolve(Some(&file), &overrides).unwrap();

    assert_eq!(settings.base_url, "http://queue:9000");
    let engine = settings.engine_settings();
    assert_eq!(engine.poll.interval, Duration::from_millis(250));
    assert_eq!(engine.poll.mode, PollMode::FixedRate);
    assert_eq!(engine.api.request_timeout, Duration::from_secs(30));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let err = Settings::resolve(Some(&temp.path().join("nope.ron")), &Overrides::default())
        .unwrap_err();
    assert!(format!("{err:#}").contains("nope.ron"));
}

#[test]
fn zero_interval_is_rejected() {
    let overrides = Overrides {
        interval_ms: Some(0),
        ..Overrides::default()
    };
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("taskq.ron");
    fs::write(&file, "()").unwrap();

    assert!(Settings::resolve(Some(&file), &overrides).is_err());
}

#[test]
fn zero_timeouts_are_rejected() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("taskq.ron");
    fs::write(&file, "(connect_timeout_secs: 0)").unwrap();
    let err = Settings::resolve(Some(&file), &Overrides::default()).unwrap_err();
    assert!(err.to_string().contains("timeouts"));

    fs::write(&file, "()").unwrap();
    let overrides = Overrides {
        request_timeout_secs: Some(0),
        ..Overrides::default()
    };
    assert!(Settings::resolve(Some(&file), &overrides).is_err());
}
