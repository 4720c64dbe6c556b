//! File-backed loading paths for the configuration document.

use std::io::Write;
use umc_config::{Config, ConfigError};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const DOCUMENT: &str = r#"{
    "motor_controller": { "type": "l298" },
    "mqtt": {
        "broker": "broker.local",
        "port": 1883,
        "topics": {
            "command": "robot/motor/command",
            "status": "robot/motor/status"
        },
        "heartbeat_timeout_seconds": 5
    },
    "motor_settings": {
        "default_speed_percent": 60,
        "max_speed_percent": 90,
        "turn_speed_percent": 40,
        "acceleration_enabled": true,
        "acceleration_step": 5
    },
    "calibration": {
        "left_motor_factor": 0.95,
        "right_motor_factor": 1.0,
        "turn_adjustment": 1.1
    },
    "safety": {
        "emergency_stop_enabled": true,
        "heartbeat_monitoring": true,
        "auto_stop_on_disconnect": false
    }
}"#;

#[test]
fn test_load_valid_file() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(DOCUMENT.as_bytes())?;

    let config = Config::load(file.path())?;
    assert_eq!(config.mqtt.broker, "broker.local");
    assert_eq!(config.mqtt.topics.command, "robot/motor/command");
    assert!(config.motor_settings.acceleration_enabled);
    assert!(!config.safety_config().auto_stop_on_disconnect);
    Ok(())
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = Config::load("/nonexistent/umc.json").expect_err("must fail");
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_load_malformed_json_is_parse_error() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(b"{ not json")?;

    let err = Config::load(file.path()).expect_err("must fail");
    assert!(matches!(err, ConfigError::Parse(_)));
    Ok(())
}
