//! Configuration document schema and strict loading.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use umc_calibration::{CalibrationProfile, MotorSettings};
use umc_hal::BackendKind;
use umc_safety::SafetyConfig;

use crate::error::{ConfigError, ConfigResult};

/// `motor_controller` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorControllerSection {
    /// Backend identifier; must be in the closed set.
    #[serde(rename = "type")]
    pub kind: String,
}

/// `mqtt.topics` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicsSection {
    /// Inbound command topic.
    pub command: String,
    /// Outbound status topic.
    pub status: String,
}

/// `mqtt` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MqttSection {
    /// Broker hostname or address.
    pub broker: String,
    /// Broker port.
    pub port: u16,
    /// Command and status topics.
    pub topics: TopicsSection,
    /// Heartbeat timeout in seconds; must be positive.
    pub heartbeat_timeout_seconds: u64,
}

impl MqttSection {
    /// The heartbeat timeout as a [`Duration`].
    #[must_use]
    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.heartbeat_timeout_seconds)
    }
}

/// `calibration` section, using the document's field names.
#[derive(Debug, Clone, Deserialize)]
struct CalibrationSection {
    left_motor_factor: f64,
    right_motor_factor: f64,
    turn_adjustment: f64,
}

/// `safety` section.
#[derive(Debug, Clone, Deserialize)]
struct SafetySection {
    emergency_stop_enabled: bool,
    heartbeat_monitoring: bool,
    auto_stop_on_disconnect: bool,
}

/// The complete, validated configuration document.
///
/// Every section is required; unknown fields anywhere in the document are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Backend selection.
    pub motor_controller: MotorControllerSection,
    /// Transport settings.
    pub mqtt: MqttSection,
    /// Speed and acceleration settings.
    pub motor_settings: MotorSettings,
    calibration: CalibrationSection,
    safety: SafetySection,
}

impl Config {
    /// Loads and validates the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] on I/O failure, malformed JSON, a missing
    /// required field, a bounds violation, or an unknown backend
    /// identifier. All are fatal at startup.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        info!(path = %path.display(), backend = %config.motor_controller.kind, "configuration loaded");
        Ok(config)
    }

    /// Parses and validates a document from a JSON string.
    ///
    /// # Errors
    ///
    /// As [`Config::load`], minus I/O.
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Re-checks every bound. Called by the loaders; also usable for a
    /// validate-only startup mode.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> ConfigResult<()> {
        self.backend_kind()?;

        if self.mqtt.broker.trim().is_empty() {
            return Err(ConfigError::invalid("mqtt.broker must not be empty"));
        }
        if self.mqtt.port == 0 {
            return Err(ConfigError::invalid("mqtt.port must be in 1..=65535"));
        }
        if self.mqtt.topics.command.trim().is_empty() || self.mqtt.topics.status.trim().is_empty()
        {
            return Err(ConfigError::invalid("mqtt.topics must not be empty"));
        }

        self.motor_settings
            .validate()
            .map_err(|e| ConfigError::invalid(e.to_string()))?;
        self.calibration_profile()
            .validate()
            .map_err(|e| ConfigError::invalid(e.to_string()))?;
        self.safety_config()
            .validate()
            .map_err(|e| ConfigError::invalid(e.to_string()))?;

        Ok(())
    }

    /// The selected backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownBackend`] for anything outside the
    /// closed set; there is deliberately no fallback default here.
    pub fn backend_kind(&self) -> ConfigResult<BackendKind> {
        BackendKind::from_identifier(&self.motor_controller.kind)
            .ok_or_else(|| ConfigError::unknown_backend(&self.motor_controller.kind))
    }

    /// The calibration profile from the `calibration` section.
    #[must_use]
    pub fn calibration_profile(&self) -> CalibrationProfile {
        CalibrationProfile {
            left_factor: self.calibration.left_motor_factor,
            right_factor: self.calibration.right_motor_factor,
            turn_adjustment: self.calibration.turn_adjustment,
        }
    }

    /// The safety configuration, combining the `safety` section with the
    /// heartbeat timeout from the `mqtt` section.
    #[must_use]
    pub fn safety_config(&self) -> SafetyConfig {
        SafetyConfig {
            heartbeat_timeout: self.mqtt.heartbeat_timeout(),
            emergency_stop_enabled: self.safety.emergency_stop_enabled,
            heartbeat_monitoring: self.safety.heartbeat_monitoring,
            auto_stop_on_disconnect: self.safety.auto_stop_on_disconnect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_document() -> serde_json::Value {
        serde_json::json!({
            "motor_controller": { "type": "motozero" },
            "mqtt": {
                "broker": "localhost",
                "port": 1883,
                "topics": {
                    "command": "hov/motor/command",
                    "status": "hov/motor/status"
                },
                "heartbeat_timeout_seconds": 10
            },
            "motor_settings": {
                "default_speed_percent": 50,
                "max_speed_percent": 100,
                "turn_speed_percent": 40,
                "acceleration_enabled": false,
                "acceleration_step": 10
            },
            "calibration": {
                "left_motor_factor": 1.0,
                "right_motor_factor": 0.9,
                "turn_adjustment": 1.0
            },
            "safety": {
                "emergency_stop_enabled": true,
                "heartbeat_monitoring": true,
                "auto_stop_on_disconnect": true
            }
        })
    }

    fn parse(value: serde_json::Value) -> ConfigResult<Config> {
        Config::from_json(&value.to_string())
    }

    #[test]
    fn test_full_document_loads() {
        let config = parse(full_document()).expect("valid document");
        assert_eq!(config.backend_kind().expect("backend"), BackendKind::MotoZero);
        assert_eq!(config.mqtt.heartbeat_timeout(), Duration::from_secs(10));
        assert!((config.calibration_profile().right_factor - 0.9).abs() < 1e-9);
        assert!(config.safety_config().auto_stop_on_disconnect);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut doc = full_document();
        doc["wifi"] = serde_json::json!({ "ssid": "robot" });
        doc["mqtt"]["qos"] = serde_json::json!(1);
        assert!(parse(doc).is_ok());
    }

    #[test]
    fn test_missing_sections_are_fatal() {
        for section in ["motor_controller", "mqtt", "motor_settings", "calibration", "safety"] {
            let mut doc = full_document();
            doc.as_object_mut().expect("object").remove(section);
            assert!(parse(doc).is_err(), "missing {section} must be fatal");
        }
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let mut doc = full_document();
        doc["safety"]
            .as_object_mut()
            .expect("object")
            .remove("auto_stop_on_disconnect");
        assert!(parse(doc).is_err());
    }

    #[test]
    fn test_unknown_backend_is_fatal_not_defaulted() {
        let mut doc = full_document();
        doc["motor_controller"]["type"] = serde_json::json!("picoborg");
        let err = parse(doc).expect_err("must fail");
        assert!(matches!(err, ConfigError::UnknownBackend { .. }));
    }

    #[test]
    fn test_bounds_violations_are_fatal() {
        let mut doc = full_document();
        doc["motor_settings"]["default_speed_percent"] = serde_json::json!(0);
        assert!(parse(doc).is_err());

        let mut doc = full_document();
        doc["calibration"]["left_motor_factor"] = serde_json::json!(-1.0);
        assert!(parse(doc).is_err());

        let mut doc = full_document();
        doc["mqtt"]["heartbeat_timeout_seconds"] = serde_json::json!(0);
        assert!(parse(doc).is_err());

        let mut doc = full_document();
        doc["mqtt"]["broker"] = serde_json::json!("");
        assert!(parse(doc).is_err());
    }

    #[test]
    fn test_backend_identifier_case_insensitive() {
        let mut doc = full_document();
        doc["motor_controller"]["type"] = serde_json::json!("CamJam");
        let config = parse(doc).expect("valid");
        assert_eq!(config.backend_kind().expect("backend"), BackendKind::CamJam);
    }
}
