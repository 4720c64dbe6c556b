//! Calibration profile and motor settings.
//!
//! Both types are loaded once from configuration at process start and are
//! read-only thereafter; components receive them by reference.

use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, CalibrationResult};

/// Per-side correction factors for a physical drive train.
///
/// Real chassis rarely drive straight at equal duty; the factors scale each
/// side's duty so a `Forward` command tracks straight, and `turn_adjustment`
/// scales the turn differential for the chassis' wheelbase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// Multiplier applied to the left side's duty. Must be > 0.
    pub left_factor: f64,
    /// Multiplier applied to the right side's duty. Must be > 0.
    pub right_factor: f64,
    /// Multiplier applied to the turn differential. Must be > 0.
    pub turn_adjustment: f64,
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self {
            left_factor: 1.0,
            right_factor: 1.0,
            turn_adjustment: 1.0,
        }
    }
}

impl CalibrationProfile {
    /// Validate the profile bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if any factor is non-positive or non-finite.
    pub fn validate(&self) -> CalibrationResult<()> {
        for (field, value) in [
            ("left_motor_factor", self.left_factor),
            ("right_motor_factor", self.right_factor),
            ("turn_adjustment", self.turn_adjustment),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalibrationError::invalid_field(
                    field,
                    format!("must be a finite value > 0, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Speed and acceleration settings for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorSettings {
    /// Speed used when a command omits an explicit value.
    pub default_speed_percent: u8,
    /// Hard ceiling on output duty magnitude, both sides.
    pub max_speed_percent: u8,
    /// Base magnitude for `Left`/`Right` differential turns.
    pub turn_speed_percent: u8,
    /// When set, the controller ramps applied duty toward the target
    /// instead of jumping to it.
    pub acceleration_enabled: bool,
    /// Maximum duty change per control tick while ramping, `1..=100`.
    pub acceleration_step: u8,
}

impl Default for MotorSettings {
    fn default() -> Self {
        Self {
            default_speed_percent: 50,
            max_speed_percent: 100,
            turn_speed_percent: 40,
            acceleration_enabled: false,
            acceleration_step: 10,
        }
    }
}

impl MotorSettings {
    /// Validate the settings bounds:
    /// `0 < default_speed_percent <= max_speed_percent <= 100`,
    /// `turn_speed_percent <= max_speed_percent`, and
    /// `acceleration_step` in `1..=100`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first violated field.
    pub fn validate(&self) -> CalibrationResult<()> {
        if self.max_speed_percent == 0 || self.max_speed_percent > 100 {
            return Err(CalibrationError::invalid_field(
                "max_speed_percent",
                format!("must be in 1..=100, got {}", self.max_speed_percent),
            ));
        }
        if self.default_speed_percent == 0 || self.default_speed_percent > self.max_speed_percent {
            return Err(CalibrationError::invalid_field(
                "default_speed_percent",
                format!(
                    "must be in 1..={}, got {}",
                    self.max_speed_percent, self.default_speed_percent
                ),
            ));
        }
        if self.turn_speed_percent > self.max_speed_percent {
            return Err(CalibrationError::invalid_field(
                "turn_speed_percent",
                format!(
                    "must not exceed max_speed_percent ({}), got {}",
                    self.max_speed_percent, self.turn_speed_percent
                ),
            ));
        }
        if self.acceleration_step == 0 || self.acceleration_step > 100 {
            return Err(CalibrationError::invalid_field(
                "acceleration_step",
                format!("must be in 1..=100, got {}", self.acceleration_step),
            ));
        }
        Ok(())
    }
}
