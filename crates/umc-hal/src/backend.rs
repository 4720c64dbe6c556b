//! The capability interface and backend selection.

use serde::{Deserialize, Serialize};

use crate::error::HalResult;

/// Hard bound on duty magnitude accepted by any backend.
pub const MAX_DUTY: f64 = 100.0;

/// Uniform actuation interface implemented by every motor driver backend.
///
/// Contract:
/// - `drive` is idempotent under repeated identical calls, and direction
///   reversals need no intervening `stop`.
/// - `stop` must succeed; a failing `stop` is escalated to fatal by the
///   caller rather than retried.
/// - `shutdown` stops the motors and releases channel resources; the
///   backend rejects further calls afterwards.
pub trait MotorHal: Send {
    /// Applies signed per-side duty in `[-100, +100]`; positive drives a
    /// side forward.
    ///
    /// # Errors
    ///
    /// Returns [`HalError`](crate::HalError) when a duty value is invalid,
    /// the backend is shut down, or the channel write fails.
    fn drive(&mut self, left_duty: f64, right_duty: f64) -> HalResult<()>;

    /// Immediately zeroes all channels.
    ///
    /// # Errors
    ///
    /// Returns [`HalError`](crate::HalError) only when the board rejects
    /// the write; callers treat that as fatal.
    fn stop(&mut self) -> HalResult<()>;

    /// Stops the motors and releases channel resources.
    fn shutdown(&mut self);

    /// Stable identifier of this backend (the configuration string).
    fn identifier(&self) -> &'static str;
}

/// The closed set of selectable backends.
///
/// Selection happens once at startup from `motor_controller.type`; an
/// unrecognized identifier is a fatal configuration error, since a
/// silently wrong backend is a safety hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// MotoZero four-channel board (gpiozero-style motor pairs).
    MotoZero,
    /// L298 dual H-bridge (IN1..IN4 direction pins, two PWM enables).
    L298,
    /// CamJam EduKit two-channel robot board.
    CamJam,
}

impl BackendKind {
    /// All selectable backends, for error messages and diagnostics.
    pub const ALL: [BackendKind; 3] = [BackendKind::MotoZero, BackendKind::L298, BackendKind::CamJam];

    /// Resolves a configuration identifier, case-insensitively.
    ///
    /// Returns `None` for anything outside the closed set.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        match identifier.trim().to_ascii_lowercase().as_str() {
            "motozero" => Some(BackendKind::MotoZero),
            "l298" => Some(BackendKind::L298),
            "camjam" => Some(BackendKind::CamJam),
            _ => None,
        }
    }

    /// The configuration identifier for this backend.
    #[must_use]
    pub fn identifier(self) -> &'static str {
        match self {
            BackendKind::MotoZero => "motozero",
            BackendKind::L298 => "l298",
            BackendKind::CamJam => "camjam",
        }
    }

    /// Instantiates the backend.
    #[must_use]
    pub fn create(self) -> Box<dyn MotorHal> {
        match self {
            BackendKind::MotoZero => Box::new(crate::motozero::MotoZeroBackend::new()),
            BackendKind::L298 => Box::new(crate::l298::L298Backend::new()),
            BackendKind::CamJam => Box::new(crate::camjam::CamJamBackend::new()),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Validates a duty pair against [`MAX_DUTY`]. Shared by the backends.
pub(crate) fn check_duty(left: f64, right: f64) -> HalResult<()> {
    use crate::error::HalError;

    for (side, duty) in [("left", left), ("right", right)] {
        if !duty.is_finite() || duty.abs() > MAX_DUTY {
            return Err(HalError::invalid_duty(side, duty));
        }
    }
    Ok(())
}
