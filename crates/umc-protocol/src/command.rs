//! Normalized command values produced by the decoder.

use serde::{Deserialize, Serialize};

/// Motor action carried by a [`MotorCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Drive both sides forward.
    Forward,
    /// Drive both sides backward.
    Backward,
    /// Skid-steer turn to the left.
    Left,
    /// Skid-steer turn to the right.
    Right,
    /// Stop all motors.
    Stop,
    /// Change speed without changing the held direction.
    SetSpeed,
}

impl Action {
    /// Whether this action establishes or keeps a movement direction.
    #[must_use]
    pub fn is_directional(self) -> bool {
        matches!(
            self,
            Action::Forward | Action::Backward | Action::Left | Action::Right
        )
    }
}

/// A normalized motor directive, immutable once decoded.
///
/// `speed_percent` is `None` when the wire form omitted a value; the
/// configured default (or turn speed, for turns) is substituted at
/// calibration time, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorCommand {
    /// The requested action.
    pub action: Action,
    /// Requested speed in percent, `0..=100`, if the sender supplied one.
    pub speed_percent: Option<u8>,
}

impl MotorCommand {
    /// Creates a command with an explicit speed.
    #[must_use]
    pub fn with_speed(action: Action, speed_percent: u8) -> Self {
        Self {
            action,
            speed_percent: Some(speed_percent),
        }
    }

    /// Creates a command that defers to the configured default speed.
    #[must_use]
    pub fn default_speed(action: Action) -> Self {
        Self {
            action,
            speed_percent: None,
        }
    }
}

/// Decoded inbound message.
///
/// Most traffic is [`Command::Drive`]; the two extra variants carry the
/// original protocol's privileged stop and status-request messages, which
/// drive no motors through the normal calibration path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A normal motor directive.
    Drive(MotorCommand),
    /// `EMERGENCY_STOP` / `E_STOP`: privileged stop, bypasses all gating.
    EmergencyStop,
    /// `STATUS`: request an immediate status publication.
    QueryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directional_actions() {
        assert!(Action::Forward.is_directional());
        assert!(Action::Left.is_directional());
        assert!(!Action::Stop.is_directional());
        assert!(!Action::SetSpeed.is_directional());
    }

    #[test]
    fn test_motor_command_equality_across_constructors() {
        let a = MotorCommand::with_speed(Action::Forward, 50);
        let b = MotorCommand {
            action: Action::Forward,
            speed_percent: Some(50),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_action_serde_names() {
        let json = serde_json::to_string(&Action::SetSpeed).expect("serializable");
        assert_eq!(json, "\"set_speed\"");
    }
}
