//! The pure calibration adjuster and the ramp helper.

use serde::{Deserialize, Serialize};
use umc_protocol::{Action, MotorCommand};

use crate::profile::{CalibrationProfile, MotorSettings};

/// The value actually sent to the HAL after calibration and clamping:
/// signed per-side duty in `[-max_speed_percent, +max_speed_percent]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveOutput {
    /// Left-side duty, positive = forward.
    pub left_duty: f64,
    /// Right-side duty, positive = forward.
    pub right_duty: f64,
}

impl DriveOutput {
    /// The all-stop output.
    pub const ZERO: Self = Self {
        left_duty: 0.0,
        right_duty: 0.0,
    };

    /// Creates a drive output from per-side duties.
    #[must_use]
    pub fn new(left_duty: f64, right_duty: f64) -> Self {
        Self {
            left_duty,
            right_duty,
        }
    }

    /// Whether either side carries non-zero duty.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.left_duty != 0.0 || self.right_duty != 0.0
    }

    /// The larger duty magnitude of the two sides.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.left_duty.abs().max(self.right_duty.abs())
    }

    fn clamped(self, limit: f64) -> Self {
        Self {
            left_duty: self.left_duty.clamp(-limit, limit),
            right_duty: self.right_duty.clamp(-limit, limit),
        }
    }
}

/// The last directional action held by the controller.
///
/// `SetSpeed` scales the held movement rather than establishing a new
/// direction, so the (pure) adjuster receives the heading as an argument
/// instead of remembering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Heading {
    /// Moving forward.
    Forward,
    /// Moving backward.
    Backward,
    /// Turning left.
    Left,
    /// Turning right.
    Right,
    /// Not moving.
    Stopped,
}

impl Heading {
    /// The heading established by `action`, or `None` when the action does
    /// not change direction (`SetSpeed`).
    #[must_use]
    pub fn from_action(action: Action) -> Option<Self> {
        match action {
            Action::Forward => Some(Heading::Forward),
            Action::Backward => Some(Heading::Backward),
            Action::Left => Some(Heading::Left),
            Action::Right => Some(Heading::Right),
            Action::Stop => Some(Heading::Stopped),
            Action::SetSpeed => None,
        }
    }

    fn directional_action(self) -> Option<Action> {
        match self {
            Heading::Forward => Some(Action::Forward),
            Heading::Backward => Some(Action::Backward),
            Heading::Left => Some(Action::Left),
            Heading::Right => Some(Action::Right),
            Heading::Stopped => None,
        }
    }
}

/// Maps a command to calibrated, clamped per-side duty.
///
/// Pure and stateless: `heading` resolves `SetSpeed` against the held
/// movement, and acceleration ramping is the caller's concern (see
/// [`ramp_toward`]).
///
/// Rules:
/// - `Forward`/`Backward`: equal base duty both sides, scaled by the
///   per-side factors; sign flips for `Backward`.
/// - `Left`/`Right`: magnitude-equal, sign-opposite duty of
///   `turn_speed * turn_adjustment` (skid-steer); `Left` drives the left
///   side backward. The per-side factors apply to turn duty too.
/// - `SetSpeed`: re-applies `heading` at the new speed; with heading
///   `Stopped` there is nothing to scale and the output is zero.
/// - `Stop`: zero, bypassing calibration.
///
/// The final clamp to `[-max_speed_percent, +max_speed_percent]` is silent;
/// it is a normal safety bound, not an input defect.
#[must_use]
pub fn apply(
    command: MotorCommand,
    heading: Heading,
    profile: &CalibrationProfile,
    settings: &MotorSettings,
) -> DriveOutput {
    let limit = f64::from(settings.max_speed_percent);

    let (action, speed) = match command.action {
        Action::Stop => return DriveOutput::ZERO,
        Action::SetSpeed => match heading.directional_action() {
            Some(held) => (held, command.speed_percent),
            None => return DriveOutput::ZERO,
        },
        other => (other, command.speed_percent),
    };

    let output = match action {
        Action::Forward | Action::Backward => {
            let base = f64::from(speed.unwrap_or(settings.default_speed_percent));
            let sign = if action == Action::Backward { -1.0 } else { 1.0 };
            DriveOutput::new(
                sign * base * profile.left_factor,
                sign * base * profile.right_factor,
            )
        }
        Action::Left | Action::Right => {
            let base = f64::from(speed.unwrap_or(settings.turn_speed_percent));
            let differential = base * profile.turn_adjustment;
            let (left_sign, right_sign) = if action == Action::Left {
                (-1.0, 1.0)
            } else {
                (1.0, -1.0)
            };
            DriveOutput::new(
                left_sign * differential * profile.left_factor,
                right_sign * differential * profile.right_factor,
            )
        }
        // Stop and SetSpeed were resolved above.
        Action::Stop | Action::SetSpeed => DriveOutput::ZERO,
    };

    output.clamped(limit)
}

/// Moves `current` toward `target` by at most `step` per side.
///
/// Each side advances independently in the direction of its delta and never
/// overshoots. Pure; the controller calls this once per control tick while
/// acceleration is enabled.
#[must_use]
pub fn ramp_toward(current: DriveOutput, target: DriveOutput, step: f64) -> DriveOutput {
    fn advance(current: f64, target: f64, step: f64) -> f64 {
        let delta = target - current;
        if delta.abs() <= step {
            target
        } else {
            current + step * delta.signum()
        }
    }

    DriveOutput::new(
        advance(current.left_duty, target.left_duty, step),
        advance(current.right_duty, target.right_duty, step),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> CalibrationProfile {
        CalibrationProfile::default()
    }

    fn settings() -> MotorSettings {
        MotorSettings::default()
    }

    fn assert_output(out: DriveOutput, left: f64, right: f64) {
        assert!(
            (out.left_duty - left).abs() < 1e-9 && (out.right_duty - right).abs() < 1e-9,
            "expected {{left: {left}, right: {right}}}, got {out:?}"
        );
    }

    #[test]
    fn test_forward_applies_per_side_factors() {
        let profile = CalibrationProfile {
            left_factor: 1.0,
            right_factor: 0.9,
            turn_adjustment: 1.0,
        };
        let cmd = MotorCommand::with_speed(Action::Forward, 50);
        let out = apply(cmd, Heading::Stopped, &profile, &settings());
        assert_output(out, 50.0, 45.0);
    }

    #[test]
    fn test_backward_flips_sign() {
        let cmd = MotorCommand::with_speed(Action::Backward, 60);
        let out = apply(cmd, Heading::Stopped, &profile(), &settings());
        assert_output(out, -60.0, -60.0);
    }

    #[test]
    fn test_left_turn_sign_convention() {
        // turn_speed_percent=40, turn_adjustment=1.0 -> {left: -40, right: 40}
        let cmd = MotorCommand::default_speed(Action::Left);
        let out = apply(cmd, Heading::Stopped, &profile(), &settings());
        assert_output(out, -40.0, 40.0);
    }

    #[test]
    fn test_right_turn_mirrors_left() {
        let cmd = MotorCommand::default_speed(Action::Right);
        let out = apply(cmd, Heading::Stopped, &profile(), &settings());
        assert_output(out, 40.0, -40.0);
    }

    #[test]
    fn test_turn_uses_supplied_speed_over_turn_default() {
        let cmd = MotorCommand::with_speed(Action::Left, 60);
        let out = apply(cmd, Heading::Stopped, &profile(), &settings());
        assert_output(out, -60.0, 60.0);
    }

    #[test]
    fn test_stop_bypasses_calibration() {
        let profile = CalibrationProfile {
            left_factor: 2.0,
            right_factor: 3.0,
            turn_adjustment: 5.0,
        };
        let cmd = MotorCommand::with_speed(Action::Stop, 100);
        let out = apply(cmd, Heading::Forward, &profile, &settings());
        assert_eq!(out, DriveOutput::ZERO);
    }

    #[test]
    fn test_set_speed_scales_held_heading() {
        let cmd = MotorCommand::with_speed(Action::SetSpeed, 80);
        let out = apply(cmd, Heading::Backward, &profile(), &settings());
        assert_output(out, -80.0, -80.0);

        let out = apply(cmd, Heading::Left, &profile(), &settings());
        assert_output(out, -80.0, 80.0);
    }

    #[test]
    fn test_set_speed_while_stopped_is_zero() {
        let cmd = MotorCommand::with_speed(Action::SetSpeed, 80);
        let out = apply(cmd, Heading::Stopped, &profile(), &settings());
        assert_eq!(out, DriveOutput::ZERO);
    }

    #[test]
    fn test_clamp_to_max_speed() {
        let profile = CalibrationProfile {
            left_factor: 1.5,
            right_factor: 1.0,
            turn_adjustment: 1.0,
        };
        let settings = MotorSettings {
            max_speed_percent: 80,
            ..Default::default()
        };
        let cmd = MotorCommand::with_speed(Action::Forward, 100);
        let out = apply(cmd, Heading::Stopped, &profile, &settings);
        assert_output(out, 80.0, 80.0);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let cmd = MotorCommand::with_speed(Action::Forward, 73);
        let first = apply(cmd, Heading::Stopped, &profile(), &settings());
        let second = apply(cmd, Heading::Stopped, &profile(), &settings());
        assert_eq!(first, second);
    }

    #[test]
    fn test_ramp_advances_by_step() {
        let current = DriveOutput::ZERO;
        let target = DriveOutput::new(50.0, -30.0);

        let one = ramp_toward(current, target, 10.0);
        assert_output(one, 10.0, -10.0);

        let two = ramp_toward(one, target, 10.0);
        assert_output(two, 20.0, -20.0);
    }

    #[test]
    fn test_ramp_never_overshoots() {
        let current = DriveOutput::new(45.0, -25.0);
        let target = DriveOutput::new(50.0, -30.0);
        let next = ramp_toward(current, target, 10.0);
        assert_eq!(next, target);
    }

    #[test]
    fn test_ramp_handles_direction_reversal() {
        let current = DriveOutput::new(30.0, 30.0);
        let target = DriveOutput::new(-30.0, -30.0);
        let next = ramp_toward(current, target, 20.0);
        assert_output(next, 10.0, 10.0);
    }
}
