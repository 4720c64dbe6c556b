//! Property-based tests for the adjuster: clamp invariant, purity, and
//! ramp convergence.

#[cfg(test)]
mod proptest_adjuster {
    use proptest::prelude::*;
    use umc_calibration::{
        apply, ramp_toward, CalibrationProfile, DriveOutput, Heading, MotorSettings,
    };
    use umc_protocol::{Action, MotorCommand};

    fn any_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Forward),
            Just(Action::Backward),
            Just(Action::Left),
            Just(Action::Right),
            Just(Action::Stop),
            Just(Action::SetSpeed),
        ]
    }

    fn any_heading() -> impl Strategy<Value = Heading> {
        prop_oneof![
            Just(Heading::Forward),
            Just(Heading::Backward),
            Just(Heading::Left),
            Just(Heading::Right),
            Just(Heading::Stopped),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        // --- Clamp invariant: output magnitude never exceeds max_speed_percent ---

        #[test]
        fn output_never_exceeds_max_speed(
            action in any_action(),
            heading in any_heading(),
            speed in proptest::option::of(0u8..=100),
            left_factor in 0.1f64..4.0,
            right_factor in 0.1f64..4.0,
            turn_adjustment in 0.1f64..4.0,
            max_speed in 1u8..=100,
        ) {
            let profile = CalibrationProfile { left_factor, right_factor, turn_adjustment };
            let settings = MotorSettings {
                default_speed_percent: 1.max(max_speed / 2),
                max_speed_percent: max_speed,
                turn_speed_percent: max_speed / 2,
                ..Default::default()
            };
            let cmd = MotorCommand { action, speed_percent: speed };
            let out = apply(cmd, heading, &profile, &settings);
            let limit = f64::from(max_speed);

            prop_assert!(out.left_duty.abs() <= limit + 1e-9,
                "left duty {} exceeds limit {}", out.left_duty, limit);
            prop_assert!(out.right_duty.abs() <= limit + 1e-9,
                "right duty {} exceeds limit {}", out.right_duty, limit);
            prop_assert!(out.left_duty.is_finite() && out.right_duty.is_finite());
        }

        // --- Purity: same inputs, same output ---

        #[test]
        fn apply_is_deterministic(
            action in any_action(),
            heading in any_heading(),
            speed in proptest::option::of(0u8..=100),
        ) {
            let profile = CalibrationProfile::default();
            let settings = MotorSettings::default();
            let cmd = MotorCommand { action, speed_percent: speed };

            let first = apply(cmd, heading, &profile, &settings);
            let second = apply(cmd, heading, &profile, &settings);
            prop_assert_eq!(first, second);
        }

        // --- Turn symmetry: Left and Right are mirror images ---

        #[test]
        fn turns_are_mirror_images(speed in 1u8..=100) {
            let profile = CalibrationProfile::default();
            let settings = MotorSettings::default();

            let left = apply(
                MotorCommand::with_speed(Action::Left, speed),
                Heading::Stopped,
                &profile,
                &settings,
            );
            let right = apply(
                MotorCommand::with_speed(Action::Right, speed),
                Heading::Stopped,
                &profile,
                &settings,
            );

            prop_assert!((left.left_duty + right.left_duty).abs() < 1e-9);
            prop_assert!((left.right_duty + right.right_duty).abs() < 1e-9);
            // Skid-steer: magnitude-equal, sign-opposite across sides.
            prop_assert!((left.left_duty + left.right_duty).abs() < 1e-9);
        }

        // --- Ramp convergence: reaches target in finite steps, no overshoot ---

        #[test]
        fn ramp_converges_without_overshoot(
            start_left in -100.0f64..100.0,
            start_right in -100.0f64..100.0,
            target_left in -100.0f64..100.0,
            target_right in -100.0f64..100.0,
            step in 1.0f64..50.0,
        ) {
            let target = DriveOutput::new(target_left, target_right);
            let mut current = DriveOutput::new(start_left, start_right);

            for _ in 0..400 {
                let next = ramp_toward(current, target, step);
                // Each side moves monotonically toward the target.
                prop_assert!(
                    (next.left_duty - target.left_duty).abs()
                        <= (current.left_duty - target.left_duty).abs() + 1e-9
                );
                prop_assert!(
                    (next.right_duty - target.right_duty).abs()
                        <= (current.right_duty - target.right_duty).abs() + 1e-9
                );
                current = next;
                if current == target {
                    break;
                }
            }

            prop_assert_eq!(current, target, "ramp must reach the target");
        }
    }
}
