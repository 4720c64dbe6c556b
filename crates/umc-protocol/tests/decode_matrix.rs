//! Cross-format decode equivalence and rejection matrix.

use umc_protocol::{decode, Action, Command, DecodeError, MotorCommand};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn test_every_alias_maps_to_long_form() -> TestResult {
    let groups: &[(&[&str], Action)] = &[
        (&["FORWARD", "START_FORWARD", "F", "forward"], Action::Forward),
        (&["BACKWARD", "START_BACKWARD", "B"], Action::Backward),
        (&["LEFT", "START_LEFT", "L"], Action::Left),
        (&["RIGHT", "START_RIGHT", "R"], Action::Right),
        (&["STOP", "S", "stop"], Action::Stop),
        (&["SPEED", "SET_SPEED"], Action::SetSpeed),
    ];

    for (aliases, action) in groups {
        for alias in *aliases {
            let decoded = decode(alias.as_bytes())?;
            assert_eq!(
                decoded,
                Command::Drive(MotorCommand::default_speed(*action)),
                "alias {alias} should map to {action:?}"
            );
        }
    }
    Ok(())
}

#[test]
fn test_both_forms_are_bit_identical() -> TestResult {
    let pairs: &[(&str, &str)] = &[
        ("FORWARD:50", r#"{"action": "forward", "speed_percent": 50}"#),
        ("BACKWARD:75", r#"{"action": "backward", "speed_percent": 75}"#),
        ("LEFT:40", r#"{"action": "left", "speed_percent": 40}"#),
        ("SPEED:80", r#"{"action": "set_speed", "speed_percent": 80}"#),
        ("STOP", r#"{"action": "stop"}"#),
    ];

    for (legacy, enhanced) in pairs {
        assert_eq!(
            decode(legacy.as_bytes())?,
            decode(enhanced.as_bytes())?,
            "forms must normalize identically: {legacy} vs {enhanced}"
        );
    }
    Ok(())
}

#[test]
fn test_privileged_messages() -> TestResult {
    assert_eq!(decode(b"EMERGENCY_STOP")?, Command::EmergencyStop);
    assert_eq!(decode(b"E_STOP")?, Command::EmergencyStop);
    assert_eq!(decode(b"e_stop")?, Command::EmergencyStop);
    assert_eq!(decode(b"STATUS")?, Command::QueryStatus);
    assert_eq!(
        decode(br#"{"action": "emergency_stop"}"#)?,
        Command::EmergencyStop
    );
    Ok(())
}

#[test]
fn test_rejections_carry_the_right_error() {
    // Unknown token, well-formed value: the token is the defect.
    assert!(matches!(
        decode(b"JUMP:50"),
        Err(DecodeError::UnknownAction(_))
    ));

    // Known token, value out of range.
    assert!(matches!(
        decode(b"LEFT:101"),
        Err(DecodeError::OutOfRange { value: 101 })
    ));

    // Unparsable value is malformed regardless of token.
    assert!(matches!(
        decode(b"JUMP:high"),
        Err(DecodeError::Malformed(_))
    ));

    // JSON with a non-integer speed is malformed, not out-of-range.
    assert!(matches!(
        decode(br#"{"action": "forward", "speed_percent": "fast"}"#),
        Err(DecodeError::Malformed(_))
    ));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any in-range speed decodes identically through both wire forms.
        #[test]
        fn prop_forms_agree_for_all_speeds(speed in 0u8..=100) {
            let legacy = format!("FORWARD:{speed}");
            let enhanced = format!(r#"{{"action": "forward", "speed_percent": {speed}}}"#);
            prop_assert_eq!(
                decode(legacy.as_bytes()),
                decode(enhanced.as_bytes())
            );
        }

        /// Any out-of-range integer speed is rejected with `OutOfRange`.
        #[test]
        fn prop_out_of_range_rejected(speed in 101i64..10_000) {
            let legacy = format!("FORWARD:{speed}");
            prop_assert_eq!(
                decode(legacy.as_bytes()),
                Err(DecodeError::OutOfRange { value: speed })
            );
        }

        /// Decoding arbitrary bytes never panics.
        #[test]
        fn prop_decode_total(raw in proptest::collection::vec(any::<u8>(), 0..64)) {
            let _ = decode(&raw);
        }
    }
}
