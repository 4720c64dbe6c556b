//! Wire payload decoding.
//!
//! The two accepted forms are distinguished by structure: a payload whose
//! first non-whitespace byte is `{` is parsed as the enhanced JSON form,
//! anything else as the legacy colon-delimited form.

use serde::Deserialize;

use crate::command::{Action, Command, MotorCommand};
use crate::error::{DecodeError, DecodeResult};

/// Enhanced-form payload. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct EnhancedPayload {
    action: String,
    #[serde(default)]
    speed_percent: Option<i64>,
}

/// Decodes a raw command payload into a normalized [`Command`].
///
/// # Errors
///
/// - [`DecodeError::Malformed`] for non-UTF-8 bytes, empty payloads,
///   malformed JSON, or an unparsable numeric value.
/// - [`DecodeError::OutOfRange`] when a supplied speed parses but falls
///   outside `0..=100`.
/// - [`DecodeError::UnknownAction`] for an unrecognized action token.
pub fn decode(raw: &[u8]) -> DecodeResult<Command> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| DecodeError::malformed("payload is not valid UTF-8"))?;
    let text = text.trim();

    if text.is_empty() {
        return Err(DecodeError::malformed("empty payload"));
    }

    if text.starts_with('{') {
        decode_enhanced(text)
    } else {
        decode_legacy(text)
    }
}

fn decode_enhanced(text: &str) -> DecodeResult<Command> {
    let payload: EnhancedPayload =
        serde_json::from_str(text).map_err(|e| DecodeError::malformed(e.to_string()))?;

    let speed = validate_speed(payload.speed_percent)?;
    resolve_token(&payload.action, speed)
}

fn decode_legacy(text: &str) -> DecodeResult<Command> {
    let (token, speed) = match text.split_once(':') {
        Some((token, value)) => {
            let value: i64 = value
                .trim()
                .parse()
                .map_err(|_| DecodeError::malformed(format!("invalid value in '{text}'")))?;
            (token.trim(), validate_speed(Some(value))?)
        }
        None => (text, None),
    };

    resolve_token(token, speed)
}

fn validate_speed(value: Option<i64>) -> DecodeResult<Option<u8>> {
    match value {
        None => Ok(None),
        Some(v) => match u8::try_from(v) {
            Ok(speed) if speed <= 100 => Ok(Some(speed)),
            _ => Err(DecodeError::OutOfRange { value: v }),
        },
    }
}

/// Maps an action token to a [`Command`]. Tokens are case-insensitive; the
/// vocabulary covers the long forms, the `START_*` aliases, and the
/// single-character legacy aliases.
fn resolve_token(token: &str, speed: Option<u8>) -> DecodeResult<Command> {
    let upper = token.trim().to_ascii_uppercase();

    let action = match upper.as_str() {
        "FORWARD" | "START_FORWARD" | "F" => Action::Forward,
        "BACKWARD" | "START_BACKWARD" | "B" => Action::Backward,
        "LEFT" | "START_LEFT" | "L" => Action::Left,
        "RIGHT" | "START_RIGHT" | "R" => Action::Right,
        "STOP" | "S" => Action::Stop,
        "SPEED" | "SET_SPEED" => Action::SetSpeed,
        "EMERGENCY_STOP" | "E_STOP" => return Ok(Command::EmergencyStop),
        "STATUS" => return Ok(Command::QueryStatus),
        _ => return Err(DecodeError::unknown_action(upper)),
    };

    Ok(Command::Drive(MotorCommand {
        action,
        speed_percent: speed,
    }))
}
