//! Error types for command decoding.

/// Errors produced by [`decode`](crate::decode).
///
/// A decode failure is informational only: the command is dropped, nothing
/// is actuated, and the heartbeat is not refreshed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The action token is not part of the command vocabulary.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// A supplied speed parsed but is outside `0..=100`.
    #[error("speed out of range: {value} (expected 0..=100)")]
    OutOfRange {
        /// The out-of-range value as parsed.
        value: i64,
    },

    /// The payload could not be parsed at all.
    #[error("malformed command payload: {0}")]
    Malformed(String),
}

impl DecodeError {
    /// Creates an unknown-action error.
    pub fn unknown_action(token: impl Into<String>) -> Self {
        DecodeError::UnknownAction(token.into())
    }

    /// Creates a malformed-payload error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        DecodeError::Malformed(reason.into())
    }
}

/// Result alias for decoding.
pub type DecodeResult<T> = Result<T, DecodeError>;
