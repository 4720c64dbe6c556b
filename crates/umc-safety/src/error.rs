//! Error types for the safety crate.

/// Validation errors for [`SafetyConfig`](crate::SafetyConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SafetyError {
    /// The configuration holds an invalid value.
    #[error("invalid safety configuration: {0}")]
    InvalidConfiguration(String),
}

impl SafetyError {
    /// Creates an invalid-configuration error.
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        SafetyError::InvalidConfiguration(reason.into())
    }
}

/// Result alias for safety operations.
pub type SafetyResult<T> = Result<T, SafetyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SafetyError::invalid_configuration("heartbeat_timeout_seconds must be > 0");
        assert!(err.to_string().contains("heartbeat_timeout_seconds"));
    }
}
