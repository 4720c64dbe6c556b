//! Error types for configuration loading.

/// Fatal configuration errors. The process does not start when any of
/// these surface.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or is missing a required field.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field parsed but violates its documented bounds.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// `motor_controller.type` is not in the closed backend set.
    #[error("unknown motor controller type '{identifier}' (expected one of: {expected})")]
    UnknownBackend {
        /// The identifier as configured.
        identifier: String,
        /// The accepted identifiers, comma separated.
        expected: String,
    },
}

impl ConfigError {
    /// Creates an invalid-configuration error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        ConfigError::Invalid(reason.into())
    }

    /// Creates an unknown-backend error listing the accepted set.
    pub fn unknown_backend(identifier: impl Into<String>) -> Self {
        let expected = umc_hal::BackendKind::ALL
            .iter()
            .map(|kind| kind.identifier())
            .collect::<Vec<_>>()
            .join(", ");
        ConfigError::UnknownBackend {
            identifier: identifier.into(),
            expected,
        }
    }
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
