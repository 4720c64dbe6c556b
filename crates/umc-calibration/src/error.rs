//! Error types for calibration and settings validation.

/// Validation errors for [`CalibrationProfile`](crate::CalibrationProfile)
/// and [`MotorSettings`](crate::MotorSettings).
///
/// These surface at configuration load time; a profile or settings value
/// that validates once stays valid for the process lifetime.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    /// A field holds a value outside its documented bounds.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl CalibrationError {
    /// Creates an invalid-field error.
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        CalibrationError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias for calibration validation.
pub type CalibrationResult<T> = Result<T, CalibrationError>;
