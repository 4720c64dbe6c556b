//! Error types for HAL backends.

/// Actuation errors reported by a backend.
///
/// The controller retries a failed `drive` once; a second consecutive
/// failure is treated as a safety condition and trips the supervisor.
/// A failed `stop` is never recoverable and escalates to fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HalError {
    /// A duty value is non-finite or outside `[-100, +100]`.
    #[error("invalid duty for {side} side: {duty}")]
    InvalidDuty {
        /// Which side carried the bad value.
        side: &'static str,
        /// The rejected duty value.
        duty: f64,
    },

    /// The backend has been shut down and released its channels.
    #[error("backend {0} is shut down")]
    ShutDown(&'static str),

    /// The board rejected or failed the channel write.
    #[error("channel fault on {backend}: {reason}")]
    ChannelFault {
        /// Backend identifier.
        backend: &'static str,
        /// Failure description from the driver.
        reason: String,
    },
}

impl HalError {
    /// Creates an invalid-duty error.
    #[must_use]
    pub fn invalid_duty(side: &'static str, duty: f64) -> Self {
        HalError::InvalidDuty { side, duty }
    }

    /// Creates a channel-fault error.
    pub fn channel_fault(backend: &'static str, reason: impl Into<String>) -> Self {
        HalError::ChannelFault {
            backend,
            reason: reason.into(),
        }
    }
}

/// Result alias for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
