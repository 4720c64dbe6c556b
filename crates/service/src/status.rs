//! The outbound status document.

use serde::{Deserialize, Serialize};
use umc_calibration::Heading;
use umc_safety::SafetyState;

/// Transport connection state as seen by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// Connected to the broker.
    Connected,
    /// Not (or no longer) connected.
    Disconnected,
}

/// One published status message.
///
/// Published on change, on a `STATUS` request, and at a keep-alive cadence
/// of half the heartbeat timeout. `last_error` carries the most recent
/// rejected or failed command condition and clears on the next success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Broker connection state.
    pub connection: ConnectionState,
    /// Configured backend identifier.
    pub controller_type: String,
    /// Supervisor state.
    pub safety_state: SafetyState,
    /// Applied left-side duty.
    pub left_duty: f64,
    /// Applied right-side duty.
    pub right_duty: f64,
    /// Last commanded speed percent.
    pub speed_percent: u8,
    /// Held heading.
    pub direction: Heading,
    /// Whether either side carries non-zero duty.
    pub is_moving: bool,
    /// Heartbeat age in seconds, absent before the first valid command.
    pub seconds_since_last_command: Option<f64>,
    /// Most recent error condition, if any.
    pub last_error: Option<String>,
    /// Unix timestamp (seconds) of the snapshot.
    pub timestamp: f64,
}
