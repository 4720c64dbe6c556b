//! The heartbeat/watchdog state machine.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::{SafetyError, SafetyResult};

/// Safety supervisor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Silence window after which an armed supervisor trips.
    pub heartbeat_timeout: Duration,
    /// Master switch for forced-stop side effects on trip.
    pub emergency_stop_enabled: bool,
    /// When false, the timeout transition is disabled entirely.
    pub heartbeat_monitoring: bool,
    /// Whether a new valid command may re-arm a tripped supervisor.
    pub auto_stop_on_disconnect: bool,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            heartbeat_timeout: Duration::from_secs(10),
            emergency_stop_enabled: true,
            heartbeat_monitoring: true,
            auto_stop_on_disconnect: true,
        }
    }
}

impl SafetyConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the heartbeat timeout is zero.
    pub fn validate(&self) -> SafetyResult<()> {
        if self.heartbeat_timeout.is_zero() {
            return Err(SafetyError::invalid_configuration(
                "heartbeat_timeout_seconds must be greater than 0",
            ));
        }
        Ok(())
    }

    /// The period at which [`SafetySupervisor::check`] should run.
    ///
    /// One fifth of the timeout bounds detection latency well below the
    /// timeout itself, floored at 200ms.
    #[must_use]
    pub fn check_interval(&self) -> Duration {
        (self.heartbeat_timeout / 5).max(Duration::from_millis(200))
    }
}

/// Supervisor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyState {
    /// No valid command seen yet; motors have never been armed.
    Idle,
    /// Commands flowing, heartbeat fresh.
    Armed,
    /// Heartbeat lost or actuator faulted; output forced to zero.
    Tripped,
}

/// Why the supervisor tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripReason {
    /// No valid command within the heartbeat timeout.
    HeartbeatTimeout,
    /// The actuator failed twice in a row.
    ActuatorFault,
}

/// The event returned exactly once when the supervisor trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyTrip {
    /// Why the trip fired.
    pub reason: TripReason,
    /// Heartbeat age at the moment of the trip, when known.
    pub heartbeat_age: Option<Duration>,
}

#[derive(Debug)]
struct Inner {
    state: SafetyState,
    last_command: Option<Instant>,
}

/// Heartbeat/watchdog state machine.
///
/// Thread-safe: the command path and the timer-driven checker call into the
/// same supervisor concurrently. Callers pass `now` explicitly, which keeps
/// the transitions deterministic under test.
#[derive(Debug)]
pub struct SafetySupervisor {
    config: SafetyConfig,
    inner: Mutex<Inner>,
}

impl SafetySupervisor {
    /// Creates a supervisor in the `Idle` state.
    #[must_use]
    pub fn new(config: SafetyConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner {
                state: SafetyState::Idle,
                last_command: None,
            }),
        }
    }

    /// The configuration this supervisor runs with.
    #[must_use]
    pub fn config(&self) -> &SafetyConfig {
        &self.config
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SafetyState {
        self.inner.lock().state
    }

    /// Records a valid command at `now`.
    ///
    /// Returns `true` when the command may actuate: the supervisor is (or
    /// just became) `Armed`. Returns `false` when tripped and re-arming is
    /// not permitted, in which case the caller keeps the output at zero.
    pub fn note_valid_command(&self, now: Instant) -> bool {
        let mut inner = self.inner.lock();
        match inner.state {
            SafetyState::Idle => {
                inner.state = SafetyState::Armed;
                inner.last_command = Some(now);
                info!("safety supervisor armed on first valid command");
                true
            }
            SafetyState::Armed => {
                inner.last_command = Some(now);
                true
            }
            SafetyState::Tripped => {
                if self.config.auto_stop_on_disconnect {
                    inner.state = SafetyState::Armed;
                    inner.last_command = Some(now);
                    info!("safety supervisor re-armed by new valid command");
                    true
                } else {
                    // Terminal until external intervention.
                    false
                }
            }
        }
    }

    /// Timer-driven timeout check.
    ///
    /// Returns the trip event exactly once when the heartbeat age exceeds
    /// the timeout; subsequent checks while tripped return `None`. Callers
    /// must run this on a period strictly shorter than the timeout (see
    /// [`SafetyConfig::check_interval`]).
    pub fn check(&self, now: Instant) -> Option<SafetyTrip> {
        if !self.config.heartbeat_monitoring {
            return None;
        }

        let mut inner = self.inner.lock();
        if inner.state != SafetyState::Armed {
            return None;
        }

        let age = now.duration_since(inner.last_command?);
        if age <= self.config.heartbeat_timeout {
            return None;
        }

        inner.state = SafetyState::Tripped;
        warn!(
            heartbeat_age_secs = age.as_secs_f64(),
            timeout_secs = self.config.heartbeat_timeout.as_secs_f64(),
            "heartbeat timeout, supervisor tripped"
        );
        Some(SafetyTrip {
            reason: TripReason::HeartbeatTimeout,
            heartbeat_age: Some(age),
        })
    }

    /// Forces a trip (actuator fault path).
    ///
    /// Returns the trip event when the state changed, `None` when already
    /// tripped.
    pub fn trip(&self, reason: TripReason) -> Option<SafetyTrip> {
        let mut inner = self.inner.lock();
        if inner.state == SafetyState::Tripped {
            return None;
        }
        inner.state = SafetyState::Tripped;
        warn!(?reason, "supervisor force-tripped");
        Some(SafetyTrip {
            reason,
            heartbeat_age: None,
        })
    }

    /// Heartbeat age at `now`, if a valid command has ever arrived.
    #[must_use]
    pub fn heartbeat_age(&self, now: Instant) -> Option<Duration> {
        let inner = self.inner.lock();
        inner
            .last_command
            .map(|last| now.saturating_duration_since(last))
    }

    /// Seconds since the last valid command, for status publication.
    #[must_use]
    pub fn seconds_since_last_command(&self, now: Instant) -> Option<f64> {
        self.heartbeat_age(now).map(|age| age.as_secs_f64())
    }
}
