//! The controller core: command handling, ramping, actuation.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use umc_calibration::{apply, ramp_toward, CalibrationProfile, DriveOutput, Heading, MotorSettings};
use umc_hal::{HalResult, MotorHal};
use umc_protocol::{Action, Command, MotorCommand};
use umc_safety::{SafetySupervisor, SafetyTrip, TripReason};

use crate::status::{ConnectionState, StatusSnapshot};

/// What a handled command did, for the publisher's benefit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A drive command changed (or re-confirmed) the output.
    Applied,
    /// The supervisor is tripped and re-arming is not permitted; output
    /// stays at zero.
    Rejected,
    /// An emergency stop was executed.
    EmergencyStopped,
    /// A status publication was requested; no actuation.
    StatusRequested,
}

/// Owns the backend and every piece of actuation state.
///
/// All mutation happens under the daemon's single mutex, so HAL calls can
/// never interleave. Time is passed in explicitly to keep command handling
/// deterministic under test.
pub struct Controller {
    hal: Box<dyn MotorHal>,
    profile: CalibrationProfile,
    settings: MotorSettings,
    supervisor: Arc<SafetySupervisor>,
    heading: Heading,
    applied: DriveOutput,
    target: DriveOutput,
    speed_percent: u8,
    connection: ConnectionState,
    last_error: Option<String>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("backend", &self.hal.identifier())
            .field("heading", &self.heading)
            .field("applied", &self.applied)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Creates a controller and commands zero output on the backend.
    ///
    /// # Errors
    ///
    /// Propagates a failed initial `stop`, which is fatal at startup.
    pub fn new(
        mut hal: Box<dyn MotorHal>,
        profile: CalibrationProfile,
        settings: MotorSettings,
        supervisor: Arc<SafetySupervisor>,
    ) -> HalResult<Self> {
        hal.stop()?;
        info!(backend = hal.identifier(), "controller initialized, output zeroed");
        let speed_percent = settings.default_speed_percent;
        Ok(Self {
            hal,
            profile,
            settings,
            supervisor,
            heading: Heading::Stopped,
            applied: DriveOutput::ZERO,
            target: DriveOutput::ZERO,
            speed_percent,
            connection: ConnectionState::Disconnected,
            last_error: None,
        })
    }

    /// Handles one decoded command at `now`.
    ///
    /// Drive commands go through safety gating, calibration, and (when
    /// acceleration is enabled) the ramp; `Stop` and `EmergencyStop` zero
    /// the output immediately, bypassing both.
    ///
    /// # Errors
    ///
    /// Only a failed `stop` propagates; it is fatal. Drive failures are
    /// absorbed by the retry/trip policy and surfaced via `last_error`.
    pub fn handle_command(&mut self, command: Command, now: Instant) -> HalResult<CommandOutcome> {
        match command {
            Command::EmergencyStop => {
                self.supervisor.note_valid_command(now);
                self.emergency_stop()?;
                Ok(CommandOutcome::EmergencyStopped)
            }
            Command::QueryStatus => {
                self.supervisor.note_valid_command(now);
                Ok(CommandOutcome::StatusRequested)
            }
            Command::Drive(cmd) => self.handle_drive(cmd, now),
        }
    }

    fn handle_drive(&mut self, cmd: MotorCommand, now: Instant) -> HalResult<CommandOutcome> {
        if !self.supervisor.note_valid_command(now) {
            warn!(?cmd, "drive command rejected while tripped");
            self.force_zero()?;
            self.last_error = Some("safety tripped; drive commands rejected".to_string());
            return Ok(CommandOutcome::Rejected);
        }

        if cmd.action == Action::Stop {
            // Stop is immediate, never ramped.
            self.hal.stop()?;
            self.heading = Heading::Stopped;
            self.applied = DriveOutput::ZERO;
            self.target = DriveOutput::ZERO;
            self.last_error = None;
            debug!("stop applied");
            return Ok(CommandOutcome::Applied);
        }

        if let Some(heading) = Heading::from_action(cmd.action) {
            self.heading = heading;
        }
        self.speed_percent = cmd.speed_percent.unwrap_or(match cmd.action {
            Action::Left | Action::Right => self.settings.turn_speed_percent,
            _ => self.settings.default_speed_percent,
        });

        self.target = apply(cmd, self.heading, &self.profile, &self.settings);
        debug!(?cmd, heading = ?self.heading, target = ?self.target, "drive target computed");

        if self.settings.acceleration_enabled {
            // The control tick walks `applied` toward the new target.
            self.last_error = None;
        } else {
            self.drive_with_retry(self.target)?;
        }
        Ok(CommandOutcome::Applied)
    }

    /// One control tick: advances the ramp by one step and actuates.
    ///
    /// Returns `true` when the applied output changed. A no-op while the
    /// output already matches the target or acceleration is disabled.
    ///
    /// # Errors
    ///
    /// Propagates a failed `stop` from the fault path.
    pub fn tick_control(&mut self) -> HalResult<bool> {
        if !self.settings.acceleration_enabled || self.applied == self.target {
            return Ok(false);
        }
        let next = ramp_toward(
            self.applied,
            self.target,
            f64::from(self.settings.acceleration_step),
        );
        self.drive_with_retry(next)?;
        Ok(true)
    }

    /// One heartbeat check tick.
    ///
    /// When the supervisor trips on silence, the motors are stopped before
    /// the trip is surfaced (unless forced stops are disabled in
    /// configuration).
    ///
    /// # Errors
    ///
    /// Propagates a failed `stop`.
    pub fn tick_check(&mut self, now: Instant) -> HalResult<Option<SafetyTrip>> {
        let Some(trip) = self.supervisor.check(now) else {
            return Ok(None);
        };
        if self.supervisor.config().emergency_stop_enabled {
            self.emergency_stop()?;
        } else {
            warn!("trip fired with forced stop disabled; output left as-is");
        }
        self.last_error = Some(match trip.heartbeat_age {
            Some(age) => format!("heartbeat timeout after {:.1}s of silence", age.as_secs_f64()),
            None => "safety tripped".to_string(),
        });
        Ok(Some(trip))
    }

    /// Immediate forced stop: zero output, heading cleared, ramp bypassed.
    ///
    /// # Errors
    ///
    /// A failed `stop` here is fatal.
    pub fn emergency_stop(&mut self) -> HalResult<()> {
        self.hal.stop()?;
        self.heading = Heading::Stopped;
        self.applied = DriveOutput::ZERO;
        self.target = DriveOutput::ZERO;
        info!("emergency stop applied");
        Ok(())
    }

    /// Stops the motors and releases the backend. Called once at shutdown;
    /// a failing stop is logged since there is nothing left to escalate to.
    pub fn shutdown(&mut self) {
        if let Err(err) = self.hal.stop() {
            warn!(%err, "stop failed during shutdown");
        }
        self.hal.shutdown();
        self.applied = DriveOutput::ZERO;
        self.target = DriveOutput::ZERO;
        self.heading = Heading::Stopped;
        info!("backend shut down");
    }

    /// Records the transport connection state for status publication.
    pub fn set_connection(&mut self, connection: ConnectionState) {
        self.connection = connection;
    }

    /// Records a rejected inbound payload for status publication.
    pub fn note_decode_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Copies out the current state for the status publisher.
    #[must_use]
    pub fn snapshot(&self, now: Instant) -> StatusSnapshot {
        StatusSnapshot {
            connection: self.connection,
            controller_type: self.hal.identifier().to_string(),
            safety_state: self.supervisor.state(),
            left_duty: self.applied.left_duty,
            right_duty: self.applied.right_duty,
            speed_percent: self.speed_percent,
            direction: self.heading,
            is_moving: self.applied.is_moving(),
            seconds_since_last_command: self.supervisor.seconds_since_last_command(now),
            last_error: self.last_error.clone(),
            timestamp: unix_timestamp(),
        }
    }

    /// The currently applied output.
    #[must_use]
    pub fn applied(&self) -> DriveOutput {
        self.applied
    }

    /// The ramp target.
    #[must_use]
    pub fn target(&self) -> DriveOutput {
        self.target
    }

    fn force_zero(&mut self) -> HalResult<()> {
        if self.applied.is_moving() || self.target.is_moving() {
            self.hal.stop()?;
        }
        self.applied = DriveOutput::ZERO;
        self.target = DriveOutput::ZERO;
        self.heading = Heading::Stopped;
        Ok(())
    }

    /// Actuates `output`, retrying once on failure. A second consecutive
    /// failure trips the supervisor, physically stops the motors, and is
    /// surfaced via `last_error` rather than returned.
    fn drive_with_retry(&mut self, output: DriveOutput) -> HalResult<()> {
        let (left, right) = (output.left_duty, output.right_duty);
        let first = match self.hal.drive(left, right) {
            Ok(()) => {
                self.applied = output;
                self.last_error = None;
                return Ok(());
            }
            Err(err) => err,
        };
        warn!(%first, "drive failed, retrying once");

        match self.hal.drive(left, right) {
            Ok(()) => {
                self.applied = output;
                self.last_error = None;
                Ok(())
            }
            Err(second) => {
                self.supervisor.trip(TripReason::ActuatorFault);
                // Stop physically before reporting anything.
                self.hal.stop()?;
                self.applied = DriveOutput::ZERO;
                self.target = DriveOutput::ZERO;
                self.heading = Heading::Stopped;
                self.last_error = Some(second.to_string());
                Ok(())
            }
        }
    }
}

fn unix_timestamp() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
