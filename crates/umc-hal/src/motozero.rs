//! MotoZero backend: four motor channels with per-channel enable lines.
//!
//! The board drives two motors per side (front and rear); both channels of
//! a side carry the same signal, so left duty maps to FL+RL and right duty
//! to FR+RR.

use serde::Serialize;
use tracing::debug;

use crate::backend::{check_duty, MotorHal};
use crate::error::{HalError, HalResult};

const IDENTIFIER: &str = "motozero";

/// Computed signal for one motor channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelSignal {
    /// Direction line: true = forward.
    pub forward: bool,
    /// PWM magnitude in `[0.0, 1.0]`.
    pub magnitude: f64,
}

impl ChannelSignal {
    const IDLE: Self = Self {
        forward: true,
        magnitude: 0.0,
    };

    fn from_duty(duty: f64) -> Self {
        Self {
            forward: duty >= 0.0,
            magnitude: duty.abs() / 100.0,
        }
    }
}

/// Channel indices on the MotoZero board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum MotoZeroChannel {
    /// Front-left motor.
    FrontLeft = 0,
    /// Front-right motor.
    FrontRight = 1,
    /// Rear-left motor.
    RearLeft = 2,
    /// Rear-right motor.
    RearRight = 3,
}

/// MotoZero four-channel backend.
#[derive(Debug)]
pub struct MotoZeroBackend {
    channels: [ChannelSignal; 4],
    enables: [bool; 4],
    shut_down: bool,
}

impl MotoZeroBackend {
    /// Creates the backend with all channels idle and enables asserted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            channels: [ChannelSignal::IDLE; 4],
            enables: [true; 4],
            shut_down: false,
        }
    }

    /// The current signal on `channel`.
    #[must_use]
    pub fn channel(&self, channel: MotoZeroChannel) -> ChannelSignal {
        self.channels[channel as usize]
    }

    /// Whether `channel`'s enable line is asserted.
    #[must_use]
    pub fn is_enabled(&self, channel: MotoZeroChannel) -> bool {
        self.enables[channel as usize]
    }
}

impl Default for MotoZeroBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorHal for MotoZeroBackend {
    fn drive(&mut self, left_duty: f64, right_duty: f64) -> HalResult<()> {
        if self.shut_down {
            return Err(HalError::ShutDown(IDENTIFIER));
        }
        check_duty(left_duty, right_duty)?;

        let left = ChannelSignal::from_duty(left_duty);
        let right = ChannelSignal::from_duty(right_duty);

        self.channels[MotoZeroChannel::FrontLeft as usize] = left;
        self.channels[MotoZeroChannel::RearLeft as usize] = left;
        self.channels[MotoZeroChannel::FrontRight as usize] = right;
        self.channels[MotoZeroChannel::RearRight as usize] = right;

        debug!(backend = IDENTIFIER, left_duty, right_duty, "drive applied");
        Ok(())
    }

    fn stop(&mut self) -> HalResult<()> {
        self.channels = [ChannelSignal::IDLE; 4];
        debug!(backend = IDENTIFIER, "all channels stopped");
        Ok(())
    }

    fn shutdown(&mut self) {
        self.channels = [ChannelSignal::IDLE; 4];
        self.enables = [false; 4];
        self.shut_down = true;
        debug!(backend = IDENTIFIER, "shut down, enables released");
    }

    fn identifier(&self) -> &'static str {
        IDENTIFIER
    }
}
