//! L298 dual H-bridge backend.
//!
//! One H-bridge per side: IN1/IN2 select the left side's direction and
//! ENA's PWM sets its magnitude; IN3/IN4 and ENB do the same for the
//! right side. Both direction pins low means the side coasts.

use serde::Serialize;
use tracing::debug;

use crate::backend::{check_duty, MotorHal};
use crate::error::{HalError, HalResult};

const IDENTIFIER: &str = "l298";

/// The computed pin and PWM state of the H-bridge pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct L298Signals {
    /// Left bridge direction pin 1 (high = forward).
    pub in1: bool,
    /// Left bridge direction pin 2 (high = backward).
    pub in2: bool,
    /// Right bridge direction pin 1 (high = forward).
    pub in3: bool,
    /// Right bridge direction pin 2 (high = backward).
    pub in4: bool,
    /// Left enable PWM duty cycle in `[0.0, 100.0]`.
    pub pwm_a: f64,
    /// Right enable PWM duty cycle in `[0.0, 100.0]`.
    pub pwm_b: f64,
}

impl L298Signals {
    const IDLE: Self = Self {
        in1: false,
        in2: false,
        in3: false,
        in4: false,
        pwm_a: 0.0,
        pwm_b: 0.0,
    };
}

/// L298 backend.
#[derive(Debug)]
pub struct L298Backend {
    signals: L298Signals,
    shut_down: bool,
}

impl L298Backend {
    /// Creates the backend with all pins low and PWM at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            signals: L298Signals::IDLE,
            shut_down: false,
        }
    }

    /// The current pin and PWM state.
    #[must_use]
    pub fn signals(&self) -> L298Signals {
        self.signals
    }
}

impl Default for L298Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorHal for L298Backend {
    fn drive(&mut self, left_duty: f64, right_duty: f64) -> HalResult<()> {
        if self.shut_down {
            return Err(HalError::ShutDown(IDENTIFIER));
        }
        check_duty(left_duty, right_duty)?;

        self.signals = L298Signals {
            in1: left_duty > 0.0,
            in2: left_duty < 0.0,
            in3: right_duty > 0.0,
            in4: right_duty < 0.0,
            pwm_a: left_duty.abs(),
            pwm_b: right_duty.abs(),
        };

        debug!(backend = IDENTIFIER, left_duty, right_duty, "drive applied");
        Ok(())
    }

    fn stop(&mut self) -> HalResult<()> {
        self.signals = L298Signals::IDLE;
        debug!(backend = IDENTIFIER, "bridges idled");
        Ok(())
    }

    fn shutdown(&mut self) {
        self.signals = L298Signals::IDLE;
        self.shut_down = true;
        debug!(backend = IDENTIFIER, "shut down, pins released");
    }

    fn identifier(&self) -> &'static str {
        IDENTIFIER
    }
}
