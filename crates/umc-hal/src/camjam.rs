//! CamJam EduKit backend.
//!
//! The kit's robot board takes one signed unit value per side in
//! `[-1.0, 1.0]`; duty percent is scaled down accordingly.

use serde::Serialize;
use tracing::debug;

use crate::backend::{check_duty, MotorHal};
use crate::error::{HalError, HalResult};

const IDENTIFIER: &str = "camjam";

/// The signed unit drive pair sent to the kit board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CamJamSignals {
    /// Left motor value in `[-1.0, 1.0]`.
    pub left: f64,
    /// Right motor value in `[-1.0, 1.0]`.
    pub right: f64,
}

impl CamJamSignals {
    const IDLE: Self = Self {
        left: 0.0,
        right: 0.0,
    };
}

/// CamJam EduKit backend.
#[derive(Debug)]
pub struct CamJamBackend {
    signals: CamJamSignals,
    shut_down: bool,
}

impl CamJamBackend {
    /// Creates the backend with both motors idle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            signals: CamJamSignals::IDLE,
            shut_down: false,
        }
    }

    /// The current unit drive pair.
    #[must_use]
    pub fn signals(&self) -> CamJamSignals {
        self.signals
    }
}

impl Default for CamJamBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorHal for CamJamBackend {
    fn drive(&mut self, left_duty: f64, right_duty: f64) -> HalResult<()> {
        if self.shut_down {
            return Err(HalError::ShutDown(IDENTIFIER));
        }
        check_duty(left_duty, right_duty)?;

        self.signals = CamJamSignals {
            left: left_duty / 100.0,
            right: right_duty / 100.0,
        };

        debug!(backend = IDENTIFIER, left_duty, right_duty, "drive applied");
        Ok(())
    }

    fn stop(&mut self) -> HalResult<()> {
        self.signals = CamJamSignals::IDLE;
        debug!(backend = IDENTIFIER, "motors stopped");
        Ok(())
    }

    fn shutdown(&mut self) {
        self.signals = CamJamSignals::IDLE;
        self.shut_down = true;
        debug!(backend = IDENTIFIER, "shut down");
    }

    fn identifier(&self) -> &'static str {
        IDENTIFIER
    }
}
