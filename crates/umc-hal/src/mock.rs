//! Recording mock backend for controller and supervisor tests.

use crate::backend::{check_duty, MotorHal};
use crate::error::{HalError, HalResult};

const IDENTIFIER: &str = "mock";

/// One recorded HAL invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum HalCall {
    /// `drive(left, right)` was invoked.
    Drive {
        /// Left duty as passed.
        left_duty: f64,
        /// Right duty as passed.
        right_duty: f64,
    },
    /// `stop()` was invoked.
    Stop,
    /// `shutdown()` was invoked.
    Shutdown,
}

/// A backend that records every call and can inject failures.
///
/// Not part of the selectable [`BackendKind`](crate::BackendKind) set;
/// tests construct it directly.
#[derive(Debug, Default)]
pub struct MockBackend {
    calls: Vec<HalCall>,
    /// Number of upcoming `drive` calls that will fail.
    fail_next_drives: u32,
    last_output: (f64, f64),
    shut_down: bool,
}

impl MockBackend {
    /// Creates a mock with an empty call log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` calls to `drive` fail with a channel fault.
    pub fn fail_next_drives(&mut self, count: u32) {
        self.fail_next_drives = count;
    }

    /// The recorded call sequence.
    #[must_use]
    pub fn calls(&self) -> &[HalCall] {
        &self.calls
    }

    /// The most recent successfully applied duty pair.
    #[must_use]
    pub fn last_output(&self) -> (f64, f64) {
        self.last_output
    }

    /// Whether `shutdown` has been invoked.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl MotorHal for MockBackend {
    fn drive(&mut self, left_duty: f64, right_duty: f64) -> HalResult<()> {
        check_duty(left_duty, right_duty)?;
        self.calls.push(HalCall::Drive {
            left_duty,
            right_duty,
        });

        if self.fail_next_drives > 0 {
            self.fail_next_drives -= 1;
            return Err(HalError::channel_fault(IDENTIFIER, "injected failure"));
        }

        self.last_output = (left_duty, right_duty);
        Ok(())
    }

    fn stop(&mut self) -> HalResult<()> {
        self.calls.push(HalCall::Stop);
        self.last_output = (0.0, 0.0);
        Ok(())
    }

    fn shutdown(&mut self) {
        self.calls.push(HalCall::Shutdown);
        self.last_output = (0.0, 0.0);
        self.shut_down = true;
    }

    fn identifier(&self) -> &'static str {
        IDENTIFIER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_call_sequence() {
        let mut hal = MockBackend::new();
        hal.drive(10.0, 20.0).expect("drive");
        hal.stop().expect("stop");
        hal.shutdown();

        assert_eq!(
            hal.calls(),
            &[
                HalCall::Drive {
                    left_duty: 10.0,
                    right_duty: 20.0
                },
                HalCall::Stop,
                HalCall::Shutdown,
            ]
        );
        assert!(hal.is_shut_down());
    }

    #[test]
    fn test_injected_failures_are_consumed() {
        let mut hal = MockBackend::new();
        hal.fail_next_drives(1);
        assert!(hal.drive(10.0, 10.0).is_err());
        assert!(hal.drive(10.0, 10.0).is_ok());
        assert_eq!(hal.last_output(), (10.0, 10.0));
    }
}
