//! # umc-calibration
//!
//! Per-side duty calibration for the Universal Motor Controller.
//!
//! The heart of this crate is [`apply`]: a pure function mapping a decoded
//! [`MotorCommand`](umc_protocol::MotorCommand) plus the held
//! [`Heading`] to a calibrated, clamped [`DriveOutput`]. It carries no
//! hidden state, so applying it twice with the same inputs yields the same
//! output, which keeps the controller's acceleration ramping (see
//! [`ramp_toward`]) out of the calibration math entirely.
//!
//! Sign convention (skid-steer): positive duty drives a side forward.
//! `Left` produces `{left: -d, right: +d}`, `Right` the mirror image.
//!
//! ## Example
//!
//! ```rust
//! use umc_calibration::{apply, CalibrationProfile, Heading, MotorSettings};
//! use umc_protocol::{Action, MotorCommand};
//!
//! let profile = CalibrationProfile {
//!     left_factor: 1.0,
//!     right_factor: 0.9,
//!     turn_adjustment: 1.0,
//! };
//! let settings = MotorSettings::default();
//!
//! let cmd = MotorCommand::with_speed(Action::Forward, 50);
//! let out = apply(cmd, Heading::Stopped, &profile, &settings);
//! assert!((out.left_duty - 50.0).abs() < f64::EPSILON);
//! assert!((out.right_duty - 45.0).abs() < f64::EPSILON);
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    missing_docs,
    missing_debug_implementations
)]

pub mod adjuster;
pub mod error;
pub mod profile;

pub use adjuster::{apply, ramp_toward, DriveOutput, Heading};
pub use error::{CalibrationError, CalibrationResult};
pub use profile::{CalibrationProfile, MotorSettings};
