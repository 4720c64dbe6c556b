//! # umc-hal
//!
//! Hardware abstraction layer for the Universal Motor Controller.
//!
//! Every backend implements the same three-method capability interface,
//! [`MotorHal`]: `drive` with signed per-side duty, `stop`, and `shutdown`.
//! Backends differ only in how duty maps to their board's channel layout.
//! They carry no business logic, and the electrical write itself is the
//! board driver's concern. Each backend computes and holds its per-channel
//! signal state, which the service layer can inspect for telemetry.
//!
//! The backend set is closed and selected once at startup via
//! [`BackendKind::from_identifier`]; an unrecognized identifier is a
//! configuration error, never a silent default.
//!
//! ## Example
//!
//! ```rust
//! use umc_hal::{BackendKind, MotorHal};
//!
//! let kind = BackendKind::from_identifier("motozero").expect("known backend");
//! let mut hal = kind.create();
//! hal.drive(50.0, 45.0).expect("drive");
//! hal.stop().expect("stop");
//! hal.shutdown();
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    missing_docs,
    missing_debug_implementations
)]

pub mod backend;
pub mod camjam;
pub mod error;
pub mod l298;
pub mod mock;
pub mod motozero;

pub use backend::{BackendKind, MotorHal, MAX_DUTY};
pub use camjam::CamJamBackend;
pub use error::{HalError, HalResult};
pub use l298::L298Backend;
pub use mock::{HalCall, MockBackend};
pub use motozero::MotoZeroBackend;
