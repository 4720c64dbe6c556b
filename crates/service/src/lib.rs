//! # umc-service
//!
//! The Universal Motor Controller daemon: the controller core that turns
//! decoded commands into actuation, the MQTT transport and status
//! publisher, and the daemon lifecycle around them.
//!
//! The crate wires the leaf crates together: raw bytes arrive on the
//! command topic, `umc-protocol` decodes them, the [`Controller`] gates
//! them through the safety supervisor, maps them through the calibration
//! adjuster, and actuates the selected HAL backend. Status snapshots flow
//! back out on the status topic.

#![deny(
    unsafe_op_in_unsafe_fn,
    missing_docs,
    missing_debug_implementations
)]

pub mod controller;
pub mod daemon;
pub mod mqtt;
pub mod status;

pub use controller::{CommandOutcome, Controller};
pub use status::{ConnectionState, StatusSnapshot};
