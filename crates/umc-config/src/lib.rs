//! # umc-config
//!
//! The startup configuration document for the Universal Motor Controller.
//!
//! A single JSON file fixes everything the daemon needs: the hardware
//! backend, the MQTT broker and topics, speed settings, calibration
//! factors, and the safety switches. It is read exactly once at process
//! start; components receive the validated values by reference and never
//! see the file again.
//!
//! Validation is deliberately strict: a missing required field or an
//! unrecognized backend identifier is fatal, never silently defaulted.
//! Running with unintended safety settings is worse than not starting.
//! Unknown fields are ignored for forward compatibility.

#![deny(
    unsafe_op_in_unsafe_fn,
    missing_docs,
    missing_debug_implementations
)]

pub mod error;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use schema::{Config, MotorControllerSection, MqttSection, TopicsSection};
