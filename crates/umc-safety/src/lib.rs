//! # umc-safety
//!
//! Heartbeat supervision for the Universal Motor Controller.
//!
//! The [`SafetySupervisor`] owns the single piece of long-lived mutable
//! safety state: `Idle → Armed → Tripped`. Liveness is inferred from valid
//! command receipt only; malformed traffic never counts. The timeout
//! transition is driven by a periodic check on the caller's timer, not by
//! the command path, so a link that goes completely silent still trips.
//!
//! Trips are edge-triggered: [`SafetySupervisor::check`] returns the
//! [`SafetyTrip`] exactly once per silence window so the caller can force
//! the actuator to zero synchronously before anything else observes the
//! state. A tripped supervisor never silently recovers; re-arming requires
//! a new valid command and is only permitted when
//! `auto_stop_on_disconnect` is configured.
//!
//! ## Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use umc_safety::{SafetyConfig, SafetyState, SafetySupervisor};
//!
//! let supervisor = SafetySupervisor::new(SafetyConfig::default());
//! let start = Instant::now();
//!
//! supervisor.note_valid_command(start);
//! assert_eq!(supervisor.state(), SafetyState::Armed);
//!
//! // Silence past the timeout trips on the next check.
//! let late = start + Duration::from_secs(11);
//! assert!(supervisor.check(late).is_some());
//! assert_eq!(supervisor.state(), SafetyState::Tripped);
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    missing_docs,
    missing_debug_implementations
)]

pub mod error;
pub mod supervisor;

pub use error::{SafetyError, SafetyResult};
pub use supervisor::{SafetyConfig, SafetyState, SafetySupervisor, SafetyTrip, TripReason};
