//! # umc-protocol
//!
//! Command wire formats and decoding for the Universal Motor Controller.
//!
//! Two wire forms arrive on the command topic, distinguished by structure
//! rather than a type tag:
//!
//! - **Enhanced form**: a JSON object carrying an explicit action and an
//!   optional numeric speed, e.g. `{"action": "forward", "speed_percent": 50}`.
//! - **Legacy form**: a colon-delimited string `ACTION[:VALUE]`, e.g.
//!   `FORWARD:50` or the single-character aliases `F`/`B`/`L`/`R`/`S`.
//!
//! Both forms normalize to the same [`Command`] value; `FORWARD:50` and
//! `{"action": "forward", "speed_percent": 50}` are indistinguishable after
//! decoding. A failed decode produces a [`DecodeError`] and nothing else:
//! decoding never mutates state, and unparsable traffic is never treated as
//! proof of link liveness.
//!
//! ## Example
//!
//! ```rust
//! use umc_protocol::{decode, Action, Command, MotorCommand};
//!
//! let cmd = decode(b"FORWARD:50").expect("valid command");
//! assert_eq!(
//!     cmd,
//!     Command::Drive(MotorCommand::with_speed(Action::Forward, 50))
//! );
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    missing_docs,
    missing_debug_implementations
)]

pub mod command;
pub mod decode;
pub mod error;

pub use command::{Action, Command, MotorCommand};
pub use decode::decode;
pub use error::{DecodeError, DecodeResult};
