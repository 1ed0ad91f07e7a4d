//! Core types for the audiocomp dynamics engine.
//!
//! - [`SignalBuffer`]: planar `(channels, frames)` sample block
//! - [`units`]: dB/linear conversion and one-pole time constants
//! - [`Error`] / [`Result`]: shared error taxonomy

pub mod error;
pub use error::{Error, Result};

mod buffer;
pub use buffer::SignalBuffer;

pub mod units;
pub use units::{amplitude_to_db, db_to_amplitude, time_to_coeff, LEVEL_EPSILON};
