//! Compressor and peak limiter built on one shared pipeline.
//!
//! ```text
//! signal ─► detector ─► curve ─► smoother ─► applicator ─► signal'
//!           (peak dB)   (target)  (attack/    (linear gain
//!                                  release)    × make-up)
//! ```
//!
//! - [`Compressor`] - threshold, ratio, soft knee, make-up gain
//! - [`PeakLimiter`] - hard threshold, infinite ratio
//!
//! Both are [`DynamicsProcessor`]s; only the [`GainCurve`] differs.
//!
//! ## Example
//!
//! ```ignore
//! use audiocomp_dsp::PeakLimiter;
//!
//! let mut limiter = PeakLimiter::builder()
//!     .threshold_db(-1.0)
//!     .realtime(true)
//!     .build()?;
//!
//! for block in stream {
//!     limiter.process_in_place(&mut block, 48000.0)?;
//! }
//! ```

mod applicator;
mod compressor;
mod curve;
mod detector;
mod limiter;
mod processor;
mod smoother;

pub use applicator::apply_gain_reduction;
pub use compressor::{Compressor, CompressorBuilder, CompressorSettings};
pub use curve::{CompressorCurve, GainCurve, LimiterCurve};
pub use detector::peak_levels_db;
pub use limiter::{LimiterBuilder, LimiterSettings, PeakLimiter};
pub use processor::DynamicsProcessor;
pub use smoother::Ballistics;
