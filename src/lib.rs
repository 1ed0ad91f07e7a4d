//! # audiocomp - Dynamic-range processing
//!
//! A compressor and a peak limiter sharing one gain-computation and
//! envelope-smoothing pipeline.
//!
//! ## Architecture
//!
//! audiocomp is an umbrella crate that coordinates:
//! - **audiocomp-core** - Signal buffers, dB/linear units, error types
//! - **audiocomp-dsp** - Level detector, gain curves, attack/release smoother,
//!   gain applicator and the [`Compressor`] / [`PeakLimiter`] processors
//!
//! ## Quick Start
//!
//! ```
//! use audiocomp::prelude::*;
//!
//! let mut comp = Compressor::builder()
//!     .threshold_db(-10.0)
//!     .ratio(4.0)
//!     .attack_ms(1.0)
//!     .release_ms(100.0)
//!     .realtime(true)
//!     .build()?;
//!
//! // Two channels, 512 frames per block.
//! let block = SignalBuffer::from_channels(vec![vec![0.8; 512], vec![-0.6; 512]])?;
//! let out = comp.process(&block, 44100.0)?;
//!
//! assert_eq!(out.shape(), (2, 512));
//! assert_eq!(comp.gain_reduction_db().len(), 512);
//! # Ok::<(), audiocomp::Error>(())
//! ```
//!
//! ## Realtime mode
//!
//! With `realtime(true)` the last smoothed gain-reduction value is carried
//! from one `process` call to the next, so a stream processed in chunks
//! matches the same stream processed in one call. The carried value is
//! dropped on `reset()`, on `set_realtime(false)` and whenever the channel
//! count changes.

/// Re-export of audiocomp-core for direct access
pub use audiocomp_core as core;

/// Re-export of audiocomp-dsp for direct access
pub use audiocomp_dsp as dsp;

pub use audiocomp_core::{units, Error, Result, SignalBuffer};

pub use audiocomp_dsp::{
    Ballistics, Compressor, CompressorBuilder, CompressorCurve, CompressorSettings,
    DynamicsProcessor, GainCurve, LimiterBuilder, LimiterCurve, LimiterSettings, PeakLimiter,
};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{
        Compressor, CompressorSettings, DynamicsProcessor, Error, GainCurve, PeakLimiter,
        LimiterSettings, Result, SignalBuffer,
    };
}
