//! Dynamic-range processors: a compressor and a peak limiter sharing one
//! detection, gain-computation and attack/release smoothing pipeline.
//!
//! Processing is synchronous and allocation-light: scratch buffers are kept
//! on the processor and reused across blocks.

pub use audiocomp_core::{Error, Result};

pub mod dynamics;
pub use dynamics::{
    Ballistics, Compressor, CompressorBuilder, CompressorCurve, CompressorSettings,
    DynamicsProcessor, GainCurve, LimiterBuilder, LimiterCurve, LimiterSettings, PeakLimiter,
};
