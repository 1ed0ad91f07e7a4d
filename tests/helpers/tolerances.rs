//! Tolerance constants for dynamics testing.

/// Floating point rounding errors (passthrough, exact gain).
pub const FLOAT_EPSILON: f64 = 1e-9;

/// Gain-reduction values in dB compared against closed-form expectations.
pub const DB_EPSILON: f64 = 1e-6;

/// Audio perceptual tolerance (~-60dB, inaudible differences).
pub const PERCEPTUAL_EPSILON: f64 = 0.001;
