//! Unit conversions shared by the dynamics processors.

/// Floor added to peak magnitudes before taking the logarithm, so silence
/// maps to a finite level (-200 dBFS) instead of `-inf`.
pub const LEVEL_EPSILON: f64 = 1e-10;

/// Convert linear amplitude to decibels, with [`LEVEL_EPSILON`] added to
/// the magnitude.
#[inline]
pub fn amplitude_to_db(amp: f64) -> f64 {
    20.0 * (amp.abs() + LEVEL_EPSILON).log10()
}

/// Convert decibels to linear amplitude.
#[inline]
pub fn db_to_amplitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// One-pole smoothing coefficient for a time constant in milliseconds.
///
/// `exp(-1 / (time_ms / 1000 * sample_rate))`. Shorter times give smaller
/// coefficients and faster convergence. Callers validate that both inputs are
/// positive. Extreme products of the two round to exactly `0.0` or `1.0`,
/// which the processors reject when they derive their coefficients.
#[inline]
pub fn time_to_coeff(time_ms: f64, sample_rate: f64) -> f64 {
    (-1.0 / (time_ms / 1000.0 * sample_rate)).exp()
}
