//! Peak level detection across channels.

use audiocomp_core::{amplitude_to_db, SignalBuffer};

/// Per-frame peak level in dBFS: `20*log10(max_c |x[c][n]| + eps)`.
///
/// `out` is cleared and refilled to `signal.frames()` entries; its
/// allocation is reused between calls.
pub fn peak_levels_db(signal: &SignalBuffer, out: &mut Vec<f64>) {
    out.clear();
    out.resize(signal.frames(), 0.0);

    for samples in signal.iter_channels() {
        for (peak, &s) in out.iter_mut().zip(samples) {
            *peak = peak.max(s.abs());
        }
    }

    for level in out.iter_mut() {
        *level = amplitude_to_db(*level);
    }
}
