//! Applies a dB gain-reduction curve to a multi-channel signal.

use audiocomp_core::{db_to_amplitude, SignalBuffer};

/// Multiply `10^(reduction/20) * 10^(makeup/20)` into every channel, in place.
///
/// `reduction_db` must have one entry per frame. No clipping is applied.
pub fn apply_gain_reduction(signal: &mut SignalBuffer, reduction_db: &[f64], makeup_db: f64) {
    debug_assert_eq!(signal.frames(), reduction_db.len());

    let makeup = db_to_amplitude(makeup_db);
    for samples in signal.iter_channels_mut() {
        for (s, &db) in samples.iter_mut().zip(reduction_db) {
            *s *= db_to_amplitude(db) * makeup;
        }
    }
}
