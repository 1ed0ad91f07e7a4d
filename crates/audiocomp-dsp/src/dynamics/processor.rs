//! Shared dynamics pipeline: detect, compute, smooth, apply.

use audiocomp_core::error::ensure_positive;
use audiocomp_core::{db_to_amplitude, Error, Result, SignalBuffer};
use tracing::{debug, trace};

use super::applicator::apply_gain_reduction;
use super::curve::GainCurve;
use super::detector::peak_levels_db;
use super::smoother::Ballistics;

/// Dynamics processor parameterized by its transfer function.
///
/// Owns the configuration, the smoothing state carried between blocks in
/// realtime mode, and the gain-reduction curve of the most recent block.
///
/// Smoothing state is either *cold* (none) or *warm* (last smoothed value of
/// the previous block). It only becomes warm in realtime mode, and goes cold
/// again on [`reset`](Self::reset), on `set_realtime(false)`, or when a block
/// arrives with a different channel count than the previous one.
///
/// All processing methods take `&mut self`; use one instance per stream.
#[derive(Debug, Clone)]
pub struct DynamicsProcessor<C: GainCurve> {
    curve: C,
    attack_ms: f64,
    release_ms: f64,
    realtime: bool,

    /// Coefficients for the last sample rate seen.
    coeffs: Option<(f64, Ballistics)>,
    last_gain_reduction: Option<f64>,
    last_channels: Option<usize>,

    gain_reduction: Vec<f64>,
    levels: Vec<f64>,
    target: Vec<f64>,
}

impl<C: GainCurve> DynamicsProcessor<C> {
    /// Wrap a validated curve. Attack and release must be positive (ms).
    pub fn with_curve(curve: C, attack_ms: f64, release_ms: f64, realtime: bool) -> Result<Self> {
        Ok(Self {
            curve,
            attack_ms: ensure_positive("attack_time_ms", attack_ms)?,
            release_ms: ensure_positive("release_time_ms", release_ms)?,
            realtime,
            coeffs: None,
            last_gain_reduction: None,
            last_channels: None,
            gain_reduction: Vec::new(),
            levels: Vec::new(),
            target: Vec::new(),
        })
    }

    /// Process a block, returning a new buffer of the same shape.
    pub fn process(&mut self, signal: &SignalBuffer, sample_rate: f64) -> Result<SignalBuffer> {
        let mut output = signal.clone();
        self.process_in_place(&mut output, sample_rate)?;
        Ok(output)
    }

    /// Process a block in place.
    ///
    /// Fails with [`Error::InvalidInput`] for a non-positive or non-finite
    /// sample rate, and with [`Error::InvalidParameter`] when attack or
    /// release is too short or too long to give a usable coefficient at
    /// this rate. Both checks run before any state is touched.
    pub fn process_in_place(
        &mut self,
        signal: &mut SignalBuffer,
        sample_rate: f64,
    ) -> Result<()> {
        let sample_rate = validate_sample_rate(sample_rate)?;
        let ballistics = self.ballistics(sample_rate)?;
        let channels = signal.channels();

        if self.last_gain_reduction.is_some() && self.last_channels != Some(channels) {
            debug!(
                from = ?self.last_channels,
                to = channels,
                "channel count changed, discarding smoothing state"
            );
            self.last_gain_reduction = None;
        }
        self.last_channels = Some(channels);

        peak_levels_db(signal, &mut self.levels);
        self.curve.compute(&self.levels, &mut self.target);
        ballistics.smooth(&self.target, self.last_gain_reduction, &mut self.gain_reduction);

        if self.realtime {
            if let Some(&last) = self.gain_reduction.last() {
                self.last_gain_reduction = Some(last);
            }
        }

        apply_gain_reduction(signal, &self.gain_reduction, self.curve.makeup_gain_db());

        trace!(
            channels,
            frames = signal.frames(),
            last_reduction_db = self.gain_reduction.last().copied().unwrap_or(0.0),
            "processed block"
        );
        Ok(())
    }

    /// Smoothed gain reduction (dB, `<= 0`) of the most recent block.
    /// Empty before the first block and after [`reset`](Self::reset).
    pub fn gain_reduction_db(&self) -> &[f64] {
        &self.gain_reduction
    }

    /// Unsmoothed target gain in the linear domain (`0..=1`), one value per
    /// frame, excluding make-up gain. Does not touch any stored state.
    pub fn target_gain_reduction(&self, signal: &SignalBuffer) -> Vec<f64> {
        let mut levels = Vec::with_capacity(signal.frames());
        peak_levels_db(signal, &mut levels);
        levels
            .into_iter()
            .map(|level| db_to_amplitude(self.curve.gain_reduction_db(level)))
            .collect()
    }

    /// Forget smoothing state, the stored curve and the last channel count.
    pub fn reset(&mut self) {
        debug!("resetting dynamics state");
        self.last_gain_reduction = None;
        self.last_channels = None;
        self.gain_reduction.clear();
    }

    pub fn set_threshold(&mut self, threshold_db: f64) -> Result<()> {
        self.curve.set_threshold_db(threshold_db)
    }

    pub fn set_attack_time(&mut self, attack_ms: f64) -> Result<()> {
        self.attack_ms = ensure_positive("attack_time_ms", attack_ms)?;
        self.coeffs = None;
        Ok(())
    }

    pub fn set_release_time(&mut self, release_ms: f64) -> Result<()> {
        self.release_ms = ensure_positive("release_time_ms", release_ms)?;
        self.coeffs = None;
        Ok(())
    }

    /// Switching realtime off discards any carried smoothing state.
    pub fn set_realtime(&mut self, realtime: bool) {
        if self.realtime && !realtime && self.last_gain_reduction.is_some() {
            debug!("realtime disabled, discarding smoothing state");
            self.last_gain_reduction = None;
        }
        self.realtime = realtime;
    }

    pub fn threshold(&self) -> f64 {
        self.curve.threshold_db()
    }

    pub fn threshold_linear(&self) -> f64 {
        db_to_amplitude(self.curve.threshold_db())
    }

    pub fn attack_time(&self) -> f64 {
        self.attack_ms
    }

    pub fn release_time(&self) -> f64 {
        self.release_ms
    }

    pub fn is_realtime(&self) -> bool {
        self.realtime
    }

    /// True when the next block will continue from carried smoothing state.
    pub fn is_warm(&self) -> bool {
        self.last_gain_reduction.is_some()
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    pub(crate) fn curve_mut(&mut self) -> &mut C {
        &mut self.curve
    }

    /// Coefficients for `sample_rate`, cached until the rate or a time
    /// constant changes.
    #[inline]
    fn ballistics(&mut self, sample_rate: f64) -> Result<Ballistics> {
        match self.coeffs {
            Some((sr, ballistics)) if sr == sample_rate => Ok(ballistics),
            _ => {
                let ballistics = Ballistics::new(self.attack_ms, self.release_ms, sample_rate);
                ensure_usable_coeff("attack_time_ms", self.attack_ms, ballistics.attack_coeff)?;
                ensure_usable_coeff("release_time_ms", self.release_ms, ballistics.release_coeff)?;
                self.coeffs = Some((sample_rate, ballistics));
                Ok(ballistics)
            }
        }
    }
}

/// A coefficient of exactly 0 skips smoothing and exactly 1 freezes it.
/// Both happen for time constants shorter than about 1/745 of a sample
/// or longer than about 1e16 samples.
fn ensure_usable_coeff(name: &'static str, time_ms: f64, coeff: f64) -> Result<()> {
    if coeff > 0.0 && coeff < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            value: time_ms,
            reason: "out of range for the sample rate",
        })
    }
}

fn validate_sample_rate(sample_rate: f64) -> Result<f64> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        Err(Error::InvalidInput(format!(
            "sample rate must be positive and finite, got {}",
            sample_rate
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::curve::LimiterCurve;
    use approx::assert_relative_eq;

    fn limiter(realtime: bool) -> DynamicsProcessor<LimiterCurve> {
        DynamicsProcessor::with_curve(LimiterCurve::new(-6.0).unwrap(), 1.0, 10.0, realtime)
            .unwrap()
    }

    fn constant(channels: usize, frames: usize, value: f64) -> SignalBuffer {
        SignalBuffer::from_channels(vec![vec![value; frames]; channels]).unwrap()
    }

    #[test]
    fn test_rejects_bad_sample_rate_without_mutation() {
        let mut proc = limiter(true);
        let signal = constant(1, 16, 1.0);
        proc.process(&signal, 48000.0).unwrap();
        let before = proc.gain_reduction_db().to_vec();

        for sr in [0.0, -44100.0, f64::NAN, f64::INFINITY] {
            let err = proc.process(&signal, sr).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
        }
        assert_eq!(proc.gain_reduction_db(), before.as_slice());
        assert!(proc.is_warm());
    }

    #[test]
    fn test_rejects_non_positive_times() {
        let curve = LimiterCurve::new(-1.0).unwrap();
        assert!(DynamicsProcessor::with_curve(curve, 0.0, 1.0, false).is_err());
        assert!(DynamicsProcessor::with_curve(curve, 1.0, -1.0, false).is_err());

        let mut proc = limiter(false);
        assert!(proc.set_attack_time(-0.5).is_err());
        assert!(proc.set_release_time(f64::NAN).is_err());
        assert_eq!(proc.attack_time(), 1.0);
        assert_eq!(proc.release_time(), 10.0);
    }

    #[test]
    fn test_curve_length_tracks_block() {
        let mut proc = limiter(false);
        assert!(proc.gain_reduction_db().is_empty());
        proc.process(&constant(2, 64, 0.5), 48000.0).unwrap();
        assert_eq!(proc.gain_reduction_db().len(), 64);
        proc.process(&constant(2, 7, 0.5), 48000.0).unwrap();
        assert_eq!(proc.gain_reduction_db().len(), 7);
    }

    #[test]
    fn test_warm_only_in_realtime() {
        let mut offline = limiter(false);
        offline.process(&constant(1, 32, 1.0), 48000.0).unwrap();
        assert!(!offline.is_warm());

        let mut live = limiter(true);
        live.process(&constant(1, 32, 1.0), 48000.0).unwrap();
        assert!(live.is_warm());
    }

    #[test]
    fn test_empty_block_keeps_state() {
        let mut proc = limiter(true);
        proc.process(&constant(1, 32, 1.0), 48000.0).unwrap();
        assert!(proc.is_warm());

        let out = proc.process(&constant(1, 0, 0.0), 48000.0).unwrap();
        assert!(out.is_empty());
        assert!(proc.gain_reduction_db().is_empty());
        assert!(proc.is_warm());
    }

    #[test]
    fn test_set_realtime_false_goes_cold() {
        let mut proc = limiter(true);
        proc.process(&constant(1, 32, 1.0), 48000.0).unwrap();
        proc.set_realtime(false);
        assert!(!proc.is_warm());
        assert!(!proc.is_realtime());
    }

    #[test]
    fn test_channel_change_goes_cold() {
        let mut proc = limiter(true);
        proc.process(&constant(2, 32, 1.0), 48000.0).unwrap();

        // Cold start: the first sample is exactly the target.
        proc.process(&constant(3, 4, 0.1), 48000.0).unwrap();
        assert_eq!(proc.gain_reduction_db()[0], 0.0);
    }

    #[test]
    fn test_target_gain_reduction_is_pure() {
        let mut proc = limiter(true);
        proc.process(&constant(1, 16, 1.0), 48000.0).unwrap();
        let stored = proc.gain_reduction_db().to_vec();

        let target = proc.target_gain_reduction(&constant(1, 4, 0.1));
        assert_eq!(target, vec![1.0; 4]);
        assert_eq!(proc.gain_reduction_db(), stored.as_slice());
    }

    #[test]
    fn test_threshold_linear() {
        let proc = limiter(false);
        assert_relative_eq!(proc.threshold_linear(), 0.501187, epsilon = 1e-6);
    }

    #[test]
    fn test_coefficients_follow_sample_rate() {
        let mut proc = limiter(false);
        let slow = proc.ballistics(96000.0).unwrap();
        let fast = proc.ballistics(22050.0).unwrap();
        assert!(slow.attack_coeff > fast.attack_coeff);
        assert_eq!(proc.ballistics(22050.0).unwrap(), fast);
    }

    #[test]
    fn test_in_place_rejects_bad_sample_rate_before_touching_signal() {
        let mut proc = limiter(false);
        let mut signal = constant(2, 8, 1.0);
        let err = proc.process_in_place(&mut signal, 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(signal, constant(2, 8, 1.0));
        assert!(proc.gain_reduction_db().is_empty());
    }

    #[test]
    fn test_rejects_times_that_degenerate_at_sample_rate() {
        let signal = constant(1, 16, 1.0);

        // Underflows to a zero coefficient.
        let mut fast = limiter(false);
        fast.set_attack_time(1e-5).unwrap();
        let err = fast.process(&signal, 44100.0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "attack_time_ms", .. }));

        // Rounds to a coefficient of exactly one.
        let mut frozen = limiter(true);
        frozen.process(&signal, 48000.0).unwrap();
        let before = frozen.gain_reduction_db().to_vec();
        frozen.set_release_time(1e16).unwrap();
        let err = frozen.process(&constant(1, 4, 0.1), 48000.0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "release_time_ms", .. }));
        assert_eq!(frozen.gain_reduction_db(), before.as_slice());
        assert!(frozen.is_warm());

        // Still usable after a sane value is restored.
        frozen.set_release_time(10.0).unwrap();
        frozen.process(&constant(1, 4, 0.1), 48000.0).unwrap();
        assert_eq!(frozen.gain_reduction_db().len(), 4);
    }
}
