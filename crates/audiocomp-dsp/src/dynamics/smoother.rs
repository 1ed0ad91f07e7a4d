//! Asymmetric one-pole attack/release smoothing of a gain-reduction curve.

use audiocomp_core::time_to_coeff;

/// Attack/release coefficients for one sample rate.
///
/// Attack applies while the target reduction is deepening (more negative
/// than the previous smoothed value), release while it recovers toward 0 dB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballistics {
    pub attack_coeff: f64,
    pub release_coeff: f64,
}

impl Ballistics {
    /// Derive coefficients from time constants. Inputs must already be
    /// validated as positive and finite.
    pub fn new(attack_ms: f64, release_ms: f64, sample_rate: f64) -> Self {
        Self {
            attack_coeff: time_to_coeff(attack_ms, sample_rate),
            release_coeff: time_to_coeff(release_ms, sample_rate),
        }
    }

    /// One recurrence step from `prev` toward `target`.
    #[inline]
    pub fn step(&self, prev: f64, target: f64) -> f64 {
        let coeff = if target < prev {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        coeff * prev + (1.0 - coeff) * target
    }

    /// Smooth `target` into `out` (cleared and refilled, same length).
    ///
    /// With no `prior`, the first output equals the first target. With a
    /// prior (carried from the previous block), the first output is already
    /// one step from it. Running this over a whole signal or block by block
    /// with the last value carried gives bit-identical results.
    pub fn smooth(&self, target: &[f64], prior: Option<f64>, out: &mut Vec<f64>) {
        out.clear();
        out.reserve(target.len());

        let Some((&first, rest)) = target.split_first() else {
            return;
        };

        let mut prev = match prior {
            Some(p) => self.step(p, first),
            None => first,
        };
        out.push(prev);

        for &t in rest {
            prev = self.step(prev, t);
            out.push(prev);
        }
    }
}
