//! Static transfer functions (gain computers).
//!
//! A [`GainCurve`] maps a detected level in dBFS to the target gain
//! reduction in dB. Values are always `<= 0`: the curves only attenuate.
//! The curve is the single point of variation between the compressor and
//! the limiter; detection, smoothing and gain application are shared.

use audiocomp_core::error::{ensure_at_least, ensure_finite};
use audiocomp_core::Result;

/// Transfer function plugged into a [`DynamicsProcessor`](super::DynamicsProcessor).
pub trait GainCurve: Clone + Send + std::fmt::Debug {
    fn threshold_db(&self) -> f64;

    /// Validates before mutating; on error the curve is unchanged.
    fn set_threshold_db(&mut self, db: f64) -> Result<()>;

    /// Target gain reduction in dB (`<= 0`) for one detected level.
    fn gain_reduction_db(&self, level_db: f64) -> f64;

    /// Uniform output gain applied after the smoothed reduction.
    fn makeup_gain_db(&self) -> f64 {
        0.0
    }

    /// Fill `out` with the target reduction for every level.
    fn compute(&self, levels_db: &[f64], out: &mut Vec<f64>) {
        out.clear();
        out.extend(levels_db.iter().map(|&level| self.gain_reduction_db(level)));
    }
}

/// Downward compression with an optional quadratic soft knee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorCurve {
    threshold_db: f64,
    ratio: f64,
    knee_width_db: f64,
    makeup_gain_db: f64,
}

impl CompressorCurve {
    pub fn new(
        threshold_db: f64,
        ratio: f64,
        knee_width_db: f64,
        makeup_gain_db: f64,
    ) -> Result<Self> {
        Ok(Self {
            threshold_db: ensure_finite("threshold_db", threshold_db)?,
            ratio: validate_ratio(ratio)?,
            knee_width_db: validate_knee(knee_width_db)?,
            makeup_gain_db: ensure_finite("makeup_gain_db", makeup_gain_db)?,
        })
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn knee_width_db(&self) -> f64 {
        self.knee_width_db
    }

    pub fn set_ratio(&mut self, ratio: f64) -> Result<()> {
        self.ratio = validate_ratio(ratio)?;
        Ok(())
    }

    pub fn set_knee_width_db(&mut self, knee_db: f64) -> Result<()> {
        self.knee_width_db = validate_knee(knee_db)?;
        Ok(())
    }

    pub fn set_makeup_gain_db(&mut self, db: f64) -> Result<()> {
        self.makeup_gain_db = ensure_finite("makeup_gain_db", db)?;
        Ok(())
    }

    /// `1 - 1/ratio`: fraction of the overshoot removed above the knee.
    #[inline]
    fn slope(&self) -> f64 {
        1.0 - 1.0 / self.ratio
    }
}

impl GainCurve for CompressorCurve {
    fn threshold_db(&self) -> f64 {
        self.threshold_db
    }

    fn set_threshold_db(&mut self, db: f64) -> Result<()> {
        self.threshold_db = ensure_finite("threshold_db", db)?;
        Ok(())
    }

    #[inline]
    fn gain_reduction_db(&self, level_db: f64) -> f64 {
        let threshold = self.threshold_db;
        let knee = self.knee_width_db;
        let slope = self.slope();

        if knee <= 0.0 {
            return if level_db > threshold {
                (threshold - level_db) * slope
            } else {
                0.0
            };
        }

        let half_knee = knee / 2.0;
        if level_db < threshold - half_knee {
            0.0
        } else if level_db > threshold + half_knee {
            (threshold - level_db) * slope
        } else {
            // Quadratic blend: zero value and slope at the lower edge, meets the
            // linear segment in value and slope at the upper edge.
            let x = level_db - threshold + half_knee;
            (-slope * x * x / (2.0 * knee)).min(0.0)
        }
    }

    fn makeup_gain_db(&self) -> f64 {
        self.makeup_gain_db
    }
}

/// Brick-wall limiting: 1:1 attenuation of everything above threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimiterCurve {
    threshold_db: f64,
}

impl LimiterCurve {
    pub fn new(threshold_db: f64) -> Result<Self> {
        Ok(Self {
            threshold_db: ensure_finite("threshold_db", threshold_db)?,
        })
    }
}

impl GainCurve for LimiterCurve {
    fn threshold_db(&self) -> f64 {
        self.threshold_db
    }

    fn set_threshold_db(&mut self, db: f64) -> Result<()> {
        self.threshold_db = ensure_finite("threshold_db", db)?;
        Ok(())
    }

    #[inline]
    fn gain_reduction_db(&self, level_db: f64) -> f64 {
        (self.threshold_db - level_db).min(0.0)
    }
}

fn validate_ratio(ratio: f64) -> Result<f64> {
    ensure_at_least("ratio", ratio, 1.0, "must be >= 1")
}

fn validate_knee(knee_db: f64) -> Result<f64> {
    ensure_at_least("knee_width_db", knee_db, 0.0, "must be >= 0")
}
