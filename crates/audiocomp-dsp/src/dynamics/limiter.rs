//! Peak limiter: infinite-ratio, hard-knee variant of the shared pipeline.

use audiocomp_core::Result;
use serde::{Deserialize, Serialize};

use super::curve::LimiterCurve;
use super::processor::DynamicsProcessor;

/// Peak limiter. Any level above threshold is pulled back 1:1.
///
/// The output only settles at or below the threshold once the attack
/// transient has passed; there is no look-ahead.
pub type PeakLimiter = DynamicsProcessor<LimiterCurve>;

impl DynamicsProcessor<LimiterCurve> {
    /// Positional constructor. Prefer [`PeakLimiter::builder()`].
    pub fn new(
        threshold_db: f64,
        attack_time_ms: f64,
        release_time_ms: f64,
        realtime: bool,
    ) -> Result<Self> {
        Self::with_curve(
            LimiterCurve::new(threshold_db)?,
            attack_time_ms,
            release_time_ms,
            realtime,
        )
    }

    pub fn builder() -> LimiterBuilder {
        LimiterBuilder::default()
    }

    pub fn from_settings(settings: &LimiterSettings) -> Result<Self> {
        Self::new(
            settings.threshold_db,
            settings.attack_time_ms,
            settings.release_time_ms,
            settings.realtime,
        )
    }

    pub fn settings(&self) -> LimiterSettings {
        LimiterSettings {
            threshold_db: self.threshold(),
            attack_time_ms: self.attack_time(),
            release_time_ms: self.release_time(),
            realtime: self.is_realtime(),
        }
    }
}

/// Serializable limiter configuration. Missing fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimiterSettings {
    pub threshold_db: f64,
    pub attack_time_ms: f64,
    pub release_time_ms: f64,
    pub realtime: bool,
}

impl Default for LimiterSettings {
    fn default() -> Self {
        Self {
            threshold_db: -1.0,
            attack_time_ms: 0.1,
            release_time_ms: 1.0,
            realtime: false,
        }
    }
}

/// Builder for configuring a [`PeakLimiter`].
#[derive(Clone, Debug, Default)]
pub struct LimiterBuilder {
    settings: LimiterSettings,
}

impl LimiterBuilder {
    pub fn threshold_db(mut self, db: f64) -> Self {
        self.settings.threshold_db = db;
        self
    }

    pub fn attack_ms(mut self, ms: f64) -> Self {
        self.settings.attack_time_ms = ms;
        self
    }

    pub fn release_ms(mut self, ms: f64) -> Self {
        self.settings.release_time_ms = ms;
        self
    }

    pub fn realtime(mut self, realtime: bool) -> Self {
        self.settings.realtime = realtime;
        self
    }

    pub fn build(self) -> Result<PeakLimiter> {
        PeakLimiter::from_settings(&self.settings)
    }
}
