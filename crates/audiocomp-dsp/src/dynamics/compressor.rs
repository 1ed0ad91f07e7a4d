//! Compressor: threshold, ratio, soft knee and make-up gain.

use audiocomp_core::Result;
use serde::{Deserialize, Serialize};

use super::curve::{CompressorCurve, GainCurve};
use super::processor::DynamicsProcessor;

/// Downward compressor with optional soft knee and make-up gain.
///
/// # Example
///
/// ```
/// use audiocomp_core::SignalBuffer;
/// use audiocomp_dsp::Compressor;
///
/// let mut comp = Compressor::builder()
///     .threshold_db(-18.0)
///     .ratio(4.0)
///     .knee_width_db(6.0)
///     .build()
///     .unwrap();
///
/// let block = SignalBuffer::from_channels(vec![vec![0.5; 256], vec![-0.5; 256]]).unwrap();
/// let out = comp.process(&block, 48000.0).unwrap();
/// assert_eq!(out.shape(), block.shape());
/// assert!(comp.gain_reduction_db().iter().all(|&db| db <= 0.0));
/// ```
pub type Compressor = DynamicsProcessor<CompressorCurve>;

impl DynamicsProcessor<CompressorCurve> {
    /// Positional constructor. Prefer [`Compressor::builder()`].
    pub fn new(
        threshold_db: f64,
        ratio: f64,
        attack_time_ms: f64,
        release_time_ms: f64,
        knee_width_db: f64,
        makeup_gain_db: f64,
        realtime: bool,
    ) -> Result<Self> {
        let curve = CompressorCurve::new(threshold_db, ratio, knee_width_db, makeup_gain_db)?;
        Self::with_curve(curve, attack_time_ms, release_time_ms, realtime)
    }

    /// Create a builder with the default settings.
    pub fn builder() -> CompressorBuilder {
        CompressorBuilder::default()
    }

    /// Build from deserialized settings, validating every field.
    pub fn from_settings(settings: &CompressorSettings) -> Result<Self> {
        Self::new(
            settings.threshold_db,
            settings.ratio,
            settings.attack_time_ms,
            settings.release_time_ms,
            settings.knee_width_db,
            settings.makeup_gain_db,
            settings.realtime,
        )
    }

    /// Snapshot of the current configuration.
    pub fn settings(&self) -> CompressorSettings {
        CompressorSettings {
            threshold_db: self.threshold(),
            ratio: self.ratio(),
            attack_time_ms: self.attack_time(),
            release_time_ms: self.release_time(),
            knee_width_db: self.knee_width(),
            makeup_gain_db: self.makeup_gain(),
            realtime: self.is_realtime(),
        }
    }

    pub fn set_ratio(&mut self, ratio: f64) -> Result<()> {
        self.curve_mut().set_ratio(ratio)
    }

    pub fn set_knee_width(&mut self, knee_db: f64) -> Result<()> {
        self.curve_mut().set_knee_width_db(knee_db)
    }

    pub fn set_makeup_gain(&mut self, makeup_db: f64) -> Result<()> {
        self.curve_mut().set_makeup_gain_db(makeup_db)
    }

    pub fn ratio(&self) -> f64 {
        self.curve().ratio()
    }

    pub fn knee_width(&self) -> f64 {
        self.curve().knee_width_db()
    }

    pub fn makeup_gain(&self) -> f64 {
        self.curve().makeup_gain_db()
    }
}

/// Serializable compressor configuration. Missing fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorSettings {
    pub threshold_db: f64,
    pub ratio: f64,
    pub attack_time_ms: f64,
    pub release_time_ms: f64,
    pub knee_width_db: f64,
    pub makeup_gain_db: f64,
    pub realtime: bool,
}

impl Default for CompressorSettings {
    fn default() -> Self {
        Self {
            threshold_db: -10.0,
            ratio: 4.0,
            attack_time_ms: 1.0,
            release_time_ms: 100.0,
            knee_width_db: 3.0,
            makeup_gain_db: 0.0,
            realtime: false,
        }
    }
}

/// Builder for configuring a [`Compressor`] with fluent API.
#[derive(Clone, Debug, Default)]
pub struct CompressorBuilder {
    settings: CompressorSettings,
}

impl CompressorBuilder {
    /// Threshold in dBFS (-60.0 to 0.0 typical)
    pub fn threshold_db(mut self, db: f64) -> Self {
        self.settings.threshold_db = db;
        self
    }

    /// Compression ratio (must be >= 1.0)
    pub fn ratio(mut self, ratio: f64) -> Self {
        self.settings.ratio = ratio;
        self
    }

    /// Attack time in milliseconds (must be > 0)
    pub fn attack_ms(mut self, ms: f64) -> Self {
        self.settings.attack_time_ms = ms;
        self
    }

    /// Release time in milliseconds (must be > 0)
    pub fn release_ms(mut self, ms: f64) -> Self {
        self.settings.release_time_ms = ms;
        self
    }

    /// Soft knee width in dB (0.0 = hard knee)
    pub fn knee_width_db(mut self, db: f64) -> Self {
        self.settings.knee_width_db = db;
        self
    }

    /// Make-up gain in dB
    pub fn makeup_gain_db(mut self, db: f64) -> Self {
        self.settings.makeup_gain_db = db;
        self
    }

    /// Carry smoothing state across `process` calls (chunked streaming).
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.settings.realtime = realtime;
        self
    }

    /// Validate and build. Nothing is clamped; any out-of-range value is an error.
    pub fn build(self) -> Result<Compressor> {
        Compressor::from_settings(&self.settings)
    }
}
