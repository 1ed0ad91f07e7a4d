//! Planar multi-channel sample buffer.

use crate::error::{Error, Result};

/// Two-dimensional block of samples with shape `(channels, frames)`.
///
/// Samples are stored planar (all of channel 0, then all of channel 1, ...).
/// Every constructor guarantees a rectangular shape with at least one
/// channel; a block may have zero frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBuffer {
    data: Vec<f64>,
    channels: usize,
    frames: usize,
}

impl SignalBuffer {
    /// Create a silent buffer.
    pub fn new(channels: usize, frames: usize) -> Result<Self> {
        if channels == 0 {
            return Err(Error::InvalidInput(
                "signal must have at least one channel".into(),
            ));
        }
        Ok(Self {
            data: vec![0.0; channels * frames],
            channels,
            frames,
        })
    }

    /// Build from one `Vec` per channel. All channels must have equal length.
    pub fn from_channels(channels: Vec<Vec<f64>>) -> Result<Self> {
        let Some(first) = channels.first() else {
            return Err(Error::InvalidInput(
                "signal must have at least one channel".into(),
            ));
        };
        let frames = first.len();
        if let Some((idx, ch)) = channels
            .iter()
            .enumerate()
            .find(|(_, ch)| ch.len() != frames)
        {
            return Err(Error::InvalidInput(format!(
                "signal must be 2-dimensional: channel {} has {} samples, expected {}",
                idx,
                ch.len(),
                frames
            )));
        }

        let num_channels = channels.len();
        let mut data = Vec::with_capacity(num_channels * frames);
        for ch in channels {
            data.extend_from_slice(&ch);
        }
        Ok(Self {
            data,
            channels: num_channels,
            frames,
        })
    }

    /// Build from interleaved samples (`L R L R ...`).
    pub fn from_interleaved(samples: &[f64], channels: usize) -> Result<Self> {
        if channels == 0 {
            return Err(Error::InvalidInput(
                "signal must have at least one channel".into(),
            ));
        }
        if samples.len() % channels != 0 {
            return Err(Error::InvalidInput(format!(
                "{} interleaved samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }

        let frames = samples.len() / channels;
        let mut buffer = Self::new(channels, frames)?;
        for (frame_idx, frame) in samples.chunks_exact(channels).enumerate() {
            for (ch, &sample) in frame.iter().enumerate() {
                buffer.data[ch * frames + frame_idx] = sample;
            }
        }
        Ok(buffer)
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// `(channels, frames)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.channels, self.frames)
    }

    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    /// Samples of one channel.
    ///
    /// # Panics
    /// If `ch >= self.channels()`.
    pub fn channel(&self, ch: usize) -> &[f64] {
        assert!(ch < self.channels, "channel {} out of range", ch);
        &self.data[ch * self.frames..(ch + 1) * self.frames]
    }

    /// Mutable samples of one channel.
    ///
    /// # Panics
    /// If `ch >= self.channels()`.
    pub fn channel_mut(&mut self, ch: usize) -> &mut [f64] {
        assert!(ch < self.channels, "channel {} out of range", ch);
        &mut self.data[ch * self.frames..(ch + 1) * self.frames]
    }

    pub fn iter_channels(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.channels).map(move |ch| &self.data[ch * self.frames..(ch + 1) * self.frames])
    }

    /// Mutable channel slices. Yields nothing for a zero-frame buffer.
    pub fn iter_channels_mut(&mut self) -> impl Iterator<Item = &mut [f64]> {
        let take = if self.frames == 0 { 0 } else { self.channels };
        self.data.chunks_exact_mut(self.frames.max(1)).take(take)
    }

    /// Copy out as interleaved samples.
    pub fn to_interleaved(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.data.len()];
        for (ch, samples) in self.iter_channels().enumerate() {
            for (frame_idx, &sample) in samples.iter().enumerate() {
                out[frame_idx * self.channels + ch] = sample;
            }
        }
        out
    }

    /// Split back into one `Vec` per channel.
    pub fn into_channels(self) -> Vec<Vec<f64>> {
        self.iter_channels().map(<[f64]>::to_vec).collect()
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_channels_shape() {
        let buf = SignalBuffer::from_channels(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
            .unwrap();
        assert_eq!(buf.shape(), (2, 3));
        assert_eq!(buf.channel(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_ragged_channels_rejected() {
        let err = SignalBuffer::from_channels(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_zero_channels_rejected() {
        assert!(SignalBuffer::from_channels(Vec::new()).is_err());
        assert!(SignalBuffer::new(0, 16).is_err());
        assert!(SignalBuffer::from_interleaved(&[0.0; 4], 0).is_err());
    }

    #[test]
    fn test_interleaved_round_trip() {
        let interleaved = [1.0, -1.0, 2.0, -2.0, 3.0, -3.0];
        let buf = SignalBuffer::from_interleaved(&interleaved, 2).unwrap();
        assert_eq!(buf.channel(0), &[1.0, 2.0, 3.0]);
        assert_eq!(buf.channel(1), &[-1.0, -2.0, -3.0]);
        assert_eq!(buf.to_interleaved(), interleaved.to_vec());
    }

    #[test]
    fn test_interleaved_length_must_divide() {
        assert!(SignalBuffer::from_interleaved(&[0.0; 5], 2).is_err());
    }

    #[test]
    fn test_zero_frames_allowed() {
        let buf = SignalBuffer::new(2, 0).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.iter_channels().count(), 2);
        assert_eq!(buf.into_channels(), vec![Vec::<f64>::new(), Vec::new()]);
    }

    #[test]
    fn test_peak_across_channels() {
        let buf = SignalBuffer::from_channels(vec![vec![0.1, -0.9], vec![0.5, 0.2]]).unwrap();
        assert_eq!(buf.peak(), 0.9);
    }
}
