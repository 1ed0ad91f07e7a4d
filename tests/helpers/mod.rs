//! Test helpers and fixtures for audiocomp integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-9): Exact operations (passthrough, unity gain)
//! - `DB_EPSILON` (1e-6): Closed-form gain-reduction values
//! - `PERCEPTUAL_EPSILON` (0.001): Perceptual equivalence (-60dB)

#![allow(dead_code)]

pub mod tolerances;

use audiocomp::prelude::*;

/// Default test sample rate (matches CD audio)
pub const TEST_SAMPLE_RATE: f64 = 44100.0;

/// Standard chunk size for realtime tests
pub const TEST_CHUNK_SIZE: usize = 512;

/// Linear amplitude of a dBFS level.
pub fn dbfs(level_db: f64) -> f64 {
    10.0_f64.powf(level_db / 20.0)
}

/// Constant (DC) signal on every channel.
pub fn constant_signal(channels: usize, frames: usize, amplitude: f64) -> SignalBuffer {
    SignalBuffer::from_channels(vec![vec![amplitude; frames]; channels])
        .expect("rectangular buffer")
}

/// Sine wave at given frequency, same on every channel.
pub fn sine_signal(channels: usize, frames: usize, frequency: f64, amplitude: f64) -> SignalBuffer {
    let samples: Vec<f64> = (0..frames)
        .map(|i| {
            let t = i as f64 / TEST_SAMPLE_RATE;
            amplitude * (2.0 * std::f64::consts::PI * frequency * t).sin()
        })
        .collect();
    SignalBuffer::from_channels(vec![samples; channels]).expect("rectangular buffer")
}

/// Quiet/loud/quiet sine burst, slightly different level per channel.
pub fn burst_signal(channels: usize, frames: usize) -> SignalBuffer {
    let data = (0..channels)
        .map(|ch| {
            let scale = 1.0 - 0.2 * ch as f64;
            (0..frames)
                .map(|i| {
                    let amp = if (frames / 4..frames / 2).contains(&i) {
                        1.2
                    } else {
                        0.05
                    };
                    let t = i as f64 / TEST_SAMPLE_RATE;
                    scale * amp * (2.0 * std::f64::consts::PI * 330.0 * t).sin()
                })
                .collect()
        })
        .collect();
    SignalBuffer::from_channels(data).expect("rectangular buffer")
}

/// Split a buffer into consecutive chunks of `size` frames.
pub fn split_frames(signal: &SignalBuffer, size: usize) -> Vec<SignalBuffer> {
    let channels = signal.clone().into_channels();
    (0..signal.frames())
        .step_by(size)
        .map(|start| {
            let end = (start + size).min(signal.frames());
            let chunk = channels.iter().map(|ch| ch[start..end].to_vec()).collect();
            SignalBuffer::from_channels(chunk).expect("rectangular chunk")
        })
        .collect()
}

/// Concatenate chunks back into one buffer.
pub fn concat_frames(chunks: &[SignalBuffer]) -> SignalBuffer {
    let channels = chunks.first().map(|c| c.channels()).unwrap_or(1);
    let mut data = vec![Vec::new(); channels];
    for chunk in chunks {
        for (dst, src) in data.iter_mut().zip(chunk.iter_channels()) {
            dst.extend_from_slice(src);
        }
    }
    SignalBuffer::from_channels(data).expect("rectangular buffer")
}

/// Assert that two signals match sample-for-sample within tolerance.
pub fn assert_signals_equal(a: &SignalBuffer, b: &SignalBuffer, epsilon: f64, context: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: shape mismatch", context);
    for (ch, (x, y)) in a.iter_channels().zip(b.iter_channels()).enumerate() {
        for (i, (s, t)) in x.iter().zip(y).enumerate() {
            assert!(
                (s - t).abs() <= epsilon,
                "{}: channel {} sample {} differs: {} vs {}",
                context,
                ch,
                i,
                s,
                t
            );
        }
    }
}
