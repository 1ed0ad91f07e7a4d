//! # Gain reduction meter
//!
//! Feeds a synthetic tone burst through a realtime peak limiter in small
//! chunks and prints a text meter of the gain reduction per chunk. Shows
//! the fast attack when the burst starts and the release afterwards.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example gain_reduction_meter
//! ```

use audiocomp::prelude::*;

const SAMPLE_RATE: f64 = 48000.0;
const CHUNK_FRAMES: usize = 96; // 2 ms

fn burst(frames: usize) -> Vec<f64> {
    (0..frames)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            let amp = if (960..2880).contains(&i) { 1.0 } else { 0.2 };
            amp * (2.0 * std::f64::consts::PI * 440.0 * t).sin()
        })
        .collect()
}

fn main() -> audiocomp::Result<()> {
    tracing_subscriber::fmt::init();

    let mut limiter = PeakLimiter::builder()
        .threshold_db(-6.0)
        .attack_ms(0.5)
        .release_ms(5.0)
        .realtime(true)
        .build()?;

    let left = burst(4800);
    let right: Vec<f64> = left.iter().map(|s| s * 0.8).collect();

    println!("chunk   reduction");
    for (idx, (l, r)) in left
        .chunks(CHUNK_FRAMES)
        .zip(right.chunks(CHUNK_FRAMES))
        .enumerate()
    {
        let block = SignalBuffer::from_channels(vec![l.to_vec(), r.to_vec()])?;
        let out = limiter.process(&block, SAMPLE_RATE)?;

        let deepest = limiter
            .gain_reduction_db()
            .iter()
            .fold(0.0_f64, |acc, &db| acc.min(db));
        let bar = "#".repeat((-deepest * 4.0).round() as usize);
        println!(
            "{:>5}  {:>6.2} dB |{:<32}| peak {:.3}",
            idx,
            deepest,
            bar,
            out.peak()
        );
    }

    Ok(())
}
