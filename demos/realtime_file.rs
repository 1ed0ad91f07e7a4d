//! # Realtime chunked compression of a WAV file
//!
//! Streams a WAV file through a realtime compressor in 512-frame chunks,
//! lowering the threshold and raising the make-up gain a little on every
//! chunk, and writes the result as a 32-bit float WAV.
//!
//! **Concepts:** realtime mode, parameter changes between chunks, process_in_place
//!
//! ```bash
//! cargo run --example realtime_file -- input.wav output.wav
//! ```

use audiocomp::prelude::*;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::info;

const CHUNK_FRAMES: usize = 512;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(input_path), Some(output_path)) = (args.next(), args.next()) else {
        eprintln!("usage: realtime_file <input.wav> <output.wav>");
        std::process::exit(2);
    };

    let mut reader = WavReader::open(&input_path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    let sample_rate = spec.sample_rate as f64;
    info!(%input_path, channels, sample_rate, "opened input");

    let samples: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let mut comp = Compressor::builder()
        .threshold_db(0.0)
        .ratio(4.0)
        .attack_ms(2.0)
        .release_ms(100.0)
        .knee_width_db(5.0)
        .realtime(true)
        .build()?;

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&output_path, out_spec)?;

    let mut deepest_db = 0.0_f64;
    for chunk in samples.chunks(CHUNK_FRAMES * channels) {
        comp.set_threshold(comp.threshold() - 0.01)?;
        comp.set_makeup_gain(comp.makeup_gain() + 0.002)?;

        let mut block = SignalBuffer::from_interleaved(chunk, channels)?;
        comp.process_in_place(&mut block, sample_rate)?;

        deepest_db = comp
            .gain_reduction_db()
            .iter()
            .fold(deepest_db, |acc, &db| acc.min(db));

        for sample in block.to_interleaved() {
            writer.write_sample(sample as f32)?;
        }
    }
    writer.finalize()?;

    info!(
        %output_path,
        final_threshold_db = comp.threshold(),
        final_makeup_db = comp.makeup_gain(),
        deepest_reduction_db = deepest_db,
        "done"
    );
    Ok(())
}
