//! Example: trace a PNG and print per-stage statistics.
//!
//! Loads an image as 8-bit luma, runs the full conversion with default
//! settings (optionally overridden on the command line) and prints component
//! counts, stream lengths and timing. Nothing is written to disk; use the
//! `xyrom` binary for that.
//!
//! Run from the workspace root:
//!   cargo run -p xyrom --example trace_png -- --input image.png

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageReader;
use xyrom::{Image, NeighborSearch, XyConfig, hex_width, trace_luma};

#[derive(Parser, Debug)]
#[command(about = "Trace an image into an XY sample stream and print statistics")]
struct Args {
    /// Input image (any format the `image` crate decodes)
    #[arg(long, default_value = "image.png")]
    input: String,

    /// DAC resolution in bits
    #[arg(long, default_value_t = 9)]
    bits: u8,

    /// Use bucketed nearest-neighbor search with this cell size
    #[arg(long)]
    grid_cell: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let gray = ImageReader::open(&args.input)
        .with_context(|| format!("opening {}", args.input))?
        .decode()
        .with_context(|| format!("decoding {}", args.input))?
        .into_luma8();
    let (w, h) = gray.dimensions();
    let luma = Image::from_vec(w as usize, h as usize, gray.into_raw())
        .context("building luma image")?;

    let cfg = XyConfig {
        bits: args.bits,
        search: args
            .grid_cell
            .map_or(NeighborSearch::Exhaustive, |cell| NeighborSearch::Grid { cell }),
        ..XyConfig::default()
    };

    let t0 = Instant::now();
    let trace = trace_luma(&luma.as_view(), &cfg).context("tracing image")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    println!("loaded {}: {w}x{h}, {} foreground pixels", args.input, trace.foreground);
    println!(
        "components: {}, samples: {} ({} bridge), decimated: {} (stride {})",
        trace.components,
        trace.stream.len(),
        trace.bridge_count(),
        trace.decimated.len(),
        cfg.stride
    );
    println!(
        "code range: [{}, {}], hex width {}",
        trace.dst_range.0,
        trace.dst_range.1,
        hex_width(cfg.bits)
    );
    println!("trace time: {elapsed_ms:.2} ms");
    Ok(())
}
