//! Memory-initialization text output for XY sample streams.
//!
//! Format: one value per line, uppercase hexadecimal, zero-padded to
//! `ceil(bits / 4)` digits, `\n` terminated. This is what `$readmemh` and
//! most FPGA block-RAM initializers accept.
//!
//! X and Y go to separate files with equal line counts; line `i` of each is
//! one sample. An empty stream produces two empty files.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use xr_core::DacCode;
use xr_dac::SampleStream;

/// Hex digits needed for a `bits`-wide code.
pub fn hex_width(bits: u8) -> usize {
    usize::from(bits).div_ceil(4)
}

pub fn write_mem_hex<W: Write>(
    mut out: W,
    values: &[DacCode],
    hex_width: usize,
) -> io::Result<()> {
    for v in values {
        writeln!(out, "{v:0hex_width$X}")?;
    }
    out.flush()
}

pub fn write_mem_file(path: &Path, values: &[DacCode], hex_width: usize) -> io::Result<()> {
    let file = File::create(path)?;
    write_mem_hex(BufWriter::new(file), values, hex_width)
}

/// Parses mem text back into codes. Blank lines are skipped.
pub fn read_mem_hex<R: BufRead>(input: R) -> io::Result<Vec<DacCode>> {
    let mut out = Vec::new();
    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let v = DacCode::from_str_radix(text, 16).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {}: {text:?}: {e}", lineno + 1),
            )
        })?;
        out.push(v);
    }
    Ok(out)
}

pub fn read_mem_file(path: &Path) -> io::Result<Vec<DacCode>> {
    read_mem_hex(BufReader::new(File::open(path)?))
}

/// Paths of a written X/Y file pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemFiles {
    pub x: PathBuf,
    pub y: PathBuf,
}

impl MemFiles {
    /// `<prefix>x.mem` and `<prefix>y.mem`.
    pub fn for_prefix(prefix: &str) -> Self {
        Self {
            x: PathBuf::from(format!("{prefix}x.mem")),
            y: PathBuf::from(format!("{prefix}y.mem")),
        }
    }
}

/// Writes both channels of `stream` next to each other.
pub fn write_xy_mem(files: &MemFiles, stream: &SampleStream, bits: u8) -> io::Result<()> {
    let width = hex_width(bits);
    write_mem_file(&files.x, &stream.xs(), width)?;
    write_mem_file(&files.y, &stream.ys(), width)?;

    info!(
        samples = stream.len(),
        hex_width = width,
        x = %files.x.display(),
        y = %files.y.display(),
        "wrote mem files"
    );
    Ok(())
}
