//! Foundational primitives for raster-to-XY sample generation.
//!
//! ## Coordinates
//! A [`Pixel`] is `(x, y)` = `(column, row)`, 0-based, row 0 at the top of
//! the image. Pixels order lexicographically by column first, then row. The
//! path builder relies on this order for its start pixel and tie-breaks.
//!
//! ## Images and Masks
//! Input luma uses [`Image`] / [`ImageView`] with element stride (not byte
//! stride), so borrowed views over padded buffers work. A [`Mask`] is the
//! thresholded boolean grid; foreground means `luma <= threshold`.
//!
//! ## DAC Codes
//! Output codes are `u16`, which bounds the supported resolution to 16 bits.
//! See [`XyConfig`] for the per-run knobs.

mod config;
mod error;
mod geom;
mod image;
mod mask;

pub use config::{MAX_DAC_BITS, NeighborSearch, SampleOrder, XyConfig};
pub use error::Error;
pub use geom::{DacCode, DacPoint, Pixel};
pub use image::{Image, ImageView};
pub use mask::Mask;
