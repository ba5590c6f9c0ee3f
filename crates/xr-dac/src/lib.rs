//! Pixel-to-DAC code mapping and sample stream assembly.
//!
//! Stages, in pipeline order:
//! - [`Normalizer`]: linear map of each axis from `[0, dim - 1]` into
//!   `[margin, dac_max - margin]`, optional row flip, rounded half to even. A margin that
//!   leaves no room falls back to `[0, dac_max]`; a one-pixel axis maps to
//!   the midpoint.
//! - [`FullRangeMap`]: the raster-scan variant, `[0, dac_max]` with no margin.
//! - [`dedup_adjacent`]: drops a sample equal to its predecessor within one
//!   component's path.
//! - [`stitch_paths`]: concatenates component paths, inserting up to
//!   [`MAX_BRIDGE_STEPS`] interpolated points between consecutive paths.
//! - [`decimate`]: plain stride decimation, no filtering.
//!   Output length is `ceil(len / stride)`.

mod decimate;
mod normalize;
mod stitch;
mod stream;

pub use decimate::decimate;
pub use normalize::{AxisMap, FullRangeMap, Normalizer, dst_range};
pub use stitch::{
    BRIDGE_SPACING, MAX_BRIDGE_STEPS, Stitched, bridge, dedup_adjacent, stitch_paths,
};
pub use stream::SampleStream;
