//! Umbrella crate for the `xyrom` workspace.
//!
//! Re-exports the stage crates and provides [`trace_mask`], which runs the
//! whole raster-to-XY conversion for one image.

mod pipeline;

pub use pipeline::{Trace, trace_luma, trace_mask};
pub use xr_core::*;
pub use xr_dac::*;
pub use xr_label::*;
pub use xr_mem::*;
pub use xr_path::*;
