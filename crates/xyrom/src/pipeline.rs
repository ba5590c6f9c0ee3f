use std::ops::Range;

use tracing::{debug, info, info_span};
use xr_core::{Error, ImageView, Mask, SampleOrder, XyConfig};
use xr_dac::{FullRangeMap, Normalizer, SampleStream, Stitched, dedup_adjacent, stitch_paths};
use xr_label::{LabelConfig, label_components};
use xr_path::order_components;

/// Result of converting one mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub width: usize,
    pub height: usize,
    pub foreground: usize,
    /// Components traced. A raster scan counts the whole mask as one.
    pub components: usize,
    /// Effective per-axis code range after margin relaxation.
    pub dst_range: (u32, u32),
    /// Samples dropped because they repeated their predecessor.
    pub collapsed: usize,
    /// Stitched stream before decimation.
    pub stream: SampleStream,
    /// Index ranges of `stream` holding component paths; the gaps are bridges.
    pub spans: Vec<Range<usize>>,
    /// `stream` after stride decimation; this is what gets written out.
    pub decimated: SampleStream,
}

/// Thresholds `luma` and runs [`trace_mask`].
pub fn trace_luma(luma: &ImageView<'_, u8>, cfg: &XyConfig) -> Result<Trace, Error> {
    cfg.validate()?;
    let mask = Mask::from_luma(luma, cfg.threshold);
    trace_mask(&mask, cfg)
}

/// Label, order, normalize, dedup, stitch, decimate.
///
/// With [`SampleOrder::Raster`] the first four stages are replaced by a
/// row-major scan of the whole mask onto the full code range.
///
/// Invalid configuration is rejected before any work is done. An all
/// background mask yields empty streams.
pub fn trace_mask(mask: &Mask, cfg: &XyConfig) -> Result<Trace, Error> {
    cfg.validate()?;

    let (width, height) = (mask.width(), mask.height());
    let _span = info_span!("trace_mask", width, height, bits = cfg.bits).entered();

    let (components, dst_range, collapsed, stitched) = match cfg.order {
        SampleOrder::NearestNeighbor => trace_components(mask, cfg),
        SampleOrder::Raster => scan_raster(mask, cfg),
    };
    let decimated = stitched.stream.decimated(cfg.stride);

    let trace = Trace {
        width,
        height,
        foreground: mask.foreground_count(),
        components,
        dst_range,
        collapsed,
        stream: stitched.stream,
        spans: stitched.spans,
        decimated,
    };

    info!(
        components = trace.components,
        samples = trace.stream.len(),
        collapsed = trace.collapsed,
        bridges = trace.bridge_count(),
        decimated = trace.decimated.len(),
        stride = cfg.stride,
        "traced mask"
    );

    Ok(trace)
}

fn trace_components(mask: &Mask, cfg: &XyConfig) -> (usize, (u32, u32), usize, Stitched) {
    let label_cfg = LabelConfig {
        min_component_size: cfg.min_component_size,
    };
    let components = label_components(mask, &label_cfg);
    let paths = order_components(components.iter().map(|c| c.pixels.as_slice()), cfg.search);

    let norm = Normalizer::from_config(mask.width(), mask.height(), cfg);
    let mut collapsed = 0_usize;
    let coded: Vec<_> = paths
        .iter()
        .map(|path| {
            let codes = dedup_adjacent(norm.normalize_path(path));
            collapsed += path.len() - codes.len();
            codes
        })
        .collect();
    debug!(
        collapsed,
        dst_min = norm.dst_range().0,
        dst_max = norm.dst_range().1,
        "normalized component paths"
    );

    (components.len(), norm.dst_range(), collapsed, stitch_paths(coded))
}

/// One sample per foreground pixel, row-major, no dedup or bridges.
fn scan_raster(mask: &Mask, cfg: &XyConfig) -> (usize, (u32, u32), usize, Stitched) {
    let map = FullRangeMap::from_config(mask.width(), mask.height(), cfg);
    let points: Vec<_> = mask.iter_foreground().map(|p| map.map_pixel(p)).collect();
    debug!(samples = points.len(), "raster scan");

    let spans = if points.is_empty() {
        Vec::new()
    } else {
        vec![0..points.len()]
    };
    let stitched = Stitched {
        stream: SampleStream::from_points(points),
        spans,
    };
    (stitched.spans.len(), (0, cfg.dac_max()), 0, stitched)
}

impl Trace {
    /// Number of interpolated samples between component paths.
    pub fn bridge_count(&self) -> usize {
        let in_paths: usize = self.spans.iter().map(|s| s.len()).sum();
        self.stream.len() - in_paths
    }
}
