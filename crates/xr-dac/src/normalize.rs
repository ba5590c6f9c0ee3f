use xr_core::{DacCode, DacPoint, Pixel, XyConfig};

/// Destination code range for one axis.
///
/// `[margin, dac_max - margin]`, or `[0, dac_max]` when the margin leaves an
/// empty or inverted range.
pub fn dst_range(dac_max: u32, margin: u32) -> (u32, u32) {
    if margin.saturating_mul(2) >= dac_max {
        (0, dac_max)
    } else {
        (margin, dac_max - margin)
    }
}

/// Linear map from pixel index `[0, src_max]` to `[dst_min, dst_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMap {
    src_max: usize,
    dst_min: u32,
    dst_max: u32,
}

impl AxisMap {
    /// `len` is the axis size in pixels.
    pub fn new(len: usize, dst_min: u32, dst_max: u32) -> Self {
        Self {
            src_max: len.saturating_sub(1),
            dst_min,
            dst_max,
        }
    }

    /// Rounds half to even. A single-pixel axis maps to the midpoint.
    pub fn map(&self, v: usize) -> DacCode {
        if self.src_max == 0 {
            return ((self.dst_min + self.dst_max) / 2) as DacCode;
        }

        let span = u64::from(self.dst_max - self.dst_min);
        let scaled = (v as u64 * span) as f64 / self.src_max as f64;
        let code = (f64::from(self.dst_min) + scaled).round_ties_even();
        code.clamp(f64::from(self.dst_min), f64::from(self.dst_max)) as DacCode
    }
}

/// Maps pixels of a `width x height` image into DAC code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    x: AxisMap,
    y: AxisMap,
    height: usize,
    flip_y: bool,
}

impl Normalizer {
    pub fn new(width: usize, height: usize, dac_max: u32, margin: u32, flip_y: bool) -> Self {
        let (dst_min, dst_max) = dst_range(dac_max, margin);
        Self {
            x: AxisMap::new(width, dst_min, dst_max),
            y: AxisMap::new(height, dst_min, dst_max),
            height,
            flip_y,
        }
    }

    pub fn from_config(width: usize, height: usize, cfg: &XyConfig) -> Self {
        Self::new(width, height, cfg.dac_max(), cfg.margin, cfg.flip_y)
    }

    /// Effective `(dst_min, dst_max)` after margin relaxation.
    pub fn dst_range(&self) -> (u32, u32) {
        (self.x.dst_min, self.x.dst_max)
    }

    pub fn map_pixel(&self, p: Pixel) -> DacPoint {
        let row = if self.flip_y {
            self.height.saturating_sub(1).saturating_sub(p.y)
        } else {
            p.y
        };
        DacPoint::new(self.x.map(p.x), self.y.map(row))
    }

    pub fn normalize_path(&self, path: &[Pixel]) -> Vec<DacPoint> {
        path.iter().map(|&p| self.map_pixel(p)).collect()
    }
}

/// Per-pixel map onto the whole `[0, dac_max]` range, used by raster scans.
///
/// Each axis scales the fraction `v / (len - 1)` by `dac_max` and rounds half
/// to even. A single-pixel axis maps to `dac_max / 2`. No margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullRangeMap {
    width: usize,
    height: usize,
    dac_max: u32,
    flip_y: bool,
}

impl FullRangeMap {
    pub fn new(width: usize, height: usize, dac_max: u32, flip_y: bool) -> Self {
        Self {
            width,
            height,
            dac_max,
            flip_y,
        }
    }

    pub fn from_config(width: usize, height: usize, cfg: &XyConfig) -> Self {
        Self::new(width, height, cfg.dac_max(), cfg.flip_y)
    }

    fn axis(&self, v: usize, len: usize) -> DacCode {
        if len <= 1 {
            return (self.dac_max / 2) as DacCode;
        }
        let frac = v as f64 / (len - 1) as f64;
        (frac * f64::from(self.dac_max))
            .round_ties_even()
            .clamp(0.0, f64::from(self.dac_max)) as DacCode
    }

    pub fn map_pixel(&self, p: Pixel) -> DacPoint {
        let row = if self.flip_y {
            self.height.saturating_sub(1).saturating_sub(p.y)
        } else {
            p.y
        };
        DacPoint::new(self.axis(p.x, self.width), self.axis(row, self.height))
    }
}
