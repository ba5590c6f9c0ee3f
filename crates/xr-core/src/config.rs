use crate::Error;

/// Widest DAC supported; codes are stored as `u16`.
pub const MAX_DAC_BITS: u8 = 16;

/// How foreground pixels are turned into a sample stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleOrder {
    /// Per component: greedy nearest-neighbor walk from the smallest
    /// `(column, row)`, margin-inset codes, dedup and bridges.
    #[default]
    NearestNeighbor,
    /// Whole-mask row-major scan onto `[0, dac_max]`. Components, margin,
    /// dedup and bridges do not apply.
    Raster,
}

/// Candidate search used by the nearest-neighbor walk. Both strategies yield
/// identical paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborSearch {
    /// Scan every remaining pixel each step, O(n^2).
    #[default]
    Exhaustive,
    /// Bucket pixels into `cell x cell` squares and search rings outward.
    Grid { cell: usize },
}

/// Per-run conversion settings. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XyConfig {
    /// DAC resolution in bits, `1..=16`.
    pub bits: u8,
    /// Luma at or below this value is foreground.
    pub threshold: u8,
    /// Inset from both rails, in DAC codes.
    pub margin: u32,
    /// Map image row 0 to the top of a bottom-up display.
    pub flip_y: bool,
    /// Keep every `stride`-th sample of the stitched stream.
    pub stride: usize,
    pub order: SampleOrder,
    pub search: NeighborSearch,
    /// Components with fewer pixels are dropped. `1` keeps everything.
    pub min_component_size: usize,
}

impl Default for XyConfig {
    fn default() -> Self {
        Self {
            bits: 9,
            threshold: 128,
            margin: 32,
            flip_y: true,
            stride: 8,
            order: SampleOrder::NearestNeighbor,
            search: NeighborSearch::Exhaustive,
            min_component_size: 1,
        }
    }
}

impl XyConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.bits == 0 || self.bits > MAX_DAC_BITS {
            return Err(Error::InvalidConfig(format!(
                "bits must be in 1..={MAX_DAC_BITS}, got {}",
                self.bits
            )));
        }
        if self.stride == 0 {
            return Err(Error::InvalidConfig("stride must be >= 1".to_string()));
        }
        if let NeighborSearch::Grid { cell: 0 } = self.search {
            return Err(Error::InvalidConfig(
                "grid cell size must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Largest code, `2^bits - 1`. Only meaningful after [`validate`](Self::validate).
    pub fn dac_max(&self) -> u32 {
        (1u32 << u32::from(self.bits.min(MAX_DAC_BITS))) - 1
    }
}
