/// A single DAC channel value in `[0, 2^bits - 1]`.
pub type DacCode = u16;

/// Integer pixel coordinate: `x` is the column, `y` the row (0 = top).
///
/// Field order makes the derived `Ord` lexicographic on `(column, row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
}

impl Pixel {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.
    pub fn dist2(self, other: Self) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }
}

/// One XY sample in DAC code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DacPoint {
    pub x: DacCode,
    pub y: DacCode,
}

impl DacPoint {
    pub const fn new(x: DacCode, y: DacCode) -> Self {
        Self { x, y }
    }

    pub fn dist(self, other: Self) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}
