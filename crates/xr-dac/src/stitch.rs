use std::ops::Range;

use xr_core::{DacCode, DacPoint};

use crate::SampleStream;

/// Upper bound on bridge points between two component paths.
pub const MAX_BRIDGE_STEPS: usize = 8;
/// One bridge point per this many codes of gap, before clamping.
pub const BRIDGE_SPACING: f64 = 8.0;

/// Removes samples equal to the immediately preceding one.
pub fn dedup_adjacent(mut path: Vec<DacPoint>) -> Vec<DacPoint> {
    path.dedup();
    path
}

/// Interpolated points strictly between `from` and `to`.
///
/// `steps = clamp(floor(|to - from| / 8), 1, 8)`; point `s` sits at
/// `t = s / (steps + 1)`, rounded half to even per axis. Neither
/// endpoint is included.
pub fn bridge(from: DacPoint, to: DacPoint) -> Vec<DacPoint> {
    let dist = from.dist(to);
    let steps = ((dist / BRIDGE_SPACING).floor() as usize).clamp(1, MAX_BRIDGE_STEPS);

    let dx = f64::from(to.x) - f64::from(from.x);
    let dy = f64::from(to.y) - f64::from(from.y);
    let denom = (steps + 1) as f64;

    (1..=steps)
        .map(|s| {
            let t = s as f64 / denom;
            DacPoint::new(lerp_code(from.x, dx, t), lerp_code(from.y, dy, t))
        })
        .collect()
}

#[inline]
fn lerp_code(start: DacCode, delta: f64, t: f64) -> DacCode {
    (f64::from(start) + delta * t)
        .round_ties_even()
        .clamp(0.0, f64::from(DacCode::MAX)) as DacCode
}

/// Stitched stream plus the index range each component path occupies.
/// Samples outside every span are bridge points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stitched {
    pub stream: SampleStream,
    pub spans: Vec<Range<usize>>,
}

/// Concatenates per-component paths with bridges between neighbors.
///
/// Empty paths are skipped and never trigger a bridge.
pub fn stitch_paths<I>(paths: I) -> Stitched
where
    I: IntoIterator<Item = Vec<DacPoint>>,
{
    let mut stream = SampleStream::new();
    let mut spans = Vec::new();
    for path in paths {
        let Some(&first) = path.first() else {
            continue;
        };
        if let Some(last) = stream.last() {
            for p in bridge(last, first) {
                stream.push(p);
            }
        }
        let start = stream.len();
        stream.extend_from_slice(&path);
        spans.push(start..stream.len());
    }
    Stitched { stream, spans }
}
