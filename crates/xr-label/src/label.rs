use tracing::debug;
use xr_core::{Mask, Pixel};

const DX: [isize; 4] = [1, 0, -1, 0];
const DY: [isize; 4] = [0, -1, 0, 1];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelConfig {
    pub min_component_size: usize,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            min_component_size: 1,
        }
    }
}

/// One 4-connected foreground region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub pixels: Vec<Pixel>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Inclusive bounding box as `(min, max)` corners.
    pub fn bounds(&self) -> Option<(Pixel, Pixel)> {
        let first = *self.pixels.first()?;
        let mut lo = first;
        let mut hi = first;
        for p in &self.pixels[1..] {
            lo.x = lo.x.min(p.x);
            lo.y = lo.y.min(p.y);
            hi.x = hi.x.max(p.x);
            hi.y = hi.y.max(p.y);
        }
        Some((lo, hi))
    }
}

pub fn label_components(mask: &Mask, cfg: &LabelConfig) -> Vec<Component> {
    let width = mask.width();
    let height = mask.height();
    let fg = mask.cells();
    let n = fg.len();

    if width == 0 || height == 0 {
        return Vec::new();
    }

    let min_size = cfg.min_component_size.max(1);
    let mut seen = vec![0_u8; n];
    let mut stack = Vec::new();
    let mut out = Vec::new();
    let mut dropped = 0_usize;

    for i in 0..n {
        if !fg[i] || seen[i] != 0 {
            continue;
        }

        stack.clear();
        seen[i] = 1;
        stack.push(i);
        let mut pixels = Vec::new();

        while let Some(p) = stack.pop() {
            pixels.push(Pixel::new(p % width, p / width));
            for dir in 0..DX.len() {
                let Some(nb) = neighbor_index(p, dir, width, height) else {
                    continue;
                };
                if fg[nb] && seen[nb] == 0 {
                    seen[nb] = 1;
                    stack.push(nb);
                }
            }
        }

        if pixels.len() >= min_size {
            out.push(Component { pixels });
        } else {
            dropped += 1;
        }
    }

    debug!(
        width,
        height,
        components = out.len(),
        dropped,
        "labelled 4-connected components"
    );

    out
}

#[inline]
fn neighbor_index(p: usize, dir: usize, width: usize, height: usize) -> Option<usize> {
    let x = p % width;
    let y = p / width;
    let nx = x as isize + DX[dir];
    let ny = y as isize + DY[dir];
    if nx < 0 || ny < 0 {
        return None;
    }

    let (nxu, nyu) = (nx as usize, ny as usize);
    if nxu >= width || nyu >= height {
        return None;
    }

    Some(nyu * width + nxu)
}
