use xr_core::Pixel;

/// Square buckets over a component's bounding box.
struct Grid {
    origin: Pixel,
    cell: usize,
    cols: usize,
    rows: usize,
    buckets: Vec<Vec<Pixel>>,
}

impl Grid {
    fn new(pixels: &[Pixel], cell: usize) -> Option<Self> {
        let first = *pixels.first()?;
        let (mut lo, mut hi) = (first, first);
        for p in pixels {
            lo.x = lo.x.min(p.x);
            lo.y = lo.y.min(p.y);
            hi.x = hi.x.max(p.x);
            hi.y = hi.y.max(p.y);
        }

        let cell = cell.max(1);
        let cols = (hi.x - lo.x) / cell + 1;
        let rows = (hi.y - lo.y) / cell + 1;
        let mut grid = Self {
            origin: lo,
            cell,
            cols,
            rows,
            buckets: vec![Vec::new(); cols * rows],
        };
        for &p in pixels {
            let (cx, cy) = grid.cell_of(p);
            grid.buckets[cy * cols + cx].push(p);
        }
        Some(grid)
    }

    #[inline]
    fn cell_of(&self, p: Pixel) -> (usize, usize) {
        (
            (p.x - self.origin.x) / self.cell,
            (p.y - self.origin.y) / self.cell,
        )
    }

    fn remove(&mut self, p: Pixel) {
        let (cx, cy) = self.cell_of(p);
        let bucket = &mut self.buckets[cy * self.cols + cx];
        if let Some(i) = bucket.iter().position(|&q| q == p) {
            bucket.swap_remove(i);
        }
    }

    /// Remaining pixel minimizing `(d^2, column, row)` from `cur`.
    ///
    /// A pixel in a ring `k` cells away is at least `(k - 1) * cell + 1`
    /// pixels away on one axis, so once the best candidate beats the bound of
    /// the next ring no farther bucket can win, ties included.
    fn nearest(&self, cur: Pixel) -> Option<Pixel> {
        let (cx, cy) = self.cell_of(cur);
        let max_ring = self.cols.max(self.rows);
        let mut best: Option<(u64, Pixel)> = None;

        for r in 0..=max_ring {
            self.scan_ring(cx, cy, r, cur, &mut best);

            if let Some((d2, _)) = best {
                let reach = (r * self.cell + 1) as u64;
                if d2 < reach * reach {
                    break;
                }
            }
        }

        best.map(|(_, p)| p)
    }

    fn scan_ring(
        &self,
        cx: usize,
        cy: usize,
        r: usize,
        cur: Pixel,
        best: &mut Option<(u64, Pixel)>,
    ) {
        let r = r as isize;
        let (cx, cy) = (cx as isize, cy as isize);

        for gy in (cy - r)..=(cy + r) {
            if gy < 0 || gy >= self.rows as isize {
                continue;
            }
            let edge_row = gy == cy - r || gy == cy + r;
            let step = if edge_row || r == 0 { 1 } else { (2 * r) as usize };

            for gx in ((cx - r)..=(cx + r)).step_by(step) {
                if gx < 0 || gx >= self.cols as isize {
                    continue;
                }

                for &p in &self.buckets[gy as usize * self.cols + gx as usize] {
                    let key = (cur.dist2(p), p);
                    if best.is_none_or(|b| key < b) {
                        *best = Some(key);
                    }
                }
            }
        }
    }
}

/// Greedy nearest-neighbor walk using bucketed ring search.
///
/// Produces the same path as [`crate::nearest_neighbor_path`].
pub fn nearest_neighbor_path_grid(pixels: &[Pixel], cell: usize) -> Vec<Pixel> {
    let Some(mut grid) = Grid::new(pixels, cell) else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity(pixels.len());
    let Some(mut cur) = pixels.iter().min().copied() else {
        return path;
    };
    grid.remove(cur);
    path.push(cur);

    while path.len() < pixels.len() {
        let Some(next) = grid.nearest(cur) else {
            break;
        };
        grid.remove(next);
        path.push(next);
        cur = next;
    }

    path
}
