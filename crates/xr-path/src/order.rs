use tracing::debug;
use xr_core::{NeighborSearch, Pixel};

use crate::grid::nearest_neighbor_path_grid;

pub fn order_pixels(pixels: &[Pixel], search: NeighborSearch) -> Vec<Pixel> {
    match search {
        NeighborSearch::Exhaustive => nearest_neighbor_path(pixels),
        NeighborSearch::Grid { cell } => nearest_neighbor_path_grid(pixels, cell),
    }
}

/// Orders every component independently, preserving component order.
pub fn order_components<'a, I>(
    components: I,
    search: NeighborSearch,
) -> Vec<Vec<Pixel>>
where
    I: IntoIterator<Item = &'a [Pixel]>,
{
    let paths: Vec<Vec<Pixel>> = components
        .into_iter()
        .map(|pixels| order_pixels(pixels, search))
        .collect();

    let longest = paths.iter().map(Vec::len).max().unwrap_or(0);
    debug!(
        paths = paths.len(),
        longest,
        ?search,
        "ordered component paths"
    );

    paths
}

/// Greedy nearest-neighbor walk with a linear scan per step.
pub fn nearest_neighbor_path(pixels: &[Pixel]) -> Vec<Pixel> {
    let mut remaining = pixels.to_vec();
    let mut path = Vec::with_capacity(remaining.len());

    let Some(start) = remaining
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| **p)
        .map(|(i, _)| i)
    else {
        return path;
    };
    let mut cur = remaining.swap_remove(start);
    path.push(cur);

    while !remaining.is_empty() {
        let mut best = 0_usize;
        let mut best_key = (cur.dist2(remaining[0]), remaining[0]);
        for (i, &p) in remaining.iter().enumerate().skip(1) {
            let key = (cur.dist2(p), p);
            if key < best_key {
                best_key = key;
                best = i;
            }
        }

        cur = remaining.swap_remove(best);
        path.push(cur);
    }

    path
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use xr_core::{Mask, NeighborSearch, Pixel};
    use xr_label::{LabelConfig, label_components};

    use crate::{nearest_neighbor_path, order_components, order_pixels};

    fn px(x: usize, y: usize) -> Pixel {
        Pixel::new(x, y)
    }

    #[test]
    fn single_and_empty() {
        assert!(nearest_neighbor_path(&[]).is_empty());
        assert_eq!(nearest_neighbor_path(&[px(3, 4)]), vec![px(3, 4)]);
    }

    #[test]
    fn starts_at_smallest_column_then_row() {
        let pixels = [px(1, 0), px(0, 2), px(0, 1), px(2, 0)];
        let path = nearest_neighbor_path(&pixels);
        assert_eq!(path[0], px(0, 1));
    }

    #[test]
    fn horizontal_bar_walks_left_to_right() {
        let pixels: Vec<Pixel> = (0..6).rev().map(|x| px(x, 3)).collect();
        let path = nearest_neighbor_path(&pixels);
        let expected: Vec<Pixel> = (0..6).map(|x| px(x, 3)).collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn equidistant_candidates_break_ties_lexicographically() {
        // Plus sign with two extra corners. Every step below has two
        // candidates at distance 1; the smaller (column, row) wins.
        let pixels = [
            px(1, 1),
            px(1, 0),
            px(2, 1),
            px(0, 1),
            px(1, 2),
            px(0, 0),
            px(0, 2),
        ];
        let path = nearest_neighbor_path(&pixels);

        assert_eq!(
            path,
            vec![
                px(0, 0),
                px(0, 1),
                px(0, 2),
                px(1, 2),
                px(1, 1),
                px(1, 0),
                px(2, 1),
            ]
        );
    }

    #[test]
    fn output_is_independent_of_input_order() {
        let mask = Mask::from_ascii(&[
            "#####.", //
            "#...#.", //
            "#.###.", //
            "#.#...", //
            "###...", //
        ])
        .expect("rectangular mask");
        let comps = label_components(&mask, &LabelConfig::default());
        assert_eq!(comps.len(), 1);

        let forward = nearest_neighbor_path(&comps[0].pixels);
        let mut reversed = comps[0].pixels.clone();
        reversed.reverse();
        assert_eq!(nearest_neighbor_path(&reversed), forward);

        let mut sorted = comps[0].pixels.clone();
        sorted.sort();
        assert_eq!(nearest_neighbor_path(&sorted), forward);
    }

    #[test]
    fn path_is_permutation_of_component() {
        let mask = Mask::from_ascii(&[
            "##..###", //
            "##...#.", //
            "...###.", //
            "#......", //
        ])
        .expect("rectangular mask");
        for comp in label_components(&mask, &LabelConfig::default()) {
            for search in [NeighborSearch::Exhaustive, NeighborSearch::Grid { cell: 2 }] {
                let path = order_pixels(&comp.pixels, search);
                assert_eq!(path.len(), comp.len());

                let a: BTreeSet<Pixel> = path.iter().copied().collect();
                let b: BTreeSet<Pixel> = comp.pixels.iter().copied().collect();
                assert_eq!(a.len(), path.len(), "path repeats a pixel");
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn order_components_keeps_component_order() {
        let a = vec![px(5, 5)];
        let b = vec![px(1, 0), px(0, 0)];
        let paths = order_components(
            [a.as_slice(), b.as_slice()],
            NeighborSearch::Grid { cell: 4 },
        );
        assert_eq!(paths, vec![vec![px(5, 5)], vec![px(0, 0), px(1, 0)]]);
    }
}
