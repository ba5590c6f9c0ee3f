//! Pixel path ordering for XY beam traversal.
//!
//! Each component's pixel set is turned into a single visiting order. The
//! default walk is greedy nearest-neighbor:
//! - Start at the smallest pixel by `(column, row)`.
//! - Repeatedly step to the remaining pixel with the smallest squared
//!   distance; ties go to the smaller `(column, row)`.
//!
//! The selection key `(d^2, column, row)` is total, so output does not depend
//! on input order and is reproducible bit for bit.
//!
//! Search strategies:
//! - [`NeighborSearch::Exhaustive`]: O(n^2), no setup.
//! - [`NeighborSearch::Grid`]: ring search over square buckets. Same output,
//!   much cheaper on large solid components.
//!
//! This is a heuristic tour, not a shortest one.

mod grid;
mod order;

pub use grid::nearest_neighbor_path_grid;
pub use order::{nearest_neighbor_path, order_components, order_pixels};
pub use xr_core::NeighborSearch;
