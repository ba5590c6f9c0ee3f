//! Connected-component labelling of binary masks.
//!
//! Components are maximal sets of foreground pixels linked through the four
//! axis-aligned neighbors. Traversal is an explicit-stack flood fill, so large
//! blobs never recurse.
//!
//! Components come out in the row-major order in which their first pixel is
//! met by the scan. Pixels inside a component are in flood-fill discovery
//! order and should be treated as an unordered set.

mod label;

pub use label::{Component, LabelConfig, label_components};
