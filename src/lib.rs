/*!
rtin
========

**rtin** builds Right-Triangulated Irregular Networks: variable-resolution
triangle meshes of a square height grid whose vertical deviation from the
grid never exceeds a caller-supplied tolerance.

The work is split in three stages, leaves first:

1. a [`Hierarchy`] decodes every triangle of the implicit binary tree of
   right-triangle bisections for a grid of side `2^k + 1`. It only depends on
   the grid size and is shared by all the tiles of that size;
2. an [`ErrorField`] records, for each grid point, the worst approximation
   error introduced anywhere below the triangles whose refinement would add
   that point;
3. [`extract`] walks the tree top-down and emits a deduplicated
   [`TileMesh`] for a given tolerance.

```
# #[cfg(feature = "f32")] {
use rtin::Hierarchy;
use std::sync::Arc;

let hierarchy = Arc::new(Hierarchy::new(5).unwrap());
let heights = (0..25).map(|i| (i % 5) as f32 * 0.5).collect();
let tile = hierarchy.create_tile(heights).unwrap();
let mesh = tile.mesh(0.1);
assert_eq!(mesh.vertices().len(), 2 * mesh.num_vertices());
# }
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

extern crate alloc;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub use self::error::RtinError;
pub use self::error_field::ErrorField;
pub use self::extraction::extract;
pub use self::hierarchy::{Hierarchy, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
pub use self::mesh::TileMesh;
pub use self::tile::{Tile, DEFAULT_MAX_ERROR};
pub use self::triangle::RightTriangle;

mod error;
mod error_field;
mod extraction;
mod hierarchy;
mod mesh;
mod tile;
mod triangle;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Point2, Point3, Vector3};

    /// A point of the elevation grid.
    ///
    /// Coordinates are kept as `u32` internally so sums of two coordinates never
    /// overflow; they are narrowed to `u16` only when written to a [`TileMesh`](crate::TileMesh).
    pub type GridPoint = Point2<u32>;
}
