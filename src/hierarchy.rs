use crate::math::{GridPoint, Real};
use crate::triangle::RightTriangle;
use crate::{RtinError, Tile};
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The grid size used by most terrain tiles: 256 cells plus the closing row and column.
pub const DEFAULT_GRID_SIZE: u32 = 257;

/// The largest supported grid size.
///
/// Vertex coordinates are emitted as `u16` and vertex indices as `u32`, which
/// bounds the grid to `2^15 + 1` samples per side.
pub const MAX_GRID_SIZE: u32 = (1 << 15) + 1;

/// The implicit binary tree of every right-triangle subdivision of a square grid.
///
/// The grid is first split along its main diagonal into two root triangles. Each triangle is
/// then recursively bisected along its hypotenuse until it covers a single grid cell. Node `i`
/// of the tree is identified by `id = i + 2`, whose bits, read from the least significant
/// one, encode the path from the roots: the lowest bit selects the root, each following bit
/// selects the left (`1`) or right (`0`) half, and the highest set bit only marks the depth.
/// Nodes are thus numbered level by level and a node index is always smaller than the
/// indices of its children.
///
/// The hierarchy only depends on the grid size. It is never modified once built and is meant
/// to be shared (through an [`Arc`]) by every [`Tile`] of that size.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Hierarchy {
    grid_size: u32,
    num_triangles: usize,
    num_parent_triangles: usize,
    /// The hypotenuse endpoints `[a, b]` of each node.
    coords: Vec<[GridPoint; 2]>,
}

impl Hierarchy {
    /// Builds the triangle hierarchy of a grid with `grid_size` samples per side.
    ///
    /// Fails with [`RtinError::InvalidSize`] unless `grid_size - 1` is a power of two,
    /// `grid_size >= 3` and `grid_size <= MAX_GRID_SIZE`.
    pub fn new(grid_size: u32) -> Result<Self, RtinError> {
        if grid_size < 3 || grid_size > MAX_GRID_SIZE || !(grid_size - 1).is_power_of_two() {
            return Err(RtinError::InvalidSize(grid_size));
        }

        let tile_size = grid_size - 1;
        let num_cells = tile_size as usize * tile_size as usize;
        let num_triangles = num_cells * 2 - 2;
        let num_parent_triangles = num_triangles - num_cells;

        let coords = (0..num_triangles)
            .map(|i| decode_hypotenuse(i, tile_size))
            .collect();

        log::debug!(
            "Built RTIN hierarchy for a {grid_size}x{grid_size} grid: {num_triangles} triangles ({num_parent_triangles} parents)."
        );

        Ok(Self {
            grid_size,
            num_triangles,
            num_parent_triangles,
            coords,
        })
    }

    /// The number of samples on each side of the grid.
    #[inline]
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// The number of cells on each side of the grid, i.e., `grid_size - 1`.
    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.grid_size - 1
    }

    /// The number of elevation samples a tile of this hierarchy expects.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.grid_size as usize * self.grid_size as usize
    }

    /// The total number of nodes of the tree, excluding the two roots: `2 * tile_size² - 2`.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.num_triangles
    }

    /// The number of nodes having two children.
    ///
    /// These are the nodes with an index smaller than this number.
    #[inline]
    pub fn num_parent_triangles(&self) -> usize {
        self.num_parent_triangles
    }

    /// Does the node `i` have children in this hierarchy?
    #[inline]
    pub fn is_parent(&self, i: usize) -> bool {
        i < self.num_parent_triangles
    }

    /// The endpoints `[a, b]` of the hypotenuse of the node `i`.
    #[inline]
    pub fn hypotenuse(&self, i: usize) -> [GridPoint; 2] {
        self.coords[i]
    }

    /// The full triangle of the node `i`, with its apex.
    #[inline]
    pub fn triangle(&self, i: usize) -> RightTriangle {
        let [a, b] = self.coords[i];
        RightTriangle::from_hypotenuse(a, b)
    }

    /// The indices of the left and right children of the node `i`.
    ///
    /// Returns `None` if `i` is a leaf.
    pub fn children(&self, i: usize) -> Option<[usize; 2]> {
        if !self.is_parent(i) {
            return None;
        }

        // The child bit is appended right below the depth marker, which moves up by one.
        let id = i + 2;
        let level_bit = 1usize << id.ilog2();
        Some([id + 2 * level_bit - 2, id + level_bit - 2])
    }

    /// The two root triangles, in the order they are visited during mesh extraction.
    ///
    /// The first one covers the bottom-left half of the grid, below its main diagonal,
    /// and the second one covers the top-right half.
    pub fn roots(&self) -> [RightTriangle; 2] {
        let max = self.tile_size();
        [
            RightTriangle::new(
                GridPoint::new(0, 0),
                GridPoint::new(max, max),
                GridPoint::new(max, 0),
            ),
            RightTriangle::new(
                GridPoint::new(max, max),
                GridPoint::new(0, 0),
                GridPoint::new(0, max),
            ),
        ]
    }

    /// Creates a tile from the row-major `elevations` of a grid of this size.
    ///
    /// See [`Tile::new`].
    pub fn create_tile(self: &Arc<Self>, elevations: Vec<Real>) -> Result<Tile, RtinError> {
        Tile::new(self.clone(), elevations)
    }

    /// Creates one tile per elevation grid.
    ///
    /// Fails if any of the grids has the wrong number of samples, in which case no tile
    /// is returned. With the `parallel` feature the error fields are computed on the rayon
    /// thread pool. The tiles are returned in the input order.
    pub fn create_tiles(
        self: &Arc<Self>,
        elevations: Vec<Vec<Real>>,
    ) -> Result<Vec<Tile>, RtinError> {
        #[cfg(feature = "parallel")]
        return elevations
            .into_par_iter()
            .map(|grid| self.create_tile(grid))
            .collect();

        #[cfg(not(feature = "parallel"))]
        return elevations
            .into_iter()
            .map(|grid| self.create_tile(grid))
            .collect();
    }
}

/// Decodes the hypotenuse endpoints of the node `i` from the bits of its id.
///
/// This walks down from the root selected by the lowest bit, consuming one bit per level,
/// until only the depth marker remains.
fn decode_hypotenuse(i: usize, tile_size: u32) -> [GridPoint; 2] {
    let mut id = i + 2;
    let (mut a, mut b, mut c) = if id & 1 != 0 {
        // Bottom-left root.
        (
            GridPoint::new(0, 0),
            GridPoint::new(tile_size, tile_size),
            GridPoint::new(tile_size, 0),
        )
    } else {
        // Top-right root.
        (
            GridPoint::new(tile_size, tile_size),
            GridPoint::new(0, 0),
            GridPoint::new(0, tile_size),
        )
    };

    loop {
        id >>= 1;
        if id <= 1 {
            break;
        }

        let m = crate::triangle::midpoint(&a, &b);
        if id & 1 != 0 {
            // Left half.
            b = a;
            a = c;
        } else {
            // Right half.
            a = b;
            b = c;
        }
        c = m;
    }

    [a, b]
}
