use crate::error_field::ErrorField;
use crate::extraction::extract;
use crate::hierarchy::Hierarchy;
use crate::math::{GridPoint, Real};
use crate::mesh::TileMesh;
use crate::triangle::grid_index;
use crate::RtinError;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The default tolerance for [`Tile::mesh`]: the coarsest mesh that is still exact.
///
/// With a zero tolerance, only the regions where the grid is exactly planar are simplified.
pub const DEFAULT_MAX_ERROR: Real = 0.0;

/// An elevation grid ready for mesh extraction.
///
/// A tile owns its elevations and their [`ErrorField`], and shares the [`Hierarchy`] of its
/// grid size with the other tiles. Once built, any number of meshes can be extracted from it
/// with different tolerances.
#[derive(Clone, Debug)]
pub struct Tile {
    hierarchy: Arc<Hierarchy>,
    elevations: Vec<Real>,
    errors: ErrorField,
}

impl Tile {
    /// Creates a tile from row-major `elevations`, the sample `(x, y)` being at index
    /// `y * grid_size + x`.
    ///
    /// Fails with [`RtinError::SizeMismatch`] if `elevations` does not contain exactly
    /// `grid_size * grid_size` samples.
    pub fn new(hierarchy: Arc<Hierarchy>, elevations: Vec<Real>) -> Result<Self, RtinError> {
        let errors = ErrorField::compute(&hierarchy, &elevations)?;
        Ok(Self {
            hierarchy,
            elevations,
            errors,
        })
    }

    /// Replaces the elevations of this tile and recomputes its error field.
    ///
    /// On failure, the tile is left untouched.
    pub fn set_elevations(&mut self, elevations: Vec<Real>) -> Result<(), RtinError> {
        self.errors.recompute(&self.hierarchy, &elevations)?;
        self.elevations = elevations;
        Ok(())
    }

    /// The hierarchy shared by all the tiles of this size.
    #[inline]
    pub fn hierarchy(&self) -> &Arc<Hierarchy> {
        &self.hierarchy
    }

    /// The number of samples on each side of the grid.
    #[inline]
    pub fn grid_size(&self) -> u32 {
        self.hierarchy.grid_size()
    }

    /// The row-major elevations of this tile.
    #[inline]
    pub fn elevations(&self) -> &[Real] {
        &self.elevations
    }

    /// The elevation of the grid point `(x, y)`.
    #[inline]
    pub fn elevation(&self, x: u32, y: u32) -> Real {
        self.elevations[grid_index(&GridPoint::new(x, y), self.grid_size() as usize)]
    }

    /// The error field computed from the elevations of this tile.
    #[inline]
    pub fn errors(&self) -> &ErrorField {
        &self.errors
    }

    /// Extracts the mesh approximating this tile within `max_error`.
    ///
    /// See [`extract`] for details. Use [`DEFAULT_MAX_ERROR`] for the coarsest exact mesh.
    pub fn mesh(&self, max_error: Real) -> TileMesh {
        extract(&self.hierarchy, &self.errors, max_error)
    }

    /// Extracts one mesh per tolerance of `max_errors`, in the same order.
    ///
    /// With the `parallel` feature, the meshes are extracted on the rayon thread pool.
    pub fn meshes(&self, max_errors: &[Real]) -> Vec<TileMesh> {
        #[cfg(feature = "parallel")]
        return max_errors.par_iter().map(|e| self.mesh(*e)).collect();

        #[cfg(not(feature = "parallel"))]
        return max_errors.iter().map(|e| self.mesh(*e)).collect();
    }
}
