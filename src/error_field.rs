use crate::hierarchy::Hierarchy;
use crate::math::{GridPoint, Real};
use crate::triangle::{grid_index, midpoint};
use crate::RtinError;
use alloc::vec;
use alloc::vec::Vec;

/// The approximation error attached to each point of an elevation grid.
///
/// The error of a grid point `p` is the largest vertical distance between the grid and its
/// piecewise-linear approximation over every triangle, at any depth, whose bisection
/// introduces `p` or one of its descendants. Omitting `p` from a mesh is thus safe as long
/// as its error does not exceed the tolerance, whatever coarser triangle ends up covering it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ErrorField {
    grid_size: u32,
    errors: Vec<Real>,
}

impl ErrorField {
    /// Computes the error field of the row-major `elevations` grid.
    ///
    /// Fails with [`RtinError::SizeMismatch`] if `elevations` does not contain exactly
    /// `grid_size * grid_size` samples.
    pub fn compute(hierarchy: &Hierarchy, elevations: &[Real]) -> Result<Self, RtinError> {
        check_num_samples(hierarchy, elevations)?;

        let mut result = Self {
            grid_size: hierarchy.grid_size(),
            errors: vec![0.0; elevations.len()],
        };
        result.accumulate(hierarchy, elevations);
        Ok(result)
    }

    /// Recomputes this error field in place for a new elevation grid of the same size.
    ///
    /// On failure, `self` is left untouched.
    pub fn recompute(
        &mut self,
        hierarchy: &Hierarchy,
        elevations: &[Real],
    ) -> Result<(), RtinError> {
        check_num_samples(hierarchy, elevations)?;

        self.grid_size = hierarchy.grid_size();
        self.errors.clear();
        self.errors.resize(elevations.len(), 0.0);
        self.accumulate(hierarchy, elevations);
        Ok(())
    }

    // Nodes are visited from the finest level up: by the time a parent is processed,
    // the midpoints of both its children already hold their final error.
    fn accumulate(&mut self, hierarchy: &Hierarchy, elevations: &[Real]) {
        let size = self.grid_size as usize;
        let errors = &mut self.errors;

        for i in (0..hierarchy.num_triangles()).rev() {
            let tri = hierarchy.triangle(i);
            let mid_id = grid_index(&tri.midpoint(), size);

            let linear_height =
                (elevations[grid_index(&tri.a, size)] + elevations[grid_index(&tri.b, size)]) / 2.0;
            let local_error = (linear_height - elevations[mid_id]).abs();
            errors[mid_id] = errors[mid_id].max(local_error);

            if hierarchy.is_parent(i) {
                let left_id = grid_index(&midpoint(&tri.c, &tri.a), size);
                let right_id = grid_index(&midpoint(&tri.b, &tri.c), size);
                errors[mid_id] = errors[mid_id].max(errors[left_id]).max(errors[right_id]);
            }
        }
    }

    /// The number of samples on each side of the grid.
    #[inline]
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// The error attached to the grid point `(x, y)`.
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> Real {
        self.errors[grid_index(&GridPoint::new(x, y), self.grid_size as usize)]
    }

    /// The error attached to the grid point `p`.
    #[inline]
    pub fn at_point(&self, p: &GridPoint) -> Real {
        self.errors[grid_index(p, self.grid_size as usize)]
    }

    /// The row-major errors of all the grid points.
    #[inline]
    pub fn as_slice(&self) -> &[Real] {
        &self.errors
    }

    /// The largest error of the field.
    ///
    /// Any tolerance greater than or equal to this value produces the coarsest
    /// two-triangle mesh.
    pub fn max_error(&self) -> Real {
        self.errors.iter().copied().fold(0.0, Real::max)
    }
}

fn check_num_samples(hierarchy: &Hierarchy, elevations: &[Real]) -> Result<(), RtinError> {
    let expected = hierarchy.num_samples();
    if elevations.len() != expected {
        return Err(RtinError::SizeMismatch {
            expected,
            found: elevations.len(),
        });
    }
    Ok(())
}
