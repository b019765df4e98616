//! Top-down extraction of a mesh from an error field.
//!
//! The tree is traversed twice with the same split decisions. The first traversal assigns
//! vertex indices and counts triangles, so the second one can write into buffers allocated
//! with their exact final size.

use crate::error_field::ErrorField;
use crate::hierarchy::Hierarchy;
use crate::math::Real;
use crate::mesh::TileMesh;
use crate::triangle::{grid_index, RightTriangle};
use alloc::vec;
use alloc::vec::Vec;

/// Extracts the mesh approximating a grid within `max_error`.
///
/// A triangle is split whenever it is larger than half a grid cell and the error attached to
/// its hypotenuse midpoint is strictly greater than `max_error`. A negative `max_error` thus
/// yields the full-resolution mesh, while a tolerance greater than or equal to
/// [`ErrorField::max_error`] yields the two root triangles. A NaN tolerance never compares
/// greater and also yields the two root triangles.
///
/// Vertices are numbered in the order they are first reached, the bottom-left root being
/// visited before the top-right one and, within a triangle, the `(c, a, m)` half before the
/// `(b, c, m)` half. The result is fully determined by the arguments.
///
/// # Panics
///
/// Panics if `errors` was computed for a grid size different from the one of `hierarchy`.
pub fn extract(hierarchy: &Hierarchy, errors: &ErrorField, max_error: Real) -> TileMesh {
    assert_eq!(
        hierarchy.grid_size(),
        errors.grid_size(),
        "The error field does not match the grid size of the hierarchy."
    );

    let criterion = SplitCriterion { errors, max_error };
    let grid_size = hierarchy.grid_size() as usize;
    let roots = hierarchy.roots();

    let mut counter = VertexCounter {
        criterion,
        grid_size,
        indices: vec![0; grid_size * grid_size],
        num_vertices: 0,
        num_triangles: 0,
    };
    for root in roots {
        counter.visit(root);
    }

    let mut filler = MeshFiller {
        criterion,
        grid_size,
        indices: &counter.indices,
        vertices: vec![0; counter.num_vertices as usize * 2],
        triangles: vec![0; counter.num_triangles * 3],
        num_written: 0,
    };
    for root in roots {
        filler.visit(root);
    }
    debug_assert_eq!(filler.num_written, filler.triangles.len());

    log::trace!(
        "Extracted {} vertices and {} triangles with a tolerance of {max_error}.",
        counter.num_vertices,
        counter.num_triangles
    );

    TileMesh::from_raw_parts(filler.vertices, filler.triangles)
}

/// The split-or-emit decision shared by both traversals.
#[derive(Copy, Clone)]
struct SplitCriterion<'a> {
    errors: &'a ErrorField,
    max_error: Real,
}

impl SplitCriterion<'_> {
    #[inline]
    fn should_split(&self, tri: &RightTriangle) -> bool {
        // Unit triangles go first: their hypotenuse midpoint is not a grid point.
        !tri.is_unit() && self.errors.at_point(&tri.midpoint()) > self.max_error
    }
}

/// First traversal: assigns vertex indices in first-use order and counts triangles.
struct VertexCounter<'a> {
    criterion: SplitCriterion<'a>,
    grid_size: usize,
    /// One-based vertex index of each grid point, `0` if the point is not used.
    indices: Vec<u32>,
    num_vertices: u32,
    num_triangles: usize,
}

impl VertexCounter<'_> {
    fn visit(&mut self, tri: RightTriangle) {
        if self.criterion.should_split(&tri) {
            let [left, right] = tri.children();
            self.visit(left);
            self.visit(right);
        } else {
            for pt in tri.vertices() {
                let slot = &mut self.indices[grid_index(&pt, self.grid_size)];
                if *slot == 0 {
                    self.num_vertices += 1;
                    *slot = self.num_vertices;
                }
            }
            self.num_triangles += 1;
        }
    }
}

/// Second traversal: writes the vertex coordinates and the triangle indices.
struct MeshFiller<'a> {
    criterion: SplitCriterion<'a>,
    grid_size: usize,
    indices: &'a [u32],
    vertices: Vec<u16>,
    triangles: Vec<u32>,
    num_written: usize,
}

impl MeshFiller<'_> {
    fn visit(&mut self, tri: RightTriangle) {
        if self.criterion.should_split(&tri) {
            let [left, right] = tri.children();
            self.visit(left);
            self.visit(right);
        } else {
            for pt in tri.vertices() {
                let vid = self.indices[grid_index(&pt, self.grid_size)] - 1;
                let k = vid as usize * 2;
                // Grid sizes are capped so coordinates always fit.
                self.vertices[k] = pt.x as u16;
                self.vertices[k + 1] = pt.y as u16;
                self.triangles[self.num_written] = vid;
                self.num_written += 1;
            }
        }
    }
}
