use crate::math::{Point2, Point3, Real, Vector3};
use crate::tile::Tile;
use alloc::vec::Vec;

/// A triangle mesh extracted from a [`Tile`].
///
/// Vertices are grid coordinates stored as a flat `[x0, y0, x1, y1, ...]` buffer and
/// triangles are flat `[a0, b0, c0, a1, b1, c1, ...]` vertex indices, which is the layout
/// expected by most GPU vertex and index buffers. Each grid point appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TileMesh {
    vertices: Vec<u16>,
    triangles: Vec<u32>,
}

impl TileMesh {
    pub(crate) fn from_raw_parts(vertices: Vec<u16>, triangles: Vec<u32>) -> Self {
        debug_assert!(vertices.len() % 2 == 0);
        debug_assert!(triangles.len() % 3 == 0);
        Self {
            vertices,
            triangles,
        }
    }

    /// The flat vertex coordinates buffer, two `u16` per vertex.
    #[inline]
    pub fn vertices(&self) -> &[u16] {
        &self.vertices
    }

    /// The flat triangle index buffer, three `u32` per triangle.
    #[inline]
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    /// The number of vertices of this mesh.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 2
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len() / 3
    }

    /// The grid coordinates of the `i`-th vertex.
    #[inline]
    pub fn vertex(&self, i: usize) -> Point2<u16> {
        Point2::new(self.vertices[i * 2], self.vertices[i * 2 + 1])
    }

    /// The vertex indices of the `i`-th triangle.
    #[inline]
    pub fn triangle(&self, i: usize) -> [u32; 3] {
        let k = i * 3;
        [self.triangles[k], self.triangles[k + 1], self.triangles[k + 2]]
    }

    /// An iterator through the grid coordinates of all the vertices.
    pub fn vertex_points(&self) -> impl ExactSizeIterator<Item = Point2<u16>> + '_ {
        self.vertices
            .chunks_exact(2)
            .map(|xy| Point2::new(xy[0], xy[1]))
    }

    /// An iterator through the vertex indices of all the triangles.
    pub fn triangle_indices(&self) -> impl ExactSizeIterator<Item = [u32; 3]> + '_ {
        self.triangles
            .chunks_exact(3)
            .map(|idx| [idx[0], idx[1], idx[2]])
    }

    /// Consumes this mesh and returns its `(vertices, triangles)` flat buffers.
    pub fn into_parts(self) -> (Vec<u16>, Vec<u32>) {
        (self.vertices, self.triangles)
    }

    /// Lifts this mesh into a 3D triangle mesh using the elevations of `tile`.
    ///
    /// The grid point `(x, y)` with elevation `h` is mapped to
    /// `(x * scale.x, h * scale.y, y * scale.z)`, i.e., the grid lies on the `xz` plane and
    /// elevations grow along `+y`.
    ///
    /// # Panics
    ///
    /// Panics if this mesh was not extracted from a grid of the same size as `tile`.
    pub fn to_trimesh(
        &self,
        tile: &Tile,
        scale: &Vector3<Real>,
    ) -> (Vec<Point3<Real>>, Vec<[u32; 3]>) {
        let vertices = self
            .vertex_points()
            .map(|pt| {
                let height = tile.elevation(pt.x as u32, pt.y as u32);
                Point3::new(
                    pt.x as Real * scale.x,
                    height * scale.y,
                    pt.y as Real * scale.z,
                )
            })
            .collect();

        (vertices, self.triangle_indices().collect())
    }
}
