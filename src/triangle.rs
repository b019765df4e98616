use crate::math::GridPoint;

/// A right isosceles triangle with corners on the elevation grid.
///
/// `a` and `b` are the endpoints of the hypotenuse and `c` is the right-angle apex.
/// Bisecting the hypotenuse at its midpoint `m` gives the two children
/// `(c, a, m)` and `(b, c, m)`.
///
/// ```text
///   b
///   |\
///   | \   right: (b, c, m)
///   |  m
///   | / \  left: (c, a, m)
///   |/   \
///   c-----a
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RightTriangle {
    /// First endpoint of the hypotenuse.
    pub a: GridPoint,
    /// Second endpoint of the hypotenuse.
    pub b: GridPoint,
    /// The right-angle apex.
    pub c: GridPoint,
}

impl RightTriangle {
    /// Creates a triangle from its three corners.
    #[inline]
    pub fn new(a: GridPoint, b: GridPoint, c: GridPoint) -> Self {
        Self { a, b, c }
    }

    /// Rebuilds a triangle from the endpoints of its hypotenuse.
    ///
    /// The apex is `a` rotated by a quarter turn around the hypotenuse midpoint `m`:
    /// `c = (m.x + m.y - a.y, m.y + a.x - m.x)`.
    #[inline]
    pub fn from_hypotenuse(a: GridPoint, b: GridPoint) -> Self {
        let m = midpoint(&a, &b);
        // Both sums are computed before the subtraction: the apex lies on the grid
        // so neither expression can go below zero.
        let c = GridPoint::new(m.x + m.y - a.y, m.y + a.x - m.x);
        Self { a, b, c }
    }

    /// The midpoint of the hypotenuse, i.e., the grid point introduced when this
    /// triangle is split.
    #[inline]
    pub fn midpoint(&self) -> GridPoint {
        midpoint(&self.a, &self.b)
    }

    /// The two halves of this triangle, left `(c, a, m)` first.
    #[inline]
    pub fn children(&self) -> [RightTriangle; 2] {
        let m = self.midpoint();
        [
            RightTriangle::new(self.c, self.a, m),
            RightTriangle::new(self.b, self.c, m),
        ]
    }

    /// Is this one of the smallest triangles of the grid, covering half a unit cell?
    ///
    /// Such triangles have legs of length one and cannot be split further.
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.a.x.abs_diff(self.c.x) + self.a.y.abs_diff(self.c.y) <= 1
    }

    /// The corners of this triangle, in `[a, b, c]` order.
    #[inline]
    pub fn vertices(&self) -> [GridPoint; 3] {
        [self.a, self.b, self.c]
    }
}

/// The midpoint of two grid points.
///
/// Exact whenever `a` and `b` are the endpoints of a hypotenuse of the
/// hierarchy, whose coordinates always differ by an even amount.
#[inline]
pub(crate) fn midpoint(a: &GridPoint, b: &GridPoint) -> GridPoint {
    GridPoint::new((a.x + b.x) >> 1, (a.y + b.y) >> 1)
}

/// The row-major index of `p` in a grid with side `grid_size`.
#[inline]
pub(crate) fn grid_index(p: &GridPoint, grid_size: usize) -> usize {
    p.y as usize * grid_size + p.x as usize
}
