/// Errors raised while building a [`Hierarchy`](crate::Hierarchy) or a [`Tile`](crate::Tile).
///
/// Both variants describe inputs violating the construction contract. They are reported
/// before anything is allocated, so no partially-initialized value is ever returned.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum RtinError {
    /// The grid size is not of the form `2^k + 1` with `k >= 1`, or exceeds
    /// [`MAX_GRID_SIZE`](crate::MAX_GRID_SIZE).
    #[error("expected a grid size of the form 2^k + 1 between 3 and {max}, got {0}", max = crate::MAX_GRID_SIZE)]
    InvalidSize(u32),
    /// The number of elevation samples does not match the grid size.
    #[error("expected {expected} elevation samples, found {found}")]
    SizeMismatch {
        /// The number of samples required by the grid (`size * size`).
        expected: usize,
        /// The number of samples actually provided.
        found: usize,
    },
}
