use crate::common::tile;
use rtin::math::{Point2, Real};
use rtin::{Hierarchy, RtinError, DEFAULT_GRID_SIZE, DEFAULT_MAX_ERROR};
use std::sync::Arc;

#[test]
fn flat_grid_of_any_size() {
    for size in [3u32, 5, 9, 17, 65, DEFAULT_GRID_SIZE] {
        let tile = tile(size, vec![12.5; (size * size) as usize]);
        let mesh = tile.mesh(DEFAULT_MAX_ERROR);
        let max = (size - 1) as u16;

        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(
            mesh.vertex_points().collect::<Vec<_>>(),
            vec![
                Point2::new(0, 0),
                Point2::new(max, max),
                Point2::new(max, 0),
                Point2::new(0, max),
            ]
        );
        assert_eq!(mesh.triangles(), &[0, 1, 2, 1, 0, 3]);
    }
}

#[test]
fn five_by_five_full_resolution() {
    let hierarchy = Arc::new(Hierarchy::new(5).unwrap());
    assert_eq!(hierarchy.num_triangles(), 30);
    assert_eq!(hierarchy.num_parent_triangles(), 14);

    // Curved along both axes: no two neighboring cells are coplanar.
    let elevations: Vec<Real> = (0..25)
        .map(|i| {
            let (x, y) = ((i % 5) as Real, (i / 5) as Real);
            3.0 * x * x + 5.0 * y * y + x * y
        })
        .collect();
    let tile = hierarchy.create_tile(elevations).unwrap();
    let mesh = tile.mesh(0.0);

    assert_eq!(mesh.num_triangles(), 32);
    assert_eq!(mesh.num_vertices(), 25);
}

#[test]
fn five_by_five_with_a_flat_region() {
    // The left half of the grid is flat, the right half is curved.
    let elevations: Vec<Real> = (0..25)
        .map(|i| {
            let (x, y) = ((i % 5) as Real, (i / 5) as Real);
            if x <= 2.0 {
                0.0
            } else {
                (x - 2.0) * (x - 2.0) * (1.0 + y)
            }
        })
        .collect();
    let tile = tile(5, elevations);
    let mesh = tile.mesh(0.0);

    assert!(mesh.num_triangles() < 32);
    assert!(mesh.num_triangles() > 2);
    // The flat half keeps none of its interior points.
    assert!(mesh.vertex_points().all(|pt| pt.x >= 2 || pt.x == 0));
    assert!(!mesh.vertex_points().any(|pt| pt == Point2::new(1, 1)));
}

#[test]
fn small_grid_tolerances() {
    // A single bump in the middle of a 3x3 grid.
    let mut elevations = vec![0.0; 9];
    elevations[4] = 1.0;
    let tile = tile(3, elevations);

    assert_eq!(tile.errors().at(1, 1), 1.0);
    assert_eq!(tile.mesh(1.0).num_triangles(), 2);

    // Only the bump is needed to represent the grid exactly.
    let mesh = tile.mesh(0.5);
    assert_eq!(mesh.num_vertices(), 5);
    assert_eq!(mesh.num_triangles(), 4);
    assert_eq!(mesh.vertex(2), Point2::new(1, 1));

    let full = tile.mesh(-1.0);
    assert_eq!(full.num_vertices(), 9);
    assert_eq!(full.num_triangles(), 8);
}

#[test]
fn invalid_inputs() {
    assert_eq!(Hierarchy::new(100).unwrap_err(), RtinError::InvalidSize(100));
    assert_eq!(
        Hierarchy::new(2).unwrap_err().to_string(),
        "expected a grid size of the form 2^k + 1 between 3 and 32769, got 2"
    );

    let hierarchy = Arc::new(Hierarchy::new(DEFAULT_GRID_SIZE).unwrap());
    let err = hierarchy.create_tile(vec![0.0; 256 * 256]).unwrap_err();
    assert_eq!(
        err,
        RtinError::SizeMismatch {
            expected: 257 * 257,
            found: 256 * 256
        }
    );
    assert_eq!(
        err.to_string(),
        "expected 66049 elevation samples, found 65536"
    );
}
