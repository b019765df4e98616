use crate::common::{diamond_square, noise, rolling_hills, tile};
use rtin::math::Real;
use rtin::TileMesh;
use std::collections::HashSet;

fn twice_signed_area(mesh: &TileMesh, i: usize) -> i64 {
    let [a, b, c] = mesh.triangle(i).map(|v| mesh.vertex(v as usize).cast::<i64>());
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

fn check_mesh_invariants(mesh: &TileMesh, size: u32) {
    assert_eq!(mesh.vertices().len() % 2, 0);
    assert_eq!(mesh.triangles().len() % 3, 0);
    assert!(mesh.num_triangles() >= 2);
    assert!(mesh.num_triangles() <= 2 * (size as usize - 1).pow(2));

    // Every index is valid and every vertex is referenced.
    let mut referenced = vec![false; mesh.num_vertices()];
    for idx in mesh.triangles() {
        assert!((*idx as usize) < mesh.num_vertices());
        referenced[*idx as usize] = true;
    }
    assert!(referenced.iter().all(|r| *r));

    // Each grid point appears once.
    let distinct: HashSet<_> = mesh.vertex_points().collect();
    assert_eq!(distinct.len(), mesh.num_vertices());
    assert!(mesh
        .vertex_points()
        .all(|pt| (pt.x as u32) < size && (pt.y as u32) < size));

    // The triangles share the same winding and exactly tile the grid.
    let mut total_area = 0;
    for i in 0..mesh.num_triangles() {
        let area = twice_signed_area(mesh, i);
        assert!(area < 0, "triangle {i} is degenerate or flipped");
        total_area += area;
    }
    assert_eq!(total_area, -2 * (size as i64 - 1).pow(2));
}

#[test]
fn meshes_are_well_formed() {
    let inputs = [
        (17, rolling_hills(17)),
        (33, noise(33, 0)),
        (65, diamond_square(65, 42)),
        (129, diamond_square(129, 7)),
    ];

    for (size, elevations) in inputs {
        let tile = tile(size, elevations);
        for max_error in [-1.0, 0.0, 0.05, 0.5, 2.0, 10.0, 1000.0] {
            check_mesh_invariants(&tile.mesh(max_error), size);
        }
    }
}

#[test]
fn larger_tolerances_never_add_geometry() {
    let tile = tile(129, diamond_square(129, 1234));
    let mut prev = tile.mesh(-1.0);
    assert_eq!(prev.num_vertices(), 129 * 129);
    assert_eq!(prev.num_triangles(), 2 * 128 * 128);

    let max = tile.errors().max_error();
    let mut max_error: Real = 0.0;
    while max_error <= max {
        let mesh = tile.mesh(max_error);
        assert!(mesh.num_vertices() <= prev.num_vertices());
        assert!(mesh.num_triangles() <= prev.num_triangles());
        prev = mesh;
        max_error = max_error * 1.5 + 0.01;
    }

    let coarsest = tile.mesh(max_error);
    assert!(coarsest.num_triangles() <= prev.num_triangles());
    assert_eq!(coarsest.num_triangles(), 2);
    assert_eq!(coarsest.num_vertices(), 4);
}

#[test]
fn extraction_is_deterministic() {
    let tile = tile(65, noise(65, 99));
    let tile_copy = crate::common::tile(65, noise(65, 99));

    for max_error in [0.0, 1.0, 5.0] {
        let mesh = tile.mesh(max_error);
        assert_eq!(mesh, tile.mesh(max_error));
        assert_eq!(mesh, tile_copy.mesh(max_error));
    }
}

#[test]
fn max_error_threshold_is_strict() {
    let tile = tile(33, rolling_hills(33));
    let max = tile.errors().max_error();
    assert!(max > 0.0);

    assert_eq!(tile.mesh(max).num_triangles(), 2);
    assert!(tile.mesh(max * 0.999).num_triangles() > 2);
}

#[test]
fn zero_tolerance_reproduces_planar_regions() {
    // Two planes meeting along a ridge at x = 8.
    let size = 17u32;
    let elevations: Vec<Real> = (0..size * size)
        .map(|i| {
            let (x, y) = ((i % size) as Real, (i / size) as Real);
            (x - 8.0).abs() * 2.0 + y * 0.5
        })
        .collect();
    let tile = tile(size, elevations);
    let mesh = tile.mesh(0.0);

    check_mesh_invariants(&mesh, size);
    assert!(mesh.num_triangles() < 2 * 16 * 16);

    // Every grid sample lies on the plane of the triangle covering it.
    for [ia, ib, ic] in mesh.triangle_indices() {
        let [a, b, c] = [ia, ib, ic].map(|v| mesh.vertex(v as usize).cast::<Real>());
        let [ha, hb, hc] = [ia, ib, ic].map(|v| {
            let pt = mesh.vertex(v as usize);
            tile.elevation(pt.x as u32, pt.y as u32)
        });
        let det = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);

        for y in 0..size {
            for x in 0..size {
                let (px, py) = (x as Real, y as Real);
                let wb = ((px - a.x) * (c.y - a.y) - (py - a.y) * (c.x - a.x)) / det;
                let wc = ((b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)) / det;
                let wa = 1.0 - wb - wc;
                if wa < -1.0e-4 || wb < -1.0e-4 || wc < -1.0e-4 {
                    continue;
                }

                let interpolated = wa * ha + wb * hb + wc * hc;
                approx::assert_relative_eq!(
                    interpolated,
                    tile.elevation(x, y),
                    epsilon = 1.0e-3
                );
            }
        }
    }
}
