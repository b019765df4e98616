use rtin::math::Real;
use rtin::{Hierarchy, DEFAULT_GRID_SIZE};
use std::sync::Arc;

fn main() {
    let size = DEFAULT_GRID_SIZE;
    let hierarchy = Arc::new(Hierarchy::new(size).unwrap());

    let elevations = (0..size * size)
        .map(|i| {
            let x = (i % size) as Real / size as Real;
            let y = (i / size) as Real / size as Real;
            (x * 9.0).sin() * 120.0 + (y * 5.0 + x * 2.0).cos() * 80.0 + (x * y * 40.0).sin() * 10.0
        })
        .collect();
    let tile = hierarchy.create_tile(elevations).unwrap();

    println!(
        "{size}x{size} grid, worst error: {:.3}",
        tile.errors().max_error()
    );

    let tolerances = [0.0, 0.5, 1.0, 5.0, 20.0, 100.0];
    for (max_error, mesh) in tolerances.iter().zip(tile.meshes(&tolerances)) {
        println!(
            "max error {max_error:>6.1}: {:>6} vertices, {:>6} triangles",
            mesh.num_vertices(),
            mesh.num_triangles()
        );
    }
}
