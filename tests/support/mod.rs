//! Test support library
//! Provides fixtures and checks shared by the integration tests.
#![allow(dead_code)]

use chopper::{
    float_types::Real,
    mesh::{Mesh, bsp::BspTree},
};
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Axis-aligned cube `[0, side]^3`.
pub fn cube_mesh(side: Real) -> Mesh {
    Mesh::cuboid(Point3::origin(), Point3::new(side, side, side))
}

/// Closed regular tetrahedron-ish solid with outward winding.
pub fn tetrahedron_mesh() -> Mesh {
    let positions = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(4.0, 0.0, 0.0),
        Point3::new(0.0, 4.0, 0.0),
        Point3::new(0.0, 0.0, 4.0),
    ];
    Mesh::from_indexed(&positions, &[[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]])
}

/// Sum of `a × b` over all triangles; zero for a closed, consistently wound
/// surface.
pub fn area_vector(mesh: &Mesh) -> Vector3<Real> {
    mesh.triangles()
        .filter_map(|t| mesh.triangle_positions(t.id))
        .map(|[a, b, c]| (b - a).cross(&(c - a)))
        .sum()
}

/// Every half-edge lives in the edge table under its own endpoints and, if
/// it has an opposite, that opposite runs the other way and points back.
pub fn assert_topology(mesh: &Mesh) {
    for t in mesh.triangles() {
        let corners = mesh.triangle_vertices(t.id).expect("live triangle");
        for k in 0..3 {
            let (a, b) = (corners[k], corners[(k + 1) % 3]);
            assert!(a != b, "degenerate triangle {corners:?}");
            let e = mesh.get_edge(a, b).expect("edge registered");
            let edge = mesh.edge(e).expect("edge alive");
            assert_eq!((edge.start, edge.end), (a, b));
            assert_eq!(edge.triangle, t.id);
            if let Some(o) = edge.opposite {
                let twin = mesh.edge(o).expect("opposite alive");
                assert_eq!((twin.start, twin.end), (b, a));
                assert_eq!(twin.opposite, Some(e));
            }
        }
    }
}

/// Positions of all vertices across the leaves, left to right.
pub fn leaf_vertices(tree: &BspTree) -> Vec<Point3<Real>> {
    tree.leaves()
        .iter()
        .flat_map(|leaf| leaf.mesh().vertices().iter().map(|v| v.pos))
        .collect()
}
