use chopper::{WorkingVolume, float_types::Real, mesh::Mesh};
use nalgebra::{Point3, Vector3};

mod support;
use support::{approx_eq, area_vector, assert_topology, cube_mesh, tetrahedron_mesh};

fn quad() -> (Mesh, [usize; 4]) {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
    let c = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
    let d = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
    (mesh, [a, b, c, d])
}

#[test]
fn adding_triangles_links_opposites() {
    let (mut mesh, [a, b, c, d]) = quad();
    let t0 = mesh.add_triangle(a, b, c);
    let t1 = mesh.add_triangle(a, c, d);
    assert_eq!((t0, t1), (0, 1));
    assert_eq!(mesh.num_triangles(), 2);
    assert_eq!(mesh.num_edges(), 6);

    let ac = mesh.get_edge(a, c).unwrap();
    let ca = mesh.get_edge(c, a).unwrap();
    assert_eq!(mesh.edge(ac).unwrap().opposite, Some(ca));
    assert_eq!(mesh.edge(ca).unwrap().opposite, Some(ac));
    assert!(mesh.edge(mesh.get_edge(a, b).unwrap()).unwrap().opposite.is_none());
    assert!(!mesh.is_closed());
    assert_topology(&mesh);
}

#[test]
fn triangle_edges_follow_winding() {
    let (mut mesh, [a, b, c, _]) = quad();
    let t = mesh.add_triangle(a, b, c);
    assert_eq!(mesh.triangle_vertices(t), Some([a, b, c]));
    let edges = mesh.triangle(t).unwrap().edges();
    assert_eq!(edges, [0, 1, 2]);
    let first = mesh.edge(edges[0]).unwrap();
    assert_eq!(first.next, edges[1]);
    assert_eq!(mesh.next(edges[2]), Some(edges[0]));
    assert_eq!(mesh.opposite(edges[0]), None);
}

#[test]
fn removing_a_triangle_unlinks_its_neighbour() {
    let (mut mesh, [a, b, c, d]) = quad();
    let t0 = mesh.add_triangle(a, b, c);
    mesh.add_triangle(a, c, d);
    mesh.remove_triangle(t0);

    assert_eq!(mesh.num_triangles(), 1);
    assert!(mesh.triangle(t0).is_none());
    assert!(mesh.get_edge(a, c).is_none());
    let ca = mesh.get_edge(c, a).unwrap();
    assert!(mesh.edge(ca).unwrap().opposite.is_none());

    // The freed edges can be created again.
    let t2 = mesh.add_triangle(a, b, c);
    assert_eq!(t2, 2);
    assert_eq!(mesh.edge(ca).unwrap().opposite, mesh.get_edge(a, c));
    assert_topology(&mesh);
}

#[test]
#[should_panic(expected = "already exists")]
fn duplicate_half_edge_panics() {
    let (mut mesh, [a, b, c, d]) = quad();
    mesh.add_triangle(a, b, c);
    mesh.add_triangle(a, b, d);
}

#[test]
#[should_panic(expected = "not part of this mesh")]
fn removing_twice_panics() {
    let (mut mesh, [a, b, c, _]) = quad();
    let t = mesh.add_triangle(a, b, c);
    mesh.remove_triangle(t);
    mesh.remove_triangle(t);
}

#[test]
#[should_panic(expected = "already has a child vertex")]
fn parent_pair_is_registered_once() {
    let (mut mesh, [a, b, c, d]) = quad();
    mesh.set_parents_child(a, b, c);
    mesh.set_parents_child(a, b, d);
}

#[test]
fn vertex_parents_can_be_cleared() {
    let (mut mesh, [a, b, c, d]) = quad();
    mesh.set_parents_child(a, b, c);
    assert_eq!(mesh.get_child_vertex(a, b), Some(c));
    assert_eq!(mesh.get_child_vertex(b, a), None);
    mesh.clear_vertex_parents();
    assert_eq!(mesh.get_child_vertex(a, b), None);
    mesh.set_parents_child(a, b, d);
    assert_eq!(mesh.get_child_vertex(a, b), Some(d));
}

#[test]
fn unbounded_vertices_do_not_grow_the_box() {
    let mut mesh = Mesh::new();
    mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
    mesh.add_vertex(Point3::new(1.0, 2.0, 3.0));
    let far = mesh.add_unbounded_vertex(Point3::new(100.0, 0.0, 0.0));
    assert_eq!(mesh.dimensions(), Vector3::new(1.0, 2.0, 3.0));

    mesh.include_in_bounds(far);
    assert_eq!(mesh.dimensions(), Vector3::new(100.0, 2.0, 3.0));
    assert_eq!(mesh.bounding_box().mins, Point3::origin());
}

#[test]
fn empty_mesh_has_degenerate_box() {
    let mesh = Mesh::new();
    assert!(mesh.is_empty());
    assert_eq!(mesh.dimensions(), Vector3::zeros());
    assert!(mesh.fits_in_volume(&WorkingVolume::default()));
    assert_eq!(mesh.num_print_volumes(&WorkingVolume::default()), 1);
    assert!(mesh.min_max_offsets_along(&Vector3::x()).is_none());
}

#[test]
fn fit_ignores_orientation() {
    let volume = WorkingVolume::new(10.0, 15.0, 10.0);
    let tall = Mesh::cuboid(Point3::origin(), Point3::new(14.0, 9.0, 9.0));
    assert!(tall.fits_in_volume(&volume));
    assert_eq!(tall.num_print_volumes(&volume), 1);

    let wide = Mesh::cuboid(Point3::origin(), Point3::new(11.0, 11.0, 1.0));
    assert!(!wide.fits_in_volume(&volume));
    assert_eq!(wide.num_print_volumes(&volume), 2);
}

#[test]
fn print_volumes_scale_with_the_worst_axis() {
    let volume = WorkingVolume::new(10.0, 10.0, 10.0);
    let slab = Mesh::cuboid(Point3::origin(), Point3::new(35.0, 12.0, 5.0));
    // sorted [5, 12, 35] against [10, 10, 10]: max(1, 2, 4)
    assert_eq!(slab.num_print_volumes(&volume), 4);
}

#[test]
fn offsets_along_a_direction() {
    let cube = cube_mesh(2.0);
    let (lo, hi) = cube.min_max_offsets_along(&Vector3::x()).unwrap();
    assert_eq!((lo, hi), (0.0, 2.0));

    let diagonal = Vector3::new(1.0, 1.0, 1.0).normalize();
    let (lo, hi) = cube.min_max_offsets_along(&diagonal).unwrap();
    assert!(approx_eq(lo, 0.0, 1e-12));
    assert!(approx_eq(hi, 6.0 / (3.0 as Real).sqrt(), 1e-9));
}

#[test]
fn closed_solids_have_zero_area_vector() {
    for mesh in [cube_mesh(3.0), tetrahedron_mesh()] {
        assert!(mesh.is_closed());
        assert!(area_vector(&mesh).norm() < 1e-9);
        assert_topology(&mesh);
    }
}

#[test]
fn gouraud_normals_average_incident_faces() {
    let mut cube = cube_mesh(1.0);
    cube.compute_gouraud_normals();
    let n = cube.vertex(0).gouraud_normal();
    let expected = -Vector3::new(1.0, 1.0, 1.0).normalize();
    assert!((n - expected).norm() < 1e-9);
}

#[test]
fn compacted_preserves_topology() {
    let cube = cube_mesh(1.0);
    let compact = cube.compacted();
    assert_eq!(compact.num_vertices(), 8);
    assert_eq!(compact.num_triangles(), 12);
    assert!(compact.is_closed());
    assert_eq!(compact.dimensions(), cube.dimensions());
}

#[test]
fn fit_boundary_is_inclusive() {
    let volume = WorkingVolume::new(10.0, 15.0, 10.0);
    let exact = Mesh::cuboid(Point3::origin(), Point3::new(15.0, 10.0, 10.0));
    assert!(exact.fits_in_volume(&volume));

    let eps: Real = 1e-4;
    let over = Mesh::cuboid(Point3::origin(), Point3::new(15.0 * (1.0 + eps), 10.0, 10.0));
    assert!(!over.fits_in_volume(&volume));
    let over = Mesh::cuboid(Point3::origin(), Point3::new(15.0, 10.0 * (1.0 + eps), 10.0));
    assert!(!over.fits_in_volume(&volume));
}
