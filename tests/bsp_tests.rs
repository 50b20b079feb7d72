use chopper::{
    PartitionError, WorkingVolume,
    mesh::{
        Mesh,
        bsp::{BspTree, Side},
    },
};
use nalgebra::{Point3, Vector3};

mod support;
use support::{approx_eq, cube_mesh};

/// A 20 x 2 x 2 bar along x.
fn bar() -> BspTree {
    BspTree::new(Mesh::cuboid(Point3::origin(), Point3::new(20.0, 2.0, 2.0)))
}

fn five() -> WorkingVolume {
    WorkingVolume::new(5.0, 5.0, 5.0)
}

#[test]
fn new_tree_is_a_leaf() {
    let tree = bar();
    assert!(tree.is_leaf());
    assert!(tree.plane().is_none());
    assert_eq!(tree.num_leaves(), 1);
    assert_eq!(tree.depth(), 0);
    assert!(tree.grade().is_none());
}

#[test]
fn chop_creates_two_children() {
    let mut tree = bar();
    tree.chop(Vector3::x(), 5.0).unwrap();

    assert!(!tree.is_leaf());
    let plane = tree.plane().unwrap();
    assert_eq!(plane.normal, Vector3::x());
    assert_eq!(plane.w, 5.0);

    let left = tree.left().unwrap();
    let right = tree.right().unwrap();
    assert!(left.is_leaf() && right.is_leaf());
    assert!(approx_eq(left.mesh().dimensions().x, 5.0, 1e-9));
    assert!(approx_eq(right.mesh().dimensions().x, 15.0, 1e-9));
    assert!(approx_eq(right.bounding_box().mins.x, 5.0, 1e-9));
}

#[test]
fn chop_rejects_interior_nodes() {
    let mut tree = bar();
    tree.chop(Vector3::x(), 5.0).unwrap();
    assert_eq!(tree.chop(Vector3::x(), 10.0), Err(PartitionError::NotALeaf));
}

#[test]
fn chop_rejects_empty_parts() {
    let mut tree = BspTree::new(Mesh::new());
    assert_eq!(tree.chop(Vector3::z(), 0.0), Err(PartitionError::EmptyMesh));
}

#[test]
fn unchop_restores_the_leaf() {
    let mut tree = bar();
    tree.chop(Vector3::x(), 5.0).unwrap();
    tree.unchop();
    assert!(tree.is_leaf());
    assert!(tree.plane().is_none());
    assert_eq!(tree.mesh().num_triangles(), 12);
    tree.chop(Vector3::x(), 10.0).unwrap();
    assert_eq!(tree.num_leaves(), 2);
}

#[test]
fn largest_part_is_found_in_either_subtree() {
    let volume = five();
    let mut tree = bar();
    assert_eq!(tree.largest_part(&volume).1, 4);

    tree.chop(Vector3::x(), 5.0).unwrap();
    let (path, count) = tree.largest_part_path(&volume);
    assert_eq!(path, vec![Side::Right]);
    assert_eq!(count, 3);
    let (part, _) = tree.largest_part(&volume);
    assert!(approx_eq(part.mesh().dimensions().x, 15.0, 1e-9));
}

#[test]
fn largest_part_ties_prefer_left() {
    let volume = five();
    let mut tree = bar();
    tree.chop(Vector3::x(), 10.0).unwrap();
    let (path, count) = tree.largest_part_path(&volume);
    assert_eq!(count, 2);
    assert_eq!(path, vec![Side::Left]);
}

#[test]
fn leaves_are_ordered_left_to_right() {
    let mut tree = bar();
    tree.chop(Vector3::x(), 10.0).unwrap();
    for side in [Side::Left, Side::Right] {
        let start = if side == Side::Left { 5.0 } else { 15.0 };
        tree.node_at_mut(&[side])
            .unwrap()
            .chop(Vector3::x(), start)
            .unwrap();
    }
    let starts: Vec<f64> = tree
        .leaves()
        .iter()
        .map(|leaf| leaf.bounding_box().mins.x.round() as f64)
        .collect();
    assert_eq!(starts, vec![0.0, 5.0, 10.0, 15.0]);
    assert_eq!(tree.depth(), 2);
    assert!(tree.fits_in_volume(&five()));
}

#[test]
fn f_part_counts_leaf_volumes() {
    let volume = five();
    let mut tree = bar();
    assert_eq!(tree.f_part(&volume), 1.0);

    // 5 + 15 -> 1 + 3 = 4 = root estimate
    tree.chop(Vector3::x(), 5.0).unwrap();
    assert!(approx_eq(tree.f_part(&volume), 1.0, 1e-12));

    // 6 + 14 -> 2 + 3 = 5
    tree.unchop();
    tree.chop(Vector3::x(), 6.0).unwrap();
    assert!(approx_eq(tree.f_part(&volume), 1.25, 1e-12));
}

#[test]
fn f_util_reports_the_worst_leaf() {
    let volume = WorkingVolume::new(10.0, 10.0, 10.0);
    let mut tree = BspTree::new(cube_mesh(10.0));
    assert!(approx_eq(tree.f_util(&volume), 0.0, 1e-9));

    tree.chop(Vector3::x(), 2.0).unwrap();
    // left: 2 x 10 x 10 in one chamber wastes 80%
    assert!(approx_eq(tree.f_util(&volume), 0.8, 1e-9));
    assert_eq!(tree.f_connector(), 0.0);
}

#[test]
fn f_util_stays_in_unit_range() {
    let volume = WorkingVolume::new(3.0, 3.0, 3.0);
    let mut tree = BspTree::new(cube_mesh(10.0));
    let normal = Vector3::new(1.0, 1.0, 0.0).normalize();
    tree.chop(normal, 4.0).unwrap();
    let u = tree.f_util(&volume);
    assert!((0.0..=1.0).contains(&u));
    assert!(tree.f_part(&volume) >= 1.0);
}

#[test]
fn clones_share_meshes() {
    let mut tree = bar();
    tree.chop(Vector3::x(), 5.0).unwrap();
    let mut copy = tree.clone();
    copy.node_at_mut(&[Side::Right])
        .unwrap()
        .chop(Vector3::x(), 12.0)
        .unwrap();
    assert_eq!(tree.num_leaves(), 2);
    assert_eq!(copy.num_leaves(), 3);
    assert!(std::sync::Arc::ptr_eq(
        &tree.left().unwrap().shared_mesh(),
        &copy.left().unwrap().shared_mesh()
    ));
}

#[test]
fn grade_cache_is_reset_by_chop() {
    let mut tree = bar();
    tree.set_grade(1.5);
    assert_eq!(tree.grade(), Some(1.5));
    tree.chop(Vector3::x(), 5.0).unwrap();
    assert_eq!(tree.grade(), None);
}
