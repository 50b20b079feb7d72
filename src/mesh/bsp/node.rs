//! Partition tree node

use crate::errors::PartitionError;
use crate::float_types::{Real, parry3d::bounding_volume::Aabb};
use crate::mesh::Mesh;
use crate::mesh::bsp::cutter;
use crate::mesh::plane::Plane;
use crate::volume::WorkingVolume;
use log::trace;
use nalgebra::Vector3;
use std::sync::Arc;

/// Which child of an interior node to descend into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// A binary partition of a mesh by successive planar cuts.
///
/// Every node owns the mesh of the region it covers. A node is either a leaf
/// (no plane, no children) or interior (a plane and exactly two children:
/// `left` behind the plane, `right` in front of it).
///
/// Meshes are shared behind an [`Arc`], so cloning a tree to try out a cut
/// only copies the node skeleton.
#[derive(Debug, Clone)]
pub struct BspTree {
    mesh: Arc<Mesh>,
    plane: Option<Plane>,
    left: Option<Box<BspTree>>,
    right: Option<Box<BspTree>>,
    grade: Option<Real>,
}

impl BspTree {
    /// A single-leaf tree over `mesh`.
    pub fn new(mesh: Mesh) -> Self {
        Self::from_shared(Arc::new(mesh))
    }

    pub fn from_shared(mesh: Arc<Mesh>) -> Self {
        Self {
            mesh,
            plane: None,
            left: None,
            right: None,
            grade: None,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn shared_mesh(&self) -> Arc<Mesh> {
        Arc::clone(&self.mesh)
    }

    /// Cutting plane of an interior node.
    pub const fn plane(&self) -> Option<&Plane> {
        self.plane.as_ref()
    }

    pub fn left(&self) -> Option<&BspTree> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&BspTree> {
        self.right.as_deref()
    }

    pub fn child(&self, side: Side) -> Option<&BspTree> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    fn child_mut(&mut self, side: Side) -> Option<&mut BspTree> {
        match side {
            Side::Left => self.left.as_deref_mut(),
            Side::Right => self.right.as_deref_mut(),
        }
    }

    /// True iff the node has no children.
    ///
    /// # Panics
    /// If exactly one child is present.
    pub fn is_leaf(&self) -> bool {
        assert_eq!(
            self.left.is_none(),
            self.right.is_none(),
            "partition node has exactly one child"
        );
        self.left.is_none()
    }

    pub fn bounding_box(&self) -> Aabb {
        self.mesh.bounding_box()
    }

    pub fn num_vertices(&self) -> usize {
        self.mesh.num_vertices()
    }

    /// Extreme offsets `normal · v` over this node's vertices.
    pub fn min_max_offsets_along(&self, normal: &Vector3<Real>) -> Option<(Real, Real)> {
        self.mesh.min_max_offsets_along(normal)
    }

    // =======
    // QUERIES

    /// Leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&BspTree> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match (node.left(), node.right()) {
                (Some(left), Some(right)) => {
                    stack.push(right);
                    stack.push(left);
                },
                _ => out.push(node),
            }
        }
        out
    }

    pub fn num_leaves(&self) -> usize {
        self.leaves().len()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match (self.left(), self.right()) {
            (Some(left), Some(right)) => 1 + left.depth().max(right.depth()),
            _ => 0,
        }
    }

    /// True iff every leaf fits in `volume`.
    pub fn fits_in_volume(&self, volume: &WorkingVolume) -> bool {
        self.leaves()
            .iter()
            .all(|leaf| leaf.mesh.fits_in_volume(volume))
    }

    /// The leaf needing the most working volumes, with that count.
    ///
    /// Ties keep the first leaf found, searching left before right.
    pub fn largest_part(&self, volume: &WorkingVolume) -> (&BspTree, usize) {
        let (path, count) = self.largest_part_path(volume);
        // The path was just computed from this tree.
        let leaf = self.node_at(&path).unwrap_or(self);
        (leaf, count)
    }

    /// Path from the root to [`BspTree::largest_part`].
    pub fn largest_part_path(&self, volume: &WorkingVolume) -> (Vec<Side>, usize) {
        match (self.left(), self.right()) {
            (Some(left), Some(right)) => {
                let (mut lpath, lcount) = left.largest_part_path(volume);
                let (mut rpath, rcount) = right.largest_part_path(volume);
                if rcount > lcount {
                    rpath.insert(0, Side::Right);
                    (rpath, rcount)
                } else {
                    lpath.insert(0, Side::Left);
                    (lpath, lcount)
                }
            },
            _ => (Vec::new(), self.mesh.num_print_volumes(volume)),
        }
    }

    /// The node reached by following `path` from this one.
    pub fn node_at(&self, path: &[Side]) -> Option<&BspTree> {
        path.iter()
            .try_fold(self, |node, &side| node.child(side))
    }

    pub fn node_at_mut(&mut self, path: &[Side]) -> Option<&mut BspTree> {
        let mut node = self;
        for &side in path {
            node = node.child_mut(side)?;
        }
        Some(node)
    }

    // ========
    // CUTTING

    /// Cut this leaf by the plane `{ p : normal · p = offset }`.
    ///
    /// The left child receives the part behind the plane, the right child the
    /// part in front. The normal is expected to be unit length.
    pub fn chop(&mut self, normal: Vector3<Real>, offset: Real) -> Result<(), PartitionError> {
        if !self.is_leaf() {
            return Err(PartitionError::NotALeaf);
        }
        if self.mesh.is_empty() {
            return Err(PartitionError::EmptyMesh);
        }
        let plane = Plane {
            normal,
            w: offset,
        };
        let (left, right) = cutter::cut(&self.mesh, &plane);
        trace!(
            "chop {} vertices -> left {}, right {}",
            self.mesh.num_vertices(),
            left.num_vertices(),
            right.num_vertices()
        );
        self.plane = Some(plane);
        self.left = Some(Box::new(BspTree::new(left)));
        self.right = Some(Box::new(BspTree::new(right)));
        self.grade = None;
        Ok(())
    }

    /// Undo a [`BspTree::chop`]: drop both children and the plane.
    ///
    /// A node emptied by [`BspTree::clear_non_leaves`] stays empty.
    pub fn unchop(&mut self) {
        self.plane = None;
        self.left = None;
        self.right = None;
        self.grade = None;
    }

    /// Replace every interior node's mesh by its bounding box alone.
    ///
    /// Interior geometry is never cut again; only its extents still matter.
    pub fn clear_non_leaves(&mut self) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let (Some(left), Some(right)) = (node.left.as_deref_mut(), node.right.as_deref_mut()) {
                if !node.mesh.is_empty() {
                    node.mesh = Arc::new(node.mesh.bounds_only());
                }
                stack.push(left);
                stack.push(right);
            }
        }
    }

    // =========
    // OBJECTIVE

    /// Number-of-parts term: total print volumes of the leaves relative to
    /// this node's own estimate. Always at least 1.
    pub fn f_part(&self, volume: &WorkingVolume) -> Real {
        let own = self.mesh.num_print_volumes(volume) as Real;
        let total: usize = self
            .leaves()
            .iter()
            .map(|leaf| leaf.mesh.num_print_volumes(volume))
            .sum();
        (total as Real / own).max(1.0)
    }

    /// Utilization term: the worst leaf's wasted share of the volumes it
    /// occupies. In `[0, 1]`; lower is better.
    pub fn f_util(&self, volume: &WorkingVolume) -> Real {
        match (self.left(), self.right()) {
            (Some(left), Some(right)) => left.f_util(volume).max(right.f_util(volume)),
            _ => {
                let dims = self.mesh.dimensions();
                let n = self.mesh.num_print_volumes(volume) as Real;
                (1.0 - dims.x * dims.y * dims.z / (n * volume.volume())).clamp(0.0, 1.0)
            },
        }
    }

    /// Connector feasibility term. Connectors are not modeled, so every
    /// partition is equally feasible.
    pub const fn f_connector(&self) -> Real {
        0.0
    }

    /// Cached objective value, if one was recorded since the last change.
    pub const fn grade(&self) -> Option<Real> {
        self.grade
    }

    pub fn set_grade(&mut self, grade: Real) {
        self.grade = Some(grade);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn bar() -> BspTree {
        BspTree::new(Mesh::cuboid(Point3::origin(), Point3::new(8.0, 1.0, 1.0)))
    }

    #[test]
    fn paths_follow_children() {
        let mut tree = bar();
        tree.chop(Vector3::x(), 4.0).unwrap();
        tree.node_at_mut(&[Side::Right])
            .unwrap()
            .chop(Vector3::x(), 6.0)
            .unwrap();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.num_leaves(), 3);
        let leaf = tree.node_at(&[Side::Right, Side::Left]).unwrap();
        assert!((leaf.mesh().dimensions().x - 2.0).abs() < 1e-9);
        assert!(tree.node_at(&[Side::Left, Side::Left]).is_none());
    }

    #[test]
    fn clear_non_leaves_keeps_extents() {
        let mut tree = bar();
        tree.chop(Vector3::x(), 4.0).unwrap();
        let dims = tree.mesh().dimensions();
        tree.clear_non_leaves();
        assert!(tree.mesh().is_empty());
        assert_eq!(tree.mesh().dimensions(), dims);
        assert!(!tree.left().unwrap().mesh().is_empty());
    }
}
