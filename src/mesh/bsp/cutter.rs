//! Plane clipping of a closed mesh into the parts on either side of a plane.
//!
//! A cut runs in two passes:
//!
//! 1. **Distribution.** Every source triangle is copied into the child that
//!    wholly contains it, classified by [`Plane::classify_triangle`]. Triangles that straddle the
//!    plane are copied into *both* children, with corners that are not yet
//!    known to survive added outside the bounding box, and queued for
//!    clipping.
//! 2. **Clipping.** Each child removes its queued triangles and re-fills the
//!    retained part with one or two triangles that end on the plane. The
//!    boundary vertex of a clipped edge is created once and shared by both
//!    triangles adjacent to that edge, so the child stays an oriented
//!    manifold with a hole where the plane passed.
//!
//! Finally each child is compacted, dropping the corners that ended up on the
//! discarded side.

use crate::mesh::plane::{BACK, FRONT, Plane};
use crate::mesh::{Mesh, TriangleId, VertexId};
use log::trace;

/// Where a vertex lies relative to the side a child keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Kept,
    On,
    Dropped,
}

impl Side {
    /// Side of a corner relative to the front of the clipping plane.
    fn of(orientation: i8) -> Self {
        match orientation {
            FRONT => Side::Kept,
            BACK => Side::Dropped,
            _ => Side::On,
        }
    }
}

/// Split `mesh` by `plane` into `(left, right)`.
///
/// The right child holds the geometry on the side `plane.normal` points
/// into; the left child the opposite side. Triangles lying in the plane go to
/// the right. Both children are compacted: vertex ids are dense and every
/// vertex is referenced by a triangle.
pub fn cut(mesh: &Mesh, plane: &Plane) -> (Mesh, Mesh) {
    let orientations: Vec<i8> = mesh
        .vertices()
        .iter()
        .map(|v| plane.orient_point(&v.pos))
        .collect();

    let mut left = ChildBuilder::new(mesh.num_vertices());
    let mut right = ChildBuilder::new(mesh.num_vertices());

    for triangle in mesh.triangles() {
        let Some(corners) = mesh.triangle_vertices(triangle.id) else {
            continue;
        };
        // Same bitmask as `Plane::classify_triangle`, from cached corners.
        let class = corners.iter().fold(0, |acc, &v| acc | orientations[v]);
        if class & BACK == 0 {
            // front or coplanar
            right.copy_triangle(mesh, corners, true);
        } else if class == BACK {
            left.copy_triangle(mesh, corners, true);
        } else {
            let r = right.copy_triangle(mesh, corners, false);
            right.pending.push(r);
            let l = left.copy_triangle(mesh, corners, false);
            left.pending.push(l);
        }
    }

    trace!(
        "cut at {:?}/{}: {} triangles straddle the plane",
        plane.normal,
        plane.w,
        right.pending.len()
    );

    right.clip(plane);
    left.clip(&plane.flipped());
    (left.finish(), right.finish())
}

/// One child under construction.
struct ChildBuilder {
    mesh: Mesh,
    /// source vertex id -> id of its copy in `mesh`
    copies: Vec<Option<VertexId>>,
    /// triangles that still cross the plane
    pending: Vec<TriangleId>,
}

impl ChildBuilder {
    fn new(num_source_vertices: usize) -> Self {
        Self {
            mesh: Mesh::new(),
            copies: vec![None; num_source_vertices],
            pending: Vec::new(),
        }
    }

    fn copy_vertex(&mut self, source: &Mesh, v: VertexId, bounded: bool) -> VertexId {
        match self.copies[v] {
            Some(id) => {
                if bounded {
                    self.mesh.include_in_bounds(id);
                }
                id
            },
            None => {
                let pos = source.vertex(v).pos;
                let id = if bounded {
                    self.mesh.add_vertex(pos)
                } else {
                    self.mesh.add_unbounded_vertex(pos)
                };
                self.copies[v] = Some(id);
                id
            },
        }
    }

    fn copy_triangle(&mut self, source: &Mesh, corners: [VertexId; 3], bounded: bool) -> TriangleId {
        let [a, b, c] = corners.map(|v| self.copy_vertex(source, v, bounded));
        self.mesh.add_triangle(a, b, c)
    }

    /// Replace every pending triangle by its part on the front of `plane`.
    fn clip(&mut self, plane: &Plane) {
        self.mesh.clear_vertex_parents();
        for t in std::mem::take(&mut self.pending) {
            let Some(corners) = self.mesh.triangle_vertices(t) else {
                continue;
            };
            let sides = corners.map(|v| Side::of(plane.orient_point(&self.mesh.vertex(v).pos)));
            // Free the edges first so the replacements can reuse them.
            self.mesh.remove_triangle(t);
            for [a, b, c] in self.retained_part(plane, corners, sides) {
                self.mesh.add_triangle(a, b, c);
                for v in [a, b, c] {
                    self.mesh.include_in_bounds(v);
                }
            }
        }
    }

    /// Triangulate what remains of `corners` on the kept side, preserving
    /// the winding of the source triangle.
    fn retained_part(
        &mut self,
        plane: &Plane,
        corners: [VertexId; 3],
        sides: [Side; 3],
    ) -> Vec<[VertexId; 3]> {
        let kept = sides.iter().filter(|&&s| s == Side::Kept).count();
        let dropped = sides.iter().filter(|&&s| s == Side::Dropped).count();
        match (kept, dropped) {
            (_, 0) => vec![corners],
            (0, _) => Vec::new(),
            (1, 2) => {
                let ([k, x, y], _) = rotate_to(corners, sides, Side::Kept);
                let e1 = self.boundary_vertex(plane, k, x);
                let e2 = self.boundary_vertex(plane, k, y);
                vec![[k, e1, e2]]
            },
            (2, 1) => {
                let ([x, r1, r2], _) = rotate_to(corners, sides, Side::Dropped);
                let e1 = self.boundary_vertex(plane, r1, x);
                let e2 = self.boundary_vertex(plane, r2, x);
                vec![[e1, r1, r2], [e1, r2, e2]]
            },
            _ => {
                // One corner on the plane, one kept, one dropped.
                let ([z, p, q], [_, p_side, _]) = rotate_to(corners, sides, Side::On);
                if p_side == Side::Kept {
                    let e = self.boundary_vertex(plane, p, q);
                    vec![[z, p, e]]
                } else {
                    let e = self.boundary_vertex(plane, q, p);
                    vec![[z, e, q]]
                }
            },
        }
    }

    /// The vertex where the edge `kept - dropped` meets the plane, created on
    /// first use and shared with the neighbouring triangle afterwards.
    fn boundary_vertex(&mut self, plane: &Plane, kept: VertexId, dropped: VertexId) -> VertexId {
        if let Some(v) = self.mesh.get_child_vertex(kept, dropped) {
            return v;
        }
        let a = self.mesh.vertex(kept).pos;
        let b = self.mesh.vertex(dropped).pos;
        // The endpoints are more than twice the tolerance apart along the
        // normal, so the edge is never parallel to the plane.
        let pos = plane.intersect_edge(&a, &b).unwrap_or(a);
        let v = self.mesh.add_vertex(pos);
        self.mesh.set_parents_child(kept, dropped, v);
        v
    }

    fn finish(self) -> Mesh {
        self.mesh.compacted()
    }
}

/// Rotate `corners` and their sides (keeping the cyclic order) so the first
/// corner with side `first` leads.
fn rotate_to(
    corners: [VertexId; 3],
    sides: [Side; 3],
    first: Side,
) -> ([VertexId; 3], [Side; 3]) {
    let i = sides.iter().position(|&s| s == first).unwrap_or(0);
    let order = [i, (i + 1) % 3, (i + 2) % 3];
    (order.map(|k| corners[k]), order.map(|k| sides[k]))
}
