//! Half-edge records.
//!
//! Adjacency is stored as integer handles into the owning mesh's arenas, never
//! as references, so triangles can be removed in the middle of a clip pass
//! without invalidating anything but their own three edges.

use crate::mesh::vertex::VertexId;

/// Handle of a triangle; a per-mesh monotonic counter.
pub type TriangleId = usize;

/// Handle of a half-edge. The three edges of triangle `t` are
/// `3t`, `3t + 1` and `3t + 2`.
pub type EdgeId = usize;

/// A directed edge `start → end` owned by one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start: VertexId,
    pub end: VertexId,
    pub triangle: TriangleId,
    /// Next half-edge around the same triangle
    pub next: EdgeId,
    /// Reverse-oriented half-edge of the adjacent triangle, if present
    pub opposite: Option<EdgeId>,
}

/// A triangle, reached through one of its half-edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub id: TriangleId,
    pub edge: EdgeId,
}

impl Triangle {
    /// Ids of the three half-edges in winding order.
    #[inline]
    pub const fn edges(&self) -> [EdgeId; 3] {
        edge_ids_of(self.id)
    }
}

#[inline]
pub(crate) const fn edge_ids_of(triangle: TriangleId) -> [EdgeId; 3] {
    [triangle * 3, triangle * 3 + 1, triangle * 3 + 2]
}
