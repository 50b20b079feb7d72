//! Partitioning errors

/// Failures reported by the cutting engine and the planner.
///
/// Topology corruption (a duplicate half-edge, a boundary vertex registered
/// twice for the same parent pair) is not represented here: those abort via
/// `assert!` inside [`Mesh`](crate::mesh::Mesh) because a half-built mesh
/// cannot be repaired locally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PartitionError {
    /// `chop` was called on a node that already has children
    #[error("(NotALeaf) only leaf nodes can be chopped")]
    NotALeaf,
    /// `chop` was called on a leaf whose mesh has no vertices
    #[error("(EmptyMesh) cannot chop a part with no vertices")]
    EmptyMesh,
    /// A planner parameter is out of range
    #[error("(InvalidConfig) {0}")]
    InvalidConfig(String),
}
