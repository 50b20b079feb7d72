//! Binary space partition of a mesh into printable parts
//!
//! [`BspTree`] records a sequence of planar cuts; [`cutter::cut`] performs a
//! single cut on a mesh.

pub mod cutter;
pub mod node;

pub use cutter::cut;
pub use node::{BspTree, Side};
