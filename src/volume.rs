//! The rectangular working volume every part has to fit into.

use crate::float_types::{Real, tolerance};
use nalgebra::Vector3;

/// Build-chamber dimensions of the target machine.
///
/// The axes are interchangeable: parts may be re-oriented before printing,
/// so every comparison sorts the dimensions first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingVolume {
    pub width: Real,
    pub height: Real,
    pub length: Real,
}

impl WorkingVolume {
    pub const fn new(width: Real, height: Real, length: Real) -> Self {
        Self {
            width,
            height,
            length,
        }
    }

    /// Dimensions sorted ascending into `[small, medium, large]`.
    pub fn sorted(&self) -> [Real; 3] {
        sort_dims([self.width, self.height, self.length])
    }

    pub fn volume(&self) -> Real {
        self.width * self.height * self.length
    }

    /// Length of the chamber's space diagonal.
    pub fn diagonal(&self) -> Real {
        Vector3::new(self.width, self.height, self.length).norm()
    }

    /// True if a box with the given extents fits after sorting both sides.
    pub fn contains_dims(&self, dims: Vector3<Real>) -> bool {
        let tol = tolerance();
        let inner = sort_dims([dims.x, dims.y, dims.z]);
        self.sorted()
            .iter()
            .zip(inner.iter())
            .all(|(outer, inner)| *inner <= *outer + tol)
    }

    /// How many chambers are needed to cover a box with the given extents.
    ///
    /// Each sorted extent is divided by the matching sorted chamber extent and
    /// rounded up; the worst axis wins. This assumes axis-aligned packing and
    /// is a deliberately rough estimate. An empty box still needs one print.
    pub fn print_volumes_for(&self, dims: Vector3<Real>) -> usize {
        let tol = tolerance();
        let inner = sort_dims([dims.x, dims.y, dims.z]);
        self.sorted()
            .iter()
            .zip(inner.iter())
            .map(|(outer, inner)| ((inner - tol).max(0.0) / outer).ceil() as usize)
            .max()
            .unwrap_or(1)
            .max(1)
    }
}

impl Default for WorkingVolume {
    fn default() -> Self {
        Self::new(10.0, 15.0, 10.0)
    }
}

fn sort_dims(mut dims: [Real; 3]) -> [Real; 3] {
    dims.sort_by(|a, b| a.total_cmp(b));
    dims
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_is_ascending() {
        let v = WorkingVolume::new(10.0, 2.0, 5.0);
        assert_eq!(v.sorted(), [2.0, 5.0, 10.0]);
    }

    #[test]
    fn print_volumes_uses_worst_axis() {
        let v = WorkingVolume::new(4.0, 4.0, 4.0);
        assert_eq!(v.print_volumes_for(Vector3::new(10.0, 2.0, 2.0)), 3);
        assert_eq!(v.print_volumes_for(Vector3::new(4.0, 4.0, 4.0)), 1);
        assert_eq!(v.print_volumes_for(Vector3::zeros()), 1);
    }
}
