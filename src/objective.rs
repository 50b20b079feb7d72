//! Scoring of candidate partitions. Lower grades are better.

use crate::float_types::Real;
use crate::mesh::bsp::BspTree;
use crate::volume::WorkingVolume;

/// Relative weight of each objective term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// weight of the number-of-parts term
    pub a_part: Real,
    /// weight of the utilization term
    pub a_util: Real,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            a_part: 1.0,
            a_util: 1.0,
        }
    }
}

/// Weighted sum of [`BspTree::f_part`] and [`BspTree::f_util`] against a
/// fixed working volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective {
    pub volume: WorkingVolume,
    pub weights: Weights,
}

impl Objective {
    pub const fn new(volume: WorkingVolume, weights: Weights) -> Self {
        Self { volume, weights }
    }

    /// Grade `tree` without touching its cache.
    pub fn grade(&self, tree: &BspTree) -> Real {
        self.weights.a_part * tree.f_part(&self.volume)
            + self.weights.a_util * tree.f_util(&self.volume)
            + tree.f_connector()
    }

    /// Grade `tree` and store the result as its cached grade.
    pub fn apply(&self, tree: &mut BspTree) -> Real {
        let grade = self.grade(tree);
        tree.set_grade(grade);
        grade
    }
}
