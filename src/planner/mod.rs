//! Beam search over sequences of planar cuts.
//!
//! Each iteration takes every beam slot whose tree does not yet fit the
//! working volume, finds its largest leaf and tries every direction of the
//! normal library at evenly spaced offsets. All resulting candidates go into
//! one pool ranked by grade; emptied slots are refilled from the front of the
//! pool and the rest is discarded. The search stops once every occupied slot
//! fits, or after `max_iterations`.

use crate::errors::PartitionError;
use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::bsp::BspTree;
use crate::objective::{Objective, Weights};
use crate::volume::WorkingVolume;
use log::{debug, info};
use nalgebra::Vector3;
use std::cmp::Ordering;

pub mod normals;
pub mod serial;
pub mod traits;

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(feature = "parallel")]
pub use parallel::ParallelCutEvaluator;
pub use serial::SerialCutEvaluator;
pub use traits::{Candidate, CutEvaluator};

/// Evaluator used by [`BeamPlanner::new`].
#[cfg(not(feature = "parallel"))]
pub type DefaultCutEvaluator = SerialCutEvaluator;
/// Evaluator used by [`BeamPlanner::new`].
#[cfg(feature = "parallel")]
pub type DefaultCutEvaluator = ParallelCutEvaluator;

/// Search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub volume: WorkingVolume,
    /// number of partial partitions kept between iterations
    pub beam_width: usize,
    /// spacing of candidate cut offsets along each direction
    pub offset_increment: Real,
    pub weights: Weights,
    pub max_iterations: usize,
    /// candidate cut directions
    pub normals: Vec<Vector3<Real>>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            volume: WorkingVolume::default(),
            beam_width: 4,
            offset_increment: 1.0,
            weights: Weights::default(),
            max_iterations: 10,
            normals: normals::octahedron_normals(),
        }
    }
}

impl PlannerConfig {
    pub fn objective(&self) -> Objective {
        Objective::new(self.volume, self.weights)
    }

    pub fn validate(&self) -> Result<(), PartitionError> {
        let invalid = |msg: &str| -> Result<(), PartitionError> {
            Err(PartitionError::InvalidConfig(msg.to_string()))
        };
        if self.beam_width == 0 {
            return invalid("beam width must be at least 1");
        }
        if !(self.offset_increment.is_finite() && self.offset_increment > 0.0) {
            return invalid("offset increment must be positive");
        }
        let v = &self.volume;
        if ![v.width, v.height, v.length]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0)
        {
            return invalid("working volume dimensions must be positive");
        }
        if self.normals.is_empty() {
            return invalid("normal library is empty");
        }
        if self.normals.iter().any(|n| n.norm() <= Real::EPSILON) {
            return invalid("normal library contains a zero vector");
        }
        Ok(())
    }
}

/// Runs the beam search with a pluggable [`CutEvaluator`].
#[derive(Debug, Clone)]
pub struct BeamPlanner<E: CutEvaluator = DefaultCutEvaluator> {
    config: PlannerConfig,
    evaluator: E,
}

impl BeamPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_evaluator(config, DefaultCutEvaluator::new())
    }
}

impl<E: CutEvaluator> BeamPlanner<E> {
    pub fn with_evaluator(config: PlannerConfig, evaluator: E) -> Self {
        Self { config, evaluator }
    }

    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Partition `mesh` into parts that fit the working volume, as far as
    /// the iteration budget allows.
    ///
    /// Returns the lowest-graded tree in the beam. If the budget runs out
    /// before every slot fits, that tree may not fit; check
    /// [`BspTree::fits_in_volume`] on the result.
    pub fn plan(&self, mesh: Mesh) -> Result<BspTree, PartitionError> {
        self.config.validate()?;
        let volume = &self.config.volume;
        let objective = self.config.objective();

        let mut root = BspTree::new(mesh);
        objective.apply(&mut root);
        info!(
            "planning {} vertices, {} print volumes needed unpartitioned",
            root.num_vertices(),
            root.mesh().num_print_volumes(volume)
        );
        if root.fits_in_volume(volume) {
            info!("input already fits the working volume");
            return Ok(root);
        }

        let mut beam: Vec<Option<BspTree>> = vec![None; self.config.beam_width];
        beam[0] = Some(root);

        let mut iteration = 0;
        while !all_at_goal(&beam, volume) && iteration < self.config.max_iterations {
            iteration += 1;
            let mut pool: Vec<Candidate> = Vec::new();

            for slot in beam.iter_mut() {
                let Some(tree) = slot.take_if(|t| !t.fits_in_volume(volume)) else {
                    continue;
                };
                let (path, count) = tree.largest_part_path(volume);
                debug!("iteration {iteration}: cutting leaf {path:?} ({count} print volumes)");

                let candidates = self.evaluator.eval_cuts(&tree, &path, &self.config);
                if candidates.is_empty() {
                    debug!("no feasible cut for leaf {path:?}, returning tree to the pool");
                    let grade = tree.grade().unwrap_or_else(|| objective.grade(&tree));
                    pool.push(Candidate { grade, tree });
                } else {
                    pool.extend(candidates);
                }
            }

            traits::sort_by_grade(&mut pool);
            debug!("iteration {iteration}: {} candidates in the pool", pool.len());
            let mut pool = pool.into_iter();
            for slot in beam.iter_mut().filter(|slot| slot.is_none()) {
                let Some(Candidate { mut tree, .. }) = pool.next() else {
                    break;
                };
                tree.clear_non_leaves();
                *slot = Some(tree);
            }
        }

        let best = select(beam.into_iter().flatten(), &objective)
            .ok_or_else(|| PartitionError::InvalidConfig("beam width must be at least 1".into()))?;
        info!(
            "finished after {iteration} iterations: {} parts, fits: {}, grade {:.4}",
            best.num_leaves(),
            best.fits_in_volume(volume),
            best.grade().unwrap_or_else(|| objective.grade(&best))
        );
        Ok(best)
    }
}

/// Plan with the default evaluator.
pub fn plan(root_mesh: Mesh, config: PlannerConfig) -> Result<BspTree, PartitionError> {
    BeamPlanner::new(config).plan(root_mesh)
}

fn all_at_goal(beam: &[Option<BspTree>], volume: &WorkingVolume) -> bool {
    beam.iter().flatten().all(|tree| tree.fits_in_volume(volume))
}

/// The lowest-graded tree, whether it fits or not. Ties go to the earliest.
///
/// Trees without a cached grade are graded with `objective`.
pub fn select(
    trees: impl IntoIterator<Item = BspTree>,
    objective: &Objective,
) -> Option<BspTree> {
    trees.into_iter().min_by(|a, b| rank(a, b, objective))
}

// `Iterator::min_by` keeps the first of equal elements.
fn rank(a: &BspTree, b: &BspTree, objective: &Objective) -> Ordering {
    let grade = |t: &BspTree| t.grade().unwrap_or_else(|| objective.grade(t));
    grade(a).total_cmp(&grade(b))
}
