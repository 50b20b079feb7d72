//! Parallel direction sweep

use rayon::prelude::*;

use crate::mesh::bsp::{BspTree, Side};
use crate::planner::PlannerConfig;
use crate::planner::traits::{Candidate, CutEvaluator, cuts_along, sort_by_grade};

/// Evaluates the directions on the rayon thread pool.
///
/// Each worker builds its own candidate list; the lists are concatenated in
/// direction order, so the result matches [`SerialCutEvaluator`] exactly.
///
/// [`SerialCutEvaluator`]: crate::planner::serial::SerialCutEvaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelCutEvaluator;

impl ParallelCutEvaluator {
    pub const fn new() -> Self {
        Self
    }
}

impl CutEvaluator for ParallelCutEvaluator {
    fn eval_cuts(&self, tree: &BspTree, leaf: &[Side], config: &PlannerConfig) -> Vec<Candidate> {
        let objective = config.objective();
        let per_direction: Vec<Vec<Candidate>> = config
            .normals
            .par_iter()
            .map(|normal| cuts_along(tree, leaf, normal, config, &objective))
            .collect();
        let mut candidates: Vec<Candidate> = per_direction.into_iter().flatten().collect();
        sort_by_grade(&mut candidates);
        candidates
    }
}
