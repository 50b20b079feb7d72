//! Serial direction sweep

use crate::mesh::bsp::{BspTree, Side};
use crate::planner::PlannerConfig;
use crate::planner::traits::{Candidate, CutEvaluator, cuts_along, sort_by_grade};

/// Evaluates one direction after another on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialCutEvaluator;

impl SerialCutEvaluator {
    pub const fn new() -> Self {
        Self
    }
}

impl CutEvaluator for SerialCutEvaluator {
    fn eval_cuts(&self, tree: &BspTree, leaf: &[Side], config: &PlannerConfig) -> Vec<Candidate> {
        let objective = config.objective();
        let mut candidates: Vec<Candidate> = config
            .normals
            .iter()
            .flat_map(|normal| cuts_along(tree, leaf, normal, config, &objective))
            .collect();
        sort_by_grade(&mut candidates);
        candidates
    }
}
