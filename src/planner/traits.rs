//! Cut evaluation, abstracted so the direction sweep can run serially or on
//! a thread pool.

use crate::float_types::Real;
use crate::mesh::bsp::{BspTree, Side};
use crate::objective::Objective;
use crate::planner::PlannerConfig;
use log::trace;
use nalgebra::Vector3;

/// A partition produced by one more cut, with its grade.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub grade: Real,
    pub tree: BspTree,
}

/// Produces the ranked candidates for cutting one leaf of a tree.
pub trait CutEvaluator {
    /// Try every configured direction and offset on the leaf at `leaf` and
    /// return the surviving candidates, best grade first.
    fn eval_cuts(&self, tree: &BspTree, leaf: &[Side], config: &PlannerConfig) -> Vec<Candidate>;
}

/// Candidates along one direction, after pruning near-duplicates.
///
/// Offsets start at the leaf's minimum extent along `normal` and advance by
/// `config.offset_increment`, stopping at least one increment short of the
/// maximum. Cuts that leave a side empty are skipped.
pub fn cuts_along(
    tree: &BspTree,
    leaf: &[Side],
    normal: &Vector3<Real>,
    config: &PlannerConfig,
    objective: &Objective,
) -> Vec<Candidate> {
    let Some(normal) = normal.try_normalize(Real::EPSILON) else {
        return Vec::new();
    };
    let Some((min, max)) = tree
        .node_at(leaf)
        .and_then(|part| part.min_max_offsets_along(&normal))
    else {
        return Vec::new();
    };

    let offsets = slice_offsets(min, max, config.offset_increment);
    let mut potential = Vec::with_capacity(offsets.len());
    for offset in offsets {
        let mut trial = tree.clone();
        let Some(part) = trial.node_at_mut(leaf) else {
            break;
        };
        if let Err(err) = part.chop(normal, offset) {
            trace!("skipping cut at {offset}: {err}");
            continue;
        }
        let one_sided = [part.left(), part.right()]
            .into_iter()
            .any(|child| child.is_none_or(|c| c.mesh().is_empty()));
        if one_sided {
            trace!("skipping cut at {offset}: one side is empty");
            continue;
        }
        let grade = objective.apply(&mut trial);
        potential.push(Candidate { grade, tree: trial });
    }

    prune_similar(potential, config.volume.diagonal())
}

/// Offsets `min + j·inc` for `j = 1..=floor((max − min − inc) / inc)`.
///
/// Every offset leaves at least one increment before `max`. Empty when the
/// range is shorter than two increments or `inc` is not positive.
pub fn slice_offsets(min: Real, max: Real, inc: Real) -> Vec<Real> {
    let slices = ((max - min - inc) / inc).floor();
    if !(inc > 0.0 && slices.is_finite() && slices > 0.0) {
        return Vec::new();
    }
    (1..=slices as usize).map(|j| min + inc * j as Real).collect()
}

/// Keep only candidates whose grade differs enough from those already kept.
///
/// Candidates are visited best first. The first is always kept; each later
/// one is kept only if the root-mean-square difference between its grade and
/// the grades kept so far exceeds a tenth of the working volume's diagonal.
pub fn prune_similar(mut candidates: Vec<Candidate>, diagonal: Real) -> Vec<Candidate> {
    sort_by_grade(&mut candidates);
    let threshold = 0.1 * diagonal;
    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if kept.is_empty() || rmse(candidate.grade, &kept) > threshold {
            kept.push(candidate);
        }
    }
    kept
}

/// Stable ascending sort; equal grades keep their generation order.
pub fn sort_by_grade(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| a.grade.total_cmp(&b.grade));
}

fn rmse(grade: Real, kept: &[Candidate]) -> Real {
    let sum: Real = kept.iter().map(|c| (grade - c.grade).powi(2)).sum();
    (sum / kept.len() as Real).sqrt()
}
