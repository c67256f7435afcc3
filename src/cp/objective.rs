//! Objective composition.
//!
//! The objective is lexicographic in effect: each assignment is worth 1,
//! plus a secondary term normalized by the largest total any roster can
//! reach, so the secondary contributions sum to at most the weight (< 1).
//! The primary count therefore always dominates.

use serde::Serialize;

use super::model::{AssignmentModel, VarId};
use crate::config::{ObjectivePolicy, WorkloadTable};
use crate::models::Participant;

/// Linear objective to maximize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Objective {
    /// One coefficient per variable, in variable order.
    pub terms: Vec<(VarId, f64)>,
}

impl Objective {
    /// Objective value under a valuation.
    pub fn evaluate(&self, valuation: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(id, _)| valuation[id.index()])
            .map(|(_, c)| c)
            .sum()
    }

    /// Coefficient of one variable.
    pub fn coefficient(&self, id: VarId) -> f64 {
        self.terms
            .get(id.index())
            .map(|&(_, c)| c)
            .unwrap_or_default()
    }
}

/// Composes the objective for a built model.
///
/// - [`ObjectivePolicy::RewardDuration`]: `1 + w · minutes / bound`,
///   favoring longer tasks among equal-count rosters.
/// - [`ObjectivePolicy::BalanceLoad`]: `1 - w · ratio / bound` with
///   `ratio = minutes / target`, penalizing load on low-target categories.
///
/// `bound` is the largest secondary total a roster can reach: per
/// participant, the sum over pairs that may still be true, capped by the
/// category ceiling.
pub fn compose_objective(
    model: &AssignmentModel,
    participants: &[Participant],
    workload: &WorkloadTable,
    policy: &ObjectivePolicy,
) -> Objective {
    let weight = policy.weight();
    let (sign, secondary, ceilings): (f64, Vec<f64>, Vec<f64>) = match policy {
        ObjectivePolicy::RewardDuration { .. } => (
            1.0,
            model
                .variables()
                .iter()
                .map(|v| f64::from(v.minutes))
                .collect(),
            participants
                .iter()
                .map(|p| f64::from(workload.limit(p.category).max_minutes))
                .collect(),
        ),
        ObjectivePolicy::BalanceLoad { .. } => {
            let target = |p: &Participant| {
                f64::from(workload.limit(p.category).target_minutes.max(1))
            };
            (
                -1.0,
                model
                    .variables()
                    .iter()
                    .map(|v| f64::from(v.minutes) / target(&participants[v.participant]))
                    .collect(),
                participants
                    .iter()
                    .map(|p| f64::from(workload.limit(p.category).max_minutes) / target(p))
                    .collect(),
            )
        }
    };

    let mut reachable = vec![0.0; participants.len()];
    for (v, s) in model.variables().iter().zip(&secondary) {
        if v.state.may_be_true() {
            reachable[v.participant] += s;
        }
    }
    let bound: f64 = reachable
        .iter()
        .zip(&ceilings)
        .map(|(r, c)| r.min(*c))
        .sum();

    let terms = model
        .variables()
        .iter()
        .zip(&secondary)
        .map(|(v, s)| {
            let scaled = if bound > 0.0 { (s / bound).min(1.0) } else { 0.0 };
            (v.id, 1.0 + sign * weight * scaled)
        })
        .collect();

    Objective { terms }
}
