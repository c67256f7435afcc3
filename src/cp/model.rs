//! Finished assignment model.
//!
//! The model is a plain value: one boolean variable per (participant, task)
//! pair, each with a resolved [`VariableState`], plus a list of linear
//! constraints over those variables. It is engine-agnostic; a
//! [`SolvingEngine`](crate::solver::SolvingEngine) translates it.

use serde::Serialize;
use std::fmt;

/// Index of a decision variable (`participant * task_count + task`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VarId(pub usize);

impl VarId {
    /// Position in the variable list.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Why a variable was fixed to false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Exclusion {
    /// Obligation rejected: no capacity left on the task.
    ObligationOverCapacity,
    /// Obligation lost a tie-break against an overlapping pin.
    ObligationConflict,
    /// Existing assignments already fill the task.
    CapacityExhausted,
    /// The participant's availability does not cover the task.
    Unavailable,
    /// The task overlaps one of the participant's pinned tasks.
    OverlapsPinned,
}

/// Resolved state of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariableState {
    /// Committed before solving; fixed true, not counted as new.
    Existing,
    /// Honored obligation; fixed true.
    Obligation,
    /// Fixed false.
    Excluded(Exclusion),
    /// Left to the engine.
    Free,
}

impl VariableState {
    /// The fixed value, if any.
    pub fn fixed_value(&self) -> Option<bool> {
        match self {
            Self::Existing | Self::Obligation => Some(true),
            Self::Excluded(_) => Some(false),
            Self::Free => None,
        }
    }

    /// Whether the variable can be true in a solution.
    pub fn may_be_true(&self) -> bool {
        self.fixed_value() != Some(false)
    }

    /// Whether the variable is pinned true.
    pub fn is_pinned(&self) -> bool {
        self.fixed_value() == Some(true)
    }

    /// Whether a true value counts as a new assignment.
    pub fn is_new(&self) -> bool {
        *self != Self::Existing
    }
}

/// One (participant, task) decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentVariable {
    pub id: VarId,
    /// Participant position in the input.
    pub participant: usize,
    /// Task position in the input.
    pub task: usize,
    /// Task length in minutes.
    pub minutes: u32,
    pub state: VariableState,
}

impl AssignmentVariable {
    /// Stable variable name, for engines that want one.
    pub fn name(&self) -> String {
        format!("assign_{}_{}", self.participant, self.task)
    }
}

/// Constraint family, for auditing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConstraintKind {
    /// Minimum headcount floor.
    Coverage,
    /// Maximum headcount ceiling.
    Capacity,
    /// At most one of two overlapping tasks.
    Overlap,
    /// Total minutes ceiling of a participant.
    Workload,
    /// Per-day minutes ceiling of a fixed-quota participant.
    DailyWorkload,
}

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparison {
    LessOrEqual,
    GreaterOrEqual,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LessOrEqual => "<=",
            Self::GreaterOrEqual => ">=",
        })
    }
}

/// `Σ coefficient · var  (<= | >=)  rhs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearConstraint {
    pub kind: ConstraintKind,
    /// Human-readable origin, e.g. `capacity[C1]`.
    pub label: String,
    pub terms: Vec<(VarId, i64)>,
    pub comparison: Comparison,
    pub rhs: i64,
}

impl LinearConstraint {
    /// Left-hand side under a valuation.
    pub fn lhs(&self, valuation: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|(id, _)| valuation[id.index()])
            .map(|(_, c)| c)
            .sum()
    }

    /// Whether the constraint holds under a valuation.
    pub fn is_satisfied(&self, valuation: &[bool]) -> bool {
        let lhs = self.lhs(valuation);
        match self.comparison {
            Comparison::LessOrEqual => lhs <= self.rhs,
            Comparison::GreaterOrEqual => lhs >= self.rhs,
        }
    }
}

/// A finished model: variables and constraints, immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentModel {
    participant_count: usize,
    task_count: usize,
    variables: Vec<AssignmentVariable>,
    constraints: Vec<LinearConstraint>,
}

impl AssignmentModel {
    pub(crate) fn new(
        participant_count: usize,
        task_count: usize,
        variables: Vec<AssignmentVariable>,
        constraints: Vec<LinearConstraint>,
    ) -> Self {
        Self {
            participant_count,
            task_count,
            variables,
            constraints,
        }
    }

    pub fn participant_count(&self) -> usize {
        self.participant_count
    }

    pub fn task_count(&self) -> usize {
        self.task_count
    }

    /// All variables, participant-major.
    pub fn variables(&self) -> &[AssignmentVariable] {
        &self.variables
    }

    /// All constraints.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Id of the (participant, task) variable.
    pub fn var_id(&self, participant: usize, task: usize) -> VarId {
        VarId(participant * self.task_count + task)
    }

    /// The (participant, task) variable.
    pub fn variable(&self, participant: usize, task: usize) -> &AssignmentVariable {
        &self.variables[self.var_id(participant, task).index()]
    }

    /// Constraints of one family.
    pub fn constraints_of(&self, kind: ConstraintKind) -> impl Iterator<Item = &LinearConstraint> {
        self.constraints.iter().filter(move |c| c.kind == kind)
    }

    /// Number of variables left to the engine.
    pub fn free_count(&self) -> usize {
        self.variables
            .iter()
            .filter(|v| v.state == VariableState::Free)
            .count()
    }

    /// Checks a valuation against every fixing and constraint.
    ///
    /// Returns the label of the first violated item.
    pub fn check(&self, valuation: &[bool]) -> Result<(), String> {
        if valuation.len() != self.variables.len() {
            return Err(format!(
                "valuation has {} values for {} variables",
                valuation.len(),
                self.variables.len()
            ));
        }
        for v in &self.variables {
            if let Some(fixed) = v.state.fixed_value() {
                if valuation[v.id.index()] != fixed {
                    return Err(format!("{} must be {fixed}", v.name()));
                }
            }
        }
        match self.constraints.iter().find(|c| !c.is_satisfied(valuation)) {
            Some(c) => Err(format!(
                "{}: {} {} {} violated",
                c.label,
                c.lhs(valuation),
                c.comparison,
                c.rhs
            )),
            None => Ok(()),
        }
    }
}
