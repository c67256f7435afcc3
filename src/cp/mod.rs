//! Assignment model formulation.
//!
//! Bridges roster domain models to a solver-agnostic 0/1 linear model.
//! [`AssignmentModelBuilder`] resolves every (participant, task) pair and
//! emits the linear constraints; [`compose_objective`] adds the objective.
//! A [`SolvingEngine`](crate::solver::SolvingEngine) then solves the pair.
//!
//! # Reference
//! - Van den Bergh et al. (2013), "Personnel scheduling: A literature review"

mod builder;
mod diagnostics;
mod model;
mod objective;

pub use builder::{AssignmentModelBuilder, ModelBuild};
pub use diagnostics::Diagnostic;
pub use model::{
    AssignmentModel, AssignmentVariable, Comparison, ConstraintKind, Exclusion, LinearConstraint,
    VarId, VariableState,
};
pub use objective::{compose_objective, Objective};
