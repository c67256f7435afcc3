//! Solving engines.
//!
//! An engine takes a finished [`AssignmentModel`] and [`Objective`] and
//! returns a status plus one boolean per variable. [`MilpEngine`] solves
//! the model as a 0/1 integer program through `good_lp`.

use std::fmt;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use good_lp::solvers::ObjectiveDirection::Maximisation;
use good_lp::{
    default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SolverConfig;
use crate::cp::{AssignmentModel, Comparison, Objective};
use crate::error::Result;

/// Outcome class reported by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// Feasible, optimality not proven.
    Feasible,
    /// Proven infeasible.
    Infeasible,
    /// No answer (limit reached or engine error).
    Unknown,
}

impl SolveStatus {
    /// Whether the valuation can be used.
    pub fn has_solution(&self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Optimal => "OPTIMAL",
            Self::Feasible => "FEASIBLE",
            Self::Infeasible => "INFEASIBLE",
            Self::Unknown => "UNKNOWN",
        })
    }
}

/// What an engine returns.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutcome {
    pub status: SolveStatus,
    /// One value per model variable; empty without a solution.
    pub valuation: Vec<bool>,
    /// Objective value of `valuation` (0 without a solution).
    pub objective_value: f64,
}

impl EngineOutcome {
    /// An outcome without a solution.
    pub fn without_solution(status: SolveStatus) -> Self {
        Self {
            status,
            valuation: Vec::new(),
            objective_value: 0.0,
        }
    }
}

/// A solver for assignment models.
pub trait SolvingEngine {
    /// Engine name, for logs.
    fn name(&self) -> &str;

    /// Solves `model`, maximizing `objective`.
    ///
    /// Infeasibility is an outcome, not an error. `Err` is reserved for
    /// engine malfunctions.
    fn solve(
        &self,
        model: &AssignmentModel,
        objective: &Objective,
        config: &SolverConfig,
    ) -> Result<EngineOutcome>;
}

/// 0/1 integer programming engine backed by `good_lp`'s default solver.
///
/// The pure-Rust backend is exact and deterministic, so the seed is unused.
/// A configured time limit bounds the wait: the search runs on a worker
/// thread and the engine reports [`SolveStatus::Unknown`] once the limit
/// passes. An abandoned search keeps its thread until it finishes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MilpEngine;

impl MilpEngine {
    pub fn new() -> Self {
        Self
    }
}

impl SolvingEngine for MilpEngine {
    fn name(&self) -> &str {
        "milp"
    }

    fn solve(
        &self,
        model: &AssignmentModel,
        objective: &Objective,
        config: &SolverConfig,
    ) -> Result<EngineOutcome> {
        if config.seed.is_some() {
            debug!(seed = ?config.seed, "seed is not used by this engine");
        }

        // Constraints without terms are decided here.
        for c in model.constraints().iter().filter(|c| c.terms.is_empty()) {
            if !c.is_satisfied(&[]) {
                info!(constraint = %c.label, "constant constraint violated");
                return Ok(EngineOutcome::without_solution(SolveStatus::Infeasible));
            }
        }

        let Some(limit) = config.time_limit() else {
            return Ok(solve_milp(model, objective));
        };
        let (model, objective) = (model.clone(), objective.clone());
        match run_with_deadline(limit, move || solve_milp(&model, &objective)) {
            Some(outcome) => Ok(outcome),
            None => {
                warn!(limit_secs = limit.as_secs_f64(), "time limit reached without a solution");
                Ok(EngineOutcome::without_solution(SolveStatus::Unknown))
            }
        }
    }
}

/// Runs `job` on a worker thread and waits at most `limit` for its result.
fn run_with_deadline<T, F>(limit: Duration, job: F) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // The receiver is gone once the deadline has passed.
        let _ = tx.send(job());
    });
    rx.recv_timeout(limit).ok()
}

fn solve_milp(model: &AssignmentModel, objective: &Objective) -> EngineOutcome {
    let mut problem = ProblemVariables::new();
    let vars: Vec<Variable> = model
        .variables()
        .iter()
        .map(|v| {
            let (lo, hi) = match v.state.fixed_value() {
                Some(true) => (1, 1),
                Some(false) => (0, 0),
                None => (0, 1),
            };
            problem.add(variable().name(v.name()).binary().min(lo).max(hi))
        })
        .collect();

    let goal: Expression = objective
        .terms
        .iter()
        .map(|&(id, c)| c * vars[id.index()])
        .sum();

    let mut solver = problem.optimise(Maximisation, goal).using(default_solver);
    for c in model.constraints().iter().filter(|c| !c.terms.is_empty()) {
        let lhs: Expression = c
            .terms
            .iter()
            .map(|&(id, coef)| coef as f64 * vars[id.index()])
            .sum();
        let rhs = c.rhs as f64;
        solver = match c.comparison {
            Comparison::LessOrEqual => solver.with(lhs << rhs),
            Comparison::GreaterOrEqual => solver.with(lhs >> rhs),
        };
    }

    match solver.solve() {
        Ok(solution) => {
            let valuation: Vec<bool> = vars.iter().map(|&v| solution.value(v) > 0.5).collect();
            EngineOutcome {
                status: SolveStatus::Optimal,
                objective_value: objective.evaluate(&valuation),
                valuation,
            }
        }
        Err(ResolutionError::Infeasible) => {
            EngineOutcome::without_solution(SolveStatus::Infeasible)
        }
        Err(e) => {
            info!(error = %e, "engine returned no solution");
            EngineOutcome::without_solution(SolveStatus::Unknown)
        }
    }
}
