//! Solving and result materialization.
//!
//! Runs an assignment model through a solving engine and turns the answer
//! into a roster with workload metrics.
//!
//! # Algorithm
//!
//! [`MilpEngine`] solves the model as a 0/1 integer program: every
//! constraint is linear in the assignment variables, fixed pairs become
//! variable bounds, and branch-and-bound proves optimality.
//!
//! # Metrics
//!
//! [`WorkloadSummary`] reports minutes per participant and day against the
//! category target and ceiling. [`PreSolveReport`] describes the input
//! before solving.
//!
//! # References
//!
//! - Wolsey (2020), "Integer Programming", Ch. 7: Branch and Bound
//! - Van den Bergh et al. (2013), "Personnel scheduling: A literature review"

mod engine;
mod planner;
mod report;
mod summary;

pub use engine::{EngineOutcome, MilpEngine, SolveStatus, SolvingEngine};
pub use planner::{PlanResult, Planner, PlanningInput};
pub use report::{ParticipantCapacity, PreSolveReport, TaskStaffing};
pub use summary::{ParticipantWorkload, WorkloadSummary};
