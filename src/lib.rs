//! Duty roster planning for multi-day events.
//!
//! Assigns participants to time-boxed tasks under headcount, availability,
//! obligation, overlap and workload constraints, maximizing coverage.
//! The assignment problem is stated as a 0/1 linear model and handed to
//! a pluggable solving engine.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Participant`, `Availability`,
//!   `EventCalendar`, `ExistingAssignment`, `Assignment`, `Roster`
//! - **`loader`**: Tabular rows to domain types
//! - **`validation`**: Input integrity checks (duplicate IDs, headcounts, references)
//! - **`cp`**: Assignment model builder, objective and diagnostics
//! - **`solver`**: Engines, planner orchestration, workload metrics
//! - **`config`**: Workload tables and planning policies
//! - **`error`**: Crate error type
//!
//! # Pipeline
//!
//! ```text
//! rows ──loader──▶ PlanningInput ──AssignmentModelBuilder──▶ AssignmentModel
//!                                                             │
//!                   Roster + WorkloadSummary ◀──Planner◀──SolvingEngine
//! ```
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Van den Bergh et al. (2013), "Personnel scheduling: A literature review"
//! - Wolsey (2020), "Integer Programming"

pub mod config;
pub mod cp;
pub mod error;
pub mod loader;
pub mod models;
pub mod solver;
pub mod validation;

#[cfg(test)]
mod logging;

pub use error::{PlannerError, Result};
