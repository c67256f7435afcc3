//! Solve orchestration.
//!
//! [`Planner::plan`] runs the whole pipeline: build the model, compose the
//! objective, call the engine, check the answer and materialize a
//! [`Roster`]. A failed solve yields an error, never a partial roster.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::engine::{MilpEngine, SolveStatus, SolvingEngine};
use super::report::PreSolveReport;
use super::summary::WorkloadSummary;
use crate::config::PlannerConfig;
use crate::cp::{
    compose_objective, AssignmentModel, AssignmentModelBuilder, Diagnostic, ModelBuild,
    VariableState,
};
use crate::error::{PlannerError, Result};
use crate::models::{Assignment, ExistingAssignment, Participant, Roster, Task};
use crate::validation::validate_input;

/// Validated input of one planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningInput {
    tasks: Vec<Task>,
    participants: Vec<Participant>,
    existing: Vec<ExistingAssignment>,
}

impl PlanningInput {
    /// Creates an input after structural validation.
    ///
    /// # Errors
    /// [`PlannerError::InvalidInput`] listing every problem found.
    pub fn new(
        tasks: Vec<Task>,
        participants: Vec<Participant>,
        existing: Vec<ExistingAssignment>,
    ) -> Result<Self> {
        validate_input(&tasks, &participants, &existing).map_err(PlannerError::InvalidInput)?;
        Ok(Self {
            tasks,
            participants,
            existing,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn existing(&self) -> &[ExistingAssignment] {
        &self.existing
    }

    /// Looks up a task by ID.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Looks up a participant by ID.
    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Existing assignments on a task.
    pub fn existing_count(&self, task_id: &str) -> u32 {
        self.existing.iter().filter(|e| e.task_id == task_id).count() as u32
    }

    /// Input for a follow-up run where every assignment of `roster` is existing.
    pub fn resume_from(&self, roster: &Roster) -> Result<Self> {
        let existing = roster
            .assignments
            .iter()
            .map(|a| ExistingAssignment::new(a.participant.clone(), a.task_id.clone()))
            .collect();
        Self::new(self.tasks.clone(), self.participants.clone(), existing)
    }
}

/// Outcome of a successful planning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanResult {
    pub status: SolveStatus,
    pub objective_value: f64,
    /// Existing and new assignments, participant-major.
    pub roster: Roster,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: WorkloadSummary,
}

impl PlanResult {
    /// Number of assignments created by this run.
    pub fn new_assignment_count(&self) -> usize {
        self.roster.new_assignments().len()
    }

    /// Whether any obligation was dropped or rejected.
    pub fn has_obligation_issues(&self) -> bool {
        self.diagnostics.iter().any(|d| {
            matches!(
                d,
                Diagnostic::ObligationConflict { .. } | Diagnostic::ObligationOverCapacity { .. }
            )
        })
    }
}

/// Roster planner.
///
/// # Example
/// ```
/// use u_roster::config::PlannerConfig;
/// use u_roster::models::{Participant, Task, WorkloadCategory};
/// use u_roster::solver::{Planner, PlanningInput};
///
/// let tasks = vec![Task::new("A1", 0, 540, 660).with_max_people(1)];
/// let people = vec![
///     Participant::new("Xavier", "ROUX", WorkloadCategory::High).with_window(0, 480, 720),
/// ];
/// let input = PlanningInput::new(tasks, people, vec![]).unwrap();
/// let planner = Planner::new(PlannerConfig::default()).unwrap();
/// let result = planner.plan(&input).unwrap();
/// assert!(result.roster.is_assigned("Xavier ROUX", "A1"));
/// ```
#[derive(Debug, Clone)]
pub struct Planner<E = MilpEngine> {
    config: PlannerConfig,
    engine: E,
}

impl Planner {
    /// Creates a planner using [`MilpEngine`].
    ///
    /// # Errors
    /// [`PlannerError::InvalidConfig`] when `config` does not validate.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        Self::with_engine(config, MilpEngine::new())
    }
}

impl<E: SolvingEngine> Planner<E> {
    /// Creates a planner using a custom engine.
    pub fn with_engine(config: PlannerConfig, engine: E) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Builds the model without solving it.
    pub fn build_model(&self, input: &PlanningInput) -> ModelBuild {
        AssignmentModelBuilder::new(input.tasks(), input.participants(), &self.config)
            .with_existing(input.existing())
            .build()
    }

    /// Reports staffing and availability before solving. Informational only.
    pub fn diagnose(&self, input: &PlanningInput) -> PreSolveReport {
        let report = PreSolveReport::compute(input, &self.config);
        for task in &report.tasks {
            debug!(
                task = %task.task_id,
                existing = task.existing,
                min = task.min_people,
                max = ?task.max_people,
                "task staffing"
            );
        }
        for p in &report.participants {
            debug!(
                participant = %p.participant,
                category = %p.category,
                available_minutes = p.available_minutes,
                existing = p.existing,
                "participant capacity"
            );
        }
        info!(
            unassigned_tasks = report.unassigned_tasks().count(),
            full_tasks = report.full_tasks().count(),
            participants_without_existing = report.participants_without_existing().count(),
            "pre-solve report"
        );
        report
    }

    /// Plans a roster.
    ///
    /// # Errors
    /// - [`PlannerError::Infeasible`] when the engine finds no roster
    /// - [`PlannerError::Engine`] when the engine fails or returns a
    ///   valuation that breaks the model
    pub fn plan(&self, input: &PlanningInput) -> Result<PlanResult> {
        let ModelBuild { model, diagnostics } = self.build_model(input);

        if input.tasks().is_empty() || input.participants().is_empty() {
            info!("nothing to plan");
            let roster = Roster::new();
            let summary =
                WorkloadSummary::calculate(&roster, input.participants(), &self.config.workload);
            return Ok(PlanResult {
                status: SolveStatus::Optimal,
                objective_value: 0.0,
                roster,
                diagnostics,
                summary,
            });
        }

        let objective = compose_objective(
            &model,
            input.participants(),
            &self.config.workload,
            &self.config.objective,
        );
        info!(
            engine = self.engine.name(),
            variables = model.variable_count(),
            free = model.free_count(),
            constraints = model.constraints().len(),
            "solving"
        );

        let outcome = self.engine.solve(&model, &objective, &self.config.solver)?;
        if !outcome.status.has_solution() {
            warn!(status = %outcome.status, "no roster found");
            return Err(PlannerError::Infeasible {
                status: outcome.status,
            });
        }
        model.check(&outcome.valuation).map_err(|reason| {
            PlannerError::Engine(format!(
                "{} returned an invalid valuation: {reason}",
                self.engine.name()
            ))
        })?;

        let roster = materialize(&model, input, &outcome.valuation);
        let summary =
            WorkloadSummary::calculate(&roster, input.participants(), &self.config.workload);
        info!(
            status = %outcome.status,
            assignments = roster.assignment_count(),
            new = roster.new_assignments().len(),
            diagnostics = diagnostics.len(),
            "roster found"
        );

        Ok(PlanResult {
            status: outcome.status,
            objective_value: outcome.objective_value,
            roster,
            diagnostics,
            summary,
        })
    }
}

fn materialize(model: &AssignmentModel, input: &PlanningInput, valuation: &[bool]) -> Roster {
    let mut roster = Roster::new();
    for v in model.variables() {
        if valuation[v.id.index()] {
            roster.add_assignment(Assignment::new(
                &input.participants()[v.participant],
                &input.tasks()[v.task],
                v.state == VariableState::Existing,
            ));
        }
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MinimumHeadcountPolicy, ObligationTieBreak, SolverConfig};
    use crate::cp::Objective;
    use crate::logging::init_test;
    use crate::models::{CoveragePolicy, WorkloadCategory};
    use crate::solver::EngineOutcome;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn planner() -> Planner {
        Planner::new(PlannerConfig::default()).unwrap()
    }

    /// Engine answering with a fixed outcome.
    struct FixedEngine(EngineOutcome);

    impl SolvingEngine for FixedEngine {
        fn name(&self) -> &str {
            "fixed"
        }

        fn solve(
            &self,
            _: &AssignmentModel,
            _: &Objective,
            _: &SolverConfig,
        ) -> Result<EngineOutcome> {
            Ok(self.0.clone())
        }
    }

    /// Engine that must never be reached.
    struct UnreachableEngine;

    impl SolvingEngine for UnreachableEngine {
        fn name(&self) -> &str {
            "unreachable"
        }

        fn solve(
            &self,
            _: &AssignmentModel,
            _: &Objective,
            _: &SolverConfig,
        ) -> Result<EngineOutcome> {
            panic!("engine called");
        }
    }

    #[test]
    fn test_single_task_goes_to_available_participant() {
        init_test();
        let tasks = vec![Task::new("A1", 0, 540, 660).with_max_people(1)];
        let people = vec![
            Participant::new("Xavier", "ROUX", WorkloadCategory::High).with_window(0, 480, 720),
            Participant::new("Yara", "BLANC", WorkloadCategory::Low).with_window(1, 480, 720),
        ];
        let input = PlanningInput::new(tasks, people, vec![]).unwrap();
        let result = planner().plan(&input).unwrap();

        assert_eq!(result.status, SolveStatus::Optimal);
        assert_eq!(result.roster.assignment_count(), 1);
        assert!(result.roster.is_assigned("Xavier ROUX", "A1"));

        let yara = result.summary.for_participant("Yara BLANC").unwrap();
        assert_eq!(yara.assignment_count, 0);
        assert_eq!(yara.minutes_on(0), 0);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_overlapping_obligations_keep_smaller_id() {
        init_test();
        let tasks = vec![Task::new("B3", 1, 660, 780), Task::new("B2", 1, 600, 720)];
        let people = vec![Participant::new("Zoe", "MARTIN", WorkloadCategory::Medium)
            .with_window(1, 480, 900)
            .with_obligation("B2")
            .with_obligation("B3")];
        let input = PlanningInput::new(tasks, people, vec![]).unwrap();
        let result = planner().plan(&input).unwrap();

        assert!(result.roster.is_assigned("Zoe MARTIN", "B2"));
        assert!(!result.roster.is_assigned("Zoe MARTIN", "B3"));
        assert!(result.has_obligation_issues());
        assert!(result.diagnostics.contains(&Diagnostic::ObligationConflict {
            participant: "Zoe MARTIN".into(),
            kept: "B2".into(),
            dropped: "B3".into(),
            rule: "lexicographic-id".into(),
        }));
    }

    #[test]
    fn test_full_task_takes_no_new_assignments() {
        init_test();
        let tasks = vec![Task::new("C1", 2, 600, 720).with_max_people(2)];
        let people = vec![
            Participant::new("Ana", "LOPEZ", WorkloadCategory::High).with_window(2, 480, 900),
            Participant::new("Ben", "MOREAU", WorkloadCategory::High).with_window(2, 480, 900),
            Participant::new("Chloe", "SIMON", WorkloadCategory::Low)
                .with_window(2, 480, 900)
                .with_obligation("C1"),
        ];
        let existing = vec![
            ExistingAssignment::new("Ana LOPEZ", "C1"),
            ExistingAssignment::new("Ben MOREAU", "C1"),
        ];
        let input = PlanningInput::new(tasks, people, existing).unwrap();
        let result = planner().plan(&input).unwrap();

        assert_eq!(result.roster.headcount("C1"), 2);
        assert_eq!(result.new_assignment_count(), 0);
        assert!(result.roster.assignments.iter().all(|a| a.existing));
        assert!(!result.roster.is_assigned("Chloe SIMON", "C1"));
        assert!(matches!(
            &result.diagnostics[..],
            [Diagnostic::ObligationOverCapacity { participant, .. }] if participant == "Chloe SIMON"
        ));
    }

    #[test]
    fn test_resolve_with_full_existing_is_idempotent() {
        init_test();
        let tasks = vec![
            Task::new("F1", 0, 540, 660).with_max_people(1),
            Task::new("F2", 0, 600, 720).with_max_people(2),
            Task::new("S1", 1, 540, 600).with_max_people(1),
        ];
        let people: Vec<Participant> = ["Ana", "Ben", "Chloe"]
            .iter()
            .map(|first| {
                Participant::new(*first, "TEST", WorkloadCategory::High)
                    .with_window(0, 480, 900)
                    .with_window(1, 480, 900)
            })
            .collect();
        let input = PlanningInput::new(tasks, people, vec![]).unwrap();
        let planner = planner();

        let first = planner.plan(&input).unwrap();
        assert_eq!(first.roster.assignment_count(), 4);

        let again = planner.plan(&input.resume_from(&first.roster).unwrap()).unwrap();
        assert_eq!(again.new_assignment_count(), 0);
        assert_eq!(again.roster.assignment_count(), 4);
        for a in &first.roster.assignments {
            assert!(again.roster.is_assigned(&a.participant, &a.task_id));
        }
    }

    #[test]
    fn test_assignments_ordered_and_flagged() {
        let tasks = vec![
            Task::new("T1", 0, 540, 600).with_description("Bar"),
            Task::new("T2", 0, 600, 660).with_location("Hall A"),
        ];
        let people = vec![
            Participant::new("Ana", "LOPEZ", WorkloadCategory::High).with_window(0, 480, 720),
            Participant::new("Ben", "MOREAU", WorkloadCategory::Low).with_window(0, 480, 720),
        ];
        let existing = vec![ExistingAssignment::new("Ben MOREAU", "T1")];
        let input = PlanningInput::new(tasks, people, existing).unwrap();
        let result = planner().plan(&input).unwrap();

        let pairs: Vec<(&str, &str, bool)> = result
            .roster
            .assignments
            .iter()
            .map(|a| (a.participant.as_str(), a.task_id.as_str(), a.existing))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Ana LOPEZ", "T1", false),
                ("Ana LOPEZ", "T2", false),
                ("Ben MOREAU", "T1", true),
                ("Ben MOREAU", "T2", false),
            ]
        );
        assert!((result.objective_value - 4.1).abs() < 1e-6);
    }

    #[test]
    fn test_enforced_minimum_is_met() {
        let tasks = vec![
            Task::new("SAT15", 1, 960, 1140).with_min_people(2).with_max_people(3),
            Task::new("SAT16", 1, 1020, 1080).with_max_people(3),
        ];
        let people: Vec<Participant> = ["Ana", "Ben", "Chloe"]
            .iter()
            .map(|first| {
                Participant::new(*first, "TEST", WorkloadCategory::Low).with_window(1, 900, 1200)
            })
            .collect();
        let input = PlanningInput::new(tasks, people, vec![]).unwrap();
        let config = PlannerConfig::default()
            .with_minimum_headcount(MinimumHeadcountPolicy::critical(["SAT15"]));
        let result = Planner::new(config).unwrap().plan(&input).unwrap();

        // SAT15 is longer, the duration reward fills it first
        assert_eq!(result.roster.headcount("SAT15"), 3);
        assert_eq!(result.roster.headcount("SAT16"), 0);
    }

    #[test]
    fn test_unreachable_minimum_is_infeasible() {
        init_test();
        let tasks = vec![Task::new("SAT15", 1, 960, 1140).with_min_people(3)];
        let people = vec![
            Participant::new("Ana", "LOPEZ", WorkloadCategory::High).with_window(1, 900, 1200),
        ];
        let input = PlanningInput::new(tasks, people, vec![]).unwrap();
        let config = PlannerConfig::default().with_minimum_headcount(MinimumHeadcountPolicy::All);
        let err = Planner::new(config).unwrap().plan(&input).unwrap_err();

        assert_eq!(
            err,
            PlannerError::Infeasible {
                status: SolveStatus::Infeasible
            }
        );
    }

    #[test]
    fn test_engine_without_answer() {
        let tasks = vec![Task::new("A1", 0, 540, 660)];
        let people = vec![Participant::new("Ana", "LOPEZ", WorkloadCategory::High)];
        let input = PlanningInput::new(tasks, people, vec![]).unwrap();
        let engine = FixedEngine(EngineOutcome::without_solution(SolveStatus::Unknown));
        let planner = Planner::with_engine(PlannerConfig::default(), engine).unwrap();

        let err = planner.plan(&input).unwrap_err();
        assert_eq!(
            err,
            PlannerError::Infeasible {
                status: SolveStatus::Unknown
            }
        );
        assert!(err.to_string().contains("UNKNOWN"));
    }

    #[test]
    fn test_engine_invalid_valuation() {
        let tasks = vec![Task::new("A1", 0, 540, 660)];
        // not available, so the variable is fixed false
        let people = vec![Participant::new("Ana", "LOPEZ", WorkloadCategory::High)];
        let input = PlanningInput::new(tasks, people, vec![]).unwrap();
        let engine = FixedEngine(EngineOutcome {
            status: SolveStatus::Feasible,
            valuation: vec![true],
            objective_value: 1.0,
        });
        let planner = Planner::with_engine(PlannerConfig::default(), engine).unwrap();

        let err = planner.plan(&input).unwrap_err();
        assert!(matches!(err, PlannerError::Engine(ref msg) if msg.contains("assign_0_0")));
    }

    #[test]
    fn test_empty_input_skips_engine() {
        let people = vec![Participant::new("Ana", "LOPEZ", WorkloadCategory::High)];
        let input = PlanningInput::new(vec![], people, vec![]).unwrap();
        let planner = Planner::with_engine(PlannerConfig::default(), UnreachableEngine).unwrap();

        let result = planner.plan(&input).unwrap();
        assert_eq!(result.status, SolveStatus::Optimal);
        assert!(result.roster.is_empty());
        assert_eq!(result.summary.participants.len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PlannerConfig::default()
            .with_objective(crate::config::ObjectivePolicy::RewardDuration { weight: 2.0 });
        assert!(matches!(Planner::new(config), Err(PlannerError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_input_rejected() {
        let tasks = vec![Task::new("A1", 0, 540, 660), Task::new("A1", 1, 540, 660)];
        let err = PlanningInput::new(tasks, vec![], vec![]).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_diagnose_does_not_solve() {
        let tasks = vec![Task::new("A1", 0, 540, 660).with_max_people(1)];
        let people = vec![
            Participant::new("Ana", "LOPEZ", WorkloadCategory::High).with_window(0, 480, 720),
        ];
        let existing = vec![ExistingAssignment::new("Ana LOPEZ", "A1")];
        let input = PlanningInput::new(tasks, people, existing).unwrap();
        let planner = Planner::with_engine(PlannerConfig::default(), UnreachableEngine).unwrap();

        let report = planner.diagnose(&input);
        assert_eq!(report.tasks[0].existing, 1);
        assert!(report.tasks[0].is_full());
        assert_eq!(report.participants[0].available_minutes, 240);
    }

    fn random_input(rng: &mut StdRng) -> PlanningInput {
        let tasks: Vec<Task> = (0..7)
            .map(|i| {
                let day = rng.random_range(0..2);
                let start = rng.random_range(8..20) * 60;
                let end = start + rng.random_range(1..=4) * 60;
                let min = rng.random_range(1..=2);
                let task = Task::new(format!("T{i}"), day, start, end).with_min_people(min);
                if rng.random_bool(0.7) {
                    task.with_max_people(min + rng.random_range(0..=1))
                } else {
                    task
                }
            })
            .collect();

        let mut existing = Vec::new();
        let mut pinned = vec![0u32; tasks.len()];
        let people: Vec<Participant> = (0..5)
            .map(|i| {
                let category = WorkloadCategory::ALL[rng.random_range(0..4)];
                let mut p = Participant::new(format!("P{i}"), "RANDOM", category);
                for day in 0..2 {
                    // two touching windows exercise the contiguous-union policy
                    if rng.random_bool(0.8) {
                        let start = rng.random_range(6..14) * 60;
                        let middle = start + rng.random_range(2..=5) * 60;
                        let end = middle + rng.random_range(2..=5) * 60;
                        p = p.with_window(day, start, middle).with_window(day, middle, end);
                    }
                }
                for _ in 0..rng.random_range(0..=3) {
                    p = p.with_obligation(format!("T{}", rng.random_range(0..7)));
                }
                if rng.random_bool(0.25) {
                    let t = rng.random_range(0..tasks.len());
                    if tasks[t].max_people.map_or(true, |max| pinned[t] < max) {
                        pinned[t] += 1;
                        existing.push(ExistingAssignment::new(p.id.clone(), tasks[t].id.clone()));
                    }
                }
                p
            })
            .collect();

        PlanningInput::new(tasks, people, existing).unwrap()
    }

    fn random_config(seed: u64) -> PlannerConfig {
        let minimum = match seed % 3 {
            0 => MinimumHeadcountPolicy::Disabled,
            1 => MinimumHeadcountPolicy::critical(["T0", "T3"]),
            _ => MinimumHeadcountPolicy::All,
        };
        let coverage = if seed % 2 == 0 {
            CoveragePolicy::ContiguousUnion
        } else {
            CoveragePolicy::StrictContainment
        };
        let tie_break = if seed % 4 < 2 {
            ObligationTieBreak::LexicographicId
        } else {
            ObligationTieBreak::EarliestStart
        };
        PlannerConfig::default()
            .with_minimum_headcount(minimum)
            .with_coverage(coverage)
            .with_tie_break(tie_break)
    }

    /// An obligation missing from the roster needs a diagnostic that
    /// explains it: its task was full, or it lost an overlap to a task the
    /// participant holds.
    fn obligation_accounted_for(
        result: &PlanResult,
        input: &PlanningInput,
        participant: &str,
        obligation: &str,
    ) -> bool {
        let roster = &result.roster;
        if roster.is_assigned(participant, obligation) {
            return true;
        }
        let Some(task) = input.task(obligation) else {
            return true;
        };
        result.diagnostics.iter().any(|d| match d {
            Diagnostic::ObligationOverCapacity {
                participant: p,
                task_id,
                ..
            } => {
                p == participant
                    && task_id == obligation
                    && task
                        .max_people
                        .is_some_and(|max| roster.headcount(task_id) >= max as usize)
            }
            Diagnostic::ObligationConflict {
                participant: p,
                kept,
                dropped,
                ..
            } => {
                p == participant
                    && dropped == obligation
                    && roster.is_assigned(participant, kept)
                    && input.task(kept).is_some_and(|k| k.overlaps(task))
            }
            _ => false,
        })
    }

    #[test]
    fn test_random_instances_hold_invariants() {
        init_test();
        let mut solved = 0;

        for seed in 0..40 {
            let config = random_config(seed);
            let planner = Planner::new(config.clone()).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let input = random_input(&mut rng);

            let result = match planner.plan(&input) {
                Ok(result) => result,
                Err(PlannerError::Infeasible { .. }) => {
                    // without hard floors only a pinned overload can block
                    let build = planner.build_model(&input);
                    assert!(
                        config.minimum_headcount != MinimumHeadcountPolicy::Disabled
                            || build.diagnostics.iter().any(Diagnostic::is_blocking),
                        "seed {seed}: infeasible without a cause"
                    );
                    continue;
                }
                Err(e) => panic!("seed {seed}: {e}"),
            };
            solved += 1;
            let roster = &result.roster;

            for task in input.tasks() {
                let headcount = roster.headcount(&task.id);
                if let Some(max) = task.max_people {
                    assert!(headcount <= max as usize, "seed {seed}: {} over capacity", task.id);
                }
                if config.minimum_headcount.enforces(&task.id) {
                    assert!(
                        headcount >= task.min_people as usize,
                        "seed {seed}: {} under its minimum",
                        task.id
                    );
                }
            }

            for e in input.existing() {
                assert!(
                    roster.assignments.iter().any(|a| a.participant == e.participant
                        && a.task_id == e.task_id
                        && a.existing),
                    "seed {seed}: existing {} on {} lost",
                    e.participant,
                    e.task_id
                );
            }

            for p in input.participants() {
                let held = roster.assignments_for_participant(&p.id);
                for (i, a) in held.iter().enumerate() {
                    let ta = input.task(&a.task_id).unwrap();
                    for b in &held[i + 1..] {
                        let tb = input.task(&b.task_id).unwrap();
                        assert!(
                            !ta.overlaps(tb),
                            "seed {seed}: {} holds {} and {}",
                            p.id,
                            ta.id,
                            tb.id
                        );
                    }
                    assert!(
                        a.existing
                            || p.is_obliged_to(&ta.id)
                            || p.availability.covers(ta.day, &ta.window, config.coverage),
                        "seed {seed}: {} not available for {}",
                        p.id,
                        ta.id
                    );
                }

                for obligation in &p.obligations {
                    assert!(
                        obligation_accounted_for(&result, &input, &p.id, obligation),
                        "seed {seed}: {} lost {}",
                        p.id,
                        obligation
                    );
                }
            }

            assert!(result.summary.within_limits(), "seed {seed}: workload ceiling broken");
        }

        assert!(solved > 0, "no random instance was solvable");
    }
}
