//! Assignment model construction.
//!
//! Turns tasks, participants and existing assignments into an
//! [`AssignmentModel`]. Every (participant, task) pair gets exactly one
//! variable whose state is resolved before any constraint is emitted:
//!
//! 1. Existing assignments are pinned true and never dropped.
//! 2. Each participant's pins are ranked (existing first, then the
//!    configured tie-break). An obligation overlapping a higher-ranked kept
//!    pin is dropped.
//! 3. Surviving obligations take task capacity in participant order; one
//!    arriving at a full task is rejected.
//! 4. Remaining pairs are excluded when the task is full, when availability
//!    does not cover the task, or when the task overlaps a kept pin.
//!
//! Constraints then only mention variables that can still be true.
//!
//! # Reference
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use tracing::{debug, warn};

use super::diagnostics::Diagnostic;
use super::model::{
    AssignmentModel, AssignmentVariable, Comparison, ConstraintKind, Exclusion, LinearConstraint,
    VarId, VariableState,
};
use crate::config::PlannerConfig;
use crate::models::{ExistingAssignment, Participant, Task};

/// A built model plus the findings collected while building it.
#[derive(Debug, Clone)]
pub struct ModelBuild {
    pub model: AssignmentModel,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds an assignment model from roster domain objects.
///
/// # Example
/// ```
/// use u_roster::config::PlannerConfig;
/// use u_roster::cp::AssignmentModelBuilder;
/// use u_roster::models::{Participant, Task, WorkloadCategory};
///
/// let tasks = vec![Task::new("A1", 0, 540, 660).with_max_people(1)];
/// let people = vec![
///     Participant::new("Xavier", "ROUX", WorkloadCategory::High).with_window(0, 480, 720),
/// ];
/// let config = PlannerConfig::default();
/// let build = AssignmentModelBuilder::new(&tasks, &people, &config).build();
/// assert_eq!(build.model.variable_count(), 1);
/// ```
pub struct AssignmentModelBuilder<'a> {
    tasks: &'a [Task],
    participants: &'a [Participant],
    existing: &'a [ExistingAssignment],
    config: &'a PlannerConfig,
}

impl<'a> AssignmentModelBuilder<'a> {
    /// Creates a builder without existing assignments.
    pub fn new(
        tasks: &'a [Task],
        participants: &'a [Participant],
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            tasks,
            participants,
            existing: &[],
            config,
        }
    }

    /// Sets the assignments committed before this run.
    pub fn with_existing(mut self, existing: &'a [ExistingAssignment]) -> Self {
        self.existing = existing;
        self
    }

    /// Builds the model.
    ///
    /// Creates:
    /// - A variable per (participant, task) pair, with its resolved state
    /// - `Coverage` floors for tasks whose minimum is enforced
    /// - `Capacity` ceilings for tasks with a maximum
    /// - `Overlap` exclusions for each free pair of overlapping tasks
    /// - `Workload` ceilings per participant, `DailyWorkload` where the
    ///   category has a daily limit
    pub fn build(&self) -> ModelBuild {
        let mut diagnostics = Vec::new();
        let task_count = self.tasks.len();
        let idx = |p: usize, t: usize| p * task_count + t;

        let task_index: HashMap<&str, usize> = self
            .tasks
            .iter()
            .enumerate()
            .map(|(t, task)| (task.id.as_str(), t))
            .collect();
        let participant_index: HashMap<&str, usize> = self
            .participants
            .iter()
            .enumerate()
            .map(|(p, participant)| (participant.id.as_str(), p))
            .collect();

        let mut states = vec![VariableState::Free; self.participants.len() * task_count];

        // Existing pins
        let mut existing_count = vec![0u32; task_count];
        for e in self.existing {
            let (Some(&p), Some(&t)) = (
                participant_index.get(e.participant.as_str()),
                task_index.get(e.task_id.as_str()),
            ) else {
                warn!(
                    participant = %e.participant,
                    task = %e.task_id,
                    "existing assignment references unknown entity, skipped"
                );
                continue;
            };
            if states[idx(p, t)] != VariableState::Existing {
                states[idx(p, t)] = VariableState::Existing;
                existing_count[t] += 1;
            }
        }

        // Obligations, then overlapping pins, per participant in rank order.
        // Only a kept obligation takes a slot, so a task keeps its capacity
        // for later participants when an earlier one drops it in a conflict.
        let tie_break = &self.config.tie_break;
        let mut honored = vec![0i64; task_count];
        let mut kept_pins: Vec<Vec<usize>> = Vec::with_capacity(self.participants.len());
        for (p, participant) in self.participants.iter().enumerate() {
            for task_id in participant.obligations.iter().unique() {
                let Some(&t) = task_index.get(task_id.as_str()) else {
                    warn!(
                        participant = %participant.id,
                        task = %task_id,
                        "obligation to unknown task ignored"
                    );
                    diagnostics.push(Diagnostic::UnknownObligation {
                        participant: participant.id.clone(),
                        task_id: task_id.clone(),
                    });
                    continue;
                };
                if states[idx(p, t)] != VariableState::Existing {
                    states[idx(p, t)] = VariableState::Obligation;
                }
            }

            let pinned: Vec<usize> = (0..task_count)
                .filter(|&t| states[idx(p, t)].is_pinned())
                .sorted_by(|&a, &b| {
                    let a_existing = states[idx(p, a)] == VariableState::Existing;
                    let b_existing = states[idx(p, b)] == VariableState::Existing;
                    b_existing
                        .cmp(&a_existing)
                        .then_with(|| tie_break.compare(&self.tasks[a], &self.tasks[b]))
                })
                .collect();

            let mut kept: Vec<usize> = Vec::with_capacity(pinned.len());
            for t in pinned {
                let task = &self.tasks[t];
                let clash = kept.iter().copied().find(|&k| self.tasks[k].overlaps(task));
                let existing = states[idx(p, t)] == VariableState::Existing;
                if existing {
                    if let Some(k) = clash {
                        warn!(
                            participant = %participant.id,
                            first = %self.tasks[k].id,
                            second = %task.id,
                            "existing assignments overlap"
                        );
                        diagnostics.push(Diagnostic::ExistingOverlap {
                            participant: participant.id.clone(),
                            first: self.tasks[k].id.clone(),
                            second: task.id.clone(),
                        });
                    }
                    kept.push(t);
                } else if let Some(k) = clash {
                    warn!(
                        participant = %participant.id,
                        kept = %self.tasks[k].id,
                        dropped = %task.id,
                        rule = tie_break.name(),
                        "overlapping obligation dropped"
                    );
                    states[idx(p, t)] = VariableState::Excluded(Exclusion::ObligationConflict);
                    diagnostics.push(Diagnostic::ObligationConflict {
                        participant: participant.id.clone(),
                        kept: self.tasks[k].id.clone(),
                        dropped: task.id.clone(),
                        rule: tie_break.name().to_string(),
                    });
                } else if matches!(
                    task.remaining_capacity(existing_count[t]),
                    Some(remaining) if honored[t] >= remaining
                ) {
                    warn!(
                        participant = %participant.id,
                        task = %task.id,
                        "obligation rejected, task already at capacity"
                    );
                    states[idx(p, t)] = VariableState::Excluded(Exclusion::ObligationOverCapacity);
                    diagnostics.push(Diagnostic::ObligationOverCapacity {
                        participant: participant.id.clone(),
                        task_id: task.id.clone(),
                        max_people: task.max_people.unwrap_or_default(),
                    });
                } else {
                    honored[t] += 1;
                    kept.push(t);
                }
            }
            kept_pins.push(kept);
        }

        // Exclusions for the remaining free pairs
        for (t, task) in self.tasks.iter().enumerate() {
            let exhausted = matches!(
                task.remaining_capacity(existing_count[t]),
                Some(remaining) if remaining <= 0
            );
            if exhausted {
                debug!(task = %task.id, "capacity exhausted by existing assignments");
            }
            for (p, participant) in self.participants.iter().enumerate() {
                if states[idx(p, t)] != VariableState::Free {
                    continue;
                }
                let exclusion = if exhausted {
                    Some(Exclusion::CapacityExhausted)
                } else if !participant
                    .availability
                    .covers(task.day, &task.window, self.config.coverage)
                {
                    Some(Exclusion::Unavailable)
                } else if kept_pins[p].iter().any(|&k| self.tasks[k].overlaps(task)) {
                    Some(Exclusion::OverlapsPinned)
                } else {
                    None
                };
                if let Some(exclusion) = exclusion {
                    states[idx(p, t)] = VariableState::Excluded(exclusion);
                }
            }
        }

        let variables: Vec<AssignmentVariable> = (0..self.participants.len())
            .cartesian_product(0..task_count)
            .map(|(p, t)| AssignmentVariable {
                id: VarId(idx(p, t)),
                participant: p,
                task: t,
                minutes: self.tasks[t].minutes(),
                state: states[idx(p, t)],
            })
            .collect();

        let mut constraints = Vec::new();
        self.add_headcount_constraints(
            &variables,
            &existing_count,
            &mut constraints,
            &mut diagnostics,
        );
        self.add_overlap_constraints(&states, &mut constraints);
        self.add_workload_constraints(&variables, &mut constraints, &mut diagnostics);

        let model =
            AssignmentModel::new(self.participants.len(), task_count, variables, constraints);
        debug!(
            variables = model.variable_count(),
            free = model.free_count(),
            constraints = model.constraints().len(),
            diagnostics = diagnostics.len(),
            "assignment model built"
        );

        ModelBuild { model, diagnostics }
    }

    /// Coverage floors and capacity ceilings, over new assignments only.
    fn add_headcount_constraints(
        &self,
        variables: &[AssignmentVariable],
        existing_count: &[u32],
        constraints: &mut Vec<LinearConstraint>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let task_count = self.tasks.len();
        for (t, task) in self.tasks.iter().enumerate() {
            let new_terms: Vec<(VarId, i64)> = (0..self.participants.len())
                .map(|p| &variables[p * task_count + t])
                .filter(|v| v.state.may_be_true() && v.state.is_new())
                .map(|v| (v.id, 1))
                .collect();

            let needed = task.min_people.saturating_sub(existing_count[t]);
            if needed > 0 && self.config.minimum_headcount.enforces(&task.id) {
                if new_terms.len() < needed as usize {
                    warn!(
                        task = %task.id,
                        needed,
                        candidates = new_terms.len(),
                        "minimum headcount cannot be reached"
                    );
                    diagnostics.push(Diagnostic::CoverageUnreachable {
                        task_id: task.id.clone(),
                        needed,
                        candidates: new_terms.len(),
                    });
                }
                constraints.push(LinearConstraint {
                    kind: ConstraintKind::Coverage,
                    label: format!("coverage[{}]", task.id),
                    terms: new_terms.clone(),
                    comparison: Comparison::GreaterOrEqual,
                    rhs: i64::from(needed),
                });
            }

            if let Some(remaining) = task.remaining_capacity(existing_count[t]) {
                if remaining > 0 && !new_terms.is_empty() {
                    constraints.push(LinearConstraint {
                        kind: ConstraintKind::Capacity,
                        label: format!("capacity[{}]", task.id),
                        terms: new_terms,
                        comparison: Comparison::LessOrEqual,
                        rhs: remaining,
                    });
                }
            }
        }
    }

    /// `x[p,a] + x[p,b] <= 1` for overlapping tasks left free for `p`.
    fn add_overlap_constraints(
        &self,
        states: &[VariableState],
        constraints: &mut Vec<LinearConstraint>,
    ) {
        let task_count = self.tasks.len();
        let overlapping: Vec<(usize, usize)> = (0..task_count)
            .tuple_combinations()
            .filter(|&(a, b)| self.tasks[a].overlaps(&self.tasks[b]))
            .collect();

        for (p, participant) in self.participants.iter().enumerate() {
            for &(a, b) in &overlapping {
                let (va, vb) = (p * task_count + a, p * task_count + b);
                if states[va] == VariableState::Free && states[vb] == VariableState::Free {
                    constraints.push(LinearConstraint {
                        kind: ConstraintKind::Overlap,
                        label: format!(
                            "overlap[{}|{}|{}]",
                            participant.id, self.tasks[a].id, self.tasks[b].id
                        ),
                        terms: vec![(VarId(va), 1), (VarId(vb), 1)],
                        comparison: Comparison::LessOrEqual,
                        rhs: 1,
                    });
                }
            }
        }
    }

    /// Total and daily minute ceilings, pinned assignments included.
    fn add_workload_constraints(
        &self,
        variables: &[AssignmentVariable],
        constraints: &mut Vec<LinearConstraint>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let task_count = self.tasks.len();
        for (p, participant) in self.participants.iter().enumerate() {
            let limit = self.config.workload.limit(participant.category);
            let live: Vec<&AssignmentVariable> = variables[p * task_count..(p + 1) * task_count]
                .iter()
                .filter(|v| v.state.may_be_true())
                .collect();
            if live.is_empty() {
                continue;
            }

            let pinned: u32 = pinned_minutes(&live);
            if pinned > limit.max_minutes {
                warn!(
                    participant = %participant.id,
                    pinned,
                    ceiling = limit.max_minutes,
                    "pinned workload over ceiling"
                );
                diagnostics.push(Diagnostic::PinnedWorkloadExceeded {
                    participant: participant.id.clone(),
                    day: None,
                    pinned_minutes: pinned,
                    ceiling: limit.max_minutes,
                });
            }
            constraints.push(LinearConstraint {
                kind: ConstraintKind::Workload,
                label: format!("workload[{}]", participant.id),
                terms: live.iter().map(|v| (v.id, i64::from(v.minutes))).collect(),
                comparison: Comparison::LessOrEqual,
                rhs: i64::from(limit.max_minutes),
            });

            let Some(daily_max) = limit.daily_max_minutes else {
                continue;
            };
            let mut by_day: BTreeMap<usize, Vec<&AssignmentVariable>> = BTreeMap::new();
            for &v in &live {
                by_day.entry(self.tasks[v.task].day).or_default().push(v);
            }
            for (day, day_vars) in by_day {
                let pinned = pinned_minutes(&day_vars);
                if pinned > daily_max {
                    warn!(
                        participant = %participant.id,
                        day,
                        pinned,
                        ceiling = daily_max,
                        "pinned daily workload over ceiling"
                    );
                    diagnostics.push(Diagnostic::PinnedWorkloadExceeded {
                        participant: participant.id.clone(),
                        day: Some(day),
                        pinned_minutes: pinned,
                        ceiling: daily_max,
                    });
                }
                constraints.push(LinearConstraint {
                    kind: ConstraintKind::DailyWorkload,
                    label: format!("daily_workload[{}|{}]", participant.id, day),
                    terms: day_vars.iter().map(|v| (v.id, i64::from(v.minutes))).collect(),
                    comparison: Comparison::LessOrEqual,
                    rhs: i64::from(daily_max),
                });
            }
        }
    }
}

fn pinned_minutes(vars: &[&AssignmentVariable]) -> u32 {
    vars.iter()
        .filter(|v| v.state.is_pinned())
        .map(|v| v.minutes)
        .sum()
}
