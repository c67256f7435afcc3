//! Pre-solve staffing report.
//!
//! A read-only view of the input before solving: how full each task
//! already is and how much availability each participant brings.

use serde::Serialize;

use super::planner::PlanningInput;
use crate::config::PlannerConfig;
use crate::models::WorkloadCategory;

/// Staffing state of one task before solving.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStaffing {
    pub task_id: String,
    pub day: usize,
    pub existing: u32,
    pub min_people: u32,
    pub max_people: Option<u32>,
    /// Whether the minimum is enforced for this task.
    pub minimum_enforced: bool,
}

impl TaskStaffing {
    /// Slots left, `None` when unbounded.
    pub fn remaining(&self) -> Option<i64> {
        self.max_people
            .map(|max| i64::from(max) - i64::from(self.existing))
    }

    /// Whether existing assignments already fill the task.
    pub fn is_full(&self) -> bool {
        matches!(self.remaining(), Some(r) if r <= 0)
    }

    /// Whether existing assignments fall short of the minimum.
    pub fn is_understaffed(&self) -> bool {
        self.existing < self.min_people
    }
}

/// What one participant brings before solving.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantCapacity {
    pub participant: String,
    pub category: WorkloadCategory,
    /// Available minutes over all event days.
    pub available_minutes: u32,
    pub existing: usize,
    pub obligations: Vec<String>,
}

/// Pre-solve report over a whole input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreSolveReport {
    pub tasks: Vec<TaskStaffing>,
    pub participants: Vec<ParticipantCapacity>,
}

impl PreSolveReport {
    /// Computes the report.
    pub fn compute(input: &PlanningInput, config: &PlannerConfig) -> Self {
        let tasks = input
            .tasks()
            .iter()
            .map(|task| TaskStaffing {
                task_id: task.id.clone(),
                day: task.day,
                existing: input.existing_count(&task.id),
                min_people: task.min_people,
                max_people: task.max_people,
                minimum_enforced: config.minimum_headcount.enforces(&task.id),
            })
            .collect();

        let participants = input
            .participants()
            .iter()
            .map(|p| ParticipantCapacity {
                participant: p.id.clone(),
                category: p.category,
                available_minutes: p.availability.total_minutes(),
                existing: input
                    .existing()
                    .iter()
                    .filter(|e| e.participant == p.id)
                    .count(),
                obligations: p.obligations.clone(),
            })
            .collect();

        Self { tasks, participants }
    }

    /// Tasks without any existing assignment.
    pub fn unassigned_tasks(&self) -> impl Iterator<Item = &TaskStaffing> {
        self.tasks.iter().filter(|t| t.existing == 0)
    }

    /// Tasks already at capacity.
    pub fn full_tasks(&self) -> impl Iterator<Item = &TaskStaffing> {
        self.tasks.iter().filter(|t| t.is_full())
    }

    /// Participants without existing assignments.
    pub fn participants_without_existing(&self) -> impl Iterator<Item = &ParticipantCapacity> {
        self.participants.iter().filter(|p| p.existing == 0)
    }

    /// Participants of one category.
    pub fn participants_in(
        &self,
        category: WorkloadCategory,
    ) -> impl Iterator<Item = &ParticipantCapacity> {
        self.participants
            .iter()
            .filter(move |p| p.category == category)
    }
}
