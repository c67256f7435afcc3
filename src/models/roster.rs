//! Roster (solution) model.
//!
//! A roster is the ordered list of participant-task assignments produced by
//! a solve, including pass-through of assignments that were committed
//! before solving.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Participant, Task};

/// A (participant, task) pair committed before solving.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExistingAssignment {
    /// Participant identifier (`"FIRST LAST"`).
    pub participant: String,
    /// Task identifier.
    pub task_id: String,
}

impl ExistingAssignment {
    /// Creates an existing assignment.
    pub fn new(participant: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            task_id: task_id.into(),
        }
    }
}

/// A participant-task assignment, ready for export.
///
/// Field names follow the export columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Participant identifier.
    pub participant: String,
    /// Participant workload label.
    pub participant_workload: String,
    /// Task identifier.
    pub task_id: String,
    /// Task description.
    pub task_description: String,
    /// Task location.
    pub location: Option<String>,
    /// Task minimum headcount.
    pub min_people: u32,
    /// Task maximum headcount.
    pub max_people: Option<u32>,
    /// Date token.
    pub date: String,
    /// Duration token.
    pub duration: String,
    /// Task length in hours, rounded to two decimals.
    pub total_hours: f64,
    /// Event day index.
    pub day: usize,
    /// Task length in minutes.
    #[serde(skip)]
    pub minutes: u32,
    /// Whether this assignment was committed before solving.
    pub existing: bool,
}

impl Assignment {
    /// Creates the export record for `participant` on `task`.
    pub fn new(participant: &Participant, task: &Task, existing: bool) -> Self {
        Self {
            participant: participant.id.clone(),
            participant_workload: participant.category.label().to_string(),
            task_id: task.id.clone(),
            task_description: task.description.clone(),
            location: task.location.clone(),
            min_people: task.min_people,
            max_people: task.max_people,
            date: task.date.clone(),
            duration: task.duration.clone(),
            total_hours: (task.hours() * 100.0).round() / 100.0,
            day: task.day,
            minutes: task.minutes(),
            existing,
        }
    }
}

/// The materialized result of a solve.
///
/// Assignments are ordered by participant input order, then task input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Assignments (existing and new).
    pub assignments: Vec<Assignment>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignments made by this solve (excluding pass-through).
    pub fn new_assignments(&self) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| !a.existing).collect()
    }

    /// All assignments of a participant.
    pub fn assignments_for_participant(&self, participant: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.participant == participant)
            .collect()
    }

    /// All assignments of a task.
    pub fn assignments_for_task(&self, task_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.task_id == task_id)
            .collect()
    }

    /// All assignments on an event day.
    pub fn assignments_on_day(&self, day: usize) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.day == day).collect()
    }

    /// Whether `participant` holds `task_id`.
    pub fn is_assigned(&self, participant: &str, task_id: &str) -> bool {
        self.assignments
            .iter()
            .any(|a| a.participant == participant && a.task_id == task_id)
    }

    /// Headcount of a task.
    pub fn headcount(&self, task_id: &str) -> usize {
        self.assignments_for_task(task_id).len()
    }

    /// Total assigned minutes of a participant.
    pub fn minutes_for(&self, participant: &str) -> u32 {
        self.assignments_for_participant(participant)
            .iter()
            .map(|a| a.minutes)
            .sum()
    }

    /// Assigned minutes of a participant per day.
    pub fn minutes_by_day(&self, participant: &str) -> BTreeMap<usize, u32> {
        let mut by_day = BTreeMap::new();
        for a in self.assignments_for_participant(participant) {
            *by_day.entry(a.day).or_insert(0) += a.minutes;
        }
        by_day
    }
}
