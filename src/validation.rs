//! Input validation for roster planning.
//!
//! Checks structural integrity of tasks, participants and existing
//! assignments before a model is built. Detects:
//! - Duplicate task or participant IDs
//! - Empty task windows and inconsistent headcount bounds
//! - Existing assignments referring to unknown tasks or participants
//! - Duplicate existing assignments
//!
//! Obligations naming unknown tasks are not errors; the model builder
//! reports them as diagnostics.

use crate::models::{ExistingAssignment, Participant, Task};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A task window does not end after it starts.
    EmptyWindow,
    /// Minimum headcount is zero or above the maximum.
    InvalidHeadcount,
    /// An existing assignment references a task that doesn't exist.
    UnknownTask,
    /// An existing assignment references a participant that doesn't exist.
    UnknownParticipant,
    /// The same (participant, task) pair is committed twice.
    DuplicateAssignment,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a planning problem.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. No duplicate participant IDs
/// 3. Every task window ends after it starts
/// 4. `1 <= min_people <= max_people` for every task
/// 5. Existing assignments reference known tasks and participants
/// 6. No existing assignment appears twice
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    tasks: &[Task],
    participants: &[Participant],
    existing: &[ExistingAssignment],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        if task.window.end <= task.window.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyWindow,
                format!("Task '{}' has an empty time window", task.id),
            ));
        }

        if task.min_people == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHeadcount,
                format!("Task '{}' has a minimum headcount of 0", task.id),
            ));
        }
        if let Some(max) = task.max_people {
            if max < task.min_people {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidHeadcount,
                    format!(
                        "Task '{}' has maximum headcount {} below minimum {}",
                        task.id, max, task.min_people
                    ),
                ));
            }
        }
    }

    let mut participant_ids = HashSet::new();
    for p in participants {
        if !participant_ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate participant ID: {}", p.id),
            ));
        }
    }

    let mut pairs = HashSet::new();
    for e in existing {
        if !task_ids.contains(e.task_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTask,
                format!(
                    "Existing assignment of '{}' references unknown task '{}'",
                    e.participant, e.task_id
                ),
            ));
        }
        if !participant_ids.contains(e.participant.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownParticipant,
                format!(
                    "Existing assignment to '{}' references unknown participant '{}'",
                    e.task_id, e.participant
                ),
            ));
        }
        if !pairs.insert((e.participant.as_str(), e.task_id.as_str())) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateAssignment,
                format!(
                    "Existing assignment '{}' -> '{}' appears twice",
                    e.participant, e.task_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
