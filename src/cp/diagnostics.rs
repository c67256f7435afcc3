//! Conflicts and anomalies found while building a model.

use serde::Serialize;
use std::fmt;

/// A non-fatal finding reported alongside the model.
///
/// Diagnostics never stop a build. Some (e.g. [`Diagnostic::CoverageUnreachable`])
/// predict that the engine will find no roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An obligation names a task that does not exist. Ignored.
    UnknownObligation { participant: String, task_id: String },
    /// An obligation arrived after the task was already full. Rejected.
    ObligationOverCapacity {
        participant: String,
        task_id: String,
        max_people: u32,
    },
    /// Two pinned tasks of one participant overlap; `dropped` lost the tie-break.
    ObligationConflict {
        participant: String,
        kept: String,
        dropped: String,
        rule: String,
    },
    /// Two existing assignments of one participant overlap. Both are kept.
    ExistingOverlap {
        participant: String,
        first: String,
        second: String,
    },
    /// Fewer candidates remain than the enforced minimum needs.
    CoverageUnreachable {
        task_id: String,
        needed: u32,
        candidates: usize,
    },
    /// Pinned assignments alone exceed a workload ceiling.
    PinnedWorkloadExceeded {
        participant: String,
        day: Option<usize>,
        pinned_minutes: u32,
        ceiling: u32,
    },
}

impl Diagnostic {
    /// Whether this finding makes the model infeasible.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Self::CoverageUnreachable { .. } | Self::PinnedWorkloadExceeded { .. }
        )
    }

    /// Participant the finding concerns, if any.
    pub fn participant(&self) -> Option<&str> {
        match self {
            Self::UnknownObligation { participant, .. }
            | Self::ObligationOverCapacity { participant, .. }
            | Self::ObligationConflict { participant, .. }
            | Self::ExistingOverlap { participant, .. }
            | Self::PinnedWorkloadExceeded { participant, .. } => Some(participant),
            Self::CoverageUnreachable { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownObligation {
                participant,
                task_id,
            } => write!(f, "{participant}: obligation to unknown task {task_id} ignored"),
            Self::ObligationOverCapacity {
                participant,
                task_id,
                max_people,
            } => write!(
                f,
                "{participant}: obligation to {task_id} rejected, \
                 task already at capacity ({max_people})"
            ),
            Self::ObligationConflict {
                participant,
                kept,
                dropped,
                rule,
            } => write!(
                f,
                "{participant}: {dropped} overlaps {kept}, keeping {kept} ({rule})"
            ),
            Self::ExistingOverlap {
                participant,
                first,
                second,
            } => write!(
                f,
                "{participant}: existing assignments {first} and {second} overlap"
            ),
            Self::CoverageUnreachable {
                task_id,
                needed,
                candidates,
            } => write!(
                f,
                "{task_id}: needs {needed} more participant(s), only {candidates} candidate(s)"
            ),
            Self::PinnedWorkloadExceeded {
                participant,
                day,
                pinned_minutes,
                ceiling,
            } => match day {
                Some(day) => write!(
                    f,
                    "{participant}: pinned {pinned_minutes} min on day {day} exceeds {ceiling} min"
                ),
                None => write!(
                    f,
                    "{participant}: pinned {pinned_minutes} min exceeds {ceiling} min"
                ),
            },
        }
    }
}
