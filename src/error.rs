//! Crate error type.
//!
//! Input malformation fails fast with an error naming the offending record.
//! Recoverable conditions (unsatisfiable or conflicting obligations) are
//! not errors; they surface as [`Diagnostic`](crate::cp::Diagnostic)s.

use thiserror::Error;

use crate::solver::SolveStatus;
use crate::validation::ValidationError;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Errors raised while loading, building, or solving a roster.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("malformed time token '{token}': {reason}")]
    MalformedTimeToken { token: String, reason: String },

    #[error("malformed duration token '{token}': {reason}")]
    MalformedDuration { token: String, reason: String },

    #[error("{record}: missing required field '{field}'")]
    MissingField { record: String, field: String },

    #[error("{record}: invalid value '{value}' for field '{field}': {reason}")]
    InvalidField {
        record: String,
        field: String,
        value: String,
        reason: String,
    },

    #[error("{record}: unknown workload category '{label}'")]
    UnknownCategory { record: String, label: String },

    #[error("{record}: date '{date}' is not part of the event calendar")]
    UnknownDate { record: String, date: String },

    #[error("invalid planning input ({} problem(s)): {}", .0.len(), join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),

    #[error("no roster found: solving engine reported {status}")]
    Infeasible { status: SolveStatus },

    #[error("solving engine failure: {0}")]
    Engine(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl PlannerError {
    pub(crate) fn time_token(token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTimeToken {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn duration(token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDuration {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error stems from malformed input rather than the solve.
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            Self::Infeasible { .. } | Self::Engine(_) | Self::InvalidConfig(_)
        )
    }
}
