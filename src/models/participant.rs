//! Participant model.
//!
//! Participants are the people staffed onto tasks. Each carries a workload
//! category (whose minute ceilings live in the planner configuration), a
//! list of obligations and per-day availability.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Availability;

/// Workload tier of a participant.
///
/// Controls the total (and for `FixedQuota`, daily) permissible minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorkloadCategory {
    /// Works the most hours.
    High,
    /// Works a moderate number of hours.
    Medium,
    /// Works the fewest hours.
    Low,
    /// Fixed-quota tier with an additional per-day ceiling (`SNU` in event sheets).
    FixedQuota,
}

impl WorkloadCategory {
    /// All categories, in table order.
    pub const ALL: [WorkloadCategory; 4] = [Self::High, Self::Medium, Self::Low, Self::FixedQuota];

    /// Label as written in event sheets.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::FixedQuota => "SNU",
        }
    }
}

impl fmt::Display for WorkloadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WorkloadCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "snu" | "fixedquota" | "fixed_quota" => Ok(Self::FixedQuota),
            other => Err(other.to_string()),
        }
    }
}

/// A person eligible for assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier, `"FIRST LAST"`.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Workload tier.
    pub category: WorkloadCategory,
    /// Task IDs this participant must perform, in sheet order.
    pub obligations: Vec<String>,
    /// Per-day availability.
    pub availability: Availability,
}

impl Participant {
    /// Creates a participant; the identifier is `"{first} {last}"`.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        category: WorkloadCategory,
    ) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        Self {
            id: Self::make_id(&first_name, &last_name),
            first_name,
            last_name,
            category,
            obligations: Vec::new(),
            availability: Availability::new(),
        }
    }

    /// Builds the identifier used for obligation and assignment matching.
    pub fn make_id(first_name: &str, last_name: &str) -> String {
        format!("{} {}", first_name.trim(), last_name.trim())
    }

    /// Adds an obligation.
    pub fn with_obligation(mut self, task_id: impl Into<String>) -> Self {
        self.obligations.push(task_id.into());
        self
    }

    /// Adds an availability window on `day`.
    pub fn with_window(mut self, day: usize, start: u32, end: u32) -> Self {
        self.availability = self.availability.with_window(day, start, end);
        self
    }

    /// Replaces the availability.
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Whether `task_id` is one of this participant's obligations.
    pub fn is_obliged_to(&self, task_id: &str) -> bool {
        self.obligations.iter().any(|o| o == task_id)
    }
}
