//! Planner configuration.
//!
//! Everything that decides *how* a roster is planned lives here as data:
//! workload ceilings per category, the event calendar, and the named
//! policies for coverage, minimum headcount, objective and obligation
//! conflicts. The configuration is validated once before model building.
//!
//! # Defaults
//!
//! | Category | Target | Ceiling | Daily ceiling |
//! |----------|--------|---------|---------------|
//! | High | 15 h | 20 h | - |
//! | Medium | 12 h | 16 h | - |
//! | Low | 8 h | 12 h | - |
//! | FixedQuota (SNU) | 21 h | 24 h | 8 h |

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use crate::error::{PlannerError, Result};
use crate::models::{CoveragePolicy, EventCalendar, Task, UnknownDatePolicy, WorkloadCategory};

/// Minute limits of one workload category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadLimit {
    /// Intended total minutes (used by the load-balancing objective).
    pub target_minutes: u32,
    /// Hard ceiling on total assigned minutes.
    pub max_minutes: u32,
    /// Hard ceiling per event day. Only the fixed-quota tier has one.
    #[serde(default)]
    pub daily_max_minutes: Option<u32>,
}

impl WorkloadLimit {
    /// Creates a limit without a daily ceiling.
    pub const fn new(target_minutes: u32, max_minutes: u32) -> Self {
        Self {
            target_minutes,
            max_minutes,
            daily_max_minutes: None,
        }
    }

    /// Adds a daily ceiling.
    pub const fn with_daily_max(mut self, minutes: u32) -> Self {
        self.daily_max_minutes = Some(minutes);
        self
    }
}

/// Category → limit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadTable {
    pub high: WorkloadLimit,
    pub medium: WorkloadLimit,
    pub low: WorkloadLimit,
    pub fixed_quota: WorkloadLimit,
}

impl Default for WorkloadTable {
    fn default() -> Self {
        Self {
            high: WorkloadLimit::new(15 * 60, 20 * 60),
            medium: WorkloadLimit::new(12 * 60, 16 * 60),
            low: WorkloadLimit::new(8 * 60, 12 * 60),
            fixed_quota: WorkloadLimit::new(21 * 60, 24 * 60).with_daily_max(8 * 60),
        }
    }
}

impl WorkloadTable {
    /// Limit of a category.
    pub fn limit(&self, category: WorkloadCategory) -> &WorkloadLimit {
        match category {
            WorkloadCategory::High => &self.high,
            WorkloadCategory::Medium => &self.medium,
            WorkloadCategory::Low => &self.low,
            WorkloadCategory::FixedQuota => &self.fixed_quota,
        }
    }

    /// Overrides the limit of a category.
    pub fn with_limit(mut self, category: WorkloadCategory, limit: WorkloadLimit) -> Self {
        let slot = match category {
            WorkloadCategory::High => &mut self.high,
            WorkloadCategory::Medium => &mut self.medium,
            WorkloadCategory::Low => &mut self.low,
            WorkloadCategory::FixedQuota => &mut self.fixed_quota,
        };
        *slot = limit;
        self
    }

    fn validate(&self, problems: &mut Vec<String>) {
        for category in WorkloadCategory::ALL {
            let limit = self.limit(category);
            if limit.max_minutes == 0 {
                problems.push(format!("{category}: ceiling must be positive"));
            }
            match (category, limit.daily_max_minutes) {
                (WorkloadCategory::FixedQuota, None) => {
                    problems.push(format!("{category}: fixed-quota tier needs a daily ceiling"));
                }
                (WorkloadCategory::FixedQuota, Some(0)) => {
                    problems.push(format!("{category}: daily ceiling must be positive"));
                }
                (WorkloadCategory::FixedQuota, Some(_)) => {}
                (_, Some(_)) => {
                    problems.push(format!(
                        "{category}: only the fixed-quota tier has a daily ceiling"
                    ));
                }
                (_, None) => {}
            }
        }
    }
}

/// Which tasks get a hard minimum-headcount floor.
///
/// A floor on every task easily makes the whole model infeasible, so the
/// default enforces it only on an operator-designated critical subset; other
/// tasks are staffed best-effort through the coverage objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "enforce", rename_all = "snake_case")]
pub enum MinimumHeadcountPolicy {
    /// Every task below its minimum gets a hard floor.
    All,
    /// Only the listed tasks get a hard floor.
    CriticalOnly { tasks: BTreeSet<String> },
    /// No hard floor at all.
    Disabled,
}

impl Default for MinimumHeadcountPolicy {
    fn default() -> Self {
        Self::CriticalOnly {
            tasks: BTreeSet::new(),
        }
    }
}

impl MinimumHeadcountPolicy {
    /// Critical-only policy over the given task IDs.
    pub fn critical<I, S>(tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::CriticalOnly {
            tasks: tasks.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the minimum of `task_id` is a hard floor.
    pub fn enforces(&self, task_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::CriticalOnly { tasks } => tasks.contains(task_id),
            Self::Disabled => false,
        }
    }
}

/// Secondary objective term, added to "maximize assignments".
///
/// The secondary term is normalized so it never outweighs one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ObjectivePolicy {
    /// Reward assigned minutes: prefer fuller schedules among equal coverage.
    RewardDuration { weight: f64 },
    /// Penalize minutes relative to each participant's target: spread load.
    BalanceLoad { weight: f64 },
}

impl Default for ObjectivePolicy {
    fn default() -> Self {
        Self::RewardDuration { weight: 0.1 }
    }
}

impl ObjectivePolicy {
    /// Weight of the secondary term.
    pub fn weight(&self) -> f64 {
        match self {
            Self::RewardDuration { weight } | Self::BalanceLoad { weight } => *weight,
        }
    }
}

/// Which obligation survives when two of a participant's obligations overlap.
///
/// Every policy falls back to the task identifier, so the outcome is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ObligationTieBreak {
    /// Lexicographically smaller task ID wins.
    #[default]
    LexicographicId,
    /// Earlier start wins.
    EarliestStart,
    /// Earlier position in `order` wins; unlisted tasks rank last.
    ExplicitPriority { order: Vec<String> },
}

impl ObligationTieBreak {
    /// Rule name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LexicographicId => "lexicographic-id",
            Self::EarliestStart => "earliest-start",
            Self::ExplicitPriority { .. } => "explicit-priority",
        }
    }

    /// Orders two tasks; `Less` means `a` wins.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let primary = match self {
            Self::LexicographicId => Ordering::Equal,
            Self::EarliestStart => a.window.start.cmp(&b.window.start),
            Self::ExplicitPriority { order } => {
                let rank = |id: &str| order.iter().position(|o| o == id).unwrap_or(usize::MAX);
                rank(&a.id).cmp(&rank(&b.id))
            }
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Options passed to the solving engine at invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock limit in seconds on waiting for the engine.
    #[serde(default)]
    pub time_limit_secs: Option<f64>,
    /// Random seed, if the engine supports one.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SolverConfig {
    /// The time limit as a duration; `None` when unset or not representable.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: None,
            seed: Some(42),
        }
    }
}

/// Complete planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub workload: WorkloadTable,
    pub calendar: EventCalendar,
    pub coverage: CoveragePolicy,
    pub minimum_headcount: MinimumHeadcountPolicy,
    pub objective: ObjectivePolicy,
    pub tie_break: ObligationTieBreak,
    pub unknown_date: UnknownDatePolicy,
    pub solver: SolverConfig,
}

impl PlannerConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workload(mut self, workload: WorkloadTable) -> Self {
        self.workload = workload;
        self
    }

    pub fn with_calendar(mut self, calendar: EventCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_coverage(mut self, coverage: CoveragePolicy) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_minimum_headcount(mut self, policy: MinimumHeadcountPolicy) -> Self {
        self.minimum_headcount = policy;
        self
    }

    pub fn with_objective(mut self, objective: ObjectivePolicy) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_tie_break(mut self, tie_break: ObligationTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_unknown_date(mut self, policy: UnknownDatePolicy) -> Self {
        self.unknown_date = policy;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// [`PlannerError::InvalidConfig`] listing every problem found.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        self.workload.validate(&mut problems);

        let weight = self.objective.weight();
        if !(weight > 0.0 && weight < 1.0) {
            problems.push(format!("objective weight {weight} must lie in (0, 1)"));
        }

        if self.calendar.days.is_empty() {
            problems.push("event calendar has no days".to_string());
        }
        let mut dates = HashSet::new();
        for day in &self.calendar.days {
            if !dates.insert(day.date.as_str()) {
                problems.push(format!("duplicate calendar date {}", day.date));
            }
        }

        if let Some(limit) = self.solver.time_limit_secs {
            if !(limit > 0.0 && limit.is_finite()) {
                problems.push(format!("time limit {limit} must be positive and finite"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(PlannerError::InvalidConfig(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDay;

    #[test]
    fn test_default_config_is_valid() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.workload.limit(WorkloadCategory::High).max_minutes, 1200);
        assert_eq!(
            config.workload.limit(WorkloadCategory::FixedQuota).daily_max_minutes,
            Some(480)
        );
        assert_eq!(config.coverage, CoveragePolicy::ContiguousUnion);
        assert_eq!(config.tie_break, ObligationTieBreak::LexicographicId);
    }

    #[test]
    fn test_workload_table_validation() {
        let table = WorkloadTable::default()
            .with_limit(WorkloadCategory::Low, WorkloadLimit::new(60, 0))
            .with_limit(WorkloadCategory::High, WorkloadLimit::new(60, 120).with_daily_max(60))
            .with_limit(WorkloadCategory::FixedQuota, WorkloadLimit::new(60, 120));
        let err = PlannerConfig::new().with_workload(table).validate().unwrap_err();
        let PlannerError::InvalidConfig(message) = err else {
            panic!("expected InvalidConfig");
        };
        assert!(message.contains("Low: ceiling must be positive"));
        assert!(message.contains("High: only the fixed-quota tier"));
        assert!(message.contains("SNU: fixed-quota tier needs a daily ceiling"));
    }

    #[test]
    fn test_objective_weight_bounds() {
        for weight in [0.0, 1.0, 2.5, -0.1] {
            let config =
                PlannerConfig::new().with_objective(ObjectivePolicy::BalanceLoad { weight });
            assert!(config.validate().is_err(), "weight {weight}");
        }
        let config =
            PlannerConfig::new().with_objective(ObjectivePolicy::BalanceLoad { weight: 0.5 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_time_limit_validation() {
        for limit in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let config = PlannerConfig::new().with_solver(SolverConfig {
                time_limit_secs: Some(limit),
                seed: None,
            });
            assert!(config.validate().is_err(), "limit {limit}");
        }
        let solver = SolverConfig {
            time_limit_secs: Some(2.5),
            seed: None,
        };
        assert_eq!(solver.time_limit(), Some(Duration::from_millis(2500)));
        assert_eq!(SolverConfig::default().time_limit(), None);
    }

    #[test]
    fn test_calendar_validation() {
        let empty = PlannerConfig::new().with_calendar(EventCalendar::new(vec![]));
        assert!(empty.validate().is_err());

        let duplicated = PlannerConfig::new().with_calendar(EventCalendar::new(vec![
            EventDay::new("01/06/2026", "Mon", "AVAIL_MON"),
            EventDay::new("01/06/2026", "Mon again", "AVAIL_MON2"),
        ]));
        assert!(duplicated.validate().is_err());
    }

    #[test]
    fn test_minimum_headcount_policy() {
        assert!(MinimumHeadcountPolicy::All.enforces("X"));
        assert!(!MinimumHeadcountPolicy::Disabled.enforces("X"));
        let critical = MinimumHeadcountPolicy::critical(["SAT15", "FRI5"]);
        assert!(critical.enforces("SAT15"));
        assert!(!critical.enforces("SAT16"));
        assert!(!MinimumHeadcountPolicy::default().enforces("SAT15"));
    }

    #[test]
    fn test_tie_break_rules() {
        let b2 = Task::new("B2", 0, 660, 720);
        let b3 = Task::new("B3", 0, 600, 780);

        assert_eq!(ObligationTieBreak::LexicographicId.compare(&b2, &b3), Ordering::Less);
        assert_eq!(ObligationTieBreak::EarliestStart.compare(&b2, &b3), Ordering::Greater);

        let explicit = ObligationTieBreak::ExplicitPriority {
            order: vec!["B3".into()],
        };
        assert_eq!(explicit.compare(&b2, &b3), Ordering::Greater);
        assert_eq!(explicit.name(), "explicit-priority");

        // Equal start falls back to the identifier
        let b4 = Task::new("B4", 0, 600, 700);
        assert_eq!(ObligationTieBreak::EarliestStart.compare(&b3, &b4), Ordering::Less);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "coverage": "strict_containment",
            "minimum_headcount": { "enforce": "critical_only", "tasks": ["SAT15", "SUN13"] },
            "objective": { "policy": "balance_load", "weight": 0.25 },
            "tie_break": { "rule": "earliest_start" },
            "unknown_date": "reject",
            "solver": { "time_limit_secs": 30.0 }
        }"#;
        let config: PlannerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.coverage, CoveragePolicy::StrictContainment);
        assert!(config.minimum_headcount.enforces("SUN13"));
        assert_eq!(config.objective, ObjectivePolicy::BalanceLoad { weight: 0.25 });
        assert_eq!(config.tie_break, ObligationTieBreak::EarliestStart);
        assert_eq!(config.unknown_date, UnknownDatePolicy::Reject);
        assert_eq!(config.solver.time_limit_secs, Some(30.0));
        assert_eq!(config.solver.seed, None);
        // Unlisted sections keep their defaults
        assert_eq!(config.workload, WorkloadTable::default());
        assert_eq!(config.calendar.day_count(), 3);
        assert!(config.validate().is_ok());
    }
}
