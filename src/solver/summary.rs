//! Roster workload metrics.
//!
//! Summarizes how much work each participant received, per event day
//! and in total, against the limits of their category.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total minutes | Sum of assigned task minutes |
//! | Minutes by day | Total minutes split per event day |
//! | Target ratio | Total minutes / category target |
//! | Headroom | Category ceiling - total minutes |
//!
//! # Reference
//! Ernst et al. (2004), "Staff scheduling and rostering", §3: Workload measures

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::WorkloadTable;
use crate::models::{Participant, Roster, WorkloadCategory};

/// Workload of one participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantWorkload {
    pub participant: String,
    pub category: WorkloadCategory,
    /// Assignments held, existing ones included.
    pub assignment_count: usize,
    /// Minutes per event day; days without work are absent.
    pub minutes_by_day: BTreeMap<usize, u32>,
    pub total_minutes: u32,
    pub target_minutes: u32,
    pub max_minutes: u32,
    pub daily_max_minutes: Option<u32>,
}

impl ParticipantWorkload {
    /// Minutes on one day (0 when idle).
    pub fn minutes_on(&self, day: usize) -> u32 {
        self.minutes_by_day.get(&day).copied().unwrap_or(0)
    }

    /// Total hours.
    pub fn total_hours(&self) -> f64 {
        f64::from(self.total_minutes) / 60.0
    }

    /// Total minutes relative to the category target.
    pub fn target_ratio(&self) -> f64 {
        if self.target_minutes == 0 {
            0.0
        } else {
            f64::from(self.total_minutes) / f64::from(self.target_minutes)
        }
    }

    /// Minutes left below the ceiling (negative when over).
    pub fn headroom(&self) -> i64 {
        i64::from(self.max_minutes) - i64::from(self.total_minutes)
    }

    /// Whether total and daily ceilings hold.
    pub fn within_limits(&self) -> bool {
        self.total_minutes <= self.max_minutes
            && self
                .daily_max_minutes
                .map_or(true, |cap| self.minutes_by_day.values().all(|&m| m <= cap))
    }
}

/// Workload of every participant, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkloadSummary {
    pub participants: Vec<ParticipantWorkload>,
}

impl WorkloadSummary {
    /// Computes workloads from a roster.
    ///
    /// # Arguments
    /// * `roster` - The materialized roster.
    /// * `participants` - All participants, including those without work.
    /// * `workload` - Category limits.
    pub fn calculate(
        roster: &Roster,
        participants: &[Participant],
        workload: &WorkloadTable,
    ) -> Self {
        let participants = participants
            .iter()
            .map(|p| {
                let limit = workload.limit(p.category);
                let minutes_by_day = roster.minutes_by_day(&p.id);
                ParticipantWorkload {
                    participant: p.id.clone(),
                    category: p.category,
                    assignment_count: roster.assignments_for_participant(&p.id).len(),
                    total_minutes: minutes_by_day.values().sum(),
                    minutes_by_day,
                    target_minutes: limit.target_minutes,
                    max_minutes: limit.max_minutes,
                    daily_max_minutes: limit.daily_max_minutes,
                }
            })
            .collect();
        Self { participants }
    }

    /// Workload of one participant.
    pub fn for_participant(&self, participant: &str) -> Option<&ParticipantWorkload> {
        self.participants.iter().find(|w| w.participant == participant)
    }

    /// Whether every participant is within their ceilings.
    pub fn within_limits(&self) -> bool {
        self.participants.iter().all(ParticipantWorkload::within_limits)
    }

    /// Participants without any assignment.
    pub fn idle(&self) -> impl Iterator<Item = &ParticipantWorkload> {
        self.participants.iter().filter(|w| w.assignment_count == 0)
    }

    /// Mean target ratio per category, for categories present.
    pub fn mean_target_ratio(&self) -> BTreeMap<WorkloadCategory, f64> {
        let mut acc: BTreeMap<WorkloadCategory, (f64, usize)> = BTreeMap::new();
        for w in &self.participants {
            let entry = acc.entry(w.category).or_insert((0.0, 0));
            entry.0 += w.target_ratio();
            entry.1 += 1;
        }
        acc.into_iter()
            .map(|(cat, (sum, n))| (cat, sum / n as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Task};

    fn setup() -> (Roster, Vec<Participant>) {
        let sam = Participant::new("Sam", "NGUYEN", WorkloadCategory::FixedQuota);
        let lea = Participant::new("Lea", "PETIT", WorkloadCategory::Low);
        let idle = Participant::new("Yara", "BLANC", WorkloadCategory::Medium);

        let mut roster = Roster::new();
        roster.add_assignment(Assignment::new(&sam, &Task::new("F1", 0, 480, 780), false));
        roster.add_assignment(Assignment::new(&sam, &Task::new("F2", 0, 840, 1140), true));
        roster.add_assignment(Assignment::new(&lea, &Task::new("S1", 1, 480, 600), false));
        (roster, vec![sam, lea, idle])
    }

    #[test]
    fn test_summary_lists_everyone() {
        let (roster, people) = setup();
        let summary = WorkloadSummary::calculate(&roster, &people, &WorkloadTable::default());

        assert_eq!(summary.participants.len(), 3);
        let idle: Vec<_> = summary.idle().map(|w| w.participant.as_str()).collect();
        assert_eq!(idle, vec!["Yara BLANC"]);
        let yara = summary.for_participant("Yara BLANC").unwrap();
        assert_eq!(yara.minutes_on(0), 0);
        assert_eq!(yara.total_minutes, 0);
    }

    #[test]
    fn test_daily_ceiling() {
        let (roster, people) = setup();
        let summary = WorkloadSummary::calculate(&roster, &people, &WorkloadTable::default());

        let sam = summary.for_participant("Sam NGUYEN").unwrap();
        assert_eq!(sam.assignment_count, 2);
        assert_eq!(sam.minutes_on(0), 600);
        assert_eq!(sam.total_minutes, 600);
        // 600 > 480 daily
        assert!(!sam.within_limits());
        assert!(!summary.within_limits());
        assert_eq!(sam.headroom(), 840);
    }

    #[test]
    fn test_target_ratio() {
        let (roster, people) = setup();
        let summary = WorkloadSummary::calculate(&roster, &people, &WorkloadTable::default());

        let lea = summary.for_participant("Lea PETIT").unwrap();
        assert!((lea.target_ratio() - 0.25).abs() < 1e-9);
        assert!((lea.total_hours() - 2.0).abs() < 1e-9);
        assert!(lea.within_limits());

        let means = summary.mean_target_ratio();
        assert_eq!(means.len(), 3);
        assert_eq!(means[&WorkloadCategory::Medium], 0.0);
    }
}
