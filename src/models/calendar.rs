//! Event calendar, time windows and participant availability.
//!
//! # Time Model
//! Times are minutes since midnight on a given event day. Days are
//! identified by their index in the [`EventCalendar`].
//!
//! # Coverage
//! A task window is covered by a participant's availability according to
//! the active [`CoveragePolicy`]:
//! - `StrictContainment`: one availability interval contains the window.
//! - `ContiguousUnion`: sorted intervals are walked forward from the
//!   window start and must reach the window end without a gap.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::clock::parse_time_of_day;
use crate::error::{PlannerError, Result};

/// A time interval [start, end) in minutes since midnight.
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeWindow {
    /// Interval start (minute, inclusive).
    pub start: u32,
    /// Interval end (minute, exclusive).
    pub end: u32,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Duration of this window (minutes).
    #[inline]
    pub fn minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether a minute falls within this window.
    #[inline]
    pub fn contains(&self, minute: u32) -> bool {
        minute >= self.start && minute < self.end
    }

    /// Whether `other` lies entirely inside this window.
    pub fn encloses(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// How a task window must be covered by availability intervals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// The window must lie inside a single availability interval.
    StrictContainment,
    /// The window may span adjacent or overlapping intervals without gaps.
    #[default]
    ContiguousUnion,
}

/// A participant's availability, per event day.
///
/// Days without an entry (or with an empty list) are unavailable.
/// Intervals are kept sorted by start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    days: BTreeMap<usize, Vec<TimeWindow>>,
}

impl Availability {
    /// Creates an availability with no open day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a window on `day`.
    pub fn with_window(mut self, day: usize, start: u32, end: u32) -> Self {
        self.add_window(day, TimeWindow::new(start, end));
        self
    }

    /// Replaces the windows of `day`.
    pub fn with_day(mut self, day: usize, mut windows: Vec<TimeWindow>) -> Self {
        windows.sort();
        self.days.insert(day, windows);
        self
    }

    /// Adds a window on `day`, keeping the day sorted.
    pub fn add_window(&mut self, day: usize, window: TimeWindow) {
        let windows = self.days.entry(day).or_default();
        windows.push(window);
        windows.sort();
    }

    /// Windows of `day` (empty if none).
    pub fn windows(&self, day: usize) -> &[TimeWindow] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `window` on `day` is covered under `policy`.
    pub fn covers(&self, day: usize, window: &TimeWindow, policy: CoveragePolicy) -> bool {
        let windows = self.windows(day);
        match policy {
            CoveragePolicy::StrictContainment => windows.iter().any(|w| w.encloses(window)),
            CoveragePolicy::ContiguousUnion => {
                let mut reached = window.start;
                for w in windows {
                    if w.start <= reached && reached < w.end {
                        reached = w.end.min(window.end);
                        if reached >= window.end {
                            return true;
                        }
                    }
                }
                false
            }
        }
    }

    /// Total available minutes on `day`, counting overlaps once.
    pub fn minutes_on(&self, day: usize) -> u32 {
        let mut total = 0;
        let mut cursor = 0;
        for w in self.windows(day) {
            let start = w.start.max(cursor);
            if w.end > start {
                total += w.end - start;
            }
            cursor = cursor.max(w.end);
        }
        total
    }

    /// Total available minutes across all days.
    pub fn total_minutes(&self) -> u32 {
        self.days.keys().map(|&d| self.minutes_on(d)).sum()
    }

    /// Whether no day has any window.
    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }
}

/// A malformed availability sub-range that was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityWarning {
    /// The offending sub-range, as written.
    pub range: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Parses an availability string such as `"16:00-19:00,19H30-21H00"`.
///
/// Empty parts are skipped. Ranges whose end does not exceed their start are
/// dropped without a warning. Malformed ranges are reported as warnings so
/// the rest of the string stays usable. The result is sorted by start.
pub fn parse_availability(text: &str) -> (Vec<TimeWindow>, Vec<AvailabilityWarning>) {
    let mut windows = Vec::new();
    let mut warnings = Vec::new();

    for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((start, end)) = part.split_once('-') else {
            warnings.push(AvailabilityWarning {
                range: part.to_string(),
                reason: "expected 'START-END'".to_string(),
            });
            continue;
        };
        match (parse_time_of_day(start), parse_time_of_day(end)) {
            (Ok(start), Ok(end)) => {
                if start < end {
                    windows.push(TimeWindow::new(start, end));
                }
            }
            (Err(e), _) | (_, Err(e)) => warnings.push(AvailabilityWarning {
                range: part.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    windows.sort();
    (windows, warnings)
}

/// What to do with a date token the calendar does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownDatePolicy {
    /// Map to day 0 and log a warning.
    #[default]
    FirstDay,
    /// Fail the load with [`PlannerError::UnknownDate`].
    Reject,
}

/// One day of the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDay {
    /// Date token as written in task rows (e.g. `10/10/2025`).
    pub date: String,
    /// Display label (e.g. `Friday`).
    pub label: String,
    /// Participant row key holding this day's availability.
    pub availability_key: String,
}

impl EventDay {
    /// Creates an event day.
    pub fn new(
        date: impl Into<String>,
        label: impl Into<String>,
        availability_key: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            label: label.into(),
            availability_key: availability_key.into(),
        }
    }
}

/// The fixed, ordered list of event days. Day index = position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCalendar {
    /// Event days in order.
    pub days: Vec<EventDay>,
}

impl Default for EventCalendar {
    /// The three-day October 2025 event (Friday to Sunday).
    fn default() -> Self {
        Self::new(vec![
            EventDay::new("10/10/2025", "Friday", "AVAIL_FRIDAY"),
            EventDay::new("11/10/2025", "Saturday", "AVAIL_SATURDAY"),
            EventDay::new("12/10/2025", "Sunday", "AVAIL_SUNDAY"),
        ])
    }
}

impl EventCalendar {
    /// Creates a calendar from ordered days.
    pub fn new(days: Vec<EventDay>) -> Self {
        Self { days }
    }

    /// Number of event days.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Looks up the index of a date token.
    pub fn find_day(&self, date: &str) -> Option<usize> {
        let date = date.trim();
        self.days.iter().position(|d| d.date == date)
    }

    /// Maps a date token to a day index under `policy`.
    ///
    /// `record` names the row being loaded, for error and log messages.
    pub fn day_index(&self, date: &str, policy: UnknownDatePolicy, record: &str) -> Result<usize> {
        match (self.find_day(date), policy) {
            (Some(day), _) => Ok(day),
            (None, UnknownDatePolicy::FirstDay) => {
                warn!(record, date, "date is not in the event calendar; using day 0");
                Ok(0)
            }
            (None, UnknownDatePolicy::Reject) => Err(PlannerError::UnknownDate {
                record: record.to_string(),
                date: date.to_string(),
            }),
        }
    }

    /// Display label of a day index.
    pub fn label(&self, day: usize) -> Option<&str> {
        self.days.get(day).map(|d| d.label.as_str())
    }
}
