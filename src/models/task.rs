//! Task (duty) model.
//!
//! A task is a time-boxed duty on one event day that needs between
//! `min_people` and `max_people` participants.

use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// A duty to be staffed.
///
/// # Time Representation
/// `window` is in minutes since midnight of event day `day`. The raw
/// `date` and `duration` tokens are kept for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier (e.g. `SAT15`).
    pub id: String,
    /// Date token as written in the source row.
    pub date: String,
    /// Event day index.
    pub day: usize,
    /// Duration token as written in the source row (e.g. `16H00-19H00`).
    pub duration: String,
    /// Time window on `day`.
    pub window: TimeWindow,
    /// Free-text description.
    pub description: String,
    /// Where the duty takes place.
    pub location: Option<String>,
    /// Minimum headcount (default 1).
    pub min_people: u32,
    /// Maximum headcount. `None` = unbounded.
    pub max_people: Option<u32>,
}

impl Task {
    /// Creates a task on `day` spanning [start, end) minutes.
    pub fn new(id: impl Into<String>, day: usize, start: u32, end: u32) -> Self {
        Self {
            id: id.into(),
            date: String::new(),
            day,
            duration: format!(
                "{}-{}",
                super::format_time_of_day(start),
                super::format_time_of_day(end)
            ),
            window: TimeWindow::new(start, end),
            description: String::new(),
            location: None,
            min_people: 1,
            max_people: None,
        }
    }

    /// Sets the date token.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Sets the duration token (display only; the window is authoritative).
    pub fn with_duration_token(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the minimum headcount.
    pub fn with_min_people(mut self, min: u32) -> Self {
        self.min_people = min;
        self
    }

    /// Sets the maximum headcount.
    pub fn with_max_people(mut self, max: u32) -> Self {
        self.max_people = Some(max);
        self
    }

    /// Duration in minutes.
    #[inline]
    pub fn minutes(&self) -> u32 {
        self.window.minutes()
    }

    /// Duration in hours.
    pub fn hours(&self) -> f64 {
        f64::from(self.minutes()) / 60.0
    }

    /// Whether two tasks overlap in time on the same day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.window.overlaps(&other.window)
    }

    /// Slots left after `existing` committed assignments.
    ///
    /// `None` when the task has no maximum. Negative when over-committed.
    pub fn remaining_capacity(&self, existing: u32) -> Option<i64> {
        self.max_people
            .map(|max| i64::from(max) - i64::from(existing))
    }
}
