//! Row loading at the tabular-data boundary.
//!
//! File parsing lives outside this crate; it hands over rows as
//! key → string maps. This module turns them into [`Task`],
//! [`Participant`] and [`ExistingAssignment`] values, failing fast with an
//! error that names the offending row and field.
//!
//! # Row Keys
//!
//! | Row | Required | Optional |
//! |-----|----------|----------|
//! | Task | `TASK_ID`, `DATE`, `DURATION`, `TASK_DESC` | `LOCATION`, `MINIMUM_NUMBER_OF_PEOPLE` (default 1), `MAXIMUM_NUMBER_OF_PEOPLE` |
//! | Participant | `FIRST_NAME`, `LAST_NAME`, `WORKLOAD`, `OBLIGED_EVENT_IDS` | one availability key per calendar day |
//! | Existing assignment | `participant`, `task_id` | |

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::models::{
    parse_availability, parse_duration, Availability, EventCalendar, ExistingAssignment,
    Participant, Task, UnknownDatePolicy, WorkloadCategory,
};
use crate::solver::PlanningInput;

/// One tabular row: column name → cell text.
pub type Row = HashMap<String, String>;

/// Column names.
pub mod keys {
    pub const TASK_ID: &str = "TASK_ID";
    pub const DATE: &str = "DATE";
    pub const DURATION: &str = "DURATION";
    pub const TASK_DESC: &str = "TASK_DESC";
    pub const LOCATION: &str = "LOCATION";
    pub const MIN_PEOPLE: &str = "MINIMUM_NUMBER_OF_PEOPLE";
    pub const MAX_PEOPLE: &str = "MAXIMUM_NUMBER_OF_PEOPLE";

    pub const FIRST_NAME: &str = "FIRST_NAME";
    pub const LAST_NAME: &str = "LAST_NAME";
    pub const WORKLOAD: &str = "WORKLOAD";
    pub const OBLIGATIONS: &str = "OBLIGED_EVENT_IDS";

    pub const PARTICIPANT: &str = "participant";
    pub const EXISTING_TASK_ID: &str = "task_id";
}

fn required<'a>(row: &'a Row, record: &str, key: &str) -> Result<&'a str> {
    row.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PlannerError::MissingField {
            record: record.to_string(),
            field: key.to_string(),
        })
}

fn present<'a>(row: &'a Row, record: &str, key: &str) -> Result<&'a str> {
    row.get(key)
        .map(|v| v.trim())
        .ok_or_else(|| PlannerError::MissingField {
            record: record.to_string(),
            field: key.to_string(),
        })
}

fn optional<'a>(row: &'a Row, key: &str) -> Option<&'a str> {
    row.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn optional_count(row: &Row, record: &str, key: &str) -> Result<Option<u32>> {
    optional(row, key)
        .map(|value| {
            value.parse::<u32>().map_err(|e| PlannerError::InvalidField {
                record: record.to_string(),
                field: key.to_string(),
                value: value.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Converts one task row.
///
/// `index` is the zero-based row position, used in error messages.
pub fn task_from_row(
    row: &Row,
    index: usize,
    calendar: &EventCalendar,
    unknown_date: UnknownDatePolicy,
) -> Result<Task> {
    let position = format!("task row {}", index + 1);
    let id = required(row, &position, keys::TASK_ID)?;
    let record = format!("{position} ({id})");

    let date = required(row, &record, keys::DATE)?;
    let duration = required(row, &record, keys::DURATION)?;
    let description = present(row, &record, keys::TASK_DESC)?.trim_matches('"');

    let (start, end) = parse_duration(duration).map_err(|e| PlannerError::InvalidField {
        record: record.clone(),
        field: keys::DURATION.to_string(),
        value: duration.to_string(),
        reason: e.to_string(),
    })?;
    let day = calendar.day_index(date, unknown_date, &record)?;

    let mut task = Task::new(id, day, start, end)
        .with_date(date)
        .with_duration_token(duration)
        .with_description(description)
        .with_min_people(optional_count(row, &record, keys::MIN_PEOPLE)?.unwrap_or(1));
    if let Some(max) = optional_count(row, &record, keys::MAX_PEOPLE)? {
        task = task.with_max_people(max);
    }
    if let Some(location) = optional(row, keys::LOCATION) {
        task = task.with_location(location);
    }
    Ok(task)
}

/// Converts one participant row.
///
/// Availability is read from each calendar day's key; a missing or empty
/// cell means unavailable that day. Malformed availability ranges are
/// logged and skipped.
pub fn participant_from_row(
    row: &Row,
    index: usize,
    calendar: &EventCalendar,
) -> Result<Participant> {
    let position = format!("participant row {}", index + 1);
    let first = required(row, &position, keys::FIRST_NAME)?;
    let last = required(row, &position, keys::LAST_NAME)?;
    let record = format!("{position} ({first} {last})");

    let label = required(row, &record, keys::WORKLOAD)?;
    let category: WorkloadCategory =
        label.parse().map_err(|_| PlannerError::UnknownCategory {
            record: record.clone(),
            label: label.to_string(),
        })?;

    let mut participant = Participant::new(first, last, category);
    participant.obligations = present(row, &record, keys::OBLIGATIONS)?
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    let mut availability = Availability::new();
    for (day, event_day) in calendar.days.iter().enumerate() {
        let Some(text) = optional(row, &event_day.availability_key) else {
            continue;
        };
        let (windows, warnings) = parse_availability(text);
        for w in &warnings {
            warn!(
                record = record.as_str(),
                day = event_day.label.as_str(),
                range = w.range.as_str(),
                reason = w.reason.as_str(),
                "skipping malformed availability range"
            );
        }
        availability = availability.with_day(day, windows);
    }
    participant.availability = availability;

    Ok(participant)
}

/// Converts one existing-assignment row.
pub fn existing_from_row(row: &Row, index: usize) -> Result<ExistingAssignment> {
    let record = format!("existing assignment row {}", index + 1);
    let participant = required(row, &record, keys::PARTICIPANT)?;
    let task_id = required(row, &record, keys::EXISTING_TASK_ID)?;
    Ok(ExistingAssignment::new(participant, task_id))
}

/// Loads all task rows.
pub fn load_tasks(
    rows: &[Row],
    calendar: &EventCalendar,
    unknown_date: UnknownDatePolicy,
) -> Result<Vec<Task>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| task_from_row(row, i, calendar, unknown_date))
        .collect()
}

/// Loads all participant rows.
pub fn load_participants(rows: &[Row], calendar: &EventCalendar) -> Result<Vec<Participant>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| participant_from_row(row, i, calendar))
        .collect()
}

/// Loads all existing-assignment rows.
pub fn load_existing(rows: &[Row]) -> Result<Vec<ExistingAssignment>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| existing_from_row(row, i))
        .collect()
}

/// Loads a complete planning input using the calendar and date policy of `config`.
pub fn load_input(
    task_rows: &[Row],
    participant_rows: &[Row],
    existing_rows: &[Row],
    config: &PlannerConfig,
) -> Result<PlanningInput> {
    let tasks = load_tasks(task_rows, &config.calendar, config.unknown_date)?;
    let participants = load_participants(participant_rows, &config.calendar)?;
    let existing = load_existing(existing_rows)?;
    debug!(
        tasks = tasks.len(),
        participants = participants.len(),
        existing = existing.len(),
        "rows loaded"
    );
    PlanningInput::new(tasks, participants, existing)
}
