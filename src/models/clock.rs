//! Time-of-day tokens.
//!
//! Event sheets write times either as `HH:MM` or with an hour letter
//! (`21H30`, `21h30`, `9H`). Everything downstream works on minutes since
//! midnight, so tokens are normalized here once.

use crate::error::{PlannerError, Result};

/// Minutes in a day. `24:00` is accepted as an end-of-day bound.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parses a time-of-day token into minutes since midnight.
///
/// Accepted forms: `HH:MM`, `HHhMM`, `HHHMM` and `HHH` (empty minute = 0).
///
/// # Errors
/// [`PlannerError::MalformedTimeToken`] when the token has no hour/minute
/// separator, a component is not numeric, the minute is outside `0..=59`,
/// or the hour is outside `0..=24` (24 only as `24:00`).
pub fn parse_time_of_day(token: &str) -> Result<u32> {
    let trimmed = token.trim();
    let (hour_part, minute_part) = if let Some(pos) = trimmed.find(['H', 'h']) {
        (&trimmed[..pos], &trimmed[pos + 1..])
    } else if let Some((h, m)) = trimmed.split_once(':') {
        if m.is_empty() {
            return Err(PlannerError::time_token(token, "missing minute component"));
        }
        (h, m)
    } else {
        return Err(PlannerError::time_token(
            token,
            "expected an hour/minute separator (':' or 'H')",
        ));
    };

    let hour = parse_component(token, hour_part, "hour")?;
    let minute = if minute_part.is_empty() {
        0
    } else {
        parse_component(token, minute_part, "minute")?
    };

    if minute > 59 {
        return Err(PlannerError::time_token(
            token,
            format!("minute {minute} is outside 0..=59"),
        ));
    }
    if hour > 24 || (hour == 24 && minute > 0) {
        return Err(PlannerError::time_token(
            token,
            format!("hour {hour} is outside 0..=24"),
        ));
    }

    Ok(hour * 60 + minute)
}

fn parse_component(token: &str, part: &str, what: &str) -> Result<u32> {
    let part = part.trim();
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(PlannerError::time_token(
            token,
            format!("{what} component '{part}' is not a number"),
        ));
    }
    part.parse::<u32>()
        .map_err(|e| PlannerError::time_token(token, format!("{what} component: {e}")))
}

/// Renders minutes since midnight as `HH:MM`.
pub fn format_time_of_day(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses a `START-END` duration token into a (start, end) minute pair.
///
/// # Errors
/// [`PlannerError::MalformedDuration`] when the dash is missing, either
/// side is not a time token, or the window is empty (`end <= start`).
pub fn parse_duration(token: &str) -> Result<(u32, u32)> {
    let (start, end) = token
        .split_once('-')
        .ok_or_else(|| PlannerError::duration(token, "expected 'START-END'"))?;
    let start = parse_time_of_day(start)
        .map_err(|e| PlannerError::duration(token, e.to_string()))?;
    let end =
        parse_time_of_day(end).map_err(|e| PlannerError::duration(token, e.to_string()))?;
    if end <= start {
        return Err(PlannerError::duration(
            token,
            format!(
                "end {} is not after start {}",
                format_time_of_day(end),
                format_time_of_day(start)
            ),
        ));
    }
    Ok((start, end))
}
