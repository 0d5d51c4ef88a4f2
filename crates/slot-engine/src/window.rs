//! Resolve the provider's working window for a calendar date.
//!
//! The weekday is derived from the civil date itself (proleptic Gregorian
//! arithmetic), never from a clock or a timezone, so the same date resolves
//! to the same weekday on every machine.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;
use tracing::debug;

use crate::error::SlotError;
use crate::interval::Interval;
use crate::model::{short_label, WorkingHours};

/// The `[start, end)` span a provider can be booked in on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WorkingWindow {
    pub fn as_interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Why no window could be produced. This is a reportable outcome, not a
/// caller fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowUnavailable {
    #[error("no working hours for this day")]
    NoWorkingHours { weekday: &'static str },

    #[error("invalid working hours for this day")]
    InvalidWorkingHours {
        weekday: &'static str,
        reason: String,
    },
}

const END_OF_DAY: &str = "24:00";

/// Lowercase three-letter label of the date's weekday (`"mon"` … `"sun"`).
pub fn weekday_label(date: NaiveDate) -> &'static str {
    short_label(date.weekday())
}

/// Parse a `"HH:MM"` time of day.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, SlotError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| SlotError::InvalidTime(s.to_string()))
}

/// Look up the working hours for `date` and anchor them to that date.
///
/// An end of `"24:00"` means midnight at the end of `date`.
///
/// Fails with [`WindowUnavailable::NoWorkingHours`] when the weekday has no
/// entry or the entry is not exactly a `(start, end)` pair, and with
/// [`WindowUnavailable::InvalidWorkingHours`] when the pair cannot be parsed
/// or does not satisfy `start < end`.
pub fn resolve_window(
    date: NaiveDate,
    working_hours: &WorkingHours,
) -> Result<WorkingWindow, WindowUnavailable> {
    let weekday = weekday_label(date);

    let (start_str, end_str) = match working_hours.for_weekday(date.weekday()) {
        Some([start, end]) => (start, end),
        _ => return Err(WindowUnavailable::NoWorkingHours { weekday }),
    };

    let invalid = |reason: String| WindowUnavailable::InvalidWorkingHours { weekday, reason };

    let start = parse_time_of_day(start_str)
        .map(|t| date.and_time(t))
        .map_err(|e| invalid(e.to_string()))?;
    let end = if end_str.trim() == END_OF_DAY {
        date.succ_opt()
            .map(|next| next.and_time(NaiveTime::MIN))
            .ok_or_else(|| invalid(format!("no day after {}", date)))?
    } else {
        parse_time_of_day(end_str)
            .map(|t| date.and_time(t))
            .map_err(|e| invalid(e.to_string()))?
    };
    if start >= end {
        return Err(invalid(format!("start {} is not before end {}", start_str, end_str)));
    }

    let window = WorkingWindow { start, end };
    debug!(weekday, start = %window.start, end = %window.end, "resolved working window");
    Ok(window)
}
