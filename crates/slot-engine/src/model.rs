//! Value types handed to the engine by its caller.
//!
//! Everything here is an immutable snapshot: the caller fetches working hours,
//! availability blocks, existing appointments and the regional gap rule, and
//! the engine only reads them. JSON field names are camelCase so the types
//! can cross a JSON boundary (CLI dataset, WASM) unchanged.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::Interval;

/// Gap applied when no rule is supplied, or when a rule carries a zero gap.
pub const DEFAULT_GAP_MINUTES: u32 = 15;

/// Weekday label → `["HH:MM", "HH:MM"]`, e.g. `{"wed": ["09:00", "17:00"]}`.
///
/// Values are kept as raw string lists so that malformed entries (wrong arity,
/// bad times) survive deserialization and are reported by the window resolver
/// as an unworked day rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingHours(BTreeMap<String, Vec<String>>);

impl WorkingHours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of one day's `(start, end)` pair.
    pub fn with_day(mut self, label: &str, start: &str, end: &str) -> Self {
        self.0
            .insert(label.to_lowercase(), vec![start.to_string(), end.to_string()]);
        self
    }

    /// Look up the raw entry for a weekday. Keys match case-insensitively
    /// against the short label (`wed`) or the full name (`wednesday`).
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&[String]> {
        let short = short_label(weekday);
        let long = long_label(weekday);
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(short) || key.eq_ignore_ascii_case(long))
            .map(|(_, hours)| hours.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub(crate) fn short_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

fn long_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// What an availability block says about the provider.
///
/// Only [`AvailabilityKind::Available`] blocks make time bookable; every other
/// kind is "not available" by omission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityKind {
    #[default]
    Available,
    Break,
    Vacation,
    #[serde(other)]
    Other,
}

/// An explicitly marked block in the provider's calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityInterval {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default, alias = "type")]
    pub kind: AvailabilityKind,
}

impl AvailabilityInterval {
    pub fn available(start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            end_time,
            kind: AvailabilityKind::Available,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
    }
}

/// An existing appointment. Upstream data may contain overlapping
/// appointments; the engine tests each one independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupiedInterval {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl OccupiedInterval {
    pub fn new(start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
    }
}

/// Region-wide spacing policy between bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GapRule {
    /// Minimum silence between two booked intervals; also the cursor step.
    pub gap_duration_minutes: u32,
    /// Padding applied before each existing appointment.
    #[serde(alias = "beforeAppointmentBuffer")]
    pub before_buffer_minutes: u32,
    /// Padding applied after each existing appointment.
    #[serde(alias = "afterAppointmentBuffer")]
    pub after_buffer_minutes: u32,
}

impl Default for GapRule {
    fn default() -> Self {
        Self {
            gap_duration_minutes: DEFAULT_GAP_MINUTES,
            before_buffer_minutes: 0,
            after_buffer_minutes: 0,
        }
    }
}

impl GapRule {
    pub fn new(gap: u32, before: u32, after: u32) -> Self {
        Self {
            gap_duration_minutes: gap,
            before_buffer_minutes: before,
            after_buffer_minutes: after,
        }
    }

    /// The gap actually enforced. A zero gap counts as unset, since the cursor
    /// must advance by a positive step.
    pub fn effective_gap(&self) -> u32 {
        if self.gap_duration_minutes == 0 {
            DEFAULT_GAP_MINUTES
        } else {
            self.gap_duration_minutes
        }
    }
}

/// A recommendation query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub provider_id: String,
    pub clinic_id: String,
    pub date: NaiveDate,
    pub duration_minutes: u32,
}

impl SlotRequest {
    /// Build a request from loosely typed input, rejecting a malformed date
    /// or a non-positive duration before any computation happens.
    pub fn new(
        provider_id: impl Into<String>,
        clinic_id: impl Into<String>,
        date: &str,
        duration_minutes: i64,
    ) -> Result<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| SlotError::InvalidDate(date.to_string()))?;
        let duration_minutes = u32::try_from(duration_minutes)
            .ok()
            .filter(|d| *d > 0)
            .ok_or(SlotError::InvalidDuration(duration_minutes))?;

        Ok(Self {
            provider_id: provider_id.into(),
            clinic_id: clinic_id.into(),
            date,
            duration_minutes,
        })
    }
}

/// Everything the engine needs to know about one provider, already fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSchedule {
    #[serde(default)]
    pub working_hours: WorkingHours,
    #[serde(default)]
    pub availability: Vec<AvailabilityInterval>,
    #[serde(default)]
    pub occupied: Vec<OccupiedInterval>,
    #[serde(default)]
    pub gap_rule: Option<GapRule>,
}

impl ProviderSchedule {
    /// The supplied gap rule, or the defaults (15 / 0 / 0).
    pub fn gap_rule(&self) -> GapRule {
        self.gap_rule.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Success,
    Error,
}

/// Outcome of one recommendation call.
///
/// `recommended_slots` is ordered by preference, not chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResult {
    pub status: SlotStatus,
    pub recommended_slots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SlotResult {
    pub fn success(recommended_slots: Vec<String>) -> Self {
        Self {
            status: SlotStatus::Success,
            recommended_slots,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: SlotStatus::Error,
            recommended_slots: Vec::new(),
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SlotStatus::Success
    }
}
