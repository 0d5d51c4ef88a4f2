//! Half-open time intervals and the small amount of time arithmetic the
//! generator and scorer share.
//!
//! All timestamps are naive local civil time. Adjacent intervals (where one
//! ends exactly when another starts) do NOT overlap.

use chrono::{Duration, NaiveDateTime};

/// A half-open `[start, end)` span of local civil time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// An interval of `duration_minutes` starting at `start`.
    pub fn starting_at(start: NaiveDateTime, duration_minutes: u32) -> Self {
        Self {
            start,
            end: start + minutes(duration_minutes),
        }
    }

    /// `true` when `start < end`. Degenerate intervals never take part in
    /// slot generation.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `true` when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Widen the interval by `before` minutes on the left and `after` minutes
    /// on the right.
    pub fn padded(&self, before: u32, after: u32) -> Interval {
        Interval {
            start: self.start - minutes(before),
            end: self.end + minutes(after),
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// `n` minutes as a chrono duration.
pub fn minutes(n: u32) -> Duration {
    Duration::minutes(i64::from(n))
}

/// Serialize a slot start at minute resolution, seconds forced to `:00`.
///
/// ```
/// use chrono::NaiveDate;
/// use slot_engine::interval::format_slot;
///
/// let ts = NaiveDate::from_ymd_opt(2025, 7, 9)
///     .unwrap()
///     .and_hms_opt(9, 15, 42)
///     .unwrap();
/// assert_eq!(format_slot(ts), "2025-07-09T09:15:00");
/// ```
pub fn format_slot(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:00").to_string()
}

/// Copy and sort intervals by start time (then by end time for stability).
pub fn sorted_by_start<I>(intervals: I) -> Vec<Interval>
where
    I: IntoIterator<Item = Interval>,
{
    let mut sorted: Vec<Interval> = intervals.into_iter().collect();
    sorted.sort_by_key(|iv| (iv.start, iv.end));
    sorted
}
