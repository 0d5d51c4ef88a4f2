//! Disruption scoring and top-N selection.
//!
//! Lower scores are preferred. The four terms are independent and additive:
//!
//! | term        | value                         | applies when |
//! |-------------|-------------------------------|--------------|
//! | adjacency   | `-10`                         | nearest appointment on either side is closer than `2 × gap` |
//! | edge of day | `-5`                          | slot starts at window start or ends at window end |
//! | squeeze     | `+10`                         | appointments on BOTH sides are closer than 30 minutes |
//! | spacing     | `min(prev gap, next gap)` min | always (`+∞` with no appointments around) |
//!
//! The adjacency and squeeze thresholds overlap on purpose; their interaction
//! decides the ranking, so they are kept as separate terms.

use chrono::{Duration, NaiveDateTime};

use crate::interval::{minutes, Interval};
use crate::window::WorkingWindow;

pub const ADJACENCY_PENALTY: f64 = -10.0;
pub const EDGE_OF_DAY_PENALTY: f64 = -5.0;
pub const SQUEEZE_PENALTY: f64 = 10.0;
pub const SQUEEZE_THRESHOLD_MINUTES: f64 = 30.0;

/// Upper bound on the number of slots returned to a caller.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Distance from a slot to the closest appointment on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurroundingGaps {
    /// `slot.start - appointment.end` for the closest appointment ending at
    /// or before the slot start.
    pub previous: Option<Duration>,
    /// `appointment.start - slot.end` for the closest appointment starting at
    /// or after the slot end.
    pub next: Option<Duration>,
}

impl SurroundingGaps {
    pub fn around(slot: &Interval, appointments: &[Interval]) -> Self {
        let previous = appointments
            .iter()
            .filter(|a| a.end <= slot.start)
            .map(|a| slot.start - a.end)
            .min();
        let next = appointments
            .iter()
            .filter(|a| a.start >= slot.end)
            .map(|a| a.start - slot.end)
            .min();
        Self { previous, next }
    }

    /// Previous gap in minutes, `+∞` when there is none.
    pub fn previous_minutes(&self) -> f64 {
        as_minutes(self.previous)
    }

    /// Next gap in minutes, `+∞` when there is none.
    pub fn next_minutes(&self) -> f64 {
        as_minutes(self.next)
    }
}

fn as_minutes(gap: Option<Duration>) -> f64 {
    gap.map_or(f64::INFINITY, |d| d.num_seconds() as f64 / 60.0)
}

/// Per-term view of a score, mostly useful for explaining a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub adjacency: f64,
    pub edge_of_day: f64,
    pub squeeze: f64,
    pub spacing: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.adjacency + self.edge_of_day + self.squeeze + self.spacing
    }
}

/// A bookable start time with its disruption score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotCandidate {
    pub start: NaiveDateTime,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Score one slot against the raw (unpadded) appointments.
pub fn score_slot(
    slot: &Interval,
    window: &WorkingWindow,
    appointments: &[Interval],
    gap_minutes: u32,
) -> ScoreBreakdown {
    let gaps = SurroundingGaps::around(slot, appointments);
    let prev = gaps.previous_minutes();
    let next = gaps.next_minutes();
    let closest = prev.min(next);

    let mut breakdown = ScoreBreakdown::default();

    if closest < 2.0 * f64::from(gap_minutes) {
        breakdown.adjacency = ADJACENCY_PENALTY;
    }
    if slot.start == window.start || slot.end == window.end {
        breakdown.edge_of_day = EDGE_OF_DAY_PENALTY;
    }
    if prev < SQUEEZE_THRESHOLD_MINUTES && next < SQUEEZE_THRESHOLD_MINUTES {
        breakdown.squeeze = SQUEEZE_PENALTY;
    }
    breakdown.spacing = closest;

    breakdown
}

/// Score every candidate start time.
pub fn score_candidates(
    starts: &[NaiveDateTime],
    duration_minutes: u32,
    window: &WorkingWindow,
    appointments: &[Interval],
    gap_minutes: u32,
) -> Vec<SlotCandidate> {
    let duration = minutes(duration_minutes);
    starts
        .iter()
        .map(|&start| {
            let slot = Interval::new(start, start + duration);
            let breakdown = score_slot(&slot, window, appointments, gap_minutes);
            SlotCandidate {
                start,
                score: breakdown.total(),
                breakdown,
            }
        })
        .collect()
}

/// Order candidates by ascending score, earliest start first on ties, and
/// keep at most `limit` of them.
pub fn select_top(mut candidates: Vec<SlotCandidate>, limit: usize) -> Vec<SlotCandidate> {
    candidates.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.start.cmp(&b.start)));
    candidates.truncate(limit);
    candidates
}
