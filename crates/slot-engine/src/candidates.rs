//! Walk a cursor across the working window and collect every start time that
//! fits inside an available block without breaking the gap/buffer rule.
//!
//! The cursor only ever moves forward: it snaps to the next available block,
//! jumps past a block that is too short, jumps past a conflicting appointment,
//! or steps by the gap after accepting a slot. That bounds the walk by
//! `window / gap + blocks + appointments` iterations.

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, warn};

use crate::interval::{minutes, sorted_by_start, Interval};
use crate::model::{AvailabilityInterval, AvailabilityKind, GapRule, OccupiedInterval};
use crate::window::WorkingWindow;

/// Why a slot was rejected, and where the cursor should resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// The slot overlaps a buffer-padded appointment.
    Overlap {
        appointment: Interval,
        resume_at: NaiveDateTime,
    },
    /// The slot starts too soon after an appointment ends, or ends too close
    /// to an appointment start.
    GapViolation {
        appointment: Interval,
        resume_at: NaiveDateTime,
    },
}

impl Conflict {
    pub fn resume_at(&self) -> NaiveDateTime {
        match self {
            Conflict::Overlap { resume_at, .. } | Conflict::GapViolation { resume_at, .. } => {
                *resume_at
            }
        }
    }

    pub fn appointment(&self) -> Interval {
        match self {
            Conflict::Overlap { appointment, .. } | Conflict::GapViolation { appointment, .. } => {
                *appointment
            }
        }
    }
}

fn distance(a: NaiveDateTime, b: NaiveDateTime) -> Duration {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

/// Test `slot` against each appointment in order and report the first
/// conflict.
///
/// Each appointment is first padded by the rule's before/after buffers and
/// checked for overlap. Independently, the raw distance from the slot start
/// to the appointment end and from the slot end to the appointment start
/// must both be at least the gap.
///
/// The resume point is never earlier than `slot.start + gap`: past the padded
/// end for an overlap, past the padded end plus the gap for a gap violation.
pub fn check_slot(slot: &Interval, appointments: &[Interval], rule: &GapRule) -> Option<Conflict> {
    let gap = minutes(rule.effective_gap());
    let next_step = slot.start + gap;

    for appointment in appointments {
        let padded = appointment.padded(rule.before_buffer_minutes, rule.after_buffer_minutes);

        if slot.overlaps(&padded) {
            return Some(Conflict::Overlap {
                appointment: *appointment,
                resume_at: next_step.max(padded.end),
            });
        }

        if distance(slot.start, appointment.end) < gap || distance(slot.end, appointment.start) < gap
        {
            return Some(Conflict::GapViolation {
                appointment: *appointment,
                resume_at: next_step.max(padded.end + gap),
            });
        }
    }

    None
}

fn keep_well_formed(what: &'static str) -> impl Fn(&Interval) -> bool {
    move |iv: &Interval| {
        if !iv.is_valid() {
            warn!(start = %iv.start, end = %iv.end, "ignoring {} with start >= end", what);
        }
        iv.is_valid()
    }
}

/// Produce the chronologically ordered start times of every bookable slot.
///
/// Only `available` blocks are considered. Neither input needs to be sorted.
/// An empty result is a normal outcome (e.g. no available blocks at all).
pub fn generate_candidates(
    window: &WorkingWindow,
    duration_minutes: u32,
    availability: &[AvailabilityInterval],
    occupied: &[OccupiedInterval],
    rule: &GapRule,
) -> Vec<NaiveDateTime> {
    let duration = minutes(duration_minutes);
    let step = minutes(rule.effective_gap());

    let blocks = sorted_by_start(
        availability
            .iter()
            .filter(|block| block.kind == AvailabilityKind::Available)
            .map(AvailabilityInterval::interval)
            .filter(keep_well_formed("availability block")),
    );
    let appointments = sorted_by_start(
        occupied
            .iter()
            .map(OccupiedInterval::interval)
            .filter(keep_well_formed("appointment")),
    );

    let mut candidates = Vec::new();
    let mut cursor = window.start;
    let mut block_idx = 0;

    while cursor + duration <= window.end {
        // Blocks that are already behind the cursor can never host a slot.
        while block_idx < blocks.len() && blocks[block_idx].end <= cursor {
            block_idx += 1;
        }
        let Some(block) = blocks.get(block_idx) else {
            break;
        };

        if cursor < block.start {
            debug!(from = %cursor, to = %block.start, "snapping cursor to next available block");
            cursor = block.start;
            if cursor + duration > window.end {
                break;
            }
        }

        let slot = Interval::new(cursor, cursor + duration);
        if slot.end > block.end {
            cursor = block.end;
            block_idx += 1;
            continue;
        }

        if let Some(conflict) = check_slot(&slot, &appointments, rule) {
            debug!(
                slot = %slot.start,
                appointment = %conflict.appointment().start,
                resume_at = %conflict.resume_at(),
                "slot conflicts with existing appointment"
            );
            cursor = conflict.resume_at();
            continue;
        }

        candidates.push(cursor);
        cursor += step;
    }

    candidates
}
