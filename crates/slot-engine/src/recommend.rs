//! One recommendation call: window → candidates → scores → top slots.
//!
//! Each call is a pure function of its inputs. All working state (cursor,
//! block index) lives on the stack of a single invocation, so concurrent
//! calls for different providers need no coordination.

use tracing::{info, warn};

use crate::candidates::generate_candidates;
use crate::error::{Result, SlotError};
use crate::interval::{format_slot, Interval};
use crate::model::{OccupiedInterval, ProviderSchedule, SlotRequest, SlotResult};
use crate::scoring::{score_candidates, select_top, SlotCandidate, MAX_RECOMMENDATIONS};
use crate::window::{resolve_window, WorkingWindow};

/// Generate, score and rank the candidates inside an already resolved window.
///
/// Returns at most [`MAX_RECOMMENDATIONS`] candidates, most preferred first.
pub fn rank_candidates(
    window: &WorkingWindow,
    duration_minutes: u32,
    schedule: &ProviderSchedule,
) -> Vec<SlotCandidate> {
    let rule = schedule.gap_rule();
    let starts = generate_candidates(
        window,
        duration_minutes,
        &schedule.availability,
        &schedule.occupied,
        &rule,
    );

    let appointments: Vec<Interval> = schedule
        .occupied
        .iter()
        .map(OccupiedInterval::interval)
        .filter(Interval::is_valid)
        .collect();
    let scored = score_candidates(
        &starts,
        duration_minutes,
        window,
        &appointments,
        rule.effective_gap(),
    );

    select_top(scored, MAX_RECOMMENDATIONS)
}

/// Recommend up to ten start times for `request`.
///
/// A day without usable working hours yields `Ok` with an `error` status and
/// an empty list. `Err` is reserved for a request that should never have
/// reached the engine (zero duration).
pub fn recommend_slots(request: &SlotRequest, schedule: &ProviderSchedule) -> Result<SlotResult> {
    if request.duration_minutes == 0 {
        return Err(SlotError::InvalidDuration(0));
    }

    let window = match resolve_window(request.date, &schedule.working_hours) {
        Ok(window) => window,
        Err(unavailable) => {
            warn!(
                provider = %request.provider_id,
                clinic = %request.clinic_id,
                date = %request.date,
                reason = ?unavailable,
                "no working window"
            );
            return Ok(SlotResult::error(unavailable.to_string()));
        }
    };

    let ranked = rank_candidates(&window, request.duration_minutes, schedule);
    info!(
        provider = %request.provider_id,
        clinic = %request.clinic_id,
        date = %request.date,
        duration_minutes = request.duration_minutes,
        recommended = ranked.len(),
        "recommended slots"
    );

    Ok(SlotResult::success(
        ranked.iter().map(|c| format_slot(c.start)).collect(),
    ))
}
