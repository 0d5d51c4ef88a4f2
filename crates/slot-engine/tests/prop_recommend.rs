//! Property-based tests for slot generation and recommendation using proptest.
//!
//! These tests verify invariants that should hold for *any* schedule, not
//! just the hand-picked days in the other test files.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use slot_engine::interval::Interval;
use slot_engine::model::{AvailabilityInterval, AvailabilityKind, OccupiedInterval};
use slot_engine::{
    check_slot, generate_candidates, recommend_slots, resolve_window, GapRule, ProviderSchedule,
    SlotRequest, SlotStatus, WorkingHours, MAX_RECOMMENDATIONS,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

const DATE: &str = "2025-07-09"; // Wednesday

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 9).unwrap()
}

fn minute_of_day(m: u32) -> NaiveDateTime {
    day().and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(i64::from(m))
}

fn hhmm(m: u32) -> String {
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Working hours as minute-of-day `(start, end)` with `start < end`.
fn arb_hours() -> impl Strategy<Value = (u32, u32)> {
    (6u32 * 60..=12 * 60, 60u32..=10 * 60).prop_map(|(start, len)| (start, (start + len).min(23 * 60)))
}

/// Minute-of-day intervals somewhere in the working part of the day.
fn arb_spans(max: usize) -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((5u32 * 60..22 * 60, 5u32..=240), 0..=max)
        .prop_map(|spans| spans.into_iter().map(|(s, len)| (s, s + len)).collect())
}

fn arb_kind() -> impl Strategy<Value = AvailabilityKind> {
    prop_oneof![
        4 => Just(AvailabilityKind::Available),
        1 => Just(AvailabilityKind::Break),
        1 => Just(AvailabilityKind::Vacation),
    ]
}

fn arb_rule() -> impl Strategy<Value = GapRule> {
    (
        prop_oneof![Just(0u32), Just(5u32), Just(10u32), Just(15u32), Just(20u32), Just(30u32)],
        0u32..=30,
        0u32..=30,
    )
        .prop_map(|(gap, before, after)| GapRule::new(gap, before, after))
}

fn arb_schedule() -> impl Strategy<Value = ProviderSchedule> {
    (
        arb_hours(),
        arb_spans(4),
        prop::collection::vec(arb_kind(), 4),
        arb_spans(6),
        prop::option::of(arb_rule()),
    )
        .prop_map(|((ws, we), blocks, kinds, appts, rule)| ProviderSchedule {
            working_hours: WorkingHours::new().with_day("wed", &hhmm(ws), &hhmm(we)),
            availability: blocks
                .into_iter()
                .zip(kinds)
                .map(|((s, e), kind)| AvailabilityInterval {
                    start_time: minute_of_day(s),
                    end_time: minute_of_day(e),
                    kind,
                })
                .collect(),
            occupied: appts
                .into_iter()
                .map(|(s, e)| OccupiedInterval::new(minute_of_day(s), minute_of_day(e)))
                .collect(),
            gap_rule: rule,
        })
}

fn arb_duration() -> impl Strategy<Value = u32> {
    10u32..=120
}

fn candidates_for(schedule: &ProviderSchedule, duration: u32) -> Vec<NaiveDateTime> {
    let window = resolve_window(day(), &schedule.working_hours).unwrap();
    generate_candidates(
        &window,
        duration,
        &schedule.availability,
        &schedule.occupied,
        &schedule.gap_rule(),
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Every candidate fits in the window, inside one available block, and
    /// clears every appointment's buffers and gap.
    #[test]
    fn candidates_respect_availability_and_gap_rule(
        schedule in arb_schedule(),
        duration in arb_duration(),
    ) {
        let window = resolve_window(day(), &schedule.working_hours).unwrap();
        let rule = schedule.gap_rule();
        let gap = Duration::minutes(i64::from(rule.effective_gap()));
        let appointments: Vec<Interval> =
            schedule.occupied.iter().map(OccupiedInterval::interval).collect();

        for start in candidates_for(&schedule, duration) {
            let slot = Interval::starting_at(start, duration);

            prop_assert!(window.as_interval().contains(&slot), "{:?} outside window", slot);
            prop_assert!(
                schedule
                    .availability
                    .iter()
                    .filter(|b| b.kind == AvailabilityKind::Available)
                    .any(|b| b.interval().contains(&slot)),
                "{:?} not inside an available block", slot
            );
            prop_assert!(check_slot(&slot, &appointments, &rule).is_none());
            for appt in &appointments {
                let padded = appt.padded(rule.before_buffer_minutes, rule.after_buffer_minutes);
                prop_assert!(!slot.overlaps(&padded));
                prop_assert!((slot.start - appt.end).abs() >= gap);
                prop_assert!((slot.end - appt.start).abs() >= gap);
            }
        }
    }

    /// Candidates come out strictly increasing, hence without duplicates.
    #[test]
    fn candidates_are_strictly_increasing(
        schedule in arb_schedule(),
        duration in arb_duration(),
    ) {
        let starts = candidates_for(&schedule, duration);
        for pair in starts.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// The result is capped at ten and otherwise returns every candidate.
    #[test]
    fn recommendations_are_capped(
        schedule in arb_schedule(),
        duration in arb_duration(),
    ) {
        let request = SlotRequest::new("p001", "c001", DATE, i64::from(duration)).unwrap();
        let result = recommend_slots(&request, &schedule).unwrap();
        let total = candidates_for(&schedule, duration).len();

        prop_assert_eq!(result.status, SlotStatus::Success);
        prop_assert!(result.recommended_slots.len() <= MAX_RECOMMENDATIONS);
        prop_assert_eq!(result.recommended_slots.len(), total.min(MAX_RECOMMENDATIONS));
    }

    /// Same input, same ordered output.
    #[test]
    fn recommendation_is_idempotent(
        schedule in arb_schedule(),
        duration in arb_duration(),
    ) {
        let request = SlotRequest::new("p001", "c001", DATE, i64::from(duration)).unwrap();
        let first = recommend_slots(&request, &schedule).unwrap();
        let second = recommend_slots(&request, &schedule.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// A day absent from the working hours is always an empty error result.
    #[test]
    fn unworked_day_is_always_error(
        schedule in arb_schedule(),
        duration in arb_duration(),
        offset in 1i64..=6,
    ) {
        let date = (day() + Duration::days(offset)).format("%Y-%m-%d").to_string();
        let request = SlotRequest::new("p001", "c001", &date, i64::from(duration)).unwrap();

        let result = recommend_slots(&request, &schedule).unwrap();

        prop_assert_eq!(result.status, SlotStatus::Error);
        prop_assert!(result.recommended_slots.is_empty());
        prop_assert_eq!(result.message.as_deref(), Some("no working hours for this day"));
    }
}
