//! Tests for the disruption score terms and their relative effect on ranking.

use chrono::{NaiveDate, NaiveDateTime};
use slot_engine::interval::Interval;
use slot_engine::scoring::{
    score_candidates, score_slot, select_top, ADJACENCY_PENALTY, EDGE_OF_DAY_PENALTY,
    SQUEEZE_PENALTY,
};
use slot_engine::window::WorkingWindow;

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, 9)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn span(start: (u32, u32), end: (u32, u32)) -> Interval {
    Interval::new(at(start.0, start.1), at(end.0, end.1))
}

fn morning() -> WorkingWindow {
    WorkingWindow {
        start: at(9, 0),
        end: at(12, 0),
    }
}

#[test]
fn free_day_scores_are_infinite_with_edge_penalty_only_at_boundaries() {
    let first = score_slot(&span((9, 0), (9, 30)), &morning(), &[], 15);
    let middle = score_slot(&span((10, 0), (10, 30)), &morning(), &[], 15);
    let last = score_slot(&span((11, 30), (12, 0)), &morning(), &[], 15);

    assert_eq!(first.edge_of_day, EDGE_OF_DAY_PENALTY);
    assert_eq!(middle.edge_of_day, 0.0);
    assert_eq!(last.edge_of_day, EDGE_OF_DAY_PENALTY);
    for breakdown in [first, middle, last] {
        assert_eq!(breakdown.adjacency, 0.0);
        assert_eq!(breakdown.squeeze, 0.0);
        assert!(breakdown.total().is_infinite() && breakdown.total() > 0.0);
    }
}

#[test]
fn slot_close_to_one_appointment_gets_adjacency_term() {
    let breakdown = score_slot(&span((9, 15), (9, 45)), &morning(), &[span((10, 0), (10, 30))], 15);

    assert_eq!(breakdown.adjacency, ADJACENCY_PENALTY);
    assert_eq!(breakdown.edge_of_day, 0.0);
    assert_eq!(breakdown.squeeze, 0.0);
    assert_eq!(breakdown.spacing, 15.0);
    assert_eq!(breakdown.total(), 5.0);
}

#[test]
fn adjacency_threshold_is_twice_the_gap() {
    let appointments = [span((9, 0), (9, 30))];
    let slot = span((10, 15), (10, 45)); // 45 minutes after the appointment

    let with_15 = score_slot(&slot, &morning(), &appointments, 15);
    let with_30 = score_slot(&slot, &morning(), &appointments, 30);

    assert_eq!(with_15.adjacency, 0.0);
    assert_eq!(with_30.adjacency, ADJACENCY_PENALTY);
}

#[test]
fn slot_squeezed_between_two_appointments_gets_squeeze_term() {
    let appointments = [span((9, 30), (10, 0)), span((11, 0), (11, 30))];

    let breakdown = score_slot(&span((10, 15), (10, 45)), &morning(), &appointments, 15);

    assert_eq!(breakdown.adjacency, ADJACENCY_PENALTY);
    assert_eq!(breakdown.squeeze, SQUEEZE_PENALTY);
    assert_eq!(breakdown.spacing, 15.0);
    assert_eq!(breakdown.total(), 15.0);
}

#[test]
fn squeezed_slot_ranks_behind_one_sided_neighbour() {
    let appointments = [span((9, 30), (10, 0)), span((11, 0), (11, 30))];
    let window = WorkingWindow {
        start: at(8, 0),
        end: at(14, 0),
    };

    // 10:15 sits between both appointments; 11:45 only follows the second.
    let scored = score_candidates(&[at(10, 15), at(11, 45)], 30, &window, &appointments, 15);
    let ranked = select_top(scored, 10);

    assert_eq!(ranked[0].start, at(11, 45));
    assert_eq!(ranked[1].start, at(10, 15));
    assert!(ranked[0].score < ranked[1].score);
}

#[test]
fn wider_surrounding_gap_adds_to_spacing_term() {
    let appointments = [span((9, 0), (9, 30))];
    let window = WorkingWindow {
        start: at(8, 0),
        end: at(14, 0),
    };

    let near = score_slot(&span((10, 30), (11, 0)), &window, &appointments, 15);
    let far = score_slot(&span((12, 0), (12, 30)), &window, &appointments, 15);

    assert_eq!(near.spacing, 60.0);
    assert_eq!(far.spacing, 150.0);
    assert!(near.total() < far.total());
}

#[test]
fn scoring_is_deterministic() {
    let appointments = [span((9, 30), (10, 0)), span((11, 0), (11, 30))];
    let starts = [at(9, 0), at(10, 15), at(11, 45)];

    let a = score_candidates(&starts, 30, &morning(), &appointments, 15);
    let b = score_candidates(&starts, 30, &morning(), &appointments, 15);

    assert_eq!(a, b);
}
