use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use slot_engine::model::{AvailabilityInterval, OccupiedInterval};
use slot_engine::{recommend_slots, GapRule, ProviderSchedule, SlotRequest, WorkingHours};

/// A 07:00–19:00 day with a lunch gap and an appointment every 40 minutes.
fn busy_day() -> ProviderSchedule {
    let day = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
    let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();

    let occupied = (0..18)
        .map(|i| {
            let start = at(7, 0) + Duration::minutes(i * 40);
            OccupiedInterval::new(start, start + Duration::minutes(20))
        })
        .collect();

    ProviderSchedule {
        working_hours: WorkingHours::new().with_day("wed", "07:00", "19:00"),
        availability: vec![
            AvailabilityInterval::available(at(7, 0), at(12, 0)),
            AvailabilityInterval::available(at(13, 0), at(19, 0)),
        ],
        occupied,
        gap_rule: Some(GapRule::new(5, 5, 5)),
    }
}

fn bench_recommend(c: &mut Criterion) {
    let schedule = busy_day();
    let request = SlotRequest::new("p001", "c001", "2025-07-09", 15).unwrap();

    c.bench_function("recommend_busy_day", |b| {
        b.iter(|| recommend_slots(black_box(&request), black_box(&schedule)))
    });

    let open = ProviderSchedule {
        occupied: Vec::new(),
        ..busy_day()
    };
    c.bench_function("recommend_open_day", |b| {
        b.iter(|| recommend_slots(black_box(&request), black_box(&open)))
    });
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);
