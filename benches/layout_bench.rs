// Benchmark for the layout pipeline
// Measures grouping, packing and full week layout for growing event counts

use calendar_layout::models::event::{Event, EventModel};
use calendar_layout::models::settings::LayoutSettings;
use calendar_layout::services::layout::grouping::group;
use calendar_layout::services::layout::layout_week;
use calendar_layout::services::layout::packer::pack;
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn week_events(count: usize) -> Vec<EventModel> {
    let monday = NaiveDate::from_ymd_opt(2025, 1, 13)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();

    (0..count)
        .map(|i| {
            // spread over five days, overlapping in clusters of about four
            let start = monday
                + Duration::days((i % 5) as i64)
                + Duration::minutes(((i / 5) * 25 % 600) as i64);
            let end = start + Duration::minutes(45 + (i % 4) as i64 * 15);
            EventModel::new(Event::new(format!("Event {}", i), start, end)).unwrap()
        })
        .collect()
}

fn bench_group_and_pack(c: &mut Criterion) {
    let mut bench_group = c.benchmark_group("group_and_pack");

    for count in [10, 100, 500].iter() {
        let mut events = week_events(*count);
        events.sort_by_key(|e| e.start());

        bench_group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| {
                let groups = group(black_box(events), true);
                pack(events, &groups, true)
            });
        });
    }

    bench_group.finish();
}

fn bench_week_layout(c: &mut Criterion) {
    let mut bench_group = c.benchmark_group("week_layout");
    let settings = LayoutSettings::default();
    let render_date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

    for count in [10, 100, 500].iter() {
        let events = week_events(*count);

        bench_group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| layout_week(black_box(events), render_date, &settings));
        });
    }

    bench_group.finish();
}

criterion_group!(benches, bench_group_and_pack, bench_week_layout);
criterion_main!(benches);
