use chrono::{Duration, NaiveDate};
use climate_normals::{
    all_hours_daily_means, bucket_daily, daytime_daily_means, CalendarWindow, RawSeries,
    DAYTIME_HOURS,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn hourly_year(window: &CalendarWindow) -> RawSeries {
    let mut pairs = Vec::new();
    let mut day = window.start();
    while day < window.end() {
        for h in 0..24u32 {
            let value = 20.0 + (h as f64 / 4.0).sin() * 5.0;
            pairs.push((format!("{}T{:02}:00", day.format("%Y-%m-%d"), h), Some(value)));
        }
        day += Duration::days(1);
    }
    RawSeries::from_pairs(pairs)
}

fn bench_aggregation(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap_or_default();
    let window = CalendarWindow::ending_before(today);
    let series = hourly_year(&window);

    c.bench_function("daytime_daily_means", |b| {
        b.iter(|| daytime_daily_means(black_box(&series), DAYTIME_HOURS))
    });
    c.bench_function("all_hours_daily_means", |b| {
        b.iter(|| all_hours_daily_means(black_box(&series)))
    });

    let daily = all_hours_daily_means(&series).unwrap_or_default();
    c.bench_function("bucket_daily", |b| {
        b.iter(|| bucket_daily(black_box(daily.clone()), &window))
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
