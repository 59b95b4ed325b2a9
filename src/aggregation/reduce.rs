//! Reduces provider time series to one value per calendar day.

use crate::types::raw_series::{parse_timestamp, RawSeries};
use chrono::{Datelike, NaiveDate, Timelike};
use polars::prelude::*;
use std::ops::RangeInclusive;

/// Local hours averaged for the daytime air temperature.
pub const DAYTIME_HOURS: RangeInclusive<u32> = 10..=18;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// Mean of the samples whose local hour lies in `hours` (inclusive), per calendar day.
pub fn daytime_daily_means(
    series: &RawSeries,
    hours: RangeInclusive<u32>,
) -> PolarsResult<Vec<DailyValue>> {
    daily_means(series, Some(hours))
}

/// Mean of all samples per calendar day.
pub fn all_hours_daily_means(series: &RawSeries) -> PolarsResult<Vec<DailyValue>> {
    daily_means(series, None)
}

/// Values of a series that already has one entry per day. Nulls and unparsable dates are dropped.
pub fn daily_native_values(series: &RawSeries) -> Vec<DailyValue> {
    series
        .iter()
        .filter_map(|(ts, value)| {
            Some(DailyValue {
                date: parse_timestamp(ts)?.date(),
                value: value.filter(|v| v.is_finite())?,
            })
        })
        .collect()
}

fn daily_means(
    series: &RawSeries,
    hours: Option<RangeInclusive<u32>>,
) -> PolarsResult<Vec<DailyValue>> {
    let mut days = Vec::with_capacity(series.len());
    let mut hour_of_day = Vec::with_capacity(series.len());
    let mut values = Vec::with_capacity(series.len());
    for (ts, value) in series.iter() {
        let Some(stamp) = parse_timestamp(ts) else {
            continue;
        };
        days.push(stamp.date().num_days_from_ce());
        hour_of_day.push(stamp.hour() as i32);
        values.push(value.filter(|v| v.is_finite()));
    }
    if days.is_empty() {
        return Ok(Vec::new());
    }

    let frame = DataFrame::new(vec![
        Column::new("day".into(), days),
        Column::new("hour".into(), hour_of_day),
        Column::new("value".into(), values),
    ])?;

    let mut lazy = frame.lazy();
    if let Some(hours) = hours {
        lazy = lazy.filter(
            col("hour")
                .gt_eq(lit(*hours.start() as i32))
                .and(col("hour").lt_eq(lit(*hours.end() as i32))),
        );
    }
    // Stable grouping keeps days in series order; days whose values are all null get a null mean.
    let reduced = lazy
        .group_by_stable([col("day")])
        .agg([col("value").mean()])
        .collect()?;

    let days = reduced.column("day")?.i32()?;
    let means = reduced.column("value")?.f64()?;
    Ok(days
        .into_iter()
        .zip(means.into_iter())
        .filter_map(|(day, mean)| {
            Some(DailyValue {
                date: NaiveDate::from_num_days_from_ce_opt(day?)?,
                value: mean?,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly_day(date: &str, value_at: impl Fn(u32) -> Option<f64>) -> Vec<(String, Option<f64>)> {
        (0..24)
            .map(|h| (format!("{date}T{h:02}:00"), value_at(h)))
            .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daytime_uses_only_hours_ten_to_eighteen() {
        // Hours 10..=18 carry 20.0, every other hour 0.0.
        let series = RawSeries::from_pairs(hourly_day("2024-05-01", |h| {
            Some(if (10..=18).contains(&h) { 20.0 } else { 0.0 })
        }));
        let days = daytime_daily_means(&series, DAYTIME_HOURS).unwrap();
        assert_eq!(days, vec![DailyValue { date: date(2024, 5, 1), value: 20.0 }]);
    }

    #[test]
    fn test_daytime_boundaries_are_inclusive() {
        let series = RawSeries::from_pairs(hourly_day("2024-05-01", |h| match h {
            9 => Some(100.0),
            10 => Some(1.0),
            18 => Some(3.0),
            19 => Some(100.0),
            _ => None,
        }));
        let days = daytime_daily_means(&series, DAYTIME_HOURS).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].value, 2.0);
    }

    #[test]
    fn test_all_hours_mean_groups_per_day() {
        let mut pairs = hourly_day("2024-05-01", |h| Some(h as f64));
        pairs.extend(hourly_day("2024-05-02", |_| Some(4.0)));
        let series = RawSeries::from_pairs(pairs);
        let days = all_hours_daily_means(&series).unwrap();
        assert_eq!(
            days,
            vec![
                DailyValue { date: date(2024, 5, 1), value: 11.5 },
                DailyValue { date: date(2024, 5, 2), value: 4.0 },
            ]
        );
    }

    #[test]
    fn test_days_without_values_are_dropped() {
        let mut pairs = hourly_day("2024-05-01", |_| None);
        pairs.extend(hourly_day("2024-05-02", |h| (h == 12).then_some(7.5)));
        pairs.push(("garbage".to_string(), Some(1.0)));
        let series = RawSeries::from_pairs(pairs);
        let days = all_hours_daily_means(&series).unwrap();
        assert_eq!(days, vec![DailyValue { date: date(2024, 5, 2), value: 7.5 }]);
    }

    #[test]
    fn test_empty_series() {
        assert!(all_hours_daily_means(&RawSeries::default()).unwrap().is_empty());
        assert!(daytime_daily_means(&RawSeries::default(), DAYTIME_HOURS)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_daily_native_values_skip_nulls() {
        let series = RawSeries::from_pairs([
            ("2024-01-01", Some(3.0)),
            ("2024-01-02", None),
            ("2024-01-03", Some(f64::NAN)),
            ("2024-01-04", Some(5.0)),
        ]);
        let values = daily_native_values(&series);
        assert_eq!(values.len(), 2);
        assert_eq!(values[1].date, date(2024, 1, 4));
    }
}
