//! Strict calendar-month aggregation of daily values.
//!
//! Each window month is reduced to `sum(values) / days_in_month`, so a month with partial
//! provider coverage is pulled toward zero for the missing days instead of being
//! extrapolated. A month without any sample is absent, never zero.

use crate::aggregation::reduce::DailyValue;
use crate::types::calendar_window::{CalendarWindow, MONTHS};
use crate::types::monthly::{round_one_decimal, MonthlyAggregate};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Monthly means plus the number of distinct days observed in each month.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketedMonths {
    pub aggregate: MonthlyAggregate,
    pub observed_days: [u32; MONTHS],
}

impl BucketedMonths {
    /// Drops every month observed on fewer than `ceil(fraction * days_in_month)` distinct days.
    pub fn masked_by_coverage(&self, fraction: f64, window: &CalendarWindow) -> MonthlyAggregate {
        let mut aggregate = self.aggregate;
        for (idx, slot) in window.slots().iter().enumerate() {
            if self.observed_days[idx] < required_days(slot.days_in_month, fraction) {
                aggregate.values[idx] = None;
            }
        }
        aggregate
    }
}

pub fn required_days(days_in_month: u32, fraction: f64) -> u32 {
    (fraction * days_in_month as f64).ceil() as u32
}

pub fn bucket_daily(
    samples: impl IntoIterator<Item = DailyValue>,
    window: &CalendarWindow,
) -> BucketedMonths {
    let mut sums = [0.0f64; MONTHS];
    let mut samples_seen = [0usize; MONTHS];
    let mut days: [BTreeSet<NaiveDate>; MONTHS] = Default::default();

    for sample in samples {
        if !sample.value.is_finite() {
            continue;
        }
        let Some(idx) = window.slot_index(sample.date) else {
            continue;
        };
        sums[idx] += sample.value;
        samples_seen[idx] += 1;
        days[idx].insert(sample.date);
    }

    let slots = window.slots();
    let values = std::array::from_fn(|idx| {
        (samples_seen[idx] > 0)
            .then(|| round_one_decimal(sums[idx] / slots[idx].days_in_month as f64))
    });
    BucketedMonths {
        aggregate: MonthlyAggregate {
            start_month: window.start_month(),
            values,
        },
        observed_days: std::array::from_fn(|idx| days[idx].len() as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Window July 2023 .. June 2024.
    fn window() -> CalendarWindow {
        CalendarWindow::ending_before(date(2024, 7, 10))
    }

    fn every_day(from: NaiveDate, count: i64, value: f64) -> Vec<DailyValue> {
        (0..count)
            .map(|i| DailyValue { date: from + Duration::days(i), value })
            .collect()
    }

    #[test]
    fn test_divides_by_days_in_month_not_by_samples() {
        // September has 30 days; 10 samples summing to 100.
        let samples = every_day(date(2023, 9, 1), 10, 10.0);
        let bucketed = bucket_daily(samples, &window());
        assert_eq!(bucketed.aggregate.values[2], Some(3.3));
        assert_eq!(bucketed.observed_days[2], 10);
    }

    #[test]
    fn test_month_without_samples_is_absent() {
        let samples = every_day(date(2023, 7, 1), 31, 25.0);
        let bucketed = bucket_daily(samples, &window());
        assert_eq!(bucketed.aggregate.values[0], Some(25.0));
        assert!(bucketed.aggregate.values[1..].iter().all(Option::is_none));
        assert_eq!(bucketed.aggregate.start_month, 7);
    }

    #[test]
    fn test_zero_valued_month_is_present() {
        let samples = every_day(date(2024, 1, 1), 31, 0.0);
        let bucketed = bucket_daily(samples, &window());
        assert_eq!(bucketed.aggregate.values[6], Some(0.0));
    }

    #[test]
    fn test_samples_outside_window_are_ignored() {
        let mut samples = every_day(date(2023, 6, 1), 30, 50.0);
        samples.extend(every_day(date(2024, 7, 1), 31, 50.0));
        let bucketed = bucket_daily(samples, &window());
        assert!(bucketed.aggregate.is_all_absent());
    }

    #[test]
    fn test_leap_february() {
        let samples = every_day(date(2024, 2, 1), 29, 2.9);
        let bucketed = bucket_daily(samples, &window());
        assert_eq!(bucketed.aggregate.values[7], Some(2.9));
    }

    #[test]
    fn test_required_days() {
        assert_eq!(required_days(31, 0.66), 21);
        assert_eq!(required_days(30, 0.66), 20);
        assert_eq!(required_days(29, 0.66), 20);
        assert_eq!(required_days(28, 0.66), 19);
    }

    #[test]
    fn test_coverage_mask() {
        let window = window();
        // July: 21 of 31 days (enough), August: 20 of 31 days (not enough).
        let mut samples = every_day(date(2023, 7, 1), 21, 31.0);
        samples.extend(every_day(date(2023, 8, 1), 20, 31.0));
        let bucketed = bucket_daily(samples, &window);
        assert_eq!(bucketed.aggregate.values[1], Some(20.0));

        let masked = bucketed.masked_by_coverage(0.66, &window);
        assert_eq!(masked.values[0], Some(21.0));
        assert_eq!(masked.values[1], None);
    }

    #[test]
    fn test_duplicate_dates_count_once_for_coverage() {
        let window = window();
        let samples: Vec<_> = (0..40)
            .map(|_| DailyValue { date: date(2023, 7, 1), value: 1.0 })
            .collect();
        let bucketed = bucket_daily(samples, &window);
        assert_eq!(bucketed.observed_days[0], 1);
        assert!(bucketed.masked_by_coverage(0.66, &window).values[0].is_none());
    }
}
