//! The rolling twelve-month window every climate profile is computed over.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

pub const MONTHS: usize = 12;

/// One calendar month of the window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSlot {
    pub year: i32,
    /// 1 = January.
    pub month: u32,
    pub days_in_month: u32,
}

impl MonthSlot {
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl Display for MonthSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Twelve full calendar months ending the day before the current month started.
///
/// `start` is inclusive, `end` is exclusive (the first day of the current month).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use climate_normals::CalendarWindow;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let window = CalendarWindow::ending_before(today);
/// assert_eq!(window.start(), NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
/// assert_eq!(window.end(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// assert_eq!(window.slots()[11].days_in_month, 29); // February 2024
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarWindow {
    start: NaiveDate,
    end: NaiveDate,
    slots: [MonthSlot; MONTHS],
}

impl CalendarWindow {
    /// Computes the window for the month containing `today`.
    pub fn ending_before(today: NaiveDate) -> Self {
        let current_month = today.with_day(1).unwrap_or(today);
        let start = shift_months(current_month, -(MONTHS as i32));
        let slots = std::array::from_fn(|i| {
            let first = shift_months(start, i as i32);
            MonthSlot {
                year: first.year(),
                month: first.month(),
                days_in_month: days_in_month(first.year(), first.month()).unwrap_or(30),
            }
        });
        Self {
            start,
            end: current_month,
            slots,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive end: the first day of the current month.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Last day covered by the window, the inclusive bound sent to providers.
    pub fn last_day(&self) -> NaiveDate {
        self.end - Duration::days(1)
    }

    pub fn slots(&self) -> &[MonthSlot; MONTHS] {
        &self.slots
    }

    /// Calendar month (1-12) of the first slot.
    pub fn start_month(&self) -> u32 {
        self.slots[0].month
    }

    /// Position of `date` inside the window, or `None` when it falls outside.
    pub fn slot_index(&self, date: NaiveDate) -> Option<usize> {
        if date < self.start || date >= self.end {
            return None;
        }
        let months = (date.year() - self.start.year()) * 12 + date.month() as i32
            - self.start.month() as i32;
        usize::try_from(months).ok().filter(|idx| *idx < MONTHS)
    }
}

impl Display for CalendarWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Length of a calendar month, `None` for a month outside 1-12.
pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

/// Moves a first-of-month date by whole months.
fn shift_months(first_of_month: NaiveDate, months: i32) -> NaiveDate {
    let zero_based = first_of_month.year() * 12 + first_of_month.month0() as i32 + months;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(first_of_month)
}
