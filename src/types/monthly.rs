//! Twelve-slot monthly values and the rotation into January-first order.

use crate::types::calendar_window::MONTHS;

/// One value per month, `None` where no usable samples existed.
pub type MonthlyValues = [Option<f64>; MONTHS];

/// Monthly values indexed from the fetch window's first month rather than January.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyAggregate {
    /// Calendar month (1-12) stored at index 0.
    pub start_month: u32,
    pub values: MonthlyValues,
}

impl MonthlyAggregate {
    pub fn absent(start_month: u32) -> Self {
        Self {
            start_month,
            values: [None; MONTHS],
        }
    }

    pub fn is_all_absent(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    pub fn map_values(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            start_month: self.start_month,
            values: self.values.map(|value| value.map(&f)),
        }
    }

    /// Values reordered so index 0 is January.
    pub fn to_calendar(&self) -> MonthlyValues {
        rotate_to_calendar(&self.values, self.start_month)
    }
}

/// Re-indexes a sequence whose first element belongs to calendar month `start_month` (1-12)
/// into January-first order: `output[(start_month - 1 + i) % 12] = input[i]`.
///
/// Start months outside 1-12 are taken modulo 12, so `0` means December.
///
/// # Examples
///
/// ```
/// use climate_normals::rotate_to_calendar;
///
/// let window_order = [7, 8, 9, 10, 11, 12, 1, 2, 3, 4, 5, 6];
/// assert_eq!(
///     rotate_to_calendar(&window_order, 7),
///     [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]
/// );
/// ```
pub fn rotate_to_calendar<T: Clone>(values: &[T; MONTHS], start_month: u32) -> [T; MONTHS] {
    let shift = ((start_month as usize) + MONTHS - 1) % MONTHS;
    std::array::from_fn(|calendar_idx| values[(calendar_idx + MONTHS - shift) % MONTHS].clone())
}

/// Half-up rounding to one decimal.
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Half-up rounding to a whole number.
pub(crate) fn round_whole(value: f64) -> f64 {
    (value + 0.5).floor()
}
