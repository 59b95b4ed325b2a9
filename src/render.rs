//! Calendar-ordered table view of a stored profile.

use crate::types::calendar_window::MONTHS;
use crate::types::profile::ClimateProfile;
use serde::Serialize;
use std::fmt;

const MONTH_LABELS: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRow {
    /// Calendar month, 1-12.
    pub month: u32,
    pub label: &'static str,
    pub air_c: Option<f64>,
    pub water_c: Option<f64>,
    pub humidity: Option<f64>,
}

/// Twelve rows, January first, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateTable {
    pub rows: [MonthRow; MONTHS],
}

impl ClimateTable {
    pub fn from_profile(profile: &ClimateProfile) -> Self {
        let channels = profile.calendar_channels();
        let rows = std::array::from_fn(|idx| MonthRow {
            month: idx as u32 + 1,
            label: MONTH_LABELS[idx],
            air_c: channels.air_c[idx],
            water_c: channels.water_c[idx],
            humidity: channels.humidity[idx],
        });
        Self { rows }
    }
}

impl fmt::Display for ClimateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<5}{:>8}{:>8}{:>8}", "", "air", "water", "hum")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<5}{:>8}{:>8}{:>8}",
                row.label,
                cell(row.air_c, 1),
                cell(row.water_c, 1),
                cell(row.humidity, 0)
            )?;
        }
        Ok(())
    }
}

fn cell(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::profile::tests::sample_profile;
    use crate::types::profile::MonthOrder;

    #[test]
    fn test_calendar_document_is_not_rotated() {
        let table = ClimateTable::from_profile(&sample_profile(MonthOrder::Calendar));
        assert_eq!(table.rows[0].label, "Jan");
        assert_eq!(table.rows[0].air_c, Some(0.0));
        assert_eq!(table.rows[11].month, 12);
        assert_eq!(table.rows[11].air_c, Some(11.0));
    }

    #[test]
    fn test_window_document_is_rotated() {
        // Window starts in July: stored index 0 belongs to July.
        let table = ClimateTable::from_profile(&sample_profile(MonthOrder::Window));
        assert_eq!(table.rows[6].label, "Jul");
        assert_eq!(table.rows[6].air_c, Some(0.0));
        assert_eq!(table.rows[0].air_c, Some(6.0));
        assert_eq!(table.rows[0].water_c, None);
    }

    #[test]
    fn test_display_marks_missing_values() {
        let rendered =
            ClimateTable::from_profile(&sample_profile(MonthOrder::Calendar)).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[1].starts_with("Jan"));
        assert!(lines[1].contains('-'));
        assert!(lines[2].contains("1.0"));
    }
}
