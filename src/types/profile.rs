//! The persisted climate document and its diagnostics.

use crate::types::destination::DestinationId;
use crate::types::geo_point::GeoPoint;
use crate::types::monthly::{rotate_to_calendar, MonthlyValues};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Twelve-month climate profile for one destination.
///
/// Serialized with camelCase keys; missing months are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateProfile {
    /// Year of the last month in the window.
    pub year_using: i32,
    pub source: String,
    pub air_c: MonthlyValues,
    pub water_c: MonthlyValues,
    pub humidity: MonthlyValues,
    pub meta: ClimateMeta,
}

impl ClimateProfile {
    /// The three channels in January-first order.
    ///
    /// Documents stored in window order are rotated with the recorded start month,
    /// using the same transform as the write path.
    pub fn calendar_channels(&self) -> CalendarChannels {
        match self.meta.order {
            MonthOrder::Calendar => CalendarChannels {
                air_c: self.air_c,
                water_c: self.water_c,
                humidity: self.humidity,
            },
            MonthOrder::Window => CalendarChannels {
                air_c: rotate_to_calendar(&self.air_c, self.meta.era.start_month),
                water_c: rotate_to_calendar(&self.water_c, self.meta.marine.start_month),
                humidity: rotate_to_calendar(&self.humidity, self.meta.era.start_month),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarChannels {
    pub air_c: MonthlyValues,
    pub water_c: MonthlyValues,
    pub humidity: MonthlyValues,
}

/// Order the monthly arrays of a document are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthOrder {
    /// Index 0 is January.
    #[default]
    Calendar,
    /// Index 0 is the first month of the fetch window.
    Window,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateMeta {
    pub era: EraMeta,
    pub marine: MarineMeta,
    pub start_month: u32,
    pub window: WindowBounds,
    pub note: String,
    #[serde(default)]
    pub order: MonthOrder,
}

/// Inclusive date bounds sent to a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Where the air temperature channel came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AirSource {
    /// Daily means of local hours 10-18.
    HourlyDaytime,
    /// Provider daily mean, used when the hourly series was unusable.
    DailyMean,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EraMeta {
    pub ok: bool,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub start_month: u32,
    pub air_source: AirSource,
    pub humidity_ok: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarineMeta {
    pub ok: bool,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub start_month: u32,
    /// Coordinate the sea-surface series was taken from.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Ring radius in degrees, `0` for the exact point.
    pub radius_deg: Option<f64>,
    pub distance_km: Option<f64>,
    pub probes: u32,
}

/// A profile as kept by a [`crate::ProfileStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredClimate {
    pub destination: DestinationId,
    pub latitude: f64,
    pub longitude: f64,
    pub source: String,
    pub profile: ClimateProfile,
    pub updated_at: DateTime<Utc>,
}

impl StoredClimate {
    pub fn new(destination: DestinationId, point: GeoPoint, profile: ClimateProfile) -> Self {
        Self {
            destination,
            latitude: point.latitude(),
            longitude: point.longitude(),
            source: profile.source.clone(),
            profile,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_profile(order: MonthOrder) -> ClimateProfile {
        let day = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let values: MonthlyValues = std::array::from_fn(|i| Some(i as f64));
        ClimateProfile {
            year_using: 2024,
            source: "test".to_string(),
            air_c: values,
            water_c: [None; 12],
            humidity: values.map(|v| v.map(|x| x * 10.0)),
            meta: ClimateMeta {
                era: EraMeta {
                    ok: true,
                    start: day,
                    end: last,
                    start_month: 7,
                    air_source: AirSource::HourlyDaytime,
                    humidity_ok: true,
                },
                marine: MarineMeta {
                    ok: false,
                    start: day,
                    end: last,
                    start_month: 7,
                    latitude: None,
                    longitude: None,
                    radius_deg: None,
                    distance_km: None,
                    probes: 81,
                },
                start_month: 7,
                window: WindowBounds { start: day, end: last },
                note: String::new(),
                order,
            },
        }
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample_profile(MonthOrder::Calendar)).unwrap();
        assert_eq!(json["yearUsing"], 2024);
        assert_eq!(json["airC"].as_array().unwrap().len(), 12);
        assert!(json["waterC"][0].is_null());
        assert_eq!(json["meta"]["startMonth"], 7);
        assert_eq!(json["meta"]["era"]["airSource"], "hourly-daytime");
        assert_eq!(json["meta"]["marine"]["ok"], false);
        assert_eq!(json["meta"]["window"]["start"], "2023-07-01");
        assert_eq!(json["meta"]["order"], "calendar");
    }

    #[test]
    fn test_missing_order_defaults_to_calendar() {
        let mut json = serde_json::to_value(sample_profile(MonthOrder::Window)).unwrap();
        json["meta"].as_object_mut().unwrap().remove("order");
        let profile: ClimateProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.meta.order, MonthOrder::Calendar);
    }

    #[test]
    fn test_calendar_channels_rotates_window_documents_only() {
        let calendar = sample_profile(MonthOrder::Calendar).calendar_channels();
        assert_eq!(calendar.air_c[0], Some(0.0));

        let window = sample_profile(MonthOrder::Window).calendar_channels();
        assert_eq!(window.air_c[6], Some(0.0));
        assert_eq!(window.air_c[0], Some(6.0));
        assert_eq!(window.humidity[0], Some(60.0));
    }
}
