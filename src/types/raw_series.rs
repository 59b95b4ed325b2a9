use chrono::{NaiveDate, NaiveDateTime};

/// A provider time series: timestamps with parallel values.
///
/// Values the provider reported as `null` are kept as `None` so the two vectors stay aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSeries {
    timestamps: Vec<String>,
    values: Vec<Option<f64>>,
}

impl RawSeries {
    /// Builds a series from parallel vectors. Returns `None` when their lengths differ.
    pub fn from_parallel(timestamps: Vec<String>, values: Vec<Option<f64>>) -> Option<Self> {
        (timestamps.len() == values.len()).then_some(Self { timestamps, values })
    }

    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, Option<f64>)>) -> Self {
        let (timestamps, values) = pairs
            .into_iter()
            .map(|(ts, value)| (ts.into(), value))
            .unzip();
        Self { timestamps, values }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> + '_ {
        self.timestamps
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Parses the timestamp formats providers emit (`2024-05-01T13:00`, with optional seconds,
/// or a bare date which is taken as midnight).
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
