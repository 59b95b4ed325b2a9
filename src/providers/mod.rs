//! Raw historical-weather providers consumed by the engine.

pub mod cache;
pub mod error;
pub mod open_meteo;

use crate::providers::error::ProviderError;
use crate::types::calendar_window::CalendarWindow;
use crate::types::geo_point::GeoPoint;
use crate::types::raw_series::RawSeries;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// Daily-native archive response, timestamps in UTC.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyMeans {
    pub temperature: RawSeries,
    pub humidity: RawSeries,
}

/// ERA5-style archive supplying air temperature and humidity.
#[async_trait]
pub trait ArchiveProvider: Send + Sync {
    /// Hourly 2 m air temperature over the window, timestamps in the location's local time.
    async fn hourly_temperature(
        &self,
        point: GeoPoint,
        window: &CalendarWindow,
    ) -> Result<RawSeries, ProviderError>;

    /// Daily mean temperature and relative humidity over the window.
    async fn daily_means(
        &self,
        point: GeoPoint,
        window: &CalendarWindow,
    ) -> Result<DailyMeans, ProviderError>;
}

/// Marine model supplying sea-surface temperature.
#[async_trait]
pub trait MarineProvider: Send + Sync {
    /// Hourly sea-surface temperature, timestamps in the location's local time.
    /// Grid cells on land return an empty or all-null series.
    async fn hourly_sea_surface(
        &self,
        point: GeoPoint,
        window: &CalendarWindow,
    ) -> Result<RawSeries, ProviderError>;
}

/// Runs a provider call with a deadline; an expired deadline becomes [`ProviderError::Timeout`].
pub(crate) async fn with_deadline<T>(
    deadline: Duration,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| ProviderError::Timeout(deadline))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_with_deadline_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, ProviderError>(1)
        };
        let result = with_deadline(Duration::from_secs(5), slow).await;
        assert!(matches!(result, Err(ProviderError::Timeout(d)) if d == Duration::from_secs(5)));

        let fast = async { Ok::<_, ProviderError>(2) };
        assert_eq!(with_deadline(Duration::from_secs(5), fast).await.unwrap(), 2);
    }
}
