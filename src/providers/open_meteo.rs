//! Open-Meteo implementation of both providers: the historical archive (ERA5 model) and
//! the marine API.

use crate::config::ClimateConfig;
use crate::providers::cache::ResponseCache;
use crate::providers::error::ProviderError;
use crate::providers::{ArchiveProvider, DailyMeans, MarineProvider};
use crate::types::calendar_window::CalendarWindow;
use crate::types::geo_point::GeoPoint;
use crate::types::raw_series::RawSeries;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const DEFAULT_MARINE_URL: &str = "https://marine-api.open-meteo.com/v1/marine";

#[derive(Debug, Deserialize)]
struct HourlyEnvelope<T> {
    hourly: T,
}

#[derive(Debug, Deserialize)]
struct DailyEnvelope<T> {
    daily: T,
}

#[derive(Debug, Deserialize)]
struct HourlyTemperature {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct DailyArchive {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_mean: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m_mean: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct HourlySeaSurface {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    sea_surface_temperature: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    archive_url: String,
    marine_url: String,
    cache: Option<ResponseCache<String>>,
}

impl OpenMeteoClient {
    pub fn new(config: &ClimateConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::NetworkRequest(config.archive_url.clone(), e))?;
        Ok(Self {
            http,
            archive_url: config.archive_url.trim_end_matches('/').to_string(),
            marine_url: config.marine_url.trim_end_matches('/').to_string(),
            cache: config.cache_ttl.map(ResponseCache::new),
        })
    }

    /// Shares an existing response cache, replacing the one built from the config.
    pub fn with_cache(mut self, cache: ResponseCache<String>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub(crate) fn hourly_temperature_url(
        &self,
        point: GeoPoint,
        window: &CalendarWindow,
    ) -> String {
        format!(
            "{}?{}&hourly=temperature_2m&models=era5&timezone=auto",
            self.archive_url,
            query_bounds(point, window)
        )
    }

    pub(crate) fn daily_means_url(&self, point: GeoPoint, window: &CalendarWindow) -> String {
        format!(
            "{}?{}&daily=temperature_2m_mean,relative_humidity_2m_mean&models=era5&timezone=GMT",
            self.archive_url,
            query_bounds(point, window)
        )
    }

    pub(crate) fn sea_surface_url(&self, point: GeoPoint, window: &CalendarWindow) -> String {
        format!(
            "{}?{}&hourly=sea_surface_temperature&timezone=auto",
            self.marine_url,
            query_bounds(point, window)
        )
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        let body = self.fetch_body(url).await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::JsonParse {
            url: url.to_string(),
            source: e,
        })
    }

    async fn fetch_body(&self, url: &str) -> Result<String, ProviderError> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(url).await {
                debug!("Response cache hit for {}", url);
                return Ok(body);
            }
        }

        info!("Requesting {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ProviderError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ProviderError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkRequest(url.to_string(), e))?;

        if let Some(cache) = &self.cache {
            cache.insert(url.to_string(), body.clone()).await;
        }
        Ok(body)
    }
}

#[async_trait]
impl ArchiveProvider for OpenMeteoClient {
    async fn hourly_temperature(
        &self,
        point: GeoPoint,
        window: &CalendarWindow,
    ) -> Result<RawSeries, ProviderError> {
        let url = self.hourly_temperature_url(point, window);
        let envelope: HourlyEnvelope<HourlyTemperature> = self.fetch_json(&url).await?;
        parallel_series(&url, envelope.hourly.time, envelope.hourly.temperature_2m)
    }

    async fn daily_means(
        &self,
        point: GeoPoint,
        window: &CalendarWindow,
    ) -> Result<DailyMeans, ProviderError> {
        let url = self.daily_means_url(point, window);
        let envelope: DailyEnvelope<DailyArchive> = self.fetch_json(&url).await?;
        let daily = envelope.daily;
        // Each variable degrades on its own so a missing humidity column keeps the temperatures.
        Ok(DailyMeans {
            temperature: series_or_empty(&url, daily.time.clone(), daily.temperature_2m_mean),
            humidity: series_or_empty(&url, daily.time, daily.relative_humidity_2m_mean),
        })
    }
}

#[async_trait]
impl MarineProvider for OpenMeteoClient {
    async fn hourly_sea_surface(
        &self,
        point: GeoPoint,
        window: &CalendarWindow,
    ) -> Result<RawSeries, ProviderError> {
        let url = self.sea_surface_url(point, window);
        let envelope: HourlyEnvelope<HourlySeaSurface> = self.fetch_json(&url).await?;
        parallel_series(
            &url,
            envelope.hourly.time,
            envelope.hourly.sea_surface_temperature,
        )
    }
}

fn query_bounds(point: GeoPoint, window: &CalendarWindow) -> String {
    format!(
        "latitude={:.4}&longitude={:.4}&start_date={}&end_date={}",
        point.latitude(),
        point.longitude(),
        window.start().format("%Y-%m-%d"),
        window.last_day().format("%Y-%m-%d"),
    )
}

fn parallel_series(
    url: &str,
    timestamps: Vec<String>,
    values: Vec<Option<f64>>,
) -> Result<RawSeries, ProviderError> {
    let (timestamp_count, value_count) = (timestamps.len(), values.len());
    RawSeries::from_parallel(timestamps, values).ok_or_else(|| ProviderError::MalformedSeries {
        url: url.to_string(),
        timestamps: timestamp_count,
        values: value_count,
    })
}

fn series_or_empty(url: &str, timestamps: Vec<String>, values: Vec<Option<f64>>) -> RawSeries {
    parallel_series(url, timestamps, values).unwrap_or_else(|e| {
        warn!("Dropping daily variable: {}", e);
        RawSeries::default()
    })
}
