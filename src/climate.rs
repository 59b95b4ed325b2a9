//! The main entry point: computes a destination's twelve-month climate profile and persists it.

use crate::aggregation::bucket::bucket_daily;
use crate::aggregation::reduce::{daily_native_values, daytime_daily_means};
use crate::config::ClimateConfig;
use crate::error::ClimateError;
use crate::marine::locate_marine::{MarineFix, MarineLocator};
use crate::providers::error::ProviderError;
use crate::providers::open_meteo::OpenMeteoClient;
use crate::providers::{with_deadline, ArchiveProvider, DailyMeans, MarineProvider};
use crate::store::file::FileProfileStore;
use crate::store::ProfileStore;
use crate::types::calendar_window::{CalendarWindow, MONTHS};
use crate::types::destination::DestinationId;
use crate::types::geo_point::GeoPoint;
use crate::types::monthly::{round_whole, MonthlyAggregate};
use crate::types::profile::{
    AirSource, ClimateMeta, ClimateProfile, EraMeta, MarineMeta, MonthOrder, StoredClimate,
    WindowBounds,
};
use crate::types::raw_series::RawSeries;
use crate::utils::{ensure_dir_exists, get_data_dir};
use bon::bon;
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::path::PathBuf;
use tokio::task;

/// Engine backed by Open-Meteo and a [`FileProfileStore`].
pub type OpenMeteoEngine = ClimateEngine<OpenMeteoClient, OpenMeteoClient, FileProfileStore>;

/// Computes and stores climate normals for destinations.
///
/// A computation takes the twelve complete months before the current month, fetches the
/// archive (air temperature and humidity) and the marine model (sea-surface temperature)
/// concurrently, reduces both to calendar months and upserts the result. Provider failures
/// never fail the computation; they leave the affected channel absent and are recorded in
/// the profile's `meta`.
///
/// # Examples
///
/// ```rust
/// # use climate_normals::{ClimateError, OpenMeteoEngine};
/// # async fn run() -> Result<(), ClimateError> {
/// let engine = OpenMeteoEngine::new().await?;
/// let record = engine
///     .compute()
///     .destination("bali")
///     .latitude(-8.4095)
///     .longitude(115.1889)
///     .call()
///     .await?;
/// println!("Air temperature by month: {:?}", record.profile.air_c);
/// # Ok(())
/// # }
/// ```
pub struct ClimateEngine<A, M, S> {
    archive: A,
    marine: M,
    store: S,
    config: ClimateConfig,
}

struct EraChannels {
    air: MonthlyAggregate,
    humidity: MonthlyAggregate,
    air_source: AirSource,
}

impl OpenMeteoEngine {
    /// Creates an engine storing profiles under `data_folder`, which is created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::DataDirCreation`] if the folder cannot be created and
    /// [`ClimateError::ProviderClient`] if the HTTP client cannot be built.
    pub async fn with_data_folder(
        data_folder: PathBuf,
        config: ClimateConfig,
    ) -> Result<Self, ClimateError> {
        ensure_dir_exists(&data_folder)
            .await
            .map_err(|e| ClimateError::DataDirCreation(data_folder.clone(), e))?;
        let client = OpenMeteoClient::new(&config).map_err(ClimateError::ProviderClient)?;
        Ok(ClimateEngine::from_parts(
            client.clone(),
            client,
            FileProfileStore::new(data_folder),
            config,
        ))
    }

    /// Creates an engine using the platform data directory and [`ClimateConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::DataDirResolution`] if no data directory exists for this
    /// platform, plus the errors of [`OpenMeteoEngine::with_data_folder`].
    pub async fn new() -> Result<Self, ClimateError> {
        let data_folder = get_data_dir().ok_or(ClimateError::DataDirResolution)?;
        Self::with_data_folder(data_folder, ClimateConfig::from_env()).await
    }
}

#[bon]
impl<A, M, S> ClimateEngine<A, M, S>
where
    A: ArchiveProvider,
    M: MarineProvider,
    S: ProfileStore,
{
    pub fn from_parts(archive: A, marine: M, store: S, config: ClimateConfig) -> Self {
        Self {
            archive,
            marine,
            store,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ClimateConfig {
        &self.config
    }

    /// Computes the climate profile for a destination and upserts it, replacing any
    /// previous profile.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.destination(&str)`: **Required.** Identity of a destination known to the store.
    /// * `.latitude(f64)` / `.longitude(f64)`: Coordinates of the destination. Leaving one
    ///   out is a validation error.
    /// * `.today(NaiveDate)`: Optional. Date the window is computed from. Defaults to the
    ///   current UTC date.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::Validation`] for an empty identity or missing, non-finite or
    /// out-of-range coordinates, before any provider is contacted.
    /// Returns [`ClimateError::NotFound`] if the store does not know the destination.
    /// Returns [`ClimateError::Store`] if the store cannot be read or written.
    #[builder]
    pub async fn compute(
        &self,
        destination: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
        today: Option<NaiveDate>,
    ) -> Result<StoredClimate, ClimateError> {
        let destination = DestinationId::parse(destination)?;
        let point = GeoPoint::from_parts(latitude, longitude)?;
        if !self.store.resolve(&destination).await? {
            return Err(ClimateError::NotFound(destination));
        }

        let today = today.unwrap_or_else(|| Utc::now().date_naive());
        let window = CalendarWindow::ending_before(today);
        info!("Computing climate for '{}' at {} over {}", destination, point, window);

        let locator = MarineLocator::new(
            &self.marine,
            &self.config.ring_radii,
            self.config.ring_directions,
            self.config.coverage_fraction,
            self.config.request_timeout,
        );
        let (era, marine) = tokio::join!(
            self.era_channels(point, &window),
            locator.locate(point, &window),
        );

        let profile = self.assemble(&window, era, marine);
        let record = StoredClimate::new(destination, point, profile);
        self.store.upsert(&record).await?;
        info!(
            "Stored climate for '{}' (air: {:?}, marine ok: {})",
            record.destination, record.profile.meta.era.air_source, record.profile.meta.marine.ok
        );
        Ok(record)
    }

    /// Reads the stored profile of a destination, if one was computed.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::Validation`] for an empty identity and
    /// [`ClimateError::Store`] if the stored document cannot be read.
    #[builder]
    pub async fn stored(&self, destination: &str) -> Result<Option<StoredClimate>, ClimateError> {
        let destination = DestinationId::parse(destination)?;
        Ok(self.store.get(&destination).await?)
    }

    async fn era_channels(&self, point: GeoPoint, window: &CalendarWindow) -> EraChannels {
        let deadline = self.config.request_timeout;
        let (hourly, daily) = tokio::join!(
            with_deadline(deadline, self.archive.hourly_temperature(point, window)),
            with_deadline(deadline, self.archive.daily_means(point, window)),
        );

        let daily = daily.unwrap_or_else(|e| {
            warn!("Daily archive request for {} failed: {}", point, e);
            DailyMeans::default()
        });

        let daytime = match hourly {
            Ok(series) => self
                .daytime_months(series, window)
                .await
                .unwrap_or_else(|e| {
                    warn!("Daytime reduction for {} failed: {}", point, e);
                    MonthlyAggregate::absent(window.start_month())
                }),
            Err(e) => {
                warn!("Hourly archive request for {} failed: {}", point, e);
                MonthlyAggregate::absent(window.start_month())
            }
        };

        let (air, air_source) = if !daytime.is_all_absent() {
            (daytime, AirSource::HourlyDaytime)
        } else {
            let daily_air = bucket_daily(daily_native_values(&daily.temperature), window).aggregate;
            if daily_air.is_all_absent() {
                warn!("No usable air temperature for {}", point);
                (daily_air, AirSource::None)
            } else {
                info!("Falling back to daily mean air temperature for {}", point);
                (daily_air, AirSource::DailyMean)
            }
        };

        let humidity = bucket_daily(daily_native_values(&daily.humidity), window)
            .aggregate
            .map_values(round_whole);

        EraChannels {
            air,
            humidity,
            air_source,
        }
    }

    async fn daytime_months(
        &self,
        series: RawSeries,
        window: &CalendarWindow,
    ) -> Result<MonthlyAggregate, ProviderError> {
        let hours = self.config.daytime_hours.clone();
        let daily = task::spawn_blocking(move || daytime_daily_means(&series, hours)).await??;
        Ok(bucket_daily(daily, window).aggregate)
    }

    fn assemble(
        &self,
        window: &CalendarWindow,
        era: EraChannels,
        marine: MarineFix,
    ) -> ClimateProfile {
        let start = window.start();
        let end = window.last_day();
        let humidity_ok = !era.humidity.is_all_absent();
        let note = compose_note(&self.config, era.air_source, &marine);

        ClimateProfile {
            year_using: window.slots()[MONTHS - 1].year,
            source: self.config.source.clone(),
            air_c: era.air.to_calendar(),
            water_c: marine.months.to_calendar(),
            humidity: era.humidity.to_calendar(),
            meta: ClimateMeta {
                era: EraMeta {
                    ok: era.air_source != AirSource::None || humidity_ok,
                    start,
                    end,
                    start_month: era.air.start_month,
                    air_source: era.air_source,
                    humidity_ok,
                },
                marine: MarineMeta {
                    ok: marine.ok,
                    start,
                    end,
                    start_month: marine.months.start_month,
                    latitude: marine.point.map(|p| p.latitude()),
                    longitude: marine.point.map(|p| p.longitude()),
                    radius_deg: marine.radius_deg,
                    distance_km: marine.distance_km,
                    probes: marine.probes,
                },
                start_month: window.start_month(),
                window: WindowBounds { start, end },
                note,
                order: MonthOrder::Calendar,
            },
        }
    }
}

fn compose_note(config: &ClimateConfig, air_source: AirSource, marine: &MarineFix) -> String {
    let air = match air_source {
        AirSource::HourlyDaytime => format!(
            "air: mean of local hours {}-{}",
            config.daytime_hours.start(),
            config.daytime_hours.end()
        ),
        AirSource::DailyMean => "air: daily mean".to_string(),
        AirSource::None => "air: unavailable".to_string(),
    };
    let water = match (marine.ok, marine.distance_km) {
        (true, Some(km)) if km > 0.0 => format!("water: nearest sea cell {:.1} km away", km),
        (true, _) => "water: at the destination".to_string(),
        (false, _) => "water: unavailable".to_string(),
    };
    format!("Monthly sums divided by days in month; {}; {}", air, water)
}
