mod aggregation;
mod climate;
mod config;
mod error;
mod marine;
mod providers;
mod render;
mod store;
mod types;
mod utils;

pub use climate::*;
pub use config::{ClimateConfig, DEFAULT_SOURCE};
pub use error::{ClimateError, ValidationError};

pub use aggregation::bucket::{bucket_daily, required_days, BucketedMonths};
pub use aggregation::reduce::{
    all_hours_daily_means, daily_native_values, daytime_daily_means, DailyValue, DAYTIME_HOURS,
};

pub use marine::locate_marine::{
    MarineFix, MarineLocator, DEFAULT_COVERAGE_FRACTION, DEFAULT_RING_DIRECTIONS,
    DEFAULT_RING_RADII,
};

pub use providers::cache::ResponseCache;
pub use providers::error::ProviderError;
pub use providers::open_meteo::{OpenMeteoClient, DEFAULT_ARCHIVE_URL, DEFAULT_MARINE_URL};
pub use providers::{ArchiveProvider, DailyMeans, MarineProvider};

pub use render::{ClimateTable, MonthRow};

pub use store::error::StoreError;
pub use store::file::FileProfileStore;
pub use store::memory::MemoryProfileStore;
pub use store::ProfileStore;

pub use types::calendar_window::{CalendarWindow, MonthSlot, MONTHS};
pub use types::destination::DestinationId;
pub use types::geo_point::GeoPoint;
pub use types::monthly::{rotate_to_calendar, MonthlyAggregate, MonthlyValues};
pub use types::profile::*;
pub use types::raw_series::RawSeries;
