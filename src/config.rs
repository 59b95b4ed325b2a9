//! Engine settings: provider endpoints, deadlines and the aggregation constants.

use crate::aggregation::reduce::DAYTIME_HOURS;
use crate::marine::locate_marine::{
    DEFAULT_COVERAGE_FRACTION, DEFAULT_RING_DIRECTIONS, DEFAULT_RING_RADII,
};
use crate::providers::open_meteo::{DEFAULT_ARCHIVE_URL, DEFAULT_MARINE_URL};
use bon::Builder;
use log::warn;
use std::ops::RangeInclusive;
use std::time::Duration;

pub const DEFAULT_SOURCE: &str = "open-meteo";

/// Configuration for [`crate::ClimateEngine`].
///
/// # Examples
///
/// ```
/// use climate_normals::ClimateConfig;
/// use std::time::Duration;
///
/// let config = ClimateConfig::builder()
///     .request_timeout(Duration::from_secs(5))
///     .cache_ttl(Duration::from_secs(3600))
///     .build();
/// assert_eq!(config.ring_directions, 16);
/// assert_eq!(config.daytime_hours, 10..=18);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ClimateConfig {
    #[builder(into, default = DEFAULT_ARCHIVE_URL.to_string())]
    pub archive_url: String,
    #[builder(into, default = DEFAULT_MARINE_URL.to_string())]
    pub marine_url: String,
    /// Deadline applied to every outbound provider call.
    #[builder(default = Duration::from_secs(20))]
    pub request_timeout: Duration,
    #[builder(default = DAYTIME_HOURS)]
    pub daytime_hours: RangeInclusive<u32>,
    /// Ring radii in degrees, searched in order.
    #[builder(default = DEFAULT_RING_RADII.to_vec())]
    pub ring_radii: Vec<f64>,
    #[builder(default = DEFAULT_RING_DIRECTIONS)]
    pub ring_directions: usize,
    /// Fraction of a month's days that must be observed for a marine month to count.
    #[builder(default = DEFAULT_COVERAGE_FRACTION)]
    pub coverage_fraction: f64,
    #[builder(into, default = DEFAULT_SOURCE.to_string())]
    pub source: String,
    /// Enables the provider response cache with this time-to-live.
    pub cache_ttl: Option<Duration>,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClimateConfig {
    /// Defaults overridden by `CLIMATE_ARCHIVE_URL`, `CLIMATE_MARINE_URL`,
    /// `CLIMATE_TIMEOUT_SECS` and `CLIMATE_CACHE_TTL_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("CLIMATE_ARCHIVE_URL") {
            config.archive_url = url;
        }
        if let Some(url) = lookup("CLIMATE_MARINE_URL") {
            config.marine_url = url;
        }
        if let Some(secs) = parse_secs(&lookup, "CLIMATE_TIMEOUT_SECS") {
            config.request_timeout = secs;
        }
        if let Some(secs) = parse_secs(&lookup, "CLIMATE_CACHE_TTL_SECS") {
            config.cache_ttl = Some(secs);
        }
        config
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a whole number of seconds", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClimateConfig::default();
        assert_eq!(config.archive_url, DEFAULT_ARCHIVE_URL);
        assert_eq!(config.ring_radii, vec![0.1, 0.2, 0.4, 0.6, 0.8]);
        assert_eq!(config.coverage_fraction, 0.66);
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert!(config.cache_ttl.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CLIMATE_MARINE_URL", "http://localhost:9000/marine"),
            ("CLIMATE_TIMEOUT_SECS", "7"),
            ("CLIMATE_CACHE_TTL_SECS", "soon"),
        ]);
        let config = ClimateConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.marine_url, "http://localhost:9000/marine");
        assert_eq!(config.archive_url, DEFAULT_ARCHIVE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(7));
        assert!(config.cache_ttl.is_none());
    }
}
