//! Finds the nearest coordinate with usable sea-surface data.
//!
//! Coastal points often fall on "dry" cells of the marine grid. The locator tries the exact
//! point first and then searches rings of increasing radius, probing every compass
//! direction of a ring concurrently and taking the first probe that meets coverage.

use crate::aggregation::bucket::bucket_daily;
use crate::aggregation::reduce::all_hours_daily_means;
use crate::providers::error::ProviderError;
use crate::providers::{with_deadline, MarineProvider};
use crate::types::calendar_window::CalendarWindow;
use crate::types::geo_point::GeoPoint;
use crate::types::monthly::MonthlyAggregate;
use futures_util::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};
use std::time::Duration;
use tokio::task;

pub const DEFAULT_RING_RADII: [f64; 5] = [0.1, 0.2, 0.4, 0.6, 0.8];
pub const DEFAULT_RING_DIRECTIONS: usize = 16;
pub const DEFAULT_COVERAGE_FRACTION: f64 = 0.66;

/// Outcome of a marine search. Exhausted searches carry twelve absent months and `ok == false`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarineFix {
    pub ok: bool,
    pub months: MonthlyAggregate,
    pub point: Option<GeoPoint>,
    /// `0.0` when the exact target was usable.
    pub radius_deg: Option<f64>,
    pub distance_km: Option<f64>,
    /// Number of provider probes issued, the exact point included.
    pub probes: u32,
}

pub struct MarineLocator<'a, M> {
    provider: &'a M,
    radii: &'a [f64],
    directions: usize,
    coverage_fraction: f64,
    deadline: Duration,
}

impl<'a, M: MarineProvider> MarineLocator<'a, M> {
    pub fn new(
        provider: &'a M,
        radii: &'a [f64],
        directions: usize,
        coverage_fraction: f64,
        deadline: Duration,
    ) -> Self {
        Self {
            provider,
            radii,
            directions,
            coverage_fraction,
            deadline,
        }
    }

    pub async fn locate(&self, target: GeoPoint, window: &CalendarWindow) -> MarineFix {
        let mut probes = 1;
        if let Some(months) = self.probe(target, window).await {
            info!("Sea-surface data found at exact point {}", target);
            return MarineFix {
                ok: true,
                months,
                point: Some(target),
                radius_deg: Some(0.0),
                distance_km: Some(0.0),
                probes,
            };
        }

        for &radius in self.radii {
            let ring = ring_points(target, radius, self.directions);
            probes += ring.len() as u32;
            if let Some((point, months)) = self.search_ring(ring, window).await {
                let distance_km = target.distance_km(&point);
                info!(
                    "Sea-surface data found at {} ({:.1} km from {}, ring {}°)",
                    point, distance_km, target, radius
                );
                return MarineFix {
                    ok: true,
                    months,
                    point: Some(point),
                    radius_deg: Some(radius),
                    distance_km: Some(distance_km),
                    probes,
                };
            }
            debug!("No usable sea-surface data on ring {}° around {}", radius, target);
        }

        warn!(
            "No usable sea-surface data within {}° of {} after {} probes",
            self.radii.last().copied().unwrap_or(0.0),
            target,
            probes
        );
        MarineFix {
            ok: false,
            months: MonthlyAggregate::absent(window.start_month()),
            point: None,
            radius_deg: None,
            distance_km: None,
            probes,
        }
    }

    /// Probes all points concurrently and returns the first accepted one to complete.
    /// Pending probes are dropped once a point is accepted.
    async fn search_ring(
        &self,
        ring: Vec<GeoPoint>,
        window: &CalendarWindow,
    ) -> Option<(GeoPoint, MonthlyAggregate)> {
        let mut pending: FuturesUnordered<_> = ring
            .into_iter()
            .map(move |point| async move { (point, self.probe(point, window).await) })
            .collect();

        while let Some((point, outcome)) = pending.next().await {
            if let Some(months) = outcome {
                return Some((point, months));
            }
        }
        None
    }

    /// A point is accepted when every month of the window survives the coverage mask.
    async fn probe(&self, point: GeoPoint, window: &CalendarWindow) -> Option<MonthlyAggregate> {
        match self.fetch_months(point, window).await {
            Ok(months) if months.is_complete() => Some(months),
            Ok(months) => {
                debug!(
                    "Sea-surface coverage too thin at {} ({} of 12 months usable)",
                    point,
                    months.values.iter().filter(|v| v.is_some()).count()
                );
                None
            }
            Err(e) => {
                debug!("Sea-surface probe at {} failed: {}", point, e);
                None
            }
        }
    }

    async fn fetch_months(
        &self,
        point: GeoPoint,
        window: &CalendarWindow,
    ) -> Result<MonthlyAggregate, ProviderError> {
        let series =
            with_deadline(self.deadline, self.provider.hourly_sea_surface(point, window)).await?;
        if series.is_empty() {
            return Ok(MonthlyAggregate::absent(window.start_month()));
        }
        let daily = task::spawn_blocking(move || all_hours_daily_means(&series)).await??;
        Ok(bucket_daily(daily, window).masked_by_coverage(self.coverage_fraction, window))
    }
}

/// Points at `radius` degrees from `center` on `directions` evenly spaced bearings,
/// starting due north and turning clockwise.
pub(crate) fn ring_points(center: GeoPoint, radius: f64, directions: usize) -> Vec<GeoPoint> {
    (0..directions)
        .map(|k| {
            let bearing = (k as f64 * 360.0 / directions as f64).to_radians();
            center.offset(radius * bearing.cos(), radius * bearing.sin())
        })
        .collect()
}
