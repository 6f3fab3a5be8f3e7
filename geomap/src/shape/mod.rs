//! Rectangle and circle overlays.

use crate::config::GeoMapProvider;
use crate::geo::{GeoBounds, GeoPoint};
use crate::map::{GeoCircleImplementation, GeoRectImplementation};
use std::fmt;
use std::sync::Arc;

/// Parameters for a new circle. `radius` is in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCircleConfig {
    pub position: GeoPoint,
    pub radius: f64,
}

impl GeoCircleConfig {
    pub fn new(position: GeoPoint, radius: f64) -> Self {
        Self { position, radius }
    }
}

/// Vendor-neutral rectangle overlay.
#[derive(Clone)]
pub struct GeoRect {
    provider: GeoMapProvider,
    implementation: Arc<dyn GeoRectImplementation>,
}

impl GeoRect {
    pub(crate) fn new(
        provider: GeoMapProvider,
        implementation: Arc<dyn GeoRectImplementation>,
    ) -> Self {
        Self {
            provider,
            implementation,
        }
    }

    pub fn provider(&self) -> GeoMapProvider {
        self.provider
    }

    pub async fn get_bounds(&self) -> GeoBounds {
        self.implementation.get_bounds().await
    }

    pub async fn covers_location(&self, point: GeoPoint) -> bool {
        self.implementation.covers_location(point).await
    }
}

impl fmt::Debug for GeoRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoRect")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

/// Vendor-neutral circle overlay.
#[derive(Clone)]
pub struct GeoCircle {
    provider: GeoMapProvider,
    implementation: Arc<dyn GeoCircleImplementation>,
}

impl GeoCircle {
    pub(crate) fn new(
        provider: GeoMapProvider,
        implementation: Arc<dyn GeoCircleImplementation>,
    ) -> Self {
        Self {
            provider,
            implementation,
        }
    }

    pub fn provider(&self) -> GeoMapProvider {
        self.provider
    }

    pub async fn get_bounds(&self) -> GeoBounds {
        self.implementation.get_bounds().await
    }
}

impl fmt::Debug for GeoCircle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoCircle")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

/// Bounding box of a circle, approximated on a sphere of `radius_earth`.
pub fn circle_bounds(center: GeoPoint, radius: f64, radius_earth: f64) -> GeoBounds {
    let lat_delta = (radius / radius_earth).to_degrees();
    let north = (center.lat + lat_delta).min(90.0);
    let south = (center.lat - lat_delta).max(-90.0);

    // A circle reaching a pole or wider than the globe spans every longitude.
    let cos_lat = center.lat.to_radians().cos().max(f64::EPSILON);
    let lng_delta = lat_delta / cos_lat;
    if lng_delta >= 180.0 || north >= 90.0 || south <= -90.0 {
        return GeoBounds::from_edges(north, 180.0, south, -180.0);
    }

    let wrap = |lng: f64| (lng + 180.0).rem_euclid(360.0) - 180.0;
    GeoBounds::from_edges(
        north,
        wrap(center.lng + lng_delta),
        south,
        wrap(center.lng - lng_delta),
    )
}
