//! Point, bounds and viewport definitions

use crate::error::GeoMapError;
use std::fmt;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// A lat/lng bounding box.
///
/// `north >= south` always holds. East and west are wrap-aware: `west > east`
/// describes a box crossing the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoBounds {
    north: f64,
    east: f64,
    south: f64,
    west: f64,
}

impl GeoBounds {
    /// Creates bounds, rejecting a north edge below the south edge.
    pub fn new(north: f64, east: f64, south: f64, west: f64) -> Result<Self, GeoMapError> {
        if north < south {
            return Err(GeoMapError::InvalidBounds { north, south });
        }
        Ok(Self {
            north,
            east,
            south,
            west,
        })
    }

    /// Builds bounds from edges already known to be ordered.
    pub(crate) fn from_edges(north: f64, east: f64, south: f64, west: f64) -> Self {
        debug_assert!(north >= south, "north {} below south {}", north, south);
        Self {
            north,
            east,
            south,
            west,
        }
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    /// Degenerate bounds covering exactly one point.
    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            north: point.lat,
            east: point.lng,
            south: point.lat,
            west: point.lng,
        }
    }

    /// Returns true if the box crosses the antimeridian.
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Longitude span in degrees, accounting for antimeridian wrap.
    pub fn lng_span(&self) -> f64 {
        if self.crosses_antimeridian() {
            360.0 - self.west + self.east
        } else {
            self.east - self.west
        }
    }

    /// Checks whether the point lies inside (edges inclusive).
    pub fn contains(&self, point: GeoPoint) -> bool {
        if point.lat < self.south || point.lat > self.north {
            return false;
        }
        if self.crosses_antimeridian() {
            point.lng >= self.west || point.lng <= self.east
        } else {
            point.lng >= self.west && point.lng <= self.east
        }
    }

    /// Grows the box to include the point.
    ///
    /// Longitude grows in whichever direction adds the smaller span, so
    /// extending across the antimeridian produces a wrapped box.
    pub fn extend(&mut self, point: GeoPoint) {
        self.north = self.north.max(point.lat);
        self.south = self.south.min(point.lat);

        if self.contains(GeoPoint::new(self.south, point.lng)) {
            return;
        }

        let grow_east = (point.lng - self.east).rem_euclid(360.0);
        let grow_west = (self.west - point.lng).rem_euclid(360.0);
        if grow_east <= grow_west {
            self.east = point.lng;
        } else {
            self.west = point.lng;
        }
    }

    /// Center of the box, wrap-aware.
    pub fn center(&self) -> GeoPoint {
        let lat = (self.north + self.south) / 2.0;
        let mut lng = self.west + self.lng_span() / 2.0;
        if lng > 180.0 {
            lng -= 360.0;
        }
        GeoPoint::new(lat, lng)
    }
}

/// Pixel padding applied around the visible map area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoMapViewport {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl GeoMapViewport {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Initial map center: either a point or an area to fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoMapCenter {
    Point(GeoPoint),
    Bounds(GeoBounds),
}

impl From<GeoPoint> for GeoMapCenter {
    fn from(point: GeoPoint) -> Self {
        Self::Point(point)
    }
}

impl From<GeoBounds> for GeoMapCenter {
    fn from(bounds: GeoBounds) -> Self {
        Self::Bounds(bounds)
    }
}
