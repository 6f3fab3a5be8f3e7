//! Bindings to the `H` namespace of the HERE Maps API for JavaScript.

use crate::error::VendorError;
use crate::geo::{GeoBounds, GeoMapViewport, GeoPoint};
use crate::map::{BoxFuture, MountTarget};
use std::fmt;
use std::sync::Arc;

/// `new H.service.Platform(options)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HerePlatformOptions {
    pub app_id: String,
    pub app_code: String,
    pub use_https: bool,
}

/// `H.Map` options.
#[derive(Debug, Clone, PartialEq)]
pub struct HereMapOptions {
    pub center: GeoPoint,
    pub zoom: f64,
    /// Default layer path such as `normal.map`.
    pub base_layer: &'static str,
    pub style: &'static str,
    pub ppi: u32,
    pub no_wrap: bool,
    /// Three-letter map language code.
    pub language: &'static str,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
}

/// `H.map.Icon` built from SVG markup.
#[derive(Debug, Clone, PartialEq)]
pub struct HereIcon {
    pub markup: String,
    pub anchor: Option<(f64, f64)>,
}

/// Objects that can be added to an `H.Map`.
#[derive(Clone)]
pub enum HereObject {
    Marker(Arc<dyn HereMarkerHandle>),
    Shape(Arc<dyn HereShapeHandle>),
}

impl fmt::Debug for HereObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marker(_) => f.write_str("HereObject::Marker"),
            Self::Shape(_) => f.write_str("HereObject::Shape"),
        }
    }
}

/// Postal address as returned by the HERE services.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HereAddress {
    pub label: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub county: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
}

/// A place from the Places API.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HerePlace {
    pub id: String,
    pub title: String,
    pub vicinity: Option<String>,
    pub position: Option<GeoPoint>,
    pub address: HereAddress,
    pub icon: Option<String>,
    pub categories: Vec<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// A Places API search.
#[derive(Debug, Clone, PartialEq)]
pub struct HerePlaceQuery {
    pub q: String,
    pub at: GeoPoint,
    pub radius: f64,
}

/// A Geocoder API match.
#[derive(Debug, Clone, PartialEq)]
pub struct HereLocation {
    pub location_id: String,
    pub address: HereAddress,
    pub position: GeoPoint,
    pub view: GeoBounds,
    pub match_type: Option<String>,
}

/// A Geocoder API search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HereGeocodeQuery {
    pub searchtext: Option<String>,
    pub country: Option<String>,
}

/// Error callback payload of a HERE service request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HereServiceError {
    pub status: u16,
    pub message: String,
}

impl HereServiceError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Whether the request simply matched nothing.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for HereServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

pub type HereResponse<'a, T> = BoxFuture<'a, Result<T, HereServiceError>>;

/// Event callback registered through `H.Map#addEventListener`.
/// Pointer events carry the geo position under the pointer.
pub type HereListener = Arc<dyn Fn(Option<GeoPoint>) + Send + Sync>;

/// The `H` namespace.
pub trait HereMapsApi: Send + Sync {
    fn create_platform(
        &self,
        options: HerePlatformOptions,
    ) -> Result<Arc<dyn HerePlatform>, VendorError>;

    /// `new H.map.Marker(position, {icon})`
    fn create_marker(
        &self,
        position: GeoPoint,
        icon: HereIcon,
    ) -> Result<Arc<dyn HereMarkerHandle>, VendorError>;

    /// `new H.map.Rect(H.geo.Rect)`
    fn create_rect(&self, bounds: GeoBounds) -> Result<Arc<dyn HereShapeHandle>, VendorError>;

    /// `new H.map.Circle(center, radius)`
    fn create_circle(
        &self,
        center: GeoPoint,
        radius: f64,
    ) -> Result<Arc<dyn HereShapeHandle>, VendorError>;
}

/// An `H.service.Platform` and the services it hands out.
pub trait HerePlatform: Send + Sync {
    /// `new H.Map(el, platform.createDefaultLayers()[..], options)`
    fn create_map(
        &self,
        target: &MountTarget,
        options: HereMapOptions,
    ) -> Result<Arc<dyn HereMapHandle>, VendorError>;

    /// `getPlacesService().search`
    fn search_places(
        &self,
        query: HerePlaceQuery,
    ) -> Result<HereResponse<'_, Vec<HerePlace>>, VendorError>;

    /// `getPlacesService().request` for one place id.
    fn lookup_place(&self, id: String) -> Result<HereResponse<'_, Option<HerePlace>>, VendorError>;

    /// `getGeocodingService().reverseGeocode`
    fn reverse_geocode(
        &self,
        point: GeoPoint,
    ) -> Result<HereResponse<'_, Vec<HereLocation>>, VendorError>;

    /// `getGeocodingService().geocode`
    fn geocode(
        &self,
        query: HereGeocodeQuery,
    ) -> Result<HereResponse<'_, Vec<HereLocation>>, VendorError>;
}

/// An `H.Map` instance.
pub trait HereMapHandle: Send + Sync {
    fn get_center(&self) -> GeoPoint;
    fn set_center(&self, center: GeoPoint);
    fn get_zoom(&self) -> f64;
    fn set_zoom(&self, zoom: f64);
    fn set_base_layer(&self, layer: &'static str);
    fn get_view_bounds(&self) -> GeoBounds;
    fn set_view_bounds(&self, bounds: GeoBounds);
    /// `getViewPort().setPadding`
    fn set_padding(&self, padding: GeoMapViewport);
    fn add_object(&self, object: HereObject);
    fn remove_object(&self, object: HereObject);
    fn add_listener(&self, event: &str, listener: HereListener);
}

/// An `H.map.Marker` instance.
pub trait HereMarkerHandle: Send + Sync {
    fn get_position(&self) -> GeoPoint;
    fn set_position(&self, position: GeoPoint);
    fn set_icon(&self, icon: HereIcon);
}

/// An `H.map.Rect` or `H.map.Circle` instance.
pub trait HereShapeHandle: Send + Sync {
    fn get_bounds(&self) -> GeoBounds;
}
