//! Bindings to the `google.maps` namespace.
//!
//! Only the calls the adapters make are modelled. Callback-style SDK calls
//! become futures; a call that would throw synchronously returns
//! [`VendorError`] before any future is created.

use crate::error::VendorError;
use crate::geo::{GeoBounds, GeoMapViewport, GeoPoint};
use crate::map::{BoxFuture, MountTarget};
use std::fmt;
use std::sync::Arc;

/// Status codes shared by the places, geocoder and directions services.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GoogleStatus {
    Ok,
    ZeroResults,
    NotFound,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    Other(String),
}

impl GoogleStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Other(status) => status,
        }
    }

    /// Whether the status means "nothing matched" rather than a failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::ZeroResults | Self::NotFound)
    }
}

impl From<&str> for GoogleStatus {
    fn from(status: &str) -> Self {
        match status {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "NOT_FOUND" => Self::NotFound,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "UNKNOWN_ERROR" => Self::UnknownError,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for GoogleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `google.maps.MapTypeId`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoogleMapTypeId {
    Roadmap,
    Hybrid,
    Satellite,
    Terrain,
}

/// Overlay layers the map can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoogleOverlayLayer {
    Traffic,
    Transit,
}

/// `google.maps.MapOptions`
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleMapOptions {
    pub center: GeoPoint,
    pub zoom: f64,
    pub map_type_id: GoogleMapTypeId,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
}

/// `google.maps.Icon` with the markup as a data URL.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerIcon {
    pub url: String,
    /// Anchor in icon pixels; the SDK centers the bottom edge if absent.
    pub anchor: Option<(f64, f64)>,
}

/// `google.maps.MarkerOptions`
#[derive(Clone)]
pub struct MarkerOptions {
    pub position: GeoPoint,
    pub map: Arc<dyn GoogleMapHandle>,
    pub icon: MarkerIcon,
}

/// `google.maps.PolylineOptions`
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineOptions {
    pub path: Vec<GeoPoint>,
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_weight: f64,
}

/// `google.maps.GeocoderAddressComponent`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    pub types: Vec<String>,
}

impl AddressComponent {
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

/// `google.maps.places.PlaceResult`, fields are present only if requested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceResult {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub location: Option<GeoPoint>,
    pub address_components: Vec<AddressComponent>,
    pub icon: Option<String>,
    pub permanently_closed: Option<bool>,
    pub types: Vec<String>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
}

/// `google.maps.places.FindPlaceFromQueryRequest`
#[derive(Debug, Clone, PartialEq)]
pub struct FindPlaceRequest {
    pub query: String,
    pub fields: Vec<String>,
    pub location_bias: Option<LocationBias>,
}

/// A circular location bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationBias {
    pub center: GeoPoint,
    pub radius: f64,
}

/// `google.maps.places.PlaceDetailsRequest`
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetailsRequest {
    pub place_id: String,
}

/// `google.maps.GeocoderRequest`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeocoderQuery {
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
    pub country: Option<String>,
}

/// `google.maps.GeocoderResult`
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderResponse {
    pub place_id: String,
    pub formatted_address: String,
    pub address_components: Vec<AddressComponent>,
    pub types: Vec<String>,
    pub location: GeoPoint,
    pub viewport: GeoBounds,
}

/// `google.maps.TravelMode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

/// `google.maps.DirectionsRequest`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionsRequest {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub travel_mode: TravelMode,
}

/// `google.maps.DirectionsResult`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectionsResult {
    pub status: Option<GoogleStatus>,
    pub routes: Vec<DirectionsRoute>,
}

/// `google.maps.DirectionsRoute`. `legs` is `None` when the SDK hands
/// back a route object without a legs array.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectionsRoute {
    pub legs: Option<Vec<DirectionsLeg>>,
}

/// `google.maps.DirectionsLeg`
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsLeg {
    pub start_location: GeoPoint,
    pub end_location: GeoPoint,
    pub steps: Vec<DirectionsStep>,
}

/// `google.maps.DirectionsStep`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectionsStep {
    pub path: Vec<GeoPoint>,
}

/// Callback registered through `google.maps.event.addListener`.
/// Mouse events carry the `latLng`, other events `None`.
pub type GoogleListener = Arc<dyn Fn(Option<GeoPoint>) + Send + Sync>;

/// The `google.maps` namespace.
pub trait GoogleMapsApi: Send + Sync {
    /// `new google.maps.Map(el, options)`
    fn create_map(
        &self,
        target: &MountTarget,
        options: GoogleMapOptions,
    ) -> Result<Arc<dyn GoogleMapHandle>, VendorError>;

    /// `new google.maps.Marker(options)`
    fn create_marker(&self, options: MarkerOptions)
        -> Result<Arc<dyn GoogleMarkerHandle>, VendorError>;

    /// `new google.maps.Rectangle({bounds, map})`
    fn create_rectangle(
        &self,
        map: Arc<dyn GoogleMapHandle>,
        bounds: GeoBounds,
    ) -> Result<Arc<dyn GoogleShapeHandle>, VendorError>;

    /// `new google.maps.Circle({center, radius, map})`
    fn create_circle(
        &self,
        map: Arc<dyn GoogleMapHandle>,
        center: GeoPoint,
        radius: f64,
    ) -> Result<Arc<dyn GoogleShapeHandle>, VendorError>;

    /// `new google.maps.Polyline(options)`, not yet attached to a map.
    fn create_polyline(
        &self,
        options: PolylineOptions,
    ) -> Result<Arc<dyn GooglePolylineHandle>, VendorError>;

    /// `PlacesService.findPlaceFromQuery`
    fn find_place_from_query(
        &self,
        request: FindPlaceRequest,
    ) -> Result<BoxFuture<'_, (Vec<PlaceResult>, GoogleStatus)>, VendorError>;

    /// `PlacesService.getDetails`
    fn get_details(
        &self,
        request: PlaceDetailsRequest,
    ) -> Result<BoxFuture<'_, (Option<PlaceResult>, GoogleStatus)>, VendorError>;

    /// `Geocoder.geocode`
    fn geocode(
        &self,
        request: GeocoderQuery,
    ) -> Result<BoxFuture<'_, (Vec<GeocoderResponse>, GoogleStatus)>, VendorError>;

    /// `DirectionsService.route`
    fn route(
        &self,
        request: DirectionsRequest,
    ) -> Result<BoxFuture<'_, DirectionsResult>, VendorError>;

    /// `geometry.spherical.computeDistanceBetween`
    fn compute_distance_between(&self, from: GeoPoint, to: GeoPoint, radius: Option<f64>) -> f64;
}

/// A `google.maps.Map` instance.
pub trait GoogleMapHandle: Send + Sync {
    fn get_center(&self) -> GeoPoint;
    fn set_center(&self, center: GeoPoint);
    fn get_zoom(&self) -> f64;
    fn set_zoom(&self, zoom: f64);
    fn get_map_type_id(&self) -> GoogleMapTypeId;
    fn set_map_type_id(&self, map_type: GoogleMapTypeId);
    /// Shows one overlay layer, or none.
    fn set_overlay_layer(&self, layer: Option<GoogleOverlayLayer>);
    /// `None` until the map has been laid out.
    fn get_bounds(&self) -> Option<GeoBounds>;
    fn fit_bounds(&self, bounds: GeoBounds, padding: Option<GeoMapViewport>);
    fn add_listener(&self, event: &str, listener: GoogleListener);
}

/// A `google.maps.Marker` instance.
pub trait GoogleMarkerHandle: Send + Sync {
    fn get_position(&self) -> GeoPoint;
    fn set_position(&self, position: GeoPoint);
    fn set_icon(&self, icon: MarkerIcon);
    /// `setMap(null)`
    fn detach(&self);
}

/// A `google.maps.Rectangle` or `google.maps.Circle` instance.
pub trait GoogleShapeHandle: Send + Sync {
    fn get_bounds(&self) -> GeoBounds;
    fn detach(&self);
}

/// A `google.maps.Polyline` instance.
pub trait GooglePolylineHandle: Send + Sync {
    fn set_map(&self, map: Option<Arc<dyn GoogleMapHandle>>);
}
