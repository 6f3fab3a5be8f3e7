//! Google Maps adapter.
//!
//! [`GoogleMap`] implements the map capabilities on top of the
//! `google.maps` namespace a host exposes through [`GoogleMapsApi`].
//! Markers, shapes and the places / geocoder / directions services wrap
//! the matching SDK objects.

mod api;
mod coding;
mod direction;
mod map;
mod marker;
#[cfg(test)]
pub(crate) mod mock;
mod places;
mod shapes;

pub use api::{
    AddressComponent, DirectionsLeg, DirectionsRequest, DirectionsResult, DirectionsRoute,
    DirectionsStep, FindPlaceRequest, GeocoderQuery, GeocoderResponse, GoogleListener,
    GoogleMapHandle, GoogleMapOptions, GoogleMapTypeId, GoogleMapsApi, GoogleMarkerHandle,
    GoogleOverlayLayer, GooglePolylineHandle, GoogleShapeHandle, GoogleStatus, LocationBias,
    MarkerIcon, MarkerOptions, PlaceDetailsRequest, PlaceResult, PolylineOptions, TravelMode,
};
pub use coding::GoogleCodingService;
pub use direction::{flatten_path, GoogleDirectionService};
pub use map::{script_request, GoogleMap, GOOGLE_SCRIPT_URL};
pub use marker::GoogleMarker;
pub use places::{GooglePlacesService, SEARCH_FIELDS};
pub use shapes::{GoogleCircle, GoogleRect};
