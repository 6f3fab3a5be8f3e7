//! Geocoding, place search and routing services.
//!
//! Each service is a thin facade over a provider-specific implementation,
//! picked by matching on the init variant:
//!
//! ```ignore
//! use geomap::service::{GeoMapPlacesService, PlacesServiceInit};
//!
//! let places = GeoMapPlacesService::create(PlacesServiceInit::Google { api });
//! let found = places.search("Brandenburger Tor", center, 5_000.0).await?;
//! ```
//!
//! [`GeoMap`](crate::map::GeoMap) builds these from its own vendor handles;
//! see [`GeoMap::places_service`](crate::map::GeoMap::places_service).

mod coding;
mod direction;
mod places;

pub use coding::{
    CodingServiceInit, GeoMapCodingService, GeoMapCodingServiceImplementation, GeocoderRequest,
    GeocoderResult,
};
pub use direction::{
    DirectionServiceInit, GeoMapDirectionResult, GeoMapDirectionService,
    GeoMapDirectionServiceImplementation,
};
pub use places::{
    GeoMapPlace, GeoMapPlaceDetails, GeoMapPlacesService, GeoMapPlacesServiceImplementation,
    PlaceAddress, PlacesServiceInit,
};
