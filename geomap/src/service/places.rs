//! Place search and lookup.

use crate::config::GeoMapProvider;
use crate::error::GeoMapError;
use crate::geo::GeoPoint;
use crate::google::{GoogleMapsApi, GooglePlacesService};
use crate::here::{HerePlacesService, HerePlatform};
use crate::map::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// A search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMapPlace {
    pub provider: GeoMapProvider,
    pub id: String,
    pub name: String,
    pub formatted_address: String,
    pub location: GeoPoint,
}

/// Structured postal address. Every part is optional; vendors fill what
/// they know.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaceAddress {
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub county: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub locality: Option<String>,
    pub route: Option<String>,
    pub street_number: Option<String>,
}

/// Full information about one place.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMapPlaceDetails {
    pub provider: GeoMapProvider,
    pub id: String,
    pub name: Option<String>,
    pub address: PlaceAddress,
    pub formatted_address: String,
    pub location: Option<GeoPoint>,
    pub icon: Option<String>,
    pub permanently_closed: Option<bool>,
    pub types: Vec<String>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
}

impl GeoMapPlaceDetails {
    /// Details with only the identity filled in.
    pub fn new(provider: GeoMapProvider, id: impl Into<String>) -> Self {
        Self {
            provider,
            id: id.into(),
            name: None,
            address: PlaceAddress::default(),
            formatted_address: String::new(),
            location: None,
            icon: None,
            permanently_closed: None,
            types: Vec::new(),
            formatted_phone_number: None,
            website: None,
        }
    }
}

/// Capabilities of a places backend.
pub trait GeoMapPlacesServiceImplementation: Send + Sync {
    /// Details for one place id.
    fn get(&self, place_id: String) -> BoxFuture<'_, Result<GeoMapPlaceDetails, GeoMapError>>;

    /// Places matching `needle`, biased to the circle around `center`.
    ///
    /// "Nothing found" is an empty list, not an error. Results keep the
    /// vendor's order.
    fn search(
        &self,
        needle: String,
        center: GeoPoint,
        radius: f64,
    ) -> BoxFuture<'_, Result<Vec<GeoMapPlace>, GeoMapError>>;

    /// Great-circle distance in metres.
    fn distance_between(&self, from: GeoPoint, to: GeoPoint, radius: Option<f64>) -> f64;
}

/// Vendor handles a places service is built from.
#[derive(Clone)]
pub enum PlacesServiceInit {
    Google { api: Arc<dyn GoogleMapsApi> },
    Here { platform: Arc<dyn HerePlatform> },
}

impl PlacesServiceInit {
    pub fn provider(&self) -> GeoMapProvider {
        match self {
            Self::Google { .. } => GeoMapProvider::Google,
            Self::Here { .. } => GeoMapProvider::Here,
        }
    }
}

/// Vendor-neutral places service.
#[derive(Clone)]
pub struct GeoMapPlacesService {
    provider: GeoMapProvider,
    implementation: Arc<dyn GeoMapPlacesServiceImplementation>,
}

impl GeoMapPlacesService {
    pub fn create(init: PlacesServiceInit) -> Self {
        let provider = init.provider();
        let implementation: Arc<dyn GeoMapPlacesServiceImplementation> = match init {
            PlacesServiceInit::Google { api } => Arc::new(GooglePlacesService::new(api)),
            PlacesServiceInit::Here { platform } => Arc::new(HerePlacesService::new(platform)),
        };
        Self {
            provider,
            implementation,
        }
    }

    /// Wraps a custom implementation.
    pub fn from_implementation(implementation: Arc<dyn GeoMapPlacesServiceImplementation>) -> Self {
        Self {
            provider: GeoMapProvider::Custom,
            implementation,
        }
    }

    pub fn provider(&self) -> GeoMapProvider {
        self.provider
    }

    pub async fn get(
        &self,
        place_id: impl Into<String>,
    ) -> Result<GeoMapPlaceDetails, GeoMapError> {
        self.implementation.get(place_id.into()).await
    }

    pub async fn search(
        &self,
        needle: impl Into<String>,
        center: GeoPoint,
        radius: f64,
    ) -> Result<Vec<GeoMapPlace>, GeoMapError> {
        self.implementation
            .search(needle.into(), center, radius)
            .await
    }

    pub fn distance_between(&self, from: GeoPoint, to: GeoPoint, radius: Option<f64>) -> f64 {
        self.implementation.distance_between(from, to, radius)
    }
}

impl fmt::Debug for GeoMapPlacesService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoMapPlacesService")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
