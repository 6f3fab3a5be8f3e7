//! Forward and reverse geocoding.

use super::places::GeoMapPlaceDetails;
use crate::config::GeoMapProvider;
use crate::error::GeoMapError;
use crate::geo::{GeoBounds, GeoPoint};
use crate::google::{GoogleCodingService, GoogleMapsApi};
use crate::here::{HereCodingService, HerePlatform};
use crate::map::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// What to geocode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocoderRequest {
    /// Free-form address text.
    Query(String),
    /// A whole country by ISO 3166 code or name.
    Structured { country: String },
}

/// Where a geocoded request lies and what area shows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocoderResult {
    pub position: GeoPoint,
    pub view_bounds: GeoBounds,
}

/// Capabilities of a geocoding backend.
pub trait GeoMapCodingServiceImplementation: Send + Sync {
    /// Places at `point`, in vendor order. Empty when nothing is there.
    fn reverse(&self, point: GeoPoint)
        -> BoxFuture<'_, Result<Vec<GeoMapPlaceDetails>, GeoMapError>>;

    /// Best match for `request`.
    fn geocode(
        &self,
        request: GeocoderRequest,
    ) -> BoxFuture<'_, Result<GeocoderResult, GeoMapError>>;
}

/// Vendor handles a coding service is built from.
#[derive(Clone)]
pub enum CodingServiceInit {
    Google { api: Arc<dyn GoogleMapsApi> },
    Here { platform: Arc<dyn HerePlatform> },
}

impl CodingServiceInit {
    pub fn provider(&self) -> GeoMapProvider {
        match self {
            Self::Google { .. } => GeoMapProvider::Google,
            Self::Here { .. } => GeoMapProvider::Here,
        }
    }
}

/// Vendor-neutral geocoding service.
#[derive(Clone)]
pub struct GeoMapCodingService {
    provider: GeoMapProvider,
    implementation: Arc<dyn GeoMapCodingServiceImplementation>,
}

impl GeoMapCodingService {
    pub fn create(init: CodingServiceInit) -> Self {
        let provider = init.provider();
        let implementation: Arc<dyn GeoMapCodingServiceImplementation> = match init {
            CodingServiceInit::Google { api } => Arc::new(GoogleCodingService::new(api)),
            CodingServiceInit::Here { platform } => Arc::new(HereCodingService::new(platform)),
        };
        Self {
            provider,
            implementation,
        }
    }

    pub fn from_implementation(implementation: Arc<dyn GeoMapCodingServiceImplementation>) -> Self {
        Self {
            provider: GeoMapProvider::Custom,
            implementation,
        }
    }

    pub fn provider(&self) -> GeoMapProvider {
        self.provider
    }

    pub async fn reverse(&self, point: GeoPoint) -> Result<Vec<GeoMapPlaceDetails>, GeoMapError> {
        self.implementation.reverse(point).await
    }

    pub async fn geocode(&self, request: GeocoderRequest) -> Result<GeocoderResult, GeoMapError> {
        self.implementation.geocode(request).await
    }
}

impl fmt::Debug for GeoMapCodingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoMapCodingService")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
