//! Route drawing.

use crate::config::GeoMapProvider;
use crate::error::GeoMapError;
use crate::geo::GeoPoint;
use crate::google::{GoogleDirectionService, GoogleMapHandle, GoogleMapsApi};
use crate::map::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Start and end the routing engine actually used. They may differ from
/// the requested points, e.g. snapped to the nearest road.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoMapDirectionResult {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

/// Capabilities of a routing backend.
pub trait GeoMapDirectionServiceImplementation: Send + Sync {
    /// Requests a route and draws it on the map.
    fn paint_route(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> BoxFuture<'_, Result<GeoMapDirectionResult, GeoMapError>>;

    /// Removes every route drawn so far.
    fn clear(&self) -> BoxFuture<'_, ()>;
}

/// Vendor handles a direction service is built from.
#[derive(Clone)]
pub enum DirectionServiceInit {
    Google {
        api: Arc<dyn GoogleMapsApi>,
        map: Arc<dyn GoogleMapHandle>,
    },
}

impl DirectionServiceInit {
    pub fn provider(&self) -> GeoMapProvider {
        match self {
            Self::Google { .. } => GeoMapProvider::Google,
        }
    }
}

/// Vendor-neutral routing service.
#[derive(Clone)]
pub struct GeoMapDirectionService {
    provider: GeoMapProvider,
    implementation: Arc<dyn GeoMapDirectionServiceImplementation>,
}

impl GeoMapDirectionService {
    pub fn create(init: DirectionServiceInit) -> Self {
        let provider = init.provider();
        let implementation: Arc<dyn GeoMapDirectionServiceImplementation> = match init {
            DirectionServiceInit::Google { api, map } => {
                Arc::new(GoogleDirectionService::new(api, map))
            }
        };
        Self {
            provider,
            implementation,
        }
    }

    pub fn from_implementation(
        implementation: Arc<dyn GeoMapDirectionServiceImplementation>,
    ) -> Self {
        Self {
            provider: GeoMapProvider::Custom,
            implementation,
        }
    }

    pub fn provider(&self) -> GeoMapProvider {
        self.provider
    }

    pub async fn paint_route(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> Result<GeoMapDirectionResult, GeoMapError> {
        self.implementation.paint_route(from, to).await
    }

    pub async fn clear(&self) {
        self.implementation.clear().await
    }
}

impl fmt::Debug for GeoMapDirectionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoMapDirectionService")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
