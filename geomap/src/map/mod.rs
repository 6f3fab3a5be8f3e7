//! The map facade.
//!
//! [`GeoMap`] is the entry point of the crate. It owns one backend, picked
//! from the [`GeoMapConfig`] variant and the [`Environment`], and forwards
//! every call to it. Markers, shapes and services created through a map use
//! the same vendor as the map itself.
//!
//! # Example
//!
//! ```
//! use geomap::config::{GeoMapConfig, GeoMapProvider, GoogleMapAuth};
//! use geomap::load::Environment;
//! use geomap::map::GeoMap;
//!
//! let map = GeoMap::create(
//!     GeoMapConfig::google(GoogleMapAuth::api_key("YOUR_API_KEY")),
//!     Environment::ServerSide,
//! );
//! assert_eq!(map.provider(), GeoMapProvider::Custom);
//! ```

mod implementation;
mod registry;
mod types;

pub use implementation::{
    BoxFuture, GeoCircleImplementation, GeoMapImplementation, GeoMarkerImplementation,
    GeoRectImplementation,
};
pub use registry::{EventHandlers, MapRegistry, MarkerId, MarkerRegistry};
pub use types::{
    ClickHandler, GeoClickPayload, GeoEvent, GeoEventListener, GeoLayer, GeoMapMountInit,
    GeoMapType, MountTarget, NotifyHandler,
};

use crate::config::{GeoMapConfig, GeoMapProvider};
use crate::error::GeoMapError;
use crate::geo::{GeoBounds, GeoMapViewport, GeoPoint};
use crate::google::{GoogleCircle, GoogleMap, GoogleMarker, GoogleRect};
use crate::here::{HereCircle, HereMap, HereMarker, HereRect};
use crate::load::{Environment, LoadedApi};
use crate::marker::{GeoMarker, GeoMarkerConfig};
use crate::phase::GeoMapPhase;
use crate::server_side::ServerSideGeoMap;
use crate::service::{
    CodingServiceInit, DirectionServiceInit, GeoMapCodingService, GeoMapDirectionService,
    GeoMapPlaceDetails, GeoMapPlacesService, PlacesServiceInit,
};
use crate::shape::{GeoCircle, GeoCircleConfig, GeoRect};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Center used when a map is mounted without one.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new(0.0, 0.0);

/// Zoom used when a map is mounted without one.
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Latitude limit of the Web Mercator tiles every vendor serves.
pub const MERCATOR_MAX_LAT: f64 = 85.051_128_78;

/// Whether `point` lies inside the area covered by Web Mercator tiles.
pub fn covers_mercator(point: GeoPoint) -> bool {
    point.lat.abs() <= MERCATOR_MAX_LAT
}

#[derive(Clone)]
enum MapBackend {
    Google(Arc<GoogleMap>),
    Here(Arc<HereMap>),
    Custom(Arc<dyn GeoMapImplementation>),
}

impl MapBackend {
    fn implementation(&self) -> &dyn GeoMapImplementation {
        match self {
            Self::Google(map) => map.as_ref(),
            Self::Here(map) => map.as_ref(),
            Self::Custom(map) => map.as_ref(),
        }
    }

    fn provider(&self) -> GeoMapProvider {
        match self {
            Self::Google(_) => GeoMapProvider::Google,
            Self::Here(_) => GeoMapProvider::Here,
            Self::Custom(_) => GeoMapProvider::Custom,
        }
    }
}

/// Vendor-neutral interactive map.
///
/// Cloning is cheap; clones drive the same underlying map.
#[derive(Clone)]
pub struct GeoMap {
    backend: MapBackend,
}

impl GeoMap {
    /// Builds the map for `config`.
    ///
    /// In a browser environment the vendor adapter matching the config
    /// variant is used. Server-side, the map is an inert stand-in tagged
    /// [`GeoMapProvider::Custom`].
    pub fn create(config: GeoMapConfig, environment: Environment) -> Self {
        let backend = match (environment, config) {
            (Environment::ServerSide, config) => {
                debug!(requested = %config.provider(), "No DOM, using server-side map");
                MapBackend::Custom(Arc::new(ServerSideGeoMap::with_viewport(config.viewport())))
            }
            (Environment::Browser(host), GeoMapConfig::Google(config)) => {
                MapBackend::Google(Arc::new(GoogleMap::new(config, host)))
            }
            (Environment::Browser(host), GeoMapConfig::Here(config)) => {
                MapBackend::Here(Arc::new(HereMap::new(config, host)))
            }
        };
        info!(provider = %backend.provider(), "Map created");
        Self { backend }
    }

    /// Adopts a caller-supplied implementation.
    pub fn from_implementation(implementation: Arc<dyn GeoMapImplementation>) -> Self {
        Self {
            backend: MapBackend::Custom(implementation),
        }
    }

    pub fn provider(&self) -> GeoMapProvider {
        self.backend.provider()
    }

    /// The backend as a trait object.
    pub fn implementation(&self) -> &dyn GeoMapImplementation {
        self.backend.implementation()
    }

    /// Loads the vendor SDK. Concurrent calls share one load; a failed
    /// load can be retried.
    pub async fn load(&self) -> Result<LoadedApi, GeoMapError> {
        self.implementation().load().await
    }

    /// Loads if needed, then creates the vendor map inside `target`.
    pub async fn mount(
        &self,
        target: &MountTarget,
        init: GeoMapMountInit,
    ) -> Result<(), GeoMapError> {
        self.implementation().mount(target, init).await
    }

    /// Resolves once the map reached `target`.
    pub async fn phase(&self, target: GeoMapPhase) {
        self.implementation().phase(target).await
    }

    pub fn current_phase(&self) -> GeoMapPhase {
        self.implementation().current_phase()
    }

    pub async fn get_center(&self) -> Result<GeoPoint, GeoMapError> {
        self.implementation().get_center().await
    }

    pub async fn set_center(&self, center: GeoPoint) -> Result<(), GeoMapError> {
        self.implementation().set_center(center).await
    }

    pub async fn get_zoom(&self) -> Result<f64, GeoMapError> {
        self.implementation().get_zoom().await
    }

    pub async fn set_zoom(&self, zoom: f64) -> Result<(), GeoMapError> {
        self.implementation().set_zoom(zoom).await
    }

    pub async fn get_type(&self) -> Result<GeoMapType, GeoMapError> {
        self.implementation().get_type().await
    }

    pub async fn set_type(&self, map_type: GeoMapType) -> Result<(), GeoMapError> {
        self.implementation().set_type(map_type).await
    }

    pub async fn get_layer(&self) -> Result<GeoLayer, GeoMapError> {
        self.implementation().get_layer().await
    }

    pub async fn set_layer(&self, layer: GeoLayer) -> Result<(), GeoMapError> {
        self.implementation().set_layer(layer).await
    }

    pub async fn set_viewport(&self, viewport: GeoMapViewport) -> Result<(), GeoMapError> {
        self.implementation().set_viewport(viewport).await
    }

    pub async fn get_view_bounds(&self) -> Result<GeoBounds, GeoMapError> {
        self.implementation().get_view_bounds().await
    }

    pub async fn set_view_bounds(&self, bounds: GeoBounds) -> Result<(), GeoMapError> {
        self.implementation().set_view_bounds(bounds).await
    }

    /// Markers currently on the map, in creation order.
    pub async fn get_markers(&self) -> Vec<GeoMarker> {
        let provider = self.provider();
        self.implementation()
            .get_markers()
            .await
            .into_iter()
            .map(|marker| GeoMarker::new(provider, marker))
            .collect()
    }

    /// Whether the point lies within the map projection, see
    /// [`GeoMapImplementation::covers_location`].
    pub async fn covers_location(&self, point: GeoPoint) -> Result<bool, GeoMapError> {
        self.implementation().covers_location(point).await
    }

    /// Places a marker. Needs a mounted map.
    pub async fn create_marker(&self, config: GeoMarkerConfig) -> Result<GeoMarker, GeoMapError> {
        let marker: Arc<dyn GeoMarkerImplementation> = match &self.backend {
            MapBackend::Google(map) => GoogleMarker::create(map, config)?,
            MapBackend::Here(map) => HereMarker::create(map, config)?,
            MapBackend::Custom(map) => map.create_marker(config).await?,
        };
        Ok(GeoMarker::new(self.provider(), marker))
    }

    /// Draws a rectangle. Needs a mounted map.
    pub async fn create_geo_rect(&self, bounds: GeoBounds) -> Result<GeoRect, GeoMapError> {
        let rect: Arc<dyn GeoRectImplementation> = match &self.backend {
            MapBackend::Google(map) => Arc::new(GoogleRect::create(map, bounds)?),
            MapBackend::Here(map) => Arc::new(HereRect::create(map, bounds)?),
            MapBackend::Custom(map) => map.create_rect(bounds).await?,
        };
        Ok(GeoRect::new(self.provider(), rect))
    }

    /// Draws a circle. Needs a mounted map.
    pub async fn create_geo_circle(
        &self,
        config: GeoCircleConfig,
    ) -> Result<GeoCircle, GeoMapError> {
        let circle: Arc<dyn GeoCircleImplementation> = match &self.backend {
            MapBackend::Google(map) => Arc::new(GoogleCircle::create(map, config)?),
            MapBackend::Here(map) => Arc::new(HereCircle::create(map, config)?),
            MapBackend::Custom(map) => map.create_circle(config).await?,
        };
        Ok(GeoCircle::new(self.provider(), circle))
    }

    pub async fn add_event_listener(&self, listener: GeoEventListener) {
        self.implementation().add_event_listener(listener).await
    }

    pub async fn on_click(&self, handler: impl Fn(GeoClickPayload) + Send + Sync + 'static) {
        self.add_event_listener(GeoEventListener::click(handler))
            .await
    }

    /// Fires when a marker is added, removed, or gets a new icon.
    pub async fn on_changed(&self, handler: impl Fn() + Send + Sync + 'static) {
        self.add_event_listener(GeoEventListener::changed(handler))
            .await
    }

    /// Fires once the first tiles are rendered.
    pub async fn on_loaded(&self, handler: impl Fn() + Send + Sync + 'static) {
        self.add_event_listener(GeoEventListener::loaded(handler))
            .await
    }

    /// Geocoder bound to this map's vendor. Needs a loaded map.
    pub fn coding_service(&self) -> Result<GeoMapCodingService, GeoMapError> {
        let init = match &self.backend {
            MapBackend::Google(map) => CodingServiceInit::Google { api: map.api()? },
            MapBackend::Here(map) => CodingServiceInit::Here {
                platform: map.platform()?,
            },
            MapBackend::Custom(_) => {
                return Err(GeoMapError::unsupported("coding_service", "Custom"))
            }
        };
        Ok(GeoMapCodingService::create(init))
    }

    /// Places service bound to this map's vendor. Needs a loaded map.
    pub fn places_service(&self) -> Result<GeoMapPlacesService, GeoMapError> {
        let init = match &self.backend {
            MapBackend::Google(map) => PlacesServiceInit::Google { api: map.api()? },
            MapBackend::Here(map) => PlacesServiceInit::Here {
                platform: map.platform()?,
            },
            MapBackend::Custom(_) => {
                return Err(GeoMapError::unsupported("places_service", "Custom"))
            }
        };
        Ok(GeoMapPlacesService::create(init))
    }

    /// Route painter drawing on this map. Google only; needs a mounted map.
    pub fn direction_service(&self) -> Result<GeoMapDirectionService, GeoMapError> {
        match &self.backend {
            MapBackend::Google(map) => Ok(GeoMapDirectionService::create(
                DirectionServiceInit::Google {
                    api: map.api()?,
                    map: map.map_handle()?,
                },
            )),
            MapBackend::Here(_) => Err(GeoMapError::unsupported("direction_service", "Here")),
            MapBackend::Custom(_) => Err(GeoMapError::unsupported("direction_service", "Custom")),
        }
    }

    /// Addresses at `point`.
    ///
    /// Waits until the map is loaded; it does not start the load itself.
    pub async fn reverse_geocode(
        &self,
        point: GeoPoint,
    ) -> Result<Vec<GeoMapPlaceDetails>, GeoMapError> {
        self.phase(GeoMapPhase::Loaded).await;
        self.coding_service()?.reverse(point).await
    }

    /// Details of the place with `id`.
    ///
    /// Waits until the map is loaded; it does not start the load itself.
    pub async fn get_place(
        &self,
        id: impl Into<String>,
    ) -> Result<GeoMapPlaceDetails, GeoMapError> {
        self.phase(GeoMapPhase::Loaded).await;
        self.places_service()?.get(id).await
    }
}

impl From<Arc<dyn GeoMapImplementation>> for GeoMap {
    fn from(implementation: Arc<dyn GeoMapImplementation>) -> Self {
        Self::from_implementation(implementation)
    }
}

impl fmt::Debug for GeoMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoMap")
            .field("provider", &self.provider())
            .field("phase", &self.current_phase())
            .finish()
    }
}
