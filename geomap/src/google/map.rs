//! Google map adapter.

use super::api::{
    GoogleListener, GoogleMapHandle, GoogleMapOptions, GoogleMapTypeId, GoogleMapsApi,
    GoogleOverlayLayer,
};
use super::marker::GoogleMarker;
use super::shapes::{GoogleCircle, GoogleRect};
use crate::config::{GeoMapProvider, GoogleMapAuth, GoogleMapConfig};
use crate::error::GeoMapError;
use crate::geo::{GeoBounds, GeoMapCenter, GeoMapViewport, GeoPoint};
use crate::load::{
    encode_uri_component, load_vendor_api, ApiLoader, HostContext, LoadedApi, ScriptRequest,
    VendorApi,
};
use crate::map::{
    covers_mercator, BoxFuture, GeoCircleImplementation, GeoClickPayload, GeoEvent,
    GeoEventListener, GeoLayer, GeoMapImplementation, GeoMapMountInit, GeoMapType,
    GeoMarkerImplementation, GeoRectImplementation, MapRegistry, MountTarget, DEFAULT_CENTER,
    DEFAULT_ZOOM,
};
use crate::marker::GeoMarkerConfig;
use crate::phase::{GeoMapPhase, PhaseTracker};
use crate::shape::GeoCircleConfig;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Base URL of the Maps JavaScript API.
pub const GOOGLE_SCRIPT_URL: &str = "https://maps.googleapis.com/maps/api/js";

/// Libraries the adapters rely on.
const GOOGLE_LIBRARIES: &str = "places,geometry";

/// Builds the script tag loading the Maps JavaScript API.
pub fn script_request(config: &GoogleMapConfig) -> ScriptRequest {
    let mut params: Vec<(&str, &str)> = Vec::new();
    match &config.auth {
        GoogleMapAuth::ApiKey { api_key, .. } => params.push(("key", api_key.as_str())),
        GoogleMapAuth::ClientId { client_id, .. } => params.push(("client", client_id.as_str())),
    }
    if let Some(channel) = config.auth.channel() {
        params.push(("channel", channel));
    }
    if let Some(language) = &config.language {
        params.push(("language", language.as_str()));
    }
    if let Some(region) = &config.region {
        params.push(("region", region.as_str()));
    }

    let mut query: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode_uri_component(value)))
        .collect();
    query.push(format!("libraries={}", GOOGLE_LIBRARIES));

    ScriptRequest::new(format!("{}?{}", GOOGLE_SCRIPT_URL, query.join("&")))
        .with_data("map-provider", GeoMapProvider::Google.as_str())
}

fn to_vendor_type(map_type: GeoMapType) -> Option<GoogleMapTypeId> {
    match map_type {
        GeoMapType::Roadmap => Some(GoogleMapTypeId::Roadmap),
        GeoMapType::Hybrid => Some(GoogleMapTypeId::Hybrid),
        GeoMapType::Unknown => None,
    }
}

fn from_vendor_type(map_type: GoogleMapTypeId) -> GeoMapType {
    match map_type {
        GoogleMapTypeId::Roadmap => GeoMapType::Roadmap,
        GoogleMapTypeId::Hybrid => GeoMapType::Hybrid,
        GoogleMapTypeId::Satellite | GoogleMapTypeId::Terrain => GeoMapType::Unknown,
    }
}

fn to_vendor_layer(layer: GeoLayer) -> Option<GoogleOverlayLayer> {
    match layer {
        GeoLayer::Transit => Some(GoogleOverlayLayer::Transit),
        GeoLayer::Traffic => Some(GoogleOverlayLayer::Traffic),
        GeoLayer::None => None,
    }
}

#[derive(Default)]
struct ViewState {
    map: Option<Arc<dyn GoogleMapHandle>>,
    layer: GeoLayer,
    viewport: Option<GeoMapViewport>,
}

/// [`GeoMapImplementation`] backed by Google Maps.
pub struct GoogleMap {
    config: GoogleMapConfig,
    host: Arc<dyn HostContext>,
    loader: ApiLoader<Arc<dyn GoogleMapsApi>>,
    phase: Arc<PhaseTracker>,
    registry: Arc<MapRegistry>,
    view: Mutex<ViewState>,
}

impl GoogleMap {
    pub fn new(config: GoogleMapConfig, host: Arc<dyn HostContext>) -> Self {
        let viewport = config.viewport;
        Self {
            config,
            host,
            loader: ApiLoader::new(),
            phase: Arc::new(PhaseTracker::new()),
            registry: Arc::new(MapRegistry::new()),
            view: Mutex::new(ViewState {
                viewport,
                ..Default::default()
            }),
        }
    }

    pub fn config(&self) -> &GoogleMapConfig {
        &self.config
    }

    /// The `google.maps` namespace, once loaded.
    pub fn api(&self) -> Result<Arc<dyn GoogleMapsApi>, GeoMapError> {
        self.loader.get().ok_or(GeoMapError::PhaseNotReached {
            required: GeoMapPhase::Loaded,
            current: self.phase.current(),
        })
    }

    /// The vendor map, once mounted.
    pub fn map_handle(&self) -> Result<Arc<dyn GoogleMapHandle>, GeoMapError> {
        self.view
            .lock()
            .unwrap()
            .map
            .clone()
            .ok_or(GeoMapError::PhaseNotReached {
                required: GeoMapPhase::Mounted,
                current: self.phase.current(),
            })
    }

    pub(crate) fn registry(&self) -> &Arc<MapRegistry> {
        &self.registry
    }

    async fn load_api(&self) -> Result<Arc<dyn GoogleMapsApi>, GeoMapError> {
        self.phase.advance(GeoMapPhase::Loading);

        let host = Arc::clone(&self.host);
        let script = script_request(&self.config);
        let result = self
            .loader
            .load(move || {
                Box::pin(async move {
                    info!(src = %script.src(), "Loading Google Maps API");
                    match load_vendor_api(host.as_ref(), GeoMapProvider::Google, vec![script])
                        .await?
                    {
                        VendorApi::Google(api) => Ok(api),
                        other => Err(GeoMapError::ScriptLoad {
                            src: GOOGLE_SCRIPT_URL.to_string(),
                            reason: format!("host returned {} API", other.provider()),
                        }),
                    }
                })
            })
            .await;

        match result {
            Ok(api) => {
                self.phase.advance(GeoMapPhase::Loaded);
                Ok(api)
            }
            Err(err) => {
                warn!(error = %err, "Google Maps API failed to load");
                Err(err)
            }
        }
    }

    async fn mount_map(
        &self,
        target: &MountTarget,
        init: GeoMapMountInit,
    ) -> Result<(), GeoMapError> {
        let api = self.load_api().await?;
        if !self.phase.advance(GeoMapPhase::Mounting) {
            return Err(GeoMapError::AlreadyMounted);
        }

        let center = match init.center {
            Some(GeoMapCenter::Point(point)) => point,
            Some(GeoMapCenter::Bounds(bounds)) => bounds.center(),
            None => DEFAULT_CENTER,
        };
        let options = GoogleMapOptions {
            center,
            zoom: init.zoom.unwrap_or(DEFAULT_ZOOM),
            map_type_id: init
                .map_type
                .and_then(to_vendor_type)
                .unwrap_or(GoogleMapTypeId::Roadmap),
            min_zoom: self.config.min_zoom,
            max_zoom: self.config.max_zoom,
        };
        let map = api.create_map(target, options)?;
        self.wire_events(map.as_ref());

        let layer = init.layer.unwrap_or_default();
        map.set_overlay_layer(to_vendor_layer(layer));

        let viewport = {
            let mut view = self.view.lock().unwrap();
            view.map = Some(Arc::clone(&map));
            view.layer = layer;
            view.viewport
        };
        if let Some(GeoMapCenter::Bounds(bounds)) = init.center {
            map.fit_bounds(bounds, viewport);
        }

        info!(target = %target.id(), "Google map mounted");
        self.phase.advance(GeoMapPhase::Mounted);
        self.phase.advance(GeoMapPhase::Layouting);
        Ok(())
    }

    fn wire_events(&self, map: &dyn GoogleMapHandle) {
        let registry = Arc::clone(&self.registry);
        let click: GoogleListener = Arc::new(move |position| {
            if let Some(position) = position {
                registry.handlers().fire_click(GeoClickPayload { position });
            }
        });
        map.add_listener(GeoEvent::Click.vendor_name(), click);

        let registry = Arc::clone(&self.registry);
        let phase = Arc::clone(&self.phase);
        let tiles: GoogleListener = Arc::new(move |_| {
            if phase.advance(GeoMapPhase::Layouted) {
                debug!("Google tiles loaded");
                registry.handlers().fire(GeoEvent::Loaded);
            }
        });
        map.add_listener(GeoEvent::Loaded.vendor_name(), tiles);
    }

    fn with_map<T>(&self, f: impl FnOnce(&dyn GoogleMapHandle) -> T) -> Result<T, GeoMapError> {
        let map = self.map_handle()?;
        Ok(f(map.as_ref()))
    }
}

impl GeoMapImplementation for GoogleMap {
    fn load(&self) -> BoxFuture<'_, Result<LoadedApi, GeoMapError>> {
        Box::pin(async move { self.load_api().await.map(LoadedApi::Google) })
    }

    fn mount<'a>(
        &'a self,
        target: &'a MountTarget,
        init: GeoMapMountInit,
    ) -> BoxFuture<'a, Result<(), GeoMapError>> {
        Box::pin(self.mount_map(target, init))
    }

    fn phase(&self, target: GeoMapPhase) -> BoxFuture<'_, ()> {
        Box::pin(self.phase.wait_for(target))
    }

    fn current_phase(&self) -> GeoMapPhase {
        self.phase.current()
    }

    fn get_center(&self) -> BoxFuture<'_, Result<GeoPoint, GeoMapError>> {
        Box::pin(async move { self.with_map(|map| map.get_center()) })
    }

    fn set_center(&self, center: GeoPoint) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move { self.with_map(|map| map.set_center(center)) })
    }

    fn get_layer(&self) -> BoxFuture<'_, Result<GeoLayer, GeoMapError>> {
        Box::pin(async move {
            self.map_handle()?;
            Ok(self.view.lock().unwrap().layer)
        })
    }

    fn set_layer(&self, layer: GeoLayer) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.with_map(|map| map.set_overlay_layer(to_vendor_layer(layer)))?;
            self.view.lock().unwrap().layer = layer;
            Ok(())
        })
    }

    fn get_type(&self) -> BoxFuture<'_, Result<GeoMapType, GeoMapError>> {
        Box::pin(async move { self.with_map(|map| from_vendor_type(map.get_map_type_id())) })
    }

    fn set_type(&self, map_type: GeoMapType) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.with_map(|map| {
                if let Some(id) = to_vendor_type(map_type) {
                    map.set_map_type_id(id);
                }
            })
        })
    }

    fn set_viewport(&self, viewport: GeoMapViewport) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.view.lock().unwrap().viewport = Some(viewport);
            Ok(())
        })
    }

    fn get_view_bounds(&self) -> BoxFuture<'_, Result<GeoBounds, GeoMapError>> {
        Box::pin(async move {
            self.with_map(|map| map.get_bounds())?
                .ok_or(GeoMapError::PhaseNotReached {
                    required: GeoMapPhase::Layouted,
                    current: self.phase.current(),
                })
        })
    }

    fn set_view_bounds(&self, bounds: GeoBounds) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            let viewport = self.view.lock().unwrap().viewport;
            self.with_map(|map| map.fit_bounds(bounds, viewport))
        })
    }

    fn get_zoom(&self) -> BoxFuture<'_, Result<f64, GeoMapError>> {
        Box::pin(async move { self.with_map(|map| map.get_zoom()) })
    }

    fn set_zoom(&self, zoom: f64) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move { self.with_map(|map| map.set_zoom(zoom)) })
    }

    fn get_markers(&self) -> BoxFuture<'_, Vec<Arc<dyn GeoMarkerImplementation>>> {
        Box::pin(async move { self.registry.markers().snapshot() })
    }

    fn add_event_listener(&self, listener: GeoEventListener) -> BoxFuture<'_, ()> {
        Box::pin(async move { self.registry.handlers().register(listener) })
    }

    fn covers_location(&self, point: GeoPoint) -> BoxFuture<'_, Result<bool, GeoMapError>> {
        Box::pin(async move {
            self.phase.require(GeoMapPhase::Loaded)?;
            Ok(covers_mercator(point))
        })
    }

    fn create_marker(
        &self,
        config: GeoMarkerConfig,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoMarkerImplementation>, GeoMapError>> {
        Box::pin(async move {
            let marker: Arc<dyn GeoMarkerImplementation> = GoogleMarker::create(self, config)?;
            Ok(marker)
        })
    }

    fn create_rect(
        &self,
        bounds: GeoBounds,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoRectImplementation>, GeoMapError>> {
        Box::pin(async move {
            let rect: Arc<dyn GeoRectImplementation> = Arc::new(GoogleRect::create(self, bounds)?);
            Ok(rect)
        })
    }

    fn create_circle(
        &self,
        config: GeoCircleConfig,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoCircleImplementation>, GeoMapError>> {
        Box::pin(async move {
            let circle: Arc<dyn GeoCircleImplementation> =
                Arc::new(GoogleCircle::create(self, config)?);
            Ok(circle)
        })
    }
}
