//! HERE map adapter.

use super::api::{
    HereListener, HereMapHandle, HereMapOptions, HereMapsApi, HerePlatform, HerePlatformOptions,
};
use super::marker::HereMarker;
use super::shapes::{HereCircle, HereRect};
use crate::config::{GeoMapProvider, HereMapConfig};
use crate::error::GeoMapError;
use crate::geo::{GeoBounds, GeoMapCenter, GeoMapViewport, GeoPoint};
use crate::load::{load_vendor_api, ApiLoader, HostContext, LoadedApi, ScriptRequest, VendorApi};
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

/// Base URL of the HERE Maps API for JavaScript 3.0.
pub const HERE_SCRIPT_BASE: &str = "https://js.api.here.com/v3/3.0";

/// SDK modules, in load order.
pub const HERE_MODULES: [&str; 4] = ["core", "service", "mapevents", "ui"];

/// Pointer event that maps to a click.
const TAP_EVENT: &str = "tap";
/// Fired when the first view finished rendering.
const VIEW_READY_EVENT: &str = "mapviewchangeend";

/// Script tags for every SDK module, in load order.
pub fn script_requests() -> Vec<ScriptRequest> {
    HERE_MODULES
        .iter()
        .map(|module| {
            ScriptRequest::new(format!("{}/mapsjs-{}.js", HERE_SCRIPT_BASE, module))
                .with_data("map-provider", GeoMapProvider::Here.as_str())
        })
        .collect()
}

/// Default layer path for a map type and overlay.
pub fn base_layer(map_type: GeoMapType, layer: GeoLayer) -> &'static str {
    match (map_type, layer) {
        (GeoMapType::Hybrid, GeoLayer::Traffic) => "satellite.traffic",
        (GeoMapType::Hybrid, _) => "satellite.map",
        (_, GeoLayer::Traffic) => "normal.traffic",
        (_, GeoLayer::Transit) => "normal.transit",
        (_, GeoLayer::None) => "normal.map",
    }
}

/// Vendor handles available after load.
#[derive(Clone)]
pub struct HereHandles {
    pub api: Arc<dyn HereMapsApi>,
    pub platform: Arc<dyn HerePlatform>,
}

#[derive(Default)]
struct ViewState {
    map: Option<Arc<dyn HereMapHandle>>,
    map_type: GeoMapType,
    layer: GeoLayer,
    viewport: Option<GeoMapViewport>,
}

/// [`GeoMapImplementation`] backed by HERE Maps.
pub struct HereMap {
    config: HereMapConfig,
    host: Arc<dyn HostContext>,
    loader: ApiLoader<HereHandles>,
    phase: Arc<PhaseTracker>,
    registry: Arc<MapRegistry>,
    view: Mutex<ViewState>,
}

impl HereMap {
    pub fn new(config: HereMapConfig, host: Arc<dyn HostContext>) -> Self {
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

    pub fn config(&self) -> &HereMapConfig {
        &self.config
    }

    /// The `H` namespace and platform, once loaded.
    pub fn handles(&self) -> Result<HereHandles, GeoMapError> {
        self.loader.get().ok_or(GeoMapError::PhaseNotReached {
            required: GeoMapPhase::Loaded,
            current: self.phase.current(),
        })
    }

    pub fn api(&self) -> Result<Arc<dyn HereMapsApi>, GeoMapError> {
        self.handles().map(|h| h.api)
    }

    pub fn platform(&self) -> Result<Arc<dyn HerePlatform>, GeoMapError> {
        self.handles().map(|h| h.platform)
    }

    /// The vendor map, once mounted.
    pub fn map_handle(&self) -> Result<Arc<dyn HereMapHandle>, GeoMapError> {
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

    async fn load_handles(&self) -> Result<HereHandles, GeoMapError> {
        self.phase.advance(GeoMapPhase::Loading);

        let host = Arc::clone(&self.host);
        let platform_options = HerePlatformOptions {
            app_id: self.config.app_id.clone(),
            app_code: self.config.app_code.clone(),
            use_https: true,
        };
        let result = self
            .loader
            .load(move || {
                Box::pin(async move {
                    info!(modules = HERE_MODULES.len(), "Loading HERE Maps API");
                    let api = match load_vendor_api(
                        host.as_ref(),
                        GeoMapProvider::Here,
                        script_requests(),
                    )
                    .await?
                    {
                        VendorApi::Here(api) => api,
                        other => {
                            return Err(GeoMapError::ScriptLoad {
                                src: HERE_SCRIPT_BASE.to_string(),
                                reason: format!("host returned {} API", other.provider()),
                            })
                        }
                    };
                    let platform = api.create_platform(platform_options)?;
                    Ok(HereHandles { api, platform })
                })
            })
            .await;

        match result {
            Ok(handles) => {
                self.phase.advance(GeoMapPhase::Loaded);
                Ok(handles)
            }
            Err(err) => {
                warn!(error = %err, "HERE Maps API failed to load");
                Err(err)
            }
        }
    }

    async fn mount_map(
        &self,
        target: &MountTarget,
        init: GeoMapMountInit,
    ) -> Result<(), GeoMapError> {
        let handles = self.load_handles().await?;
        if !self.phase.advance(GeoMapPhase::Mounting) {
            return Err(GeoMapError::AlreadyMounted);
        }

        let map_type = init.map_type.unwrap_or_default();
        let layer = init.layer.unwrap_or_default();
        let center = match init.center {
            Some(GeoMapCenter::Point(point)) => point,
            Some(GeoMapCenter::Bounds(bounds)) => bounds.center(),
            None => DEFAULT_CENTER,
        };
        let options = HereMapOptions {
            center,
            zoom: init.zoom.unwrap_or(DEFAULT_ZOOM),
            base_layer: base_layer(map_type, layer),
            style: self.config.style.as_str(),
            ppi: self.config.ppi.ppi(),
            no_wrap: self.config.no_wrap,
            language: self.config.here_language().code(),
            min_zoom: self.config.min_zoom,
            max_zoom: self.config.max_zoom,
        };
        let map = handles.platform.create_map(target, options)?;
        self.wire_events(map.as_ref());

        let viewport = {
            let mut view = self.view.lock().unwrap();
            view.map = Some(Arc::clone(&map));
            view.map_type = map_type;
            view.layer = layer;
            view.viewport
        };
        if let Some(viewport) = viewport {
            map.set_padding(viewport);
        }
        if let Some(GeoMapCenter::Bounds(bounds)) = init.center {
            map.set_view_bounds(bounds);
        }

        info!(target = %target.id(), "HERE map mounted");
        self.phase.advance(GeoMapPhase::Mounted);
        self.phase.advance(GeoMapPhase::Layouting);
        Ok(())
    }

    fn wire_events(&self, map: &dyn HereMapHandle) {
        let registry = Arc::clone(&self.registry);
        let tap: HereListener = Arc::new(move |position| {
            if let Some(position) = position {
                registry.handlers().fire_click(GeoClickPayload { position });
            }
        });
        map.add_listener(TAP_EVENT, tap);

        let registry = Arc::clone(&self.registry);
        let phase = Arc::clone(&self.phase);
        let ready: HereListener = Arc::new(move |_| {
            if phase.advance(GeoMapPhase::Layouted) {
                debug!("HERE map view ready");
                registry.handlers().fire(GeoEvent::Loaded);
            }
        });
        map.add_listener(VIEW_READY_EVENT, ready);
    }

    fn with_map<T>(&self, f: impl FnOnce(&dyn HereMapHandle) -> T) -> Result<T, GeoMapError> {
        let map = self.map_handle()?;
        Ok(f(map.as_ref()))
    }

    /// Applies a new type or layer; HERE encodes both in the base layer.
    fn update_base_layer(
        &self,
        update: impl FnOnce(&mut GeoMapType, &mut GeoLayer),
    ) -> Result<(), GeoMapError> {
        let map = self.map_handle()?;
        let name = {
            let mut guard = self.view.lock().unwrap();
            let view = &mut *guard;
            update(&mut view.map_type, &mut view.layer);
            base_layer(view.map_type, view.layer)
        };
        map.set_base_layer(name);
        Ok(())
    }
}

impl GeoMapImplementation for HereMap {
    fn load(&self) -> BoxFuture<'_, Result<LoadedApi, GeoMapError>> {
        Box::pin(async move { self.load_handles().await.map(|h| LoadedApi::Here(h.api)) })
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
        Box::pin(async move { self.update_base_layer(|_, current| *current = layer) })
    }

    fn get_type(&self) -> BoxFuture<'_, Result<GeoMapType, GeoMapError>> {
        Box::pin(async move {
            self.map_handle()?;
            Ok(self.view.lock().unwrap().map_type)
        })
    }

    fn set_type(&self, map_type: GeoMapType) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move { self.update_base_layer(|current, _| *current = map_type) })
    }

    fn set_viewport(&self, viewport: GeoMapViewport) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            let map = {
                let mut view = self.view.lock().unwrap();
                view.viewport = Some(viewport);
                view.map.clone()
            };
            if let Some(map) = map {
                map.set_padding(viewport);
            }
            Ok(())
        })
    }

    fn get_view_bounds(&self) -> BoxFuture<'_, Result<GeoBounds, GeoMapError>> {
        Box::pin(async move { self.with_map(|map| map.get_view_bounds()) })
    }

    fn set_view_bounds(&self, bounds: GeoBounds) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move { self.with_map(|map| map.set_view_bounds(bounds)) })
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
            let marker: Arc<dyn GeoMarkerImplementation> = HereMarker::create(self, config)?;
            Ok(marker)
        })
    }

    fn create_rect(
        &self,
        bounds: GeoBounds,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoRectImplementation>, GeoMapError>> {
        Box::pin(async move {
            let rect: Arc<dyn GeoRectImplementation> = Arc::new(HereRect::create(self, bounds)?);
            Ok(rect)
        })
    }

    fn create_circle(
        &self,
        config: GeoCircleConfig,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoCircleImplementation>, GeoMapError>> {
        Box::pin(async move {
            let circle: Arc<dyn GeoCircleImplementation> =
                Arc::new(HereCircle::create(self, config)?);
            Ok(circle)
        })
    }
}
