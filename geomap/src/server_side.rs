//! Vendor-less map for environments without a DOM.
//!
//! [`ServerSideGeoMap`] walks through the full lifecycle without loading
//! anything and keeps the view state in memory, so rendering code can run
//! unchanged on a server. Entities it creates are inert.

use crate::error::GeoMapError;
use crate::geo::{GeoBounds, GeoMapCenter, GeoMapViewport, GeoPoint, EARTH_RADIUS_METERS};
use crate::load::LoadedApi;
use crate::map::{
    covers_mercator, BoxFuture, GeoCircleImplementation, GeoEventListener, GeoLayer,
    GeoMapImplementation, GeoMapMountInit, GeoMapType, GeoMarkerImplementation,
    GeoRectImplementation, MapRegistry, MarkerId, MountTarget, DEFAULT_CENTER, DEFAULT_ZOOM,
};
use crate::marker::GeoMarkerConfig;
use crate::phase::{GeoMapPhase, PhaseTracker};
use crate::shape::{circle_bounds, GeoCircleConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct ViewState {
    center: GeoPoint,
    zoom: f64,
    map_type: GeoMapType,
    layer: GeoLayer,
    bounds: GeoBounds,
    viewport: Option<GeoMapViewport>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            map_type: GeoMapType::default(),
            layer: GeoLayer::default(),
            bounds: GeoBounds::from_point(DEFAULT_CENTER),
            viewport: None,
        }
    }
}

/// [`GeoMapImplementation`] that renders nothing.
#[derive(Default)]
pub struct ServerSideGeoMap {
    phase: PhaseTracker,
    registry: Arc<MapRegistry>,
    view: Mutex<ViewState>,
}

impl ServerSideGeoMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial view, kept for when a viewport arrives before the mount.
    pub fn with_viewport(viewport: Option<GeoMapViewport>) -> Self {
        let map = Self::new();
        map.view.lock().unwrap().viewport = viewport;
        map
    }

    pub fn viewport(&self) -> Option<GeoMapViewport> {
        self.view.lock().unwrap().viewport
    }
}

impl GeoMapImplementation for ServerSideGeoMap {
    fn load(&self) -> BoxFuture<'_, Result<LoadedApi, GeoMapError>> {
        Box::pin(async move {
            self.phase.advance(GeoMapPhase::Loading);
            self.phase.advance(GeoMapPhase::Loaded);
            Ok(LoadedApi::Custom)
        })
    }

    fn mount<'a>(
        &'a self,
        target: &'a MountTarget,
        init: GeoMapMountInit,
    ) -> BoxFuture<'a, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.load().await?;
            if !self.phase.advance(GeoMapPhase::Mounting) {
                return Err(GeoMapError::AlreadyMounted);
            }
            {
                let mut view = self.view.lock().unwrap();
                match init.center {
                    Some(GeoMapCenter::Point(point)) => {
                        view.center = point;
                        view.bounds = GeoBounds::from_point(point);
                    }
                    Some(GeoMapCenter::Bounds(bounds)) => {
                        view.center = bounds.center();
                        view.bounds = bounds;
                    }
                    None => {}
                }
                if let Some(zoom) = init.zoom {
                    view.zoom = zoom;
                }
                if let Some(map_type) = init.map_type {
                    view.map_type = map_type;
                }
                if let Some(layer) = init.layer {
                    view.layer = layer;
                }
            }
            debug!(target = %target.id(), "Server-side map mounted");
            for phase in [
                GeoMapPhase::Mounted,
                GeoMapPhase::Layouting,
                GeoMapPhase::Layouted,
            ] {
                self.phase.advance(phase);
            }
            Ok(())
        })
    }

    fn phase(&self, target: GeoMapPhase) -> BoxFuture<'_, ()> {
        Box::pin(self.phase.wait_for(target))
    }

    fn current_phase(&self) -> GeoMapPhase {
        self.phase.current()
    }

    fn get_center(&self) -> BoxFuture<'_, Result<GeoPoint, GeoMapError>> {
        Box::pin(async move { Ok(self.view.lock().unwrap().center) })
    }

    fn set_center(&self, center: GeoPoint) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.view.lock().unwrap().center = center;
            Ok(())
        })
    }

    fn get_layer(&self) -> BoxFuture<'_, Result<GeoLayer, GeoMapError>> {
        Box::pin(async move { Ok(self.view.lock().unwrap().layer) })
    }

    fn set_layer(&self, layer: GeoLayer) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.view.lock().unwrap().layer = layer;
            Ok(())
        })
    }

    fn get_type(&self) -> BoxFuture<'_, Result<GeoMapType, GeoMapError>> {
        Box::pin(async move { Ok(self.view.lock().unwrap().map_type) })
    }

    fn set_type(&self, map_type: GeoMapType) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.view.lock().unwrap().map_type = map_type;
            Ok(())
        })
    }

    fn set_viewport(&self, viewport: GeoMapViewport) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.view.lock().unwrap().viewport = Some(viewport);
            Ok(())
        })
    }

    fn get_view_bounds(&self) -> BoxFuture<'_, Result<GeoBounds, GeoMapError>> {
        Box::pin(async move { Ok(self.view.lock().unwrap().bounds) })
    }

    fn set_view_bounds(&self, bounds: GeoBounds) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            let mut view = self.view.lock().unwrap();
            view.bounds = bounds;
            view.center = bounds.center();
            Ok(())
        })
    }

    fn get_zoom(&self) -> BoxFuture<'_, Result<f64, GeoMapError>> {
        Box::pin(async move { Ok(self.view.lock().unwrap().zoom) })
    }

    fn set_zoom(&self, zoom: f64) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.view.lock().unwrap().zoom = zoom;
            Ok(())
        })
    }

    fn get_markers(&self) -> BoxFuture<'_, Vec<Arc<dyn GeoMarkerImplementation>>> {
        Box::pin(async move { self.registry.markers().snapshot() })
    }

    fn add_event_listener(&self, listener: GeoEventListener) -> BoxFuture<'_, ()> {
        Box::pin(async move { self.registry.handlers().register(listener) })
    }

    fn covers_location(&self, point: GeoPoint) -> BoxFuture<'_, Result<bool, GeoMapError>> {
        Box::pin(async move { Ok(covers_mercator(point)) })
    }

    fn create_marker(
        &self,
        config: GeoMarkerConfig,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoMarkerImplementation>, GeoMapError>> {
        Box::pin(async move {
            let marker: Arc<dyn GeoMarkerImplementation> = Arc::new(InertMarker {
                id: MarkerId::next(),
                state: Mutex::new((config.icon, config.position)),
                registry: Arc::downgrade(&self.registry),
                removed: AtomicBool::new(false),
            });
            self.registry.attach(Arc::clone(&marker));
            Ok(marker)
        })
    }

    fn create_rect(
        &self,
        bounds: GeoBounds,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoRectImplementation>, GeoMapError>> {
        Box::pin(async move {
            let rect: Arc<dyn GeoRectImplementation> = Arc::new(InertShape { bounds });
            Ok(rect)
        })
    }

    fn create_circle(
        &self,
        config: GeoCircleConfig,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoCircleImplementation>, GeoMapError>> {
        Box::pin(async move {
            let bounds = circle_bounds(config.position, config.radius, EARTH_RADIUS_METERS);
            let circle: Arc<dyn GeoCircleImplementation> = Arc::new(InertShape { bounds });
            Ok(circle)
        })
    }
}

/// Marker that only remembers its icon and position.
struct InertMarker {
    id: MarkerId,
    state: Mutex<(String, GeoPoint)>,
    registry: Weak<MapRegistry>,
    removed: AtomicBool,
}

impl GeoMarkerImplementation for InertMarker {
    fn id(&self) -> MarkerId {
        self.id
    }

    fn get_icon(&self) -> BoxFuture<'_, String> {
        Box::pin(async move { self.state.lock().unwrap().0.clone() })
    }

    fn set_icon(&self, icon: String) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.state.lock().unwrap().0 = icon;
            if let Some(registry) = self.registry.upgrade() {
                registry.touch(self.id);
            }
            Ok(())
        })
    }

    fn get_position(&self) -> BoxFuture<'_, GeoPoint> {
        Box::pin(async move { self.state.lock().unwrap().1 })
    }

    fn set_position(&self, position: GeoPoint) -> BoxFuture<'_, ()> {
        Box::pin(async move { self.state.lock().unwrap().1 = position })
    }

    fn remove(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            if self.removed.swap(true, Ordering::SeqCst) {
                return;
            }
            if let Some(registry) = self.registry.upgrade() {
                registry.detach(self.id);
            }
        })
    }
}

struct InertShape {
    bounds: GeoBounds,
}

impl GeoRectImplementation for InertShape {
    fn get_bounds(&self) -> BoxFuture<'_, GeoBounds> {
        Box::pin(async move { self.bounds })
    }

    fn covers_location(&self, point: GeoPoint) -> BoxFuture<'_, bool> {
        Box::pin(async move { self.bounds.contains(point) })
    }
}

impl GeoCircleImplementation for InertShape {
    fn get_bounds(&self) -> BoxFuture<'_, GeoBounds> {
        Box::pin(async move { self.bounds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mount_reaches_layouted() {
        let map = ServerSideGeoMap::new();
        let center = GeoPoint::new(48.1, 11.6);
        map.mount(
            &MountTarget::new("ssr"),
            GeoMapMountInit::default()
                .with_center(center)
                .with_zoom(12.0)
                .with_type(GeoMapType::Hybrid),
        )
        .await
        .unwrap();

        assert_eq!(map.current_phase(), GeoMapPhase::Layouted);
        assert_eq!(map.get_center().await, Ok(center));
        assert_eq!(map.get_zoom().await, Ok(12.0));
        assert_eq!(map.get_type().await, Ok(GeoMapType::Hybrid));
    }

    #[tokio::test]
    async fn test_second_mount_fails() {
        let map = ServerSideGeoMap::new();
        let target = MountTarget::new("ssr");
        map.mount(&target, GeoMapMountInit::default())
            .await
            .unwrap();

        let err = map.mount(&target, GeoMapMountInit::default()).await;
        assert_eq!(err, Err(GeoMapError::AlreadyMounted));
    }

    #[tokio::test]
    async fn test_view_bounds_round_trip() {
        let map = ServerSideGeoMap::new();
        let bounds = GeoBounds::new(50.0, 12.0, 45.0, 5.0).unwrap();
        map.set_view_bounds(bounds).await.unwrap();

        assert_eq!(map.get_view_bounds().await, Ok(bounds));
        assert_eq!(map.get_center().await, Ok(bounds.center()));
    }

    #[tokio::test]
    async fn test_inert_marker_registers_and_removes() {
        let map = ServerSideGeoMap::new();
        let marker = map
            .create_marker(GeoMarkerConfig::new(GeoPoint::new(1.0, 1.0), "<svg/>"))
            .await
            .unwrap();
        assert_eq!(map.get_markers().await.len(), 1);

        marker.set_position(GeoPoint::new(2.0, 2.0)).await;
        assert_eq!(marker.get_position().await, GeoPoint::new(2.0, 2.0));

        marker.remove().await;
        marker.remove().await;
        assert!(map.get_markers().await.is_empty());
    }

    #[tokio::test]
    async fn test_inert_circle_bounds() {
        let map = ServerSideGeoMap::new();
        let center = GeoPoint::new(0.0, 0.0);
        let circle = map
            .create_circle(GeoCircleConfig::new(center, 1_000.0))
            .await
            .unwrap();
        assert!(circle.get_bounds().await.contains(center));
    }
}
