//! Integration tests for the map facade.
//!
//! These tests drive the public API with a host-supplied implementation:
//! - Adopting a custom `GeoMapImplementation`
//! - Lifecycle phase ordering
//! - View state round trips
//! - Marker registry and `Changed` events
//! - Server-side maps built from a config file

use geomap::config::{GeoMapConfig, GeoMapProvider};
use geomap::geo::{GeoBounds, GeoMapViewport, GeoPoint};
use geomap::load::{Environment, LoadedApi};
use geomap::map::{
    BoxFuture, GeoEventListener, GeoLayer, GeoMap, GeoMapImplementation, GeoMapMountInit,
    GeoMapType, GeoMarkerImplementation, MapRegistry, MarkerId, MountTarget,
};
use geomap::marker::GeoMarkerConfig;
use geomap::phase::{GeoMapPhase, PhaseTracker};
use geomap::GeoMapError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

// =============================================================================
// Test Helpers
// =============================================================================

/// In-memory map recording every phase it passes through.
struct RecordingMap {
    phase: PhaseTracker,
    history: Mutex<Vec<GeoMapPhase>>,
    registry: Arc<MapRegistry>,
    bounds: Mutex<GeoBounds>,
    zoom: Mutex<f64>,
}

impl RecordingMap {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            phase: PhaseTracker::new(),
            history: Mutex::new(Vec::new()),
            registry: Arc::new(MapRegistry::new()),
            bounds: Mutex::new(GeoBounds::default()),
            zoom: Mutex::new(1.0),
        })
    }

    fn advance(&self, to: GeoMapPhase) {
        if self.phase.advance(to) {
            self.history.lock().unwrap().push(to);
        }
    }

    fn history(&self) -> Vec<GeoMapPhase> {
        self.history.lock().unwrap().clone()
    }
}

impl GeoMapImplementation for RecordingMap {
    fn load(&self) -> BoxFuture<'_, Result<LoadedApi, GeoMapError>> {
        Box::pin(async move {
            self.advance(GeoMapPhase::Loading);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.advance(GeoMapPhase::Loaded);
            Ok(LoadedApi::Custom)
        })
    }

    fn mount<'a>(
        &'a self,
        _target: &'a MountTarget,
        init: GeoMapMountInit,
    ) -> BoxFuture<'a, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.load().await?;
            if self.phase.current() >= GeoMapPhase::Mounting {
                return Err(GeoMapError::AlreadyMounted);
            }
            self.advance(GeoMapPhase::Mounting);
            if let Some(zoom) = init.zoom {
                *self.zoom.lock().unwrap() = zoom;
            }
            self.advance(GeoMapPhase::Mounted);
            self.advance(GeoMapPhase::Layouting);
            self.advance(GeoMapPhase::Layouted);
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
        Box::pin(async move { Ok(self.bounds.lock().unwrap().center()) })
    }

    fn set_center(&self, _center: GeoPoint) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async { Ok(()) })
    }

    fn get_layer(&self) -> BoxFuture<'_, Result<GeoLayer, GeoMapError>> {
        Box::pin(async { Ok(GeoLayer::None) })
    }

    fn set_layer(&self, _layer: GeoLayer) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async { Ok(()) })
    }

    fn get_type(&self) -> BoxFuture<'_, Result<GeoMapType, GeoMapError>> {
        Box::pin(async { Ok(GeoMapType::Roadmap) })
    }

    fn set_type(&self, _map_type: GeoMapType) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async { Ok(()) })
    }

    fn set_viewport(&self, _viewport: GeoMapViewport) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async { Ok(()) })
    }

    fn get_view_bounds(&self) -> BoxFuture<'_, Result<GeoBounds, GeoMapError>> {
        Box::pin(async move { Ok(*self.bounds.lock().unwrap()) })
    }

    fn set_view_bounds(&self, bounds: GeoBounds) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            *self.bounds.lock().unwrap() = bounds;
            Ok(())
        })
    }

    fn get_zoom(&self) -> BoxFuture<'_, Result<f64, GeoMapError>> {
        Box::pin(async move { Ok(*self.zoom.lock().unwrap()) })
    }

    fn set_zoom(&self, zoom: f64) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            *self.zoom.lock().unwrap() = zoom;
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
        Box::pin(async move { Ok(self.bounds.lock().unwrap().contains(point)) })
    }

    fn create_marker(
        &self,
        config: GeoMarkerConfig,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoMarkerImplementation>, GeoMapError>> {
        Box::pin(async move {
            let marker: Arc<dyn GeoMarkerImplementation> = Arc::new(PinMarker {
                id: MarkerId::next(),
                position: Mutex::new(config.position),
                icon: Mutex::new(config.icon),
                registry: Arc::downgrade(&self.registry),
                removed: AtomicBool::new(false),
            });
            self.registry.attach(Arc::clone(&marker));
            Ok(marker)
        })
    }
}

struct PinMarker {
    id: MarkerId,
    position: Mutex<GeoPoint>,
    icon: Mutex<String>,
    registry: Weak<MapRegistry>,
    removed: AtomicBool,
}

impl GeoMarkerImplementation for PinMarker {
    fn id(&self) -> MarkerId {
        self.id
    }

    fn get_icon(&self) -> BoxFuture<'_, String> {
        Box::pin(async move { self.icon.lock().unwrap().clone() })
    }

    fn set_icon(&self, icon: String) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            *self.icon.lock().unwrap() = icon;
            Ok(())
        })
    }

    fn get_position(&self) -> BoxFuture<'_, GeoPoint> {
        Box::pin(async move { *self.position.lock().unwrap() })
    }

    fn set_position(&self, position: GeoPoint) -> BoxFuture<'_, ()> {
        Box::pin(async move { *self.position.lock().unwrap() = position })
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

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_adopted_map_reports_custom_provider() {
    let recording = RecordingMap::new();
    let map = GeoMap::from_implementation(recording);
    assert_eq!(map.provider(), GeoMapProvider::Custom);
    assert_eq!(map.current_phase(), GeoMapPhase::Pristine);
}

#[tokio::test]
async fn test_phases_never_go_backwards() {
    let recording = RecordingMap::new();
    let map = GeoMap::from_implementation(Arc::clone(&recording) as Arc<dyn GeoMapImplementation>);

    map.mount(&MountTarget::new("map"), GeoMapMountInit::default())
        .await
        .unwrap();
    // A late load must not move the map back to Loaded.
    map.load().await.unwrap();

    let history = recording.history();
    assert!(history.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(history.last(), Some(&GeoMapPhase::Layouted));
    assert_eq!(map.current_phase(), GeoMapPhase::Layouted);
}

#[tokio::test]
async fn test_phase_wait_resolves_after_mount() {
    let map = GeoMap::from_implementation(RecordingMap::new());
    let waiter = {
        let map = map.clone();
        tokio::spawn(async move { map.phase(GeoMapPhase::Mounted).await })
    };

    map.mount(&MountTarget::new("map"), GeoMapMountInit::default())
        .await
        .unwrap();
    tokio::time::timeout(Duration::from_secs(1), waiter)
        .await
        .expect("waiter should resolve")
        .unwrap();
}

#[tokio::test]
async fn test_second_mount_rejected() {
    let map = GeoMap::from_implementation(RecordingMap::new());
    let target = MountTarget::new("map");
    map.mount(&target, GeoMapMountInit::default())
        .await
        .unwrap();
    assert_eq!(
        map.mount(&target, GeoMapMountInit::default()).await,
        Err(GeoMapError::AlreadyMounted)
    );
}

#[tokio::test]
async fn test_view_bounds_round_trip() {
    let map = GeoMap::from_implementation(RecordingMap::new());
    let init = GeoMapMountInit::default().with_zoom(7.0);
    map.mount(&MountTarget::new("map"), init).await.unwrap();

    let bounds = GeoBounds::new(54.0, 14.0, 47.0, 6.0).unwrap();
    map.set_view_bounds(bounds).await.unwrap();

    let read = map.get_view_bounds().await.unwrap();
    assert_eq!(read.north(), 54.0);
    assert_eq!(read.east(), 14.0);
    assert_eq!(read.south(), 47.0);
    assert_eq!(read.west(), 6.0);
    assert_eq!(map.get_zoom().await, Ok(7.0));
    assert_eq!(
        map.covers_location(GeoPoint::new(50.0, 10.0)).await,
        Ok(true)
    );
}

#[tokio::test]
async fn test_marker_remove_twice_fires_changed_once() {
    let map = GeoMap::from_implementation(RecordingMap::new());
    let changed = Arc::new(AtomicUsize::new(0));
    {
        let changed = Arc::clone(&changed);
        map.on_changed(move || {
            changed.fetch_add(1, Ordering::SeqCst);
        })
        .await;
    }

    let marker = map
        .create_marker(GeoMarkerConfig::new(GeoPoint::new(1.0, 1.0), "<svg/>"))
        .await
        .unwrap();
    assert_eq!(marker.provider(), GeoMapProvider::Custom);
    assert_eq!(changed.load(Ordering::SeqCst), 1);

    marker.remove().await;
    marker.remove().await;

    assert_eq!(changed.load(Ordering::SeqCst), 2);
    assert!(map.get_markers().await.is_empty());
}

#[tokio::test]
async fn test_missing_shape_factory_is_unsupported() {
    let map = GeoMap::from_implementation(RecordingMap::new());
    let result = map
        .create_geo_rect(GeoBounds::new(1.0, 1.0, 0.0, 0.0).unwrap())
        .await;
    assert!(matches!(result, Err(GeoMapError::Unsupported { .. })));
}

#[tokio::test]
async fn test_server_side_map_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.ini");
    std::fs::write(
        &path,
        "[map]\nprovider = google\nviewport = 10,20,30,40\n[google]\napi_key = KEY\n",
    )
    .unwrap();

    let config = GeoMapConfig::load_from(&path).unwrap();
    assert_eq!(config.provider(), GeoMapProvider::Google);

    let map = GeoMap::create(config, Environment::ServerSide);
    assert_eq!(map.provider(), GeoMapProvider::Custom);

    let center = GeoPoint::new(40.4, -3.7);
    map.mount(
        &MountTarget::new("ssr"),
        GeoMapMountInit::default().with_center(center),
    )
    .await
    .unwrap();
    assert_eq!(map.get_center().await, Ok(center));
    assert_eq!(map.current_phase(), GeoMapPhase::Layouted);
}
