//! Google marker adapter.

use super::api::{GoogleMarkerHandle, MarkerIcon, MarkerOptions};
use super::map::GoogleMap;
use crate::error::GeoMapError;
use crate::geo::GeoPoint;
use crate::map::{BoxFuture, GeoMarkerImplementation, MapRegistry, MarkerId};
use crate::marker::{icon_anchor, svg_data_url, GeoMarkerAnchor, GeoMarkerConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

fn marker_icon(anchor: GeoMarkerAnchor, icon: &str) -> MarkerIcon {
    MarkerIcon {
        url: svg_data_url(icon),
        anchor: icon_anchor(anchor, icon, true).map(|point| (point.x, point.y)),
    }
}

/// A `google.maps.Marker` registered on a [`GoogleMap`].
pub struct GoogleMarker {
    id: MarkerId,
    anchor: GeoMarkerAnchor,
    icon: Mutex<String>,
    handle: Arc<dyn GoogleMarkerHandle>,
    registry: Weak<MapRegistry>,
    removed: AtomicBool,
}

impl GoogleMarker {
    /// Places a marker on the mounted `map` and registers it there.
    pub fn create(map: &GoogleMap, config: GeoMarkerConfig) -> Result<Arc<Self>, GeoMapError> {
        let api = map.api()?;
        let map_handle = map.map_handle()?;
        let anchor = config.anchor();

        let handle = api.create_marker(MarkerOptions {
            position: config.position,
            map: map_handle,
            icon: marker_icon(anchor, &config.icon),
        })?;

        let marker = Arc::new(Self {
            id: MarkerId::next(),
            anchor,
            icon: Mutex::new(config.icon),
            handle,
            registry: Arc::downgrade(map.registry()),
            removed: AtomicBool::new(false),
        });
        map.registry()
            .attach(Arc::clone(&marker) as Arc<dyn GeoMarkerImplementation>);
        Ok(marker)
    }
}

impl GeoMarkerImplementation for GoogleMarker {
    fn id(&self) -> MarkerId {
        self.id
    }

    fn get_icon(&self) -> BoxFuture<'_, String> {
        Box::pin(async move { self.icon.lock().unwrap().clone() })
    }

    fn set_icon(&self, icon: String) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.handle.set_icon(marker_icon(self.anchor, &icon));
            *self.icon.lock().unwrap() = icon;
            if let Some(registry) = self.registry.upgrade() {
                registry.touch(self.id);
            }
            Ok(())
        })
    }

    fn get_position(&self) -> BoxFuture<'_, GeoPoint> {
        Box::pin(async move { self.handle.get_position() })
    }

    fn set_position(&self, position: GeoPoint) -> BoxFuture<'_, ()> {
        Box::pin(async move { self.handle.set_position(position) })
    }

    fn remove(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            if self.removed.swap(true, Ordering::SeqCst) {
                debug!(marker = %self.id, "Marker already removed");
                return;
            }
            self.handle.detach();
            if let Some(registry) = self.registry.upgrade() {
                registry.detach(self.id);
            }
        })
    }
}
