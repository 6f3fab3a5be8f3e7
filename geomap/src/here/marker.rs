//! HERE marker adapter.

use super::api::{HereIcon, HereMapHandle, HereMarkerHandle, HereObject};
use super::map::HereMap;
use crate::error::GeoMapError;
use crate::geo::GeoPoint;
use crate::map::{BoxFuture, GeoMarkerImplementation, MapRegistry, MarkerId};
use crate::marker::{icon_anchor, GeoMarkerAnchor, GeoMarkerConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

fn here_icon(anchor: GeoMarkerAnchor, icon: &str) -> HereIcon {
    HereIcon {
        markup: icon.to_string(),
        anchor: icon_anchor(anchor, icon, true).map(|point| (point.x, point.y)),
    }
}

/// An `H.map.Marker` added to a [`HereMap`].
pub struct HereMarker {
    id: MarkerId,
    anchor: GeoMarkerAnchor,
    icon: Mutex<String>,
    handle: Arc<dyn HereMarkerHandle>,
    map: Weak<dyn HereMapHandle>,
    registry: Weak<MapRegistry>,
    removed: AtomicBool,
}

impl HereMarker {
    /// Adds a marker to the mounted `map` and registers it there.
    pub fn create(map: &HereMap, config: GeoMarkerConfig) -> Result<Arc<Self>, GeoMapError> {
        let api = map.api()?;
        let map_handle = map.map_handle()?;
        let anchor = config.anchor();

        let handle = api.create_marker(config.position, here_icon(anchor, &config.icon))?;
        map_handle.add_object(HereObject::Marker(Arc::clone(&handle)));

        let marker = Arc::new(Self {
            id: MarkerId::next(),
            anchor,
            icon: Mutex::new(config.icon),
            handle,
            map: Arc::downgrade(&map_handle),
            registry: Arc::downgrade(map.registry()),
            removed: AtomicBool::new(false),
        });
        map.registry()
            .attach(Arc::clone(&marker) as Arc<dyn GeoMarkerImplementation>);
        Ok(marker)
    }
}

impl GeoMarkerImplementation for HereMarker {
    fn id(&self) -> MarkerId {
        self.id
    }

    fn get_icon(&self) -> BoxFuture<'_, String> {
        Box::pin(async move { self.icon.lock().unwrap().clone() })
    }

    fn set_icon(&self, icon: String) -> BoxFuture<'_, Result<(), GeoMapError>> {
        Box::pin(async move {
            self.handle.set_icon(here_icon(self.anchor, &icon));
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
            if let Some(map) = self.map.upgrade() {
                map.remove_object(HereObject::Marker(Arc::clone(&self.handle)));
            }
            if let Some(registry) = self.registry.upgrade() {
                registry.detach(self.id);
            }
        })
    }
}
