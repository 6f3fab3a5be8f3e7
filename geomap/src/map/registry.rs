//! Per-map marker registry and event handler lists.
//!
//! Both are owned by a map adapter. Derived entities never touch them
//! directly; they ask the adapter to attach or detach on their behalf.

use super::implementation::GeoMarkerImplementation;
use super::types::{GeoClickPayload, GeoEvent, GeoEventListener};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

/// Process-unique marker identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

impl MarkerId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// Markers attached to one map, in creation order.
#[derive(Default)]
pub struct MarkerRegistry {
    markers: Mutex<Vec<Arc<dyn GeoMarkerImplementation>>>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, marker: Arc<dyn GeoMarkerImplementation>) {
        self.markers.lock().unwrap().push(marker);
    }

    /// Removes the marker with `id`. Returns `false` if it was not registered.
    pub fn remove(&self, id: MarkerId) -> bool {
        let mut markers = self.markers.lock().unwrap();
        match markers.iter().position(|m| m.id() == id) {
            Some(index) => {
                markers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.markers.lock().unwrap().iter().any(|m| m.id() == id)
    }

    pub fn snapshot(&self) -> Vec<Arc<dyn GeoMarkerImplementation>> {
        self.markers.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.markers.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registered event handlers of one map.
#[derive(Default)]
pub struct EventHandlers {
    listeners: Mutex<Vec<GeoEventListener>>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, listener: GeoEventListener) {
        trace!(event = %listener.event(), "Registering event listener");
        self.listeners.lock().unwrap().push(listener);
    }

    /// Number of handlers registered for `event`.
    pub fn count(&self, event: GeoEvent) -> usize {
        self.listeners
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.event() == event)
            .count()
    }

    /// Dispatches a click to every click handler.
    pub fn fire_click(&self, payload: GeoClickPayload) {
        for listener in self.matching(GeoEvent::Click) {
            if let GeoEventListener::Click(handler) = listener {
                handler(payload);
            }
        }
    }

    /// Dispatches a payload-less event (`Changed` or `Loaded`).
    pub fn fire(&self, event: GeoEvent) {
        for listener in self.matching(event) {
            match listener {
                GeoEventListener::Changed(handler) | GeoEventListener::Loaded(handler) => handler(),
                GeoEventListener::Click(_) => {}
            }
        }
    }

    // Handlers run outside the lock so they may register further listeners.
    fn matching(&self, event: GeoEvent) -> Vec<GeoEventListener> {
        self.listeners
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.event() == event)
            .cloned()
            .collect()
    }
}

/// Markers and handlers of one map.
///
/// Owned by the map adapter. Entities keep a `Weak` handle and go through
/// [`attach`](Self::attach) / [`detach`](Self::detach), which keep the
/// registry and the `Changed` event consistent.
#[derive(Default)]
pub struct MapRegistry {
    markers: MarkerRegistry,
    handlers: EventHandlers,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn handlers(&self) -> &EventHandlers {
        &self.handlers
    }

    /// Registers a new marker and fires `Changed`.
    pub fn attach(&self, marker: Arc<dyn GeoMarkerImplementation>) {
        let id = marker.id();
        self.markers.insert(marker);
        debug!(marker = %id, "Marker attached");
        self.handlers.fire(GeoEvent::Changed);
    }

    /// Unregisters a marker and fires `Changed` if it was registered.
    pub fn detach(&self, id: MarkerId) -> bool {
        if !self.markers.remove(id) {
            trace!(marker = %id, "Marker already detached");
            return false;
        }
        debug!(marker = %id, "Marker detached");
        self.handlers.fire(GeoEvent::Changed);
        true
    }

    /// Fires `Changed` for an in-place marker update.
    pub fn touch(&self, id: MarkerId) {
        if self.markers.contains(id) {
            self.handlers.fire(GeoEvent::Changed);
        }
    }
}
