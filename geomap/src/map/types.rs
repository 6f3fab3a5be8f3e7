//! Map view and event types.

use crate::geo::{GeoMapCenter, GeoPoint};
use std::fmt;
use std::sync::Arc;

/// Base map rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeoMapType {
    #[default]
    Roadmap,
    Hybrid,
    Unknown,
}

/// Overlay layer shown on top of the base map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeoLayer {
    Transit,
    Traffic,
    #[default]
    None,
}

/// Host element a map is mounted into, identified by its DOM id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MountTarget {
    id: String,
}

impl MountTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Initial view applied when mounting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoMapMountInit {
    pub center: Option<GeoMapCenter>,
    pub map_type: Option<GeoMapType>,
    pub layer: Option<GeoLayer>,
    pub zoom: Option<f64>,
}

impl GeoMapMountInit {
    pub fn with_center(mut self, center: impl Into<GeoMapCenter>) -> Self {
        self.center = Some(center.into());
        self
    }

    pub fn with_type(mut self, map_type: GeoMapType) -> Self {
        self.map_type = Some(map_type);
        self
    }

    pub fn with_layer(mut self, layer: GeoLayer) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }
}

/// Events a map emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoEvent {
    /// The map was clicked; carries the clicked position.
    Click,
    /// A marker was added, removed, or changed its icon.
    Changed,
    /// The initial tiles finished rendering.
    Loaded,
}

impl GeoEvent {
    /// Event name used by the vendor SDKs.
    pub fn vendor_name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Changed => "changed",
            Self::Loaded => "tilesloaded",
        }
    }
}

impl fmt::Display for GeoEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.vendor_name())
    }
}

/// Payload of a [`GeoEvent::Click`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoClickPayload {
    pub position: GeoPoint,
}

pub type ClickHandler = Arc<dyn Fn(GeoClickPayload) + Send + Sync>;
pub type NotifyHandler = Arc<dyn Fn() + Send + Sync>;

/// An event handler; the variant fixes which event it listens to and the
/// payload it receives.
#[derive(Clone)]
pub enum GeoEventListener {
    Click(ClickHandler),
    Changed(NotifyHandler),
    Loaded(NotifyHandler),
}

impl GeoEventListener {
    pub fn click(handler: impl Fn(GeoClickPayload) + Send + Sync + 'static) -> Self {
        Self::Click(Arc::new(handler))
    }

    pub fn changed(handler: impl Fn() + Send + Sync + 'static) -> Self {
        Self::Changed(Arc::new(handler))
    }

    pub fn loaded(handler: impl Fn() + Send + Sync + 'static) -> Self {
        Self::Loaded(Arc::new(handler))
    }

    pub fn event(&self) -> GeoEvent {
        match self {
            Self::Click(_) => GeoEvent::Click,
            Self::Changed(_) => GeoEvent::Changed,
            Self::Loaded(_) => GeoEvent::Loaded,
        }
    }
}

impl fmt::Debug for GeoEventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GeoEventListener")
            .field(&self.event())
            .finish()
    }
}
