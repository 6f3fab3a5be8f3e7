//! Map markers.
//!
//! A [`GeoMarker`] is created through
//! [`GeoMap::create_marker`](crate::map::GeoMap::create_marker) and owns its
//! vendor marker. It reaches the owning map only through a weak handle, so
//! dropping the map never leaks through its markers.

mod anchor;

pub use anchor::{
    icon_anchor, icon_size, AnchorPoint, GeoMarkerAnchor, GeoMarkerOrientation, IconSize,
};

use crate::config::GeoMapProvider;
use crate::error::GeoMapError;
use crate::geo::GeoPoint;
use crate::load::encode_uri_component;
use crate::map::{GeoMarkerImplementation, MarkerId};
use std::fmt;
use std::sync::Arc;

/// Parameters for a new marker.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMarkerConfig {
    pub position: GeoPoint,
    /// SVG markup of the icon.
    pub icon: String,
    pub anchor: Option<GeoMarkerAnchor>,
}

impl GeoMarkerConfig {
    pub fn new(position: GeoPoint, icon: impl Into<String>) -> Self {
        Self {
            position,
            icon: icon.into(),
            anchor: None,
        }
    }

    pub fn with_anchor(mut self, anchor: GeoMarkerAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// The configured anchor, centered if none was given.
    pub fn anchor(&self) -> GeoMarkerAnchor {
        self.anchor.unwrap_or_default()
    }
}

/// Vendor-neutral marker.
#[derive(Clone)]
pub struct GeoMarker {
    provider: GeoMapProvider,
    implementation: Arc<dyn GeoMarkerImplementation>,
}

impl GeoMarker {
    pub(crate) fn new(
        provider: GeoMapProvider,
        implementation: Arc<dyn GeoMarkerImplementation>,
    ) -> Self {
        Self {
            provider,
            implementation,
        }
    }

    pub fn provider(&self) -> GeoMapProvider {
        self.provider
    }

    pub fn id(&self) -> MarkerId {
        self.implementation.id()
    }

    pub async fn get_icon(&self) -> String {
        self.implementation.get_icon().await
    }

    pub async fn set_icon(&self, icon: impl Into<String>) -> Result<(), GeoMapError> {
        self.implementation.set_icon(icon.into()).await
    }

    pub async fn get_position(&self) -> GeoPoint {
        self.implementation.get_position().await
    }

    pub async fn set_position(&self, position: GeoPoint) {
        self.implementation.set_position(position).await
    }

    /// Takes the marker off the map. Repeated calls do nothing.
    pub async fn remove(&self) {
        self.implementation.remove().await
    }
}

impl fmt::Debug for GeoMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoMarker")
            .field("provider", &self.provider)
            .field("id", &self.id())
            .finish()
    }
}

/// `data:` URL carrying SVG markup, the way vendor SDKs take marker icons.
pub fn svg_data_url(icon: &str) -> String {
    format!("data:image/svg+xml;utf-8,{}", encode_uri_component(icon))
}
