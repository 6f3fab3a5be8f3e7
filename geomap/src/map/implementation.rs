//! Capability traits every vendor adapter implements.
//!
//! The facade entities ([`GeoMap`](super::GeoMap),
//! [`GeoMarker`](crate::marker::GeoMarker), [`GeoRect`](crate::shape::GeoRect),
//! [`GeoCircle`](crate::shape::GeoCircle)) hold one of these behind an `Arc`
//! and delegate every call. The traits are object safe so a host can adopt
//! its own implementation through
//! [`GeoMap::from_implementation`](super::GeoMap::from_implementation).

use super::registry::MarkerId;
use super::types::{GeoEventListener, GeoLayer, GeoMapMountInit, GeoMapType, MountTarget};
use crate::error::GeoMapError;
use crate::geo::{GeoBounds, GeoMapViewport, GeoPoint};
use crate::load::LoadedApi;
use crate::marker::GeoMarkerConfig;
use crate::phase::GeoMapPhase;
use crate::shape::GeoCircleConfig;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed, sendable future returned by the object-safe capability traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Map capability set.
///
/// Accessors and mutators of the view fail with
/// [`GeoMapError::PhaseNotReached`] when the implementation needs a mounted
/// map and is not mounted yet.
pub trait GeoMapImplementation: Send + Sync {
    /// Loads the vendor SDK. Repeated and concurrent calls share one load.
    fn load(&self) -> BoxFuture<'_, Result<LoadedApi, GeoMapError>>;

    /// Creates the vendor map inside `target`. Requires a loaded map.
    fn mount<'a>(
        &'a self,
        target: &'a MountTarget,
        init: GeoMapMountInit,
    ) -> BoxFuture<'a, Result<(), GeoMapError>>;

    /// Resolves once the lifecycle reached `target` or a later phase.
    fn phase(&self, target: GeoMapPhase) -> BoxFuture<'_, ()>;

    /// Current lifecycle phase.
    fn current_phase(&self) -> GeoMapPhase;

    fn get_center(&self) -> BoxFuture<'_, Result<GeoPoint, GeoMapError>>;
    fn set_center(&self, center: GeoPoint) -> BoxFuture<'_, Result<(), GeoMapError>>;

    fn get_layer(&self) -> BoxFuture<'_, Result<GeoLayer, GeoMapError>>;
    fn set_layer(&self, layer: GeoLayer) -> BoxFuture<'_, Result<(), GeoMapError>>;

    fn get_type(&self) -> BoxFuture<'_, Result<GeoMapType, GeoMapError>>;
    fn set_type(&self, map_type: GeoMapType) -> BoxFuture<'_, Result<(), GeoMapError>>;

    fn set_viewport(&self, viewport: GeoMapViewport) -> BoxFuture<'_, Result<(), GeoMapError>>;

    fn get_view_bounds(&self) -> BoxFuture<'_, Result<GeoBounds, GeoMapError>>;
    fn set_view_bounds(&self, bounds: GeoBounds) -> BoxFuture<'_, Result<(), GeoMapError>>;

    fn get_zoom(&self) -> BoxFuture<'_, Result<f64, GeoMapError>>;
    fn set_zoom(&self, zoom: f64) -> BoxFuture<'_, Result<(), GeoMapError>>;

    /// Markers currently registered on this map, in creation order.
    fn get_markers(&self) -> BoxFuture<'_, Vec<Arc<dyn GeoMarkerImplementation>>>;

    /// Registers an event handler. Handlers of one event fire in
    /// registration order.
    fn add_event_listener(&self, listener: GeoEventListener) -> BoxFuture<'_, ()>;

    /// Whether the point lies within the projection limits of the map.
    ///
    /// Vendors offer no coverage query; the built-in adapters answer with
    /// the Web Mercator latitude limit ([`covers_mercator`](super::covers_mercator)).
    fn covers_location(&self, point: GeoPoint) -> BoxFuture<'_, Result<bool, GeoMapError>>;

    /// Creates a marker on this map and registers it.
    ///
    /// [`GeoMap`](super::GeoMap) calls this for adopted implementations;
    /// the default reports the capability as unsupported.
    fn create_marker(
        &self,
        _config: GeoMarkerConfig,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoMarkerImplementation>, GeoMapError>> {
        Box::pin(async { Err(GeoMapError::unsupported("create_marker", "Custom")) })
    }

    /// Creates a rectangle on this map.
    fn create_rect(
        &self,
        _bounds: GeoBounds,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoRectImplementation>, GeoMapError>> {
        Box::pin(async { Err(GeoMapError::unsupported("create_geo_rect", "Custom")) })
    }

    /// Creates a circle on this map.
    fn create_circle(
        &self,
        _config: GeoCircleConfig,
    ) -> BoxFuture<'_, Result<Arc<dyn GeoCircleImplementation>, GeoMapError>> {
        Box::pin(async { Err(GeoMapError::unsupported("create_geo_circle", "Custom")) })
    }
}

/// Marker capability set.
pub trait GeoMarkerImplementation: Send + Sync {
    /// Identity within the owning map's registry.
    fn id(&self) -> MarkerId;

    fn get_icon(&self) -> BoxFuture<'_, String>;

    /// Replaces the SVG icon markup.
    fn set_icon(&self, icon: String) -> BoxFuture<'_, Result<(), GeoMapError>>;

    fn get_position(&self) -> BoxFuture<'_, GeoPoint>;
    fn set_position(&self, position: GeoPoint) -> BoxFuture<'_, ()>;

    /// Detaches the marker from the map. Calling it again is a no-op.
    fn remove(&self) -> BoxFuture<'_, ()>;
}

/// Rectangle capability set.
pub trait GeoRectImplementation: Send + Sync {
    fn get_bounds(&self) -> BoxFuture<'_, GeoBounds>;
    fn covers_location(&self, point: GeoPoint) -> BoxFuture<'_, bool>;
}

/// Circle capability set.
pub trait GeoCircleImplementation: Send + Sync {
    fn get_bounds(&self) -> BoxFuture<'_, GeoBounds>;
}
