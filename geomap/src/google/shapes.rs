//! Google rectangle and circle adapters.

use super::api::GoogleShapeHandle;
use super::map::GoogleMap;
use crate::error::GeoMapError;
use crate::geo::{GeoBounds, GeoPoint};
use crate::map::{BoxFuture, GeoCircleImplementation, GeoRectImplementation};
use crate::shape::GeoCircleConfig;
use std::sync::Arc;

/// A `google.maps.Rectangle` on a [`GoogleMap`].
pub struct GoogleRect {
    handle: Arc<dyn GoogleShapeHandle>,
}

impl GoogleRect {
    pub fn create(map: &GoogleMap, bounds: GeoBounds) -> Result<Self, GeoMapError> {
        let handle = map.api()?.create_rectangle(map.map_handle()?, bounds)?;
        Ok(Self { handle })
    }
}

impl GeoRectImplementation for GoogleRect {
    fn get_bounds(&self) -> BoxFuture<'_, GeoBounds> {
        Box::pin(async move { self.handle.get_bounds() })
    }

    fn covers_location(&self, point: GeoPoint) -> BoxFuture<'_, bool> {
        Box::pin(async move { self.handle.get_bounds().contains(point) })
    }
}

/// A `google.maps.Circle` on a [`GoogleMap`].
pub struct GoogleCircle {
    handle: Arc<dyn GoogleShapeHandle>,
}

impl GoogleCircle {
    pub fn create(map: &GoogleMap, config: GeoCircleConfig) -> Result<Self, GeoMapError> {
        let handle = map
            .api()?
            .create_circle(map.map_handle()?, config.position, config.radius)?;
        Ok(Self { handle })
    }
}

impl GeoCircleImplementation for GoogleCircle {
    fn get_bounds(&self) -> BoxFuture<'_, GeoBounds> {
        Box::pin(async move { self.handle.get_bounds() })
    }
}
