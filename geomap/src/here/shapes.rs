//! HERE rectangle and circle adapters.

use super::api::{HereObject, HereShapeHandle};
use super::map::HereMap;
use crate::error::GeoMapError;
use crate::geo::{GeoBounds, GeoPoint};
use crate::map::{BoxFuture, GeoCircleImplementation, GeoRectImplementation};
use crate::shape::GeoCircleConfig;
use std::sync::Arc;

fn add_shape(
    map: &HereMap,
    create: impl FnOnce() -> Result<Arc<dyn HereShapeHandle>, GeoMapError>,
) -> Result<Arc<dyn HereShapeHandle>, GeoMapError> {
    let map_handle = map.map_handle()?;
    let handle = create()?;
    map_handle.add_object(HereObject::Shape(Arc::clone(&handle)));
    Ok(handle)
}

/// An `H.map.Rect` on a [`HereMap`].
pub struct HereRect {
    handle: Arc<dyn HereShapeHandle>,
}

impl HereRect {
    pub fn create(map: &HereMap, bounds: GeoBounds) -> Result<Self, GeoMapError> {
        let api = map.api()?;
        let handle = add_shape(map, || Ok(api.create_rect(bounds)?))?;
        Ok(Self { handle })
    }
}

impl GeoRectImplementation for HereRect {
    fn get_bounds(&self) -> BoxFuture<'_, GeoBounds> {
        Box::pin(async move { self.handle.get_bounds() })
    }

    fn covers_location(&self, point: GeoPoint) -> BoxFuture<'_, bool> {
        Box::pin(async move { self.handle.get_bounds().contains(point) })
    }
}

/// An `H.map.Circle` on a [`HereMap`].
pub struct HereCircle {
    handle: Arc<dyn HereShapeHandle>,
}

impl HereCircle {
    pub fn create(map: &HereMap, config: GeoCircleConfig) -> Result<Self, GeoMapError> {
        let api = map.api()?;
        let GeoCircleConfig { position, radius } = config;
        let handle = add_shape(map, || Ok(api.create_circle(position, radius)?))?;
        Ok(Self { handle })
    }
}

impl GeoCircleImplementation for HereCircle {
    fn get_bounds(&self) -> BoxFuture<'_, GeoBounds> {
        Box::pin(async move { self.handle.get_bounds() })
    }
}
