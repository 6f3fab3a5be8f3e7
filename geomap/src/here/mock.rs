//! In-memory `H` stand-in for tests.

use super::api::*;
use crate::error::VendorError;
use crate::geo::{GeoBounds, GeoMapViewport, GeoPoint, EARTH_RADIUS_METERS};
use crate::map::MountTarget;
use crate::shape::circle_bounds;
use std::sync::{Arc, Mutex};

type Canned<T> = Mutex<Option<Result<T, HereServiceError>>>;

#[derive(Default)]
pub struct MockHereApi {
    pub platform: Arc<MockHerePlatform>,
    pub platform_options: Mutex<Vec<HerePlatformOptions>>,
    pub markers: Mutex<Vec<Arc<MockHereMarker>>>,
}

impl MockHereApi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HereMapsApi for MockHereApi {
    fn create_platform(
        &self,
        options: HerePlatformOptions,
    ) -> Result<Arc<dyn HerePlatform>, VendorError> {
        self.platform_options.lock().unwrap().push(options);
        Ok(Arc::clone(&self.platform) as Arc<dyn HerePlatform>)
    }

    fn create_marker(
        &self,
        position: GeoPoint,
        icon: HereIcon,
    ) -> Result<Arc<dyn HereMarkerHandle>, VendorError> {
        let marker = Arc::new(MockHereMarker {
            position: Mutex::new(position),
            icon: Mutex::new(icon),
        });
        self.markers.lock().unwrap().push(Arc::clone(&marker));
        Ok(marker)
    }

    fn create_rect(&self, bounds: GeoBounds) -> Result<Arc<dyn HereShapeHandle>, VendorError> {
        Ok(Arc::new(MockHereShape { bounds }))
    }

    fn create_circle(
        &self,
        center: GeoPoint,
        radius: f64,
    ) -> Result<Arc<dyn HereShapeHandle>, VendorError> {
        Ok(Arc::new(MockHereShape {
            bounds: circle_bounds(center, radius, EARTH_RADIUS_METERS),
        }))
    }
}

#[derive(Default)]
pub struct MockHerePlatform {
    pub maps: Mutex<Vec<Arc<MockHereMap>>>,
    pub search_queries: Mutex<Vec<HerePlaceQuery>>,
    pub search_response: Canned<Vec<HerePlace>>,
    pub lookup_response: Canned<Option<HerePlace>>,
    pub reverse_response: Canned<Vec<HereLocation>>,
    pub geocode_response: Canned<Vec<HereLocation>>,
    pub geocode_queries: Mutex<Vec<HereGeocodeQuery>>,
    pub throw: Mutex<Option<String>>,
}

impl MockHerePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, response: Result<Vec<HerePlace>, HereServiceError>) -> Self {
        *self.search_response.lock().unwrap() = Some(response);
        self
    }

    pub fn with_lookup(self, response: Result<Option<HerePlace>, HereServiceError>) -> Self {
        *self.lookup_response.lock().unwrap() = Some(response);
        self
    }

    pub fn with_reverse(self, response: Result<Vec<HereLocation>, HereServiceError>) -> Self {
        *self.reverse_response.lock().unwrap() = Some(response);
        self
    }

    pub fn with_geocode(self, response: Result<Vec<HereLocation>, HereServiceError>) -> Self {
        *self.geocode_response.lock().unwrap() = Some(response);
        self
    }

    pub fn throwing(self, message: &str) -> Self {
        *self.throw.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn last_map(&self) -> Option<Arc<MockHereMap>> {
        self.maps.lock().unwrap().last().cloned()
    }

    fn check_throw(&self) -> Result<(), VendorError> {
        match self.throw.lock().unwrap().as_ref() {
            Some(message) => Err(VendorError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn respond<T: Clone + Default + Send + 'static>(
        canned: &Canned<T>,
    ) -> HereResponse<'static, T> {
        let response = canned.lock().unwrap().clone().unwrap_or(Ok(T::default()));
        Box::pin(async move { response })
    }
}

impl HerePlatform for MockHerePlatform {
    fn create_map(
        &self,
        target: &MountTarget,
        options: HereMapOptions,
    ) -> Result<Arc<dyn HereMapHandle>, VendorError> {
        let map = Arc::new(MockHereMap::new(target.id(), options));
        self.maps.lock().unwrap().push(Arc::clone(&map));
        Ok(map)
    }

    fn search_places(
        &self,
        query: HerePlaceQuery,
    ) -> Result<HereResponse<'_, Vec<HerePlace>>, VendorError> {
        self.check_throw()?;
        self.search_queries.lock().unwrap().push(query);
        Ok(Self::respond(&self.search_response))
    }

    fn lookup_place(
        &self,
        _id: String,
    ) -> Result<HereResponse<'_, Option<HerePlace>>, VendorError> {
        self.check_throw()?;
        Ok(Self::respond(&self.lookup_response))
    }

    fn reverse_geocode(
        &self,
        _point: GeoPoint,
    ) -> Result<HereResponse<'_, Vec<HereLocation>>, VendorError> {
        self.check_throw()?;
        Ok(Self::respond(&self.reverse_response))
    }

    fn geocode(
        &self,
        query: HereGeocodeQuery,
    ) -> Result<HereResponse<'_, Vec<HereLocation>>, VendorError> {
        self.check_throw()?;
        self.geocode_queries.lock().unwrap().push(query);
        Ok(Self::respond(&self.geocode_response))
    }
}

pub struct MockHereMapState {
    pub center: GeoPoint,
    pub zoom: f64,
    pub base_layer: &'static str,
    pub bounds: GeoBounds,
    pub padding: Option<GeoMapViewport>,
    pub markers: usize,
    pub shapes: usize,
}

pub struct MockHereMap {
    pub element_id: String,
    pub options: HereMapOptions,
    pub state: Mutex<MockHereMapState>,
    pub listeners: Mutex<Vec<(String, HereListener)>>,
}

impl MockHereMap {
    fn new(element_id: &str, options: HereMapOptions) -> Self {
        Self {
            element_id: element_id.to_string(),
            state: Mutex::new(MockHereMapState {
                center: options.center,
                zoom: options.zoom,
                base_layer: options.base_layer,
                bounds: GeoBounds::from_point(options.center),
                padding: None,
                markers: 0,
                shapes: 0,
            }),
            options,
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn emit(&self, event: &str, position: Option<GeoPoint>) {
        let listeners: Vec<_> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(position);
        }
    }
}

impl HereMapHandle for MockHereMap {
    fn get_center(&self) -> GeoPoint {
        self.state.lock().unwrap().center
    }

    fn set_center(&self, center: GeoPoint) {
        self.state.lock().unwrap().center = center;
    }

    fn get_zoom(&self) -> f64 {
        self.state.lock().unwrap().zoom
    }

    fn set_zoom(&self, zoom: f64) {
        self.state.lock().unwrap().zoom = zoom;
    }

    fn set_base_layer(&self, layer: &'static str) {
        self.state.lock().unwrap().base_layer = layer;
    }

    fn get_view_bounds(&self) -> GeoBounds {
        self.state.lock().unwrap().bounds
    }

    fn set_view_bounds(&self, bounds: GeoBounds) {
        let mut state = self.state.lock().unwrap();
        state.bounds = bounds;
        state.center = bounds.center();
    }

    fn set_padding(&self, padding: GeoMapViewport) {
        self.state.lock().unwrap().padding = Some(padding);
    }

    fn add_object(&self, object: HereObject) {
        let mut state = self.state.lock().unwrap();
        match object {
            HereObject::Marker(_) => state.markers += 1,
            HereObject::Shape(_) => state.shapes += 1,
        }
    }

    fn remove_object(&self, object: HereObject) {
        let mut state = self.state.lock().unwrap();
        match object {
            HereObject::Marker(_) => state.markers -= 1,
            HereObject::Shape(_) => state.shapes -= 1,
        }
    }

    fn add_listener(&self, event: &str, listener: HereListener) {
        self.listeners
            .lock()
            .unwrap()
            .push((event.to_string(), listener));
    }
}

pub struct MockHereMarker {
    pub position: Mutex<GeoPoint>,
    pub icon: Mutex<HereIcon>,
}

impl HereMarkerHandle for MockHereMarker {
    fn get_position(&self) -> GeoPoint {
        *self.position.lock().unwrap()
    }

    fn set_position(&self, position: GeoPoint) {
        *self.position.lock().unwrap() = position;
    }

    fn set_icon(&self, icon: HereIcon) {
        *self.icon.lock().unwrap() = icon;
    }
}

pub struct MockHereShape {
    pub bounds: GeoBounds,
}

impl HereShapeHandle for MockHereShape {
    fn get_bounds(&self) -> GeoBounds {
        self.bounds
    }
}
