//! In-memory `google.maps` stand-in for tests.

use super::api::*;
use crate::error::VendorError;
use crate::geo::{haversine_distance, GeoBounds, GeoMapViewport, GeoPoint};
use crate::map::{BoxFuture, MountTarget};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Records every object created and answers service calls with canned
/// responses.
#[derive(Default)]
pub struct MockGoogleApi {
    pub maps: Mutex<Vec<Arc<MockGoogleMap>>>,
    pub markers: Mutex<Vec<Arc<MockGoogleMarker>>>,
    pub marker_options: Mutex<Vec<MarkerIcon>>,
    pub shapes: Mutex<Vec<Arc<MockGoogleShape>>>,
    pub polylines: Mutex<Vec<Arc<MockGooglePolyline>>>,
    pub find_place_requests: Mutex<Vec<FindPlaceRequest>>,
    pub geocode_requests: Mutex<Vec<GeocoderQuery>>,
    pub route_requests: Mutex<Vec<DirectionsRequest>>,
    pub find_place_response: Mutex<Option<(Vec<PlaceResult>, GoogleStatus)>>,
    pub details_response: Mutex<Option<(Option<PlaceResult>, GoogleStatus)>>,
    pub geocode_response: Mutex<Option<(Vec<GeocoderResponse>, GoogleStatus)>>,
    pub route_response: Mutex<Option<DirectionsResult>>,
    /// When set, service calls throw this message.
    pub throw: Mutex<Option<String>>,
}

impl MockGoogleApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_find_place(self, results: Vec<PlaceResult>, status: GoogleStatus) -> Self {
        *self.find_place_response.lock().unwrap() = Some((results, status));
        self
    }

    pub fn with_details(self, result: Option<PlaceResult>, status: GoogleStatus) -> Self {
        *self.details_response.lock().unwrap() = Some((result, status));
        self
    }

    pub fn with_geocode(self, results: Vec<GeocoderResponse>, status: GoogleStatus) -> Self {
        *self.geocode_response.lock().unwrap() = Some((results, status));
        self
    }

    pub fn with_route(self, result: DirectionsResult) -> Self {
        *self.route_response.lock().unwrap() = Some(result);
        self
    }

    pub fn throwing(self, message: &str) -> Self {
        *self.throw.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn last_map(&self) -> Option<Arc<MockGoogleMap>> {
        self.maps.lock().unwrap().last().cloned()
    }

    fn check_throw(&self) -> Result<(), VendorError> {
        match self.throw.lock().unwrap().as_ref() {
            Some(message) => Err(VendorError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl GoogleMapsApi for MockGoogleApi {
    fn create_map(
        &self,
        target: &MountTarget,
        options: GoogleMapOptions,
    ) -> Result<Arc<dyn GoogleMapHandle>, VendorError> {
        let map = Arc::new(MockGoogleMap::new(target.id(), options));
        self.maps.lock().unwrap().push(Arc::clone(&map));
        Ok(map)
    }

    fn create_marker(
        &self,
        options: MarkerOptions,
    ) -> Result<Arc<dyn GoogleMarkerHandle>, VendorError> {
        let marker = Arc::new(MockGoogleMarker {
            position: Mutex::new(options.position),
            icon: Mutex::new(options.icon.clone()),
            detached: AtomicUsize::new(0),
        });
        self.marker_options.lock().unwrap().push(options.icon);
        self.markers.lock().unwrap().push(Arc::clone(&marker));
        Ok(marker)
    }

    fn create_rectangle(
        &self,
        _map: Arc<dyn GoogleMapHandle>,
        bounds: GeoBounds,
    ) -> Result<Arc<dyn GoogleShapeHandle>, VendorError> {
        let shape = Arc::new(MockGoogleShape::new(bounds));
        self.shapes.lock().unwrap().push(Arc::clone(&shape));
        Ok(shape)
    }

    fn create_circle(
        &self,
        _map: Arc<dyn GoogleMapHandle>,
        center: GeoPoint,
        radius: f64,
    ) -> Result<Arc<dyn GoogleShapeHandle>, VendorError> {
        let bounds = crate::shape::circle_bounds(center, radius, crate::geo::EARTH_RADIUS_METERS);
        let shape = Arc::new(MockGoogleShape::new(bounds));
        self.shapes.lock().unwrap().push(Arc::clone(&shape));
        Ok(shape)
    }

    fn create_polyline(
        &self,
        options: PolylineOptions,
    ) -> Result<Arc<dyn GooglePolylineHandle>, VendorError> {
        let line = Arc::new(MockGooglePolyline {
            options,
            attached: AtomicBool::new(false),
        });
        self.polylines.lock().unwrap().push(Arc::clone(&line));
        Ok(line)
    }

    fn find_place_from_query(
        &self,
        request: FindPlaceRequest,
    ) -> Result<BoxFuture<'_, (Vec<PlaceResult>, GoogleStatus)>, VendorError> {
        self.check_throw()?;
        self.find_place_requests.lock().unwrap().push(request);
        let response = self
            .find_place_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or((Vec::new(), GoogleStatus::ZeroResults));
        Ok(Box::pin(async move { response }))
    }

    fn get_details(
        &self,
        _request: PlaceDetailsRequest,
    ) -> Result<BoxFuture<'_, (Option<PlaceResult>, GoogleStatus)>, VendorError> {
        self.check_throw()?;
        let response = self
            .details_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or((None, GoogleStatus::NotFound));
        Ok(Box::pin(async move { response }))
    }

    fn geocode(
        &self,
        request: GeocoderQuery,
    ) -> Result<BoxFuture<'_, (Vec<GeocoderResponse>, GoogleStatus)>, VendorError> {
        self.check_throw()?;
        self.geocode_requests.lock().unwrap().push(request);
        let response = self
            .geocode_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or((Vec::new(), GoogleStatus::ZeroResults));
        Ok(Box::pin(async move { response }))
    }

    fn route(
        &self,
        request: DirectionsRequest,
    ) -> Result<BoxFuture<'_, DirectionsResult>, VendorError> {
        self.check_throw()?;
        self.route_requests.lock().unwrap().push(request);
        let response = self
            .route_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_default();
        Ok(Box::pin(async move { response }))
    }

    fn compute_distance_between(&self, from: GeoPoint, to: GeoPoint, radius: Option<f64>) -> f64 {
        haversine_distance(from, to, radius)
    }
}

pub struct MockGoogleMapState {
    pub center: GeoPoint,
    pub zoom: f64,
    pub map_type: GoogleMapTypeId,
    pub layer: Option<GoogleOverlayLayer>,
    pub bounds: Option<GeoBounds>,
    pub padding: Option<GeoMapViewport>,
}

pub struct MockGoogleMap {
    pub element_id: String,
    pub options: GoogleMapOptions,
    pub state: Mutex<MockGoogleMapState>,
    pub listeners: Mutex<Vec<(String, GoogleListener)>>,
}

impl MockGoogleMap {
    fn new(element_id: &str, options: GoogleMapOptions) -> Self {
        Self {
            element_id: element_id.to_string(),
            state: Mutex::new(MockGoogleMapState {
                center: options.center,
                zoom: options.zoom,
                map_type: options.map_type_id,
                layer: None,
                bounds: None,
                padding: None,
            }),
            options,
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Invokes every listener registered for `event`.
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

impl GoogleMapHandle for MockGoogleMap {
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

    fn get_map_type_id(&self) -> GoogleMapTypeId {
        self.state.lock().unwrap().map_type
    }

    fn set_map_type_id(&self, map_type: GoogleMapTypeId) {
        self.state.lock().unwrap().map_type = map_type;
    }

    fn set_overlay_layer(&self, layer: Option<GoogleOverlayLayer>) {
        self.state.lock().unwrap().layer = layer;
    }

    fn get_bounds(&self) -> Option<GeoBounds> {
        self.state.lock().unwrap().bounds
    }

    fn fit_bounds(&self, bounds: GeoBounds, padding: Option<GeoMapViewport>) {
        let mut state = self.state.lock().unwrap();
        state.bounds = Some(bounds);
        state.padding = padding;
        state.center = bounds.center();
    }

    fn add_listener(&self, event: &str, listener: GoogleListener) {
        self.listeners
            .lock()
            .unwrap()
            .push((event.to_string(), listener));
    }
}

pub struct MockGoogleMarker {
    pub position: Mutex<GeoPoint>,
    pub icon: Mutex<MarkerIcon>,
    pub detached: AtomicUsize,
}

impl GoogleMarkerHandle for MockGoogleMarker {
    fn get_position(&self) -> GeoPoint {
        *self.position.lock().unwrap()
    }

    fn set_position(&self, position: GeoPoint) {
        *self.position.lock().unwrap() = position;
    }

    fn set_icon(&self, icon: MarkerIcon) {
        *self.icon.lock().unwrap() = icon;
    }

    fn detach(&self) {
        self.detached.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MockGoogleShape {
    pub bounds: GeoBounds,
    pub detached: AtomicBool,
}

impl MockGoogleShape {
    fn new(bounds: GeoBounds) -> Self {
        Self {
            bounds,
            detached: AtomicBool::new(false),
        }
    }
}

impl GoogleShapeHandle for MockGoogleShape {
    fn get_bounds(&self) -> GeoBounds {
        self.bounds
    }

    fn detach(&self) {
        self.detached.store(true, Ordering::SeqCst);
    }
}

pub struct MockGooglePolyline {
    pub options: PolylineOptions,
    pub attached: AtomicBool,
}

impl MockGooglePolyline {
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }
}

impl GooglePolylineHandle for MockGooglePolyline {
    fn set_map(&self, map: Option<Arc<dyn GoogleMapHandle>>) {
        self.attached.store(map.is_some(), Ordering::SeqCst);
    }
}
